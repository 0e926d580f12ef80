//! Center-wide configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::children::AgeGroup;

/// Configuration for the center backend: form validation limits plus the
/// licensed capacity per age group used by the enrollment summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CenterConfig {
    pub max_name_length: usize,
    pub max_description_length: usize,
    pub currency_symbol: String,
    pub licensed_capacity: BTreeMap<AgeGroup, usize>,
}

impl Default for CenterConfig {
    fn default() -> Self {
        let mut licensed_capacity = BTreeMap::new();
        licensed_capacity.insert(AgeGroup::Infant, 8);
        licensed_capacity.insert(AgeGroup::Toddler, 12);
        licensed_capacity.insert(AgeGroup::Preschool, 20);
        licensed_capacity.insert(AgeGroup::SchoolAge, 24);

        Self {
            max_name_length: 100,
            max_description_length: 256,
            currency_symbol: "$".to_string(),
            licensed_capacity,
        }
    }
}
