//! Meal templates and grocery fixture rows for kitchen planning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::children::AgeGroup;

/// A reusable planned meal. Compliance is a staff judgement recorded as a
/// flag plus notes; the center does no nutrition math.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealTemplate {
    pub id: String,
    pub name: String,
    pub ingredients: Vec<String>,
    pub target_age_groups: Vec<AgeGroup>,
    pub dietary_tags: Vec<String>,
    pub compliant: bool,
    pub compliance_notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MealTemplate {
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("meal::{}", epoch_millis)
    }
}

/// One row of the preset grocery table. Read-only fixture data, no id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroceryItem {
    pub name: String,
    pub category: String,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMealTemplateRequest {
    pub name: String,
    pub ingredients: Vec<String>,
    pub target_age_groups: Vec<AgeGroup>,
    pub dietary_tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateMealTemplateRequest {
    pub name: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub target_age_groups: Option<Vec<AgeGroup>>,
    pub dietary_tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealTemplateResponse {
    pub template: MealTemplate,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealTemplateListResponse {
    pub templates: Vec<MealTemplate>,
}
