//! Derived views over the store.
//!
//! Every function here is a pure read: it recomputes its result from the
//! store contents on each call and caches nothing, so a view can never go
//! stale. Callers re-run the view after mutating.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use shared::{
    AgeGroup, CenterConfig, ChildProfile, EnrollmentStatus, MealType, Money, ParentContact,
};

use crate::domain::store::CenterStore;

/// Entities with a human display name, searchable by substring.
pub trait NamedEntity {
    fn display_name(&self) -> String;
}

impl NamedEntity for ChildProfile {
    fn display_name(&self) -> String {
        ChildProfile::display_name(self)
    }
}

impl NamedEntity for ParentContact {
    fn display_name(&self) -> String {
        ParentContact::display_name(self)
    }
}

fn zeroed_buckets() -> BTreeMap<AgeGroup, usize> {
    AgeGroup::ALL.iter().map(|group| (*group, 0)).collect()
}

/// Active children per age group. Every bucket is present even when zero;
/// children without an assigned age group are counted in no bucket, and
/// non-active children are excluded entirely.
pub fn counts_by_age_group(store: &CenterStore) -> BTreeMap<AgeGroup, usize> {
    let mut counts = zeroed_buckets();

    for child in store.children().iter() {
        if child.enrollment_status != EnrollmentStatus::Active {
            continue;
        }
        if let Some(group) = child.age_group {
            *counts.entry(group).or_insert(0) += 1;
        }
    }

    counts
}

/// Licensed capacity minus active headcount per age group, floored at
/// zero when a group is over its license.
pub fn open_spots_by_age_group(
    store: &CenterStore,
    config: &CenterConfig,
) -> BTreeMap<AgeGroup, usize> {
    let counts = counts_by_age_group(store);

    AgeGroup::ALL
        .iter()
        .map(|group| {
            let capacity = config.licensed_capacity.get(group).copied().unwrap_or(0);
            let used = counts.get(group).copied().unwrap_or(0);
            (*group, capacity.saturating_sub(used))
        })
        .collect()
}

/// Outstanding balance for one parent account: the sum of `balance` over
/// exactly the invoices in an outstanding status (issued, partial,
/// overdue). Draft, paid, and void invoices never contribute.
pub fn account_balance(store: &CenterStore, account_id: &str) -> Money {
    store
        .invoices()
        .iter()
        .filter(|invoice| invoice.account_id == account_id && invoice.status.is_outstanding())
        .map(|invoice| invoice.balance)
        .sum()
}

/// Case-insensitive substring filter over display names. An empty query
/// returns the input unchanged; input order is preserved.
pub fn filter_by_name<T: NamedEntity + Clone>(entities: &[T], query: &str) -> Vec<T> {
    if query.is_empty() {
        return entities.to_vec();
    }

    let needle = query.to_lowercase();
    entities
        .iter()
        .filter(|entity| entity.display_name().to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Headcount per age group for one meal on one date. A record counts when
/// its date matches and its flag for `meal` is set; records pointing at a
/// deleted child, and children without an age group, are skipped.
pub fn meal_attendance_for_date(
    store: &CenterStore,
    date: NaiveDate,
    meal: MealType,
) -> BTreeMap<AgeGroup, usize> {
    let mut counts = zeroed_buckets();

    for record in store.attendance().iter() {
        if record.date != date || !record.meals.is_set(meal) {
            continue;
        }
        let Some(child) = store.children().get(&record.child_id) else {
            continue;
        };
        if let Some(group) = child.age_group {
            *counts.entry(group).or_insert(0) += 1;
        }
    }

    counts
}
