//! # Entity Store
//!
//! The in-memory id→record maps holding all center state, one map per
//! entity kind, plus the `CenterStore` aggregate that owns them.
//!
//! ## Key Responsibilities
//!
//! - **Id assignment**: entities added with an empty id get a fresh
//!   `kind::epoch_millis` id, bumping the millisecond on collision
//! - **Permissive mutation**: update/remove on an absent id are silent
//!   no-ops reported through the return value, never errors
//! - **Insertion order**: iteration and list responses follow the order
//!   entities were added, with removal preserving the remainder's order

use chrono::{NaiveDate, Utc};
use indexmap::IndexMap;

use shared::{
    AttendanceRecord, BankingInfo, ChildProfile, Invoice, MealTemplate, ParentContact, Payment,
};

/// A record kind the store can hold. `PREFIX` is the id namespace, e.g.
/// `"child"` for ids like `child::1702516122000`.
pub trait Entity {
    const PREFIX: &'static str;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
}

macro_rules! impl_entity {
    ($type:ty, $prefix:literal) => {
        impl Entity for $type {
            const PREFIX: &'static str = $prefix;

            fn id(&self) -> &str {
                &self.id
            }

            fn set_id(&mut self, id: String) {
                self.id = id;
            }
        }
    };
}

impl_entity!(ChildProfile, "child");
impl_entity!(ParentContact, "parent");
impl_entity!(BankingInfo, "banking");
impl_entity!(Invoice, "invoice");
impl_entity!(Payment, "payment");
impl_entity!(AttendanceRecord, "attendance");
impl_entity!(MealTemplate, "meal");

/// One id→record map. Wraps an `IndexMap` so iteration follows insertion
/// order and re-adding an existing id replaces the record in place.
#[derive(Debug, Clone)]
pub struct EntityMap<T: Entity> {
    entries: IndexMap<String, T>,
}

impl<T: Entity> Default for EntityMap<T> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<T: Entity> EntityMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity and return its id. An empty id gets a generated
    /// `PREFIX::epoch_millis` id, bumping the millisecond while the id is
    /// taken so two adds in the same instant never collide. A non-empty id
    /// is kept as-is; an existing entry under that id is replaced in place
    /// (last write wins). Total — never fails.
    pub fn add(&mut self, mut entity: T) -> String {
        if entity.id().is_empty() {
            let mut millis = Utc::now().timestamp_millis() as u64;
            let mut id = format!("{}::{}", T::PREFIX, millis);
            while self.entries.contains_key(&id) {
                millis += 1;
                id = format!("{}::{}", T::PREFIX, millis);
            }
            entity.set_id(id);
        }

        let id = entity.id().to_string();
        self.entries.insert(id.clone(), entity);
        id
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.entries.get(id)
    }

    /// Apply `apply` to the entity under `id`. Returns false without
    /// touching anything when the id is absent.
    pub fn update(&mut self, id: &str, apply: impl FnOnce(&mut T)) -> bool {
        match self.entries.get_mut(id) {
            Some(entity) => {
                apply(entity);
                true
            }
            None => false,
        }
    }

    /// Remove and return the entity under `id`, or None when absent.
    /// Uses `shift_remove` so the remaining entries keep insertion order.
    pub fn remove(&mut self, id: &str) -> Option<T> {
        self.entries.shift_remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entities in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }
}

/// All center state for one session: one `EntityMap` per entity kind.
///
/// Plain value type, constructed per session and handed to consumers
/// explicitly — shared mutable access goes through `MemoryConnection`,
/// never a global. The relationship and billing operations that span two
/// maps live in their own impl blocks.
#[derive(Debug, Clone, Default)]
pub struct CenterStore {
    children: EntityMap<ChildProfile>,
    contacts: EntityMap<ParentContact>,
    banking: EntityMap<BankingInfo>,
    invoices: EntityMap<Invoice>,
    payments: EntityMap<Payment>,
    attendance: EntityMap<AttendanceRecord>,
    meal_templates: EntityMap<MealTemplate>,
}

impl CenterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn children(&self) -> &EntityMap<ChildProfile> {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut EntityMap<ChildProfile> {
        &mut self.children
    }

    pub fn contacts(&self) -> &EntityMap<ParentContact> {
        &self.contacts
    }

    pub fn contacts_mut(&mut self) -> &mut EntityMap<ParentContact> {
        &mut self.contacts
    }

    pub fn banking(&self) -> &EntityMap<BankingInfo> {
        &self.banking
    }

    pub fn banking_mut(&mut self) -> &mut EntityMap<BankingInfo> {
        &mut self.banking
    }

    pub fn invoices(&self) -> &EntityMap<Invoice> {
        &self.invoices
    }

    pub fn invoices_mut(&mut self) -> &mut EntityMap<Invoice> {
        &mut self.invoices
    }

    pub fn payments(&self) -> &EntityMap<Payment> {
        &self.payments
    }

    pub fn payments_mut(&mut self) -> &mut EntityMap<Payment> {
        &mut self.payments
    }

    pub fn attendance(&self) -> &EntityMap<AttendanceRecord> {
        &self.attendance
    }

    pub fn attendance_mut(&mut self) -> &mut EntityMap<AttendanceRecord> {
        &mut self.attendance
    }

    pub fn meal_templates(&self) -> &EntityMap<MealTemplate> {
        &self.meal_templates
    }

    pub fn meal_templates_mut(&mut self) -> &mut EntityMap<MealTemplate> {
        &mut self.meal_templates
    }

    /// The attendance record for one child on one date, if present.
    pub fn attendance_for(&self, child_id: &str, date: NaiveDate) -> Option<&AttendanceRecord> {
        self.attendance
            .iter()
            .find(|record| record.child_id == child_id && record.date == date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::{EnrollmentStatus, MedicalInfo, WeeklySchedule};

    fn sample_child(name: &str) -> ChildProfile {
        let now = Utc::now();
        ChildProfile {
            id: String::new(),
            first_name: name.to_string(),
            last_name: "Test".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2021, 4, 12).unwrap(),
            gender: "F".to_string(),
            enrollment_date: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
            enrollment_status: EnrollmentStatus::Active,
            age_group: None,
            schedule: WeeklySchedule::default(),
            medical: MedicalInfo::default(),
            parent_ids: vec![],
            guardians: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_add_assigns_prefixed_id_and_get_round_trips() {
        let mut store = CenterStore::new();
        let child = sample_child("Emma");

        let id = store.children_mut().add(child.clone());

        assert!(id.starts_with("child::"));
        let stored = store.children().get(&id).expect("child should be stored");

        // Deep-equal to the input except for the assigned id
        let mut expected = child;
        expected.id = id.clone();
        assert_eq!(*stored, expected);
    }

    #[test]
    fn test_add_keeps_caller_provided_id() {
        let mut store = CenterStore::new();
        let mut child = sample_child("Emma");
        child.id = "child::42".to_string();

        let id = store.children_mut().add(child);
        assert_eq!(id, "child::42");
        assert!(store.children().contains("child::42"));
    }

    #[test]
    fn test_add_same_id_replaces_in_place() {
        let mut store = CenterStore::new();
        let mut first = sample_child("Emma");
        first.id = "child::1".to_string();
        let mut second = sample_child("Noah");
        second.id = "child::2".to_string();
        store.children_mut().add(first);
        store.children_mut().add(second);

        // Replace the first entry; order must not change
        let mut replacement = sample_child("Emilia");
        replacement.id = "child::1".to_string();
        store.children_mut().add(replacement);

        assert_eq!(store.children().len(), 2);
        let names: Vec<&str> = store
            .children()
            .iter()
            .map(|c| c.first_name.as_str())
            .collect();
        assert_eq!(names, vec!["Emilia", "Noah"]);
    }

    #[test]
    fn test_generated_ids_are_unique_within_one_millisecond() {
        let mut store = CenterStore::new();
        let mut ids = Vec::new();
        for i in 0..20 {
            ids.push(store.children_mut().add(sample_child(&format!("Child{}", i))));
        }

        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), ids.len());
        assert_eq!(store.children().len(), 20);
    }

    #[test]
    fn test_update_absent_id_is_a_no_op() {
        let mut store = CenterStore::new();
        let id = store.children_mut().add(sample_child("Emma"));

        let touched = store.children_mut().update("child::missing", |child| {
            child.first_name = "Changed".to_string();
        });

        assert!(!touched);
        assert_eq!(store.children().len(), 1);
        assert_eq!(store.children().get(&id).unwrap().first_name, "Emma");
    }

    #[test]
    fn test_remove_absent_id_is_a_no_op() {
        let mut store = CenterStore::new();
        store.children_mut().add(sample_child("Emma"));

        assert!(store.children_mut().remove("child::missing").is_none());
        assert_eq!(store.children().len(), 1);
    }

    #[test]
    fn test_remove_preserves_order_of_remainder() {
        let mut store = CenterStore::new();
        let a = store.children_mut().add(sample_child("A"));
        let b = store.children_mut().add(sample_child("B"));
        let c = store.children_mut().add(sample_child("C"));

        let removed = store.children_mut().remove(&b);
        assert_eq!(removed.unwrap().first_name, "B");

        let order: Vec<&str> = store.children().iter().map(|ch| ch.id.as_str()).collect();
        assert_eq!(order, vec![a.as_str(), c.as_str()]);
    }

    #[test]
    fn test_update_applies_closure() {
        let mut store = CenterStore::new();
        let id = store.children_mut().add(sample_child("Emma"));

        let touched = store.children_mut().update(&id, |child| {
            child.enrollment_status = EnrollmentStatus::Waitlist;
        });

        assert!(touched);
        assert_eq!(
            store.children().get(&id).unwrap().enrollment_status,
            EnrollmentStatus::Waitlist
        );
    }
}
