//! Child↔parent relationship maintenance.
//!
//! Links are stored on the child side only: `parent_ids` carries the set of
//! linked contact ids and `guardians` carries the per-relationship detail.
//! These operations keep the two in lockstep; nothing else should touch
//! them directly.

use shared::{Guardian, ParentContact};

use crate::domain::store::CenterStore;

impl CenterStore {
    /// Link a parent contact to a child. Returns false (no-op) when the
    /// child is absent. Idempotent on membership: linking an already-linked
    /// parent only refreshes the relationship label. The contact itself is
    /// not required to exist; readers tolerate dangling ids.
    pub fn link_parent(&mut self, child_id: &str, parent_id: &str, relationship: &str) -> bool {
        self.children_mut().update(child_id, |child| {
            if !child.parent_ids.iter().any(|id| id == parent_id) {
                child.parent_ids.push(parent_id.to_string());
            }

            match child
                .guardians
                .iter_mut()
                .find(|g| g.parent_id == parent_id)
            {
                Some(guardian) => guardian.relationship = relationship.to_string(),
                None => child
                    .guardians
                    .push(Guardian::with_defaults(parent_id, relationship)),
            }
        })
    }

    /// Remove a parent link from a child, clearing both `parent_ids` and
    /// `guardians`. Returns false when the child is absent. For an existing
    /// child this is the exact inverse of `link_parent`.
    pub fn unlink_parent(&mut self, child_id: &str, parent_id: &str) -> bool {
        self.children_mut().update(child_id, |child| {
            child.parent_ids.retain(|id| id != parent_id);
            child.guardians.retain(|g| g.parent_id != parent_id);
        })
    }

    /// The contacts linked to a child, in contact-registration order.
    /// Dangling parent ids are skipped; an absent child yields an empty list.
    pub fn parents_of(&self, child_id: &str) -> Vec<ParentContact> {
        let Some(child) = self.children().get(child_id) else {
            return Vec::new();
        };

        self.contacts()
            .iter()
            .filter(|contact| child.parent_ids.iter().any(|id| id == &contact.id))
            .cloned()
            .collect()
    }

    /// Make `parent_id` the single primary contact among the contacts
    /// linked to `child_id`: every linked contact's `primary_contact` flag
    /// is rewritten in one pass, so exactly one ends up set. Returns false
    /// when the child is absent or the parent is not linked to it.
    pub fn set_primary_contact(&mut self, child_id: &str, parent_id: &str) -> bool {
        let linked = match self.children().get(child_id) {
            Some(child) => child.parent_ids.clone(),
            None => return false,
        };

        if !linked.iter().any(|id| id == parent_id) {
            return false;
        }

        for id in &linked {
            self.contacts_mut().update(id, |contact| {
                contact.primary_contact = contact.id == parent_id;
            });
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use shared::{
        ChildProfile, CommunicationPrefs, EnrollmentStatus, MedicalInfo, WeeklySchedule,
    };

    fn sample_child() -> ChildProfile {
        let now = Utc::now();
        ChildProfile {
            id: String::new(),
            first_name: "Emma".to_string(),
            last_name: "Johnson".to_string(),
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

    fn sample_contact(name: &str) -> ParentContact {
        let now = Utc::now();
        ParentContact {
            id: String::new(),
            full_name: name.to_string(),
            relationship: "Mother".to_string(),
            email: "parent@example.com".to_string(),
            phone: "555-0100".to_string(),
            address: "12 Elm St".to_string(),
            employer: None,
            primary_contact: false,
            emergency_contact: false,
            authorized_pickup: true,
            prefs: CommunicationPrefs::default(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_link_then_unlink_restores_prior_state() {
        let mut store = CenterStore::new();
        let child_id = store.children_mut().add(sample_child());
        let parent_id = store.contacts_mut().add(sample_contact("Sarah Johnson"));

        let before = store.children().get(&child_id).unwrap().clone();

        assert!(store.link_parent(&child_id, &parent_id, "Mother"));
        assert!(store.unlink_parent(&child_id, &parent_id));

        let after = store.children().get(&child_id).unwrap();
        assert_eq!(after.parent_ids, before.parent_ids);
        assert_eq!(after.guardians, before.guardians);
    }

    #[test]
    fn test_link_is_idempotent_on_membership() {
        let mut store = CenterStore::new();
        let child_id = store.children_mut().add(sample_child());
        let parent_id = store.contacts_mut().add(sample_contact("Sarah Johnson"));

        assert!(store.link_parent(&child_id, &parent_id, "Mother"));
        assert!(store.link_parent(&child_id, &parent_id, "Stepmother"));

        let child = store.children().get(&child_id).unwrap();
        assert_eq!(child.parent_ids.len(), 1);
        assert_eq!(child.guardians.len(), 1);
        // Second link refreshed the label
        assert_eq!(child.guardians[0].relationship, "Stepmother");
    }

    #[test]
    fn test_link_sets_guardian_defaults() {
        let mut store = CenterStore::new();
        let child_id = store.children_mut().add(sample_child());

        assert!(store.link_parent(&child_id, "parent::99", "Grandfather"));

        let child = store.children().get(&child_id).unwrap();
        let guardian = &child.guardians[0];
        assert_eq!(guardian.parent_id, "parent::99");
        assert!(guardian.authorized_pickup);
        assert!(guardian.legal_custody);
        assert!(guardian.financially_responsible);
        assert!(guardian.receives_correspondence);
    }

    #[test]
    fn test_link_absent_child_is_a_no_op() {
        let mut store = CenterStore::new();
        assert!(!store.link_parent("child::missing", "parent::1", "Mother"));
        assert!(!store.unlink_parent("child::missing", "parent::1"));
    }

    #[test]
    fn test_parents_of_follows_contact_order_and_skips_dangling() {
        let mut store = CenterStore::new();
        let child_id = store.children_mut().add(sample_child());
        let first = store.contacts_mut().add(sample_contact("Sarah Johnson"));
        let second = store.contacts_mut().add(sample_contact("Mark Johnson"));

        // Link in reverse order plus one dangling id
        store.link_parent(&child_id, &second, "Father");
        store.link_parent(&child_id, &first, "Mother");
        store.link_parent(&child_id, "parent::gone", "Aunt");

        let parents = store.parents_of(&child_id);
        let names: Vec<&str> = parents.iter().map(|p| p.full_name.as_str()).collect();
        assert_eq!(names, vec!["Sarah Johnson", "Mark Johnson"]);
    }

    #[test]
    fn test_parents_of_absent_child_is_empty() {
        let store = CenterStore::new();
        assert!(store.parents_of("child::missing").is_empty());
    }

    #[test]
    fn test_set_primary_contact_is_exclusive() {
        let mut store = CenterStore::new();
        let child_id = store.children_mut().add(sample_child());
        let first = store.contacts_mut().add(sample_contact("Sarah Johnson"));
        let second = store.contacts_mut().add(sample_contact("Mark Johnson"));
        store.link_parent(&child_id, &first, "Mother");
        store.link_parent(&child_id, &second, "Father");

        assert!(store.set_primary_contact(&child_id, &first));
        assert!(store.contacts().get(&first).unwrap().primary_contact);
        assert!(!store.contacts().get(&second).unwrap().primary_contact);

        // Moving the flag clears the previous holder
        assert!(store.set_primary_contact(&child_id, &second));
        assert!(!store.contacts().get(&first).unwrap().primary_contact);
        assert!(store.contacts().get(&second).unwrap().primary_contact);
    }

    #[test]
    fn test_set_primary_contact_requires_link() {
        let mut store = CenterStore::new();
        let child_id = store.children_mut().add(sample_child());
        let unlinked = store.contacts_mut().add(sample_contact("Stranger"));

        assert!(!store.set_primary_contact(&child_id, &unlinked));
        assert!(!store.set_primary_contact("child::missing", &unlinked));
        assert!(!store.contacts().get(&unlinked).unwrap().primary_contact);
    }
}
