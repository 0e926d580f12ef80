//! Enrollment service: child profiles, parent contacts, and the family
//! links between them.

use anyhow::{anyhow, Result};
use chrono::Utc;
use log::{debug, info, warn};

use shared::{
    AgeGroup, ChildProfile, ChildProfileResponse, ContactListResponse, ContactResponse,
    CreateChildRequest, CreateContactRequest, EnrollmentStatus, EnrollmentSummaryResponse,
    ParentContact, RosterResponse, UpdateChildProfileRequest, UpdateContactRequest,
    UpdateMedicalInfoRequest, UpdateScheduleRequest,
};

use crate::domain::views;
use crate::storage::memory::MemoryConnection;

/// Service for managing enrollment in the center
#[derive(Clone)]
pub struct EnrollmentService {
    connection: MemoryConnection,
}

impl EnrollmentService {
    /// Create a new EnrollmentService
    pub fn new(connection: MemoryConnection) -> Self {
        Self { connection }
    }

    /// Enroll a new child
    pub fn create_child(&self, request: CreateChildRequest) -> Result<ChildProfileResponse> {
        info!(
            "Enrolling child: {} {}",
            request.first_name, request.last_name
        );

        self.validate_create_child(&request)?;

        let now = Utc::now();
        let mut child = ChildProfile {
            id: String::new(),
            first_name: request.first_name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
            date_of_birth: request.date_of_birth,
            gender: request.gender.trim().to_string(),
            enrollment_date: request.enrollment_date.unwrap_or_else(|| now.date_naive()),
            enrollment_status: request
                .enrollment_status
                .unwrap_or(EnrollmentStatus::Active),
            age_group: request.age_group,
            schedule: request.schedule.unwrap_or_default(),
            medical: request.medical.unwrap_or_default(),
            parent_ids: vec![],
            guardians: vec![],
            created_at: now,
            updated_at: now,
        };

        let id = self
            .connection
            .with_store_mut(|store| store.children_mut().add(child.clone()));
        child.id = id;

        info!("Enrolled child: {} with ID: {}", child.display_name(), child.id);

        Ok(ChildProfileResponse {
            child,
            success_message: "Child enrolled successfully".to_string(),
        })
    }

    /// Get a child by ID
    pub fn get_child(&self, child_id: &str) -> Result<Option<ChildProfile>> {
        let child = self
            .connection
            .with_store(|store| store.children().get(child_id).cloned());

        if child.is_none() {
            warn!("Child not found: {}", child_id);
        }

        Ok(child)
    }

    /// List all children in enrollment order
    pub fn list_children(&self) -> Result<RosterResponse> {
        let children = self
            .connection
            .with_store(|store| store.children().iter().cloned().collect());
        Ok(RosterResponse { children })
    }

    /// Update a child's top-level profile fields. Returns `Ok(None)` when
    /// the child does not exist.
    pub fn update_child(
        &self,
        child_id: &str,
        request: UpdateChildProfileRequest,
    ) -> Result<Option<ChildProfileResponse>> {
        info!("Updating child: {}", child_id);

        if let Some(ref first_name) = request.first_name {
            self.validate_name(first_name, "First name")?;
        }
        if let Some(ref last_name) = request.last_name {
            self.validate_name(last_name, "Last name")?;
        }

        let updated = self.connection.with_store_mut(|store| {
            let touched = store.children_mut().update(child_id, |child| {
                if let Some(first_name) = request.first_name {
                    child.first_name = first_name.trim().to_string();
                }
                if let Some(last_name) = request.last_name {
                    child.last_name = last_name.trim().to_string();
                }
                if let Some(gender) = request.gender {
                    child.gender = gender.trim().to_string();
                }
                if let Some(date_of_birth) = request.date_of_birth {
                    child.date_of_birth = date_of_birth;
                }
                if let Some(enrollment_date) = request.enrollment_date {
                    child.enrollment_date = enrollment_date;
                }
                if let Some(enrollment_status) = request.enrollment_status {
                    child.enrollment_status = enrollment_status;
                }
                if let Some(age_group) = request.age_group {
                    child.age_group = Some(age_group);
                }
                child.updated_at = Utc::now();
            });
            if touched {
                store.children().get(child_id).cloned()
            } else {
                None
            }
        });

        match updated {
            Some(child) => Ok(Some(ChildProfileResponse {
                child,
                success_message: "Child profile updated successfully".to_string(),
            })),
            None => {
                warn!("Child not found for update: {}", child_id);
                Ok(None)
            }
        }
    }

    /// Update a child's weekly schedule. Returns `Ok(None)` when the child
    /// does not exist.
    pub fn update_schedule(
        &self,
        child_id: &str,
        request: UpdateScheduleRequest,
    ) -> Result<Option<ChildProfileResponse>> {
        info!("Updating schedule for child: {}", child_id);

        let updated = self.connection.with_store_mut(|store| {
            let touched = store.children_mut().update(child_id, |child| {
                if let Some(monday) = request.monday {
                    child.schedule.monday = monday;
                }
                if let Some(tuesday) = request.tuesday {
                    child.schedule.tuesday = tuesday;
                }
                if let Some(wednesday) = request.wednesday {
                    child.schedule.wednesday = wednesday;
                }
                if let Some(thursday) = request.thursday {
                    child.schedule.thursday = thursday;
                }
                if let Some(friday) = request.friday {
                    child.schedule.friday = friday;
                }
                if let Some(part_time) = request.part_time {
                    child.schedule.part_time = part_time;
                }
                child.updated_at = Utc::now();
            });
            if touched {
                store.children().get(child_id).cloned()
            } else {
                None
            }
        });

        match updated {
            Some(child) => Ok(Some(ChildProfileResponse {
                child,
                success_message: "Schedule updated successfully".to_string(),
            })),
            None => {
                warn!("Child not found for schedule update: {}", child_id);
                Ok(None)
            }
        }
    }

    /// Update a child's medical block. Provided lists replace the stored
    /// ones wholesale. Returns `Ok(None)` when the child does not exist.
    pub fn update_medical(
        &self,
        child_id: &str,
        request: UpdateMedicalInfoRequest,
    ) -> Result<Option<ChildProfileResponse>> {
        info!("Updating medical info for child: {}", child_id);

        let updated = self.connection.with_store_mut(|store| {
            let touched = store.children_mut().update(child_id, |child| {
                if let Some(allergies) = request.allergies {
                    child.medical.allergies = allergies;
                }
                if let Some(dietary_restrictions) = request.dietary_restrictions {
                    child.medical.dietary_restrictions = dietary_restrictions;
                }
                if let Some(medications) = request.medications {
                    child.medical.medications = medications;
                }
                child.updated_at = Utc::now();
            });
            if touched {
                store.children().get(child_id).cloned()
            } else {
                None
            }
        });

        match updated {
            Some(child) => Ok(Some(ChildProfileResponse {
                child,
                success_message: "Medical info updated successfully".to_string(),
            })),
            None => {
                warn!("Child not found for medical update: {}", child_id);
                Ok(None)
            }
        }
    }

    /// Remove a child, cascading to their attendance records. Linked parent
    /// contacts are retained since they may belong to siblings. Returns the
    /// removed profile, or `Ok(None)` when the child does not exist.
    pub fn remove_child(&self, child_id: &str) -> Result<Option<ChildProfile>> {
        info!("Removing child: {}", child_id);

        let (removed, cascaded) = self.connection.with_store_mut(|store| {
            let removed = store.children_mut().remove(child_id);
            let mut cascaded = 0;
            if removed.is_some() {
                let record_ids: Vec<String> = store
                    .attendance()
                    .iter()
                    .filter(|record| record.child_id == child_id)
                    .map(|record| record.id.clone())
                    .collect();
                for record_id in &record_ids {
                    store.attendance_mut().remove(record_id);
                }
                cascaded = record_ids.len();
            }
            (removed, cascaded)
        });

        match &removed {
            Some(child) => info!(
                "Removed child {} along with {} attendance records",
                child.id, cascaded
            ),
            None => warn!("Child not found for removal: {}", child_id),
        }

        Ok(removed)
    }

    /// Register a new parent contact
    pub fn create_contact(&self, request: CreateContactRequest) -> Result<ContactResponse> {
        info!("Registering contact: {}", request.full_name);

        self.validate_name(&request.full_name, "Contact name")?;
        if !request.email.contains('@') {
            return Err(anyhow!("Email address is not valid"));
        }

        let now = Utc::now();
        let mut contact = ParentContact {
            id: String::new(),
            full_name: request.full_name.trim().to_string(),
            relationship: request.relationship.trim().to_string(),
            email: request.email.trim().to_string(),
            phone: request.phone.trim().to_string(),
            address: request.address.trim().to_string(),
            employer: request.employer,
            primary_contact: false,
            emergency_contact: request.emergency_contact.unwrap_or(false),
            authorized_pickup: request.authorized_pickup.unwrap_or(true),
            prefs: request.prefs.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };

        let id = self
            .connection
            .with_store_mut(|store| store.contacts_mut().add(contact.clone()));
        contact.id = id;

        info!(
            "Registered contact: {} with ID: {}",
            contact.full_name, contact.id
        );

        Ok(ContactResponse {
            contact,
            success_message: "Contact registered successfully".to_string(),
        })
    }

    /// Get a contact by ID
    pub fn get_contact(&self, parent_id: &str) -> Result<Option<ParentContact>> {
        let contact = self
            .connection
            .with_store(|store| store.contacts().get(parent_id).cloned());

        if contact.is_none() {
            warn!("Contact not found: {}", parent_id);
        }

        Ok(contact)
    }

    /// List all contacts in registration order
    pub fn list_contacts(&self) -> Result<ContactListResponse> {
        let contacts = self
            .connection
            .with_store(|store| store.contacts().iter().cloned().collect());
        Ok(ContactListResponse { contacts })
    }

    /// Update a contact. Returns `Ok(None)` when the contact does not
    /// exist.
    pub fn update_contact(
        &self,
        parent_id: &str,
        request: UpdateContactRequest,
    ) -> Result<Option<ContactResponse>> {
        info!("Updating contact: {}", parent_id);

        if let Some(ref full_name) = request.full_name {
            self.validate_name(full_name, "Contact name")?;
        }
        if let Some(ref email) = request.email {
            if !email.contains('@') {
                return Err(anyhow!("Email address is not valid"));
            }
        }

        let updated = self.connection.with_store_mut(|store| {
            let touched = store.contacts_mut().update(parent_id, |contact| {
                if let Some(full_name) = request.full_name {
                    contact.full_name = full_name.trim().to_string();
                }
                if let Some(relationship) = request.relationship {
                    contact.relationship = relationship.trim().to_string();
                }
                if let Some(email) = request.email {
                    contact.email = email.trim().to_string();
                }
                if let Some(phone) = request.phone {
                    contact.phone = phone.trim().to_string();
                }
                if let Some(address) = request.address {
                    contact.address = address.trim().to_string();
                }
                if let Some(employer) = request.employer {
                    contact.employer = employer;
                }
                if let Some(emergency_contact) = request.emergency_contact {
                    contact.emergency_contact = emergency_contact;
                }
                if let Some(authorized_pickup) = request.authorized_pickup {
                    contact.authorized_pickup = authorized_pickup;
                }
                if let Some(prefs) = request.prefs {
                    contact.prefs = prefs;
                }
                contact.updated_at = Utc::now();
            });
            if touched {
                store.contacts().get(parent_id).cloned()
            } else {
                None
            }
        });

        match updated {
            Some(contact) => Ok(Some(ContactResponse {
                contact,
                success_message: "Contact updated successfully".to_string(),
            })),
            None => {
                warn!("Contact not found for update: {}", parent_id);
                Ok(None)
            }
        }
    }

    /// Remove a contact. Children keep any link entries pointing at the
    /// removed id; readers skip dangling links.
    pub fn remove_contact(&self, parent_id: &str) -> Result<Option<ParentContact>> {
        info!("Removing contact: {}", parent_id);

        let removed = self
            .connection
            .with_store_mut(|store| store.contacts_mut().remove(parent_id));

        if removed.is_none() {
            warn!("Contact not found for removal: {}", parent_id);
        }

        Ok(removed)
    }

    /// Link a parent contact to a child
    pub fn link_parent(
        &self,
        child_id: &str,
        parent_id: &str,
        relationship: &str,
    ) -> Result<bool> {
        info!(
            "Linking parent {} to child {} as {}",
            parent_id, child_id, relationship
        );

        let linked = self
            .connection
            .with_store_mut(|store| store.link_parent(child_id, parent_id, relationship));

        if !linked {
            warn!("Cannot link parent: child {} not found", child_id);
        }

        Ok(linked)
    }

    /// Remove a parent link from a child
    pub fn unlink_parent(&self, child_id: &str, parent_id: &str) -> Result<bool> {
        info!("Unlinking parent {} from child {}", parent_id, child_id);

        let unlinked = self
            .connection
            .with_store_mut(|store| store.unlink_parent(child_id, parent_id));

        if !unlinked {
            warn!("Cannot unlink parent: child {} not found", child_id);
        }

        Ok(unlinked)
    }

    /// The contacts linked to a child, in registration order
    pub fn parents_of(&self, child_id: &str) -> Result<Vec<ParentContact>> {
        Ok(self
            .connection
            .with_store(|store| store.parents_of(child_id)))
    }

    /// Make a linked contact the child's single primary contact
    pub fn set_primary_contact(&self, child_id: &str, parent_id: &str) -> Result<bool> {
        info!(
            "Setting primary contact for child {} to {}",
            child_id, parent_id
        );

        let changed = self
            .connection
            .with_store_mut(|store| store.set_primary_contact(child_id, parent_id));

        if !changed {
            warn!(
                "Cannot set primary contact: child {} missing or contact {} not linked",
                child_id, parent_id
            );
        }

        Ok(changed)
    }

    /// Case-insensitive roster search over child display names
    pub fn search_roster(&self, query: &str) -> Result<RosterResponse> {
        debug!("Searching roster for: {:?}", query);

        let children = self.connection.with_store(|store| {
            let all: Vec<ChildProfile> = store.children().iter().cloned().collect();
            views::filter_by_name(&all, query)
        });

        Ok(RosterResponse { children })
    }

    /// Active headcount, licensed capacity, and open spots per age group
    pub fn enrollment_summary(&self) -> Result<EnrollmentSummaryResponse> {
        let config = self.connection.config().clone();

        let (counts, open_spots) = self.connection.with_store(|store| {
            (
                views::counts_by_age_group(store),
                views::open_spots_by_age_group(store, &config),
            )
        });

        let capacity = AgeGroup::ALL
            .iter()
            .map(|group| {
                (
                    *group,
                    config.licensed_capacity.get(group).copied().unwrap_or(0),
                )
            })
            .collect();

        Ok(EnrollmentSummaryResponse {
            counts,
            capacity,
            open_spots,
        })
    }

    /// Validate an enrollment request
    fn validate_create_child(&self, request: &CreateChildRequest) -> Result<()> {
        self.validate_name(&request.first_name, "First name")?;
        self.validate_name(&request.last_name, "Last name")?;

        let today = Utc::now().date_naive();
        if request.date_of_birth > today {
            return Err(anyhow!("Date of birth cannot be in the future"));
        }
        if let Some(enrollment_date) = request.enrollment_date {
            if enrollment_date < request.date_of_birth {
                return Err(anyhow!("Enrollment date cannot precede date of birth"));
            }
        }

        Ok(())
    }

    /// Validate a person name against the configured length limit
    fn validate_name(&self, name: &str, what: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(anyhow!("{} cannot be empty", what));
        }

        let max = self.connection.config().max_name_length;
        if name.len() > max {
            return Err(anyhow!("{} cannot exceed {} characters", what, max));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::{AttendanceRecord, AttendanceStatus, MealFlags};

    fn setup_service() -> (EnrollmentService, MemoryConnection) {
        let connection = MemoryConnection::new();
        (EnrollmentService::new(connection.clone()), connection)
    }

    fn child_request(first_name: &str, last_name: &str) -> CreateChildRequest {
        CreateChildRequest {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2021, 4, 12).unwrap(),
            gender: "F".to_string(),
            enrollment_date: None,
            enrollment_status: None,
            age_group: Some(AgeGroup::Toddler),
            schedule: None,
            medical: None,
        }
    }

    fn contact_request(full_name: &str) -> CreateContactRequest {
        CreateContactRequest {
            full_name: full_name.to_string(),
            relationship: "Mother".to_string(),
            email: "parent@example.com".to_string(),
            phone: "555-0100".to_string(),
            address: "12 Elm St".to_string(),
            employer: None,
            emergency_contact: None,
            authorized_pickup: None,
            prefs: None,
        }
    }

    #[test]
    fn test_create_child() {
        let (service, _) = setup_service();

        let response = service
            .create_child(child_request("Emma", "Johnson"))
            .expect("Failed to create child");

        assert_eq!(response.child.first_name, "Emma");
        assert_eq!(response.child.enrollment_status, EnrollmentStatus::Active);
        assert!(response.child.id.starts_with("child::"));
        assert!(response.child.schedule.monday);
        assert_eq!(response.success_message, "Child enrolled successfully");
    }

    #[test]
    fn test_create_child_validation() {
        let (service, _) = setup_service();

        // Empty first name
        let mut request = child_request("", "Johnson");
        assert!(service.create_child(request).is_err());

        // Name over the configured limit
        request = child_request(&"x".repeat(101), "Johnson");
        assert!(service.create_child(request).is_err());

        // Birth date in the future
        request = child_request("Emma", "Johnson");
        request.date_of_birth = NaiveDate::from_ymd_opt(2099, 1, 1).unwrap();
        assert!(service.create_child(request).is_err());

        // Enrollment before birth
        request = child_request("Emma", "Johnson");
        request.enrollment_date = Some(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert!(service.create_child(request).is_err());
    }

    #[test]
    fn test_update_child_patches_only_provided_fields() {
        let (service, _) = setup_service();
        let created = service
            .create_child(child_request("Emma", "Johnson"))
            .expect("Failed to create child");

        let response = service
            .update_child(
                &created.child.id,
                UpdateChildProfileRequest {
                    last_name: Some("Miller".to_string()),
                    enrollment_status: Some(EnrollmentStatus::Waitlist),
                    ..Default::default()
                },
            )
            .expect("Failed to update child")
            .expect("Child should exist");

        assert_eq!(response.child.first_name, "Emma");
        assert_eq!(response.child.last_name, "Miller");
        assert_eq!(response.child.enrollment_status, EnrollmentStatus::Waitlist);
    }

    #[test]
    fn test_update_missing_child_returns_none() {
        let (service, _) = setup_service();

        let result = service
            .update_child("child::missing", UpdateChildProfileRequest::default())
            .expect("Update should not error");
        assert!(result.is_none());

        let result = service
            .update_schedule("child::missing", UpdateScheduleRequest::default())
            .expect("Update should not error");
        assert!(result.is_none());

        let result = service
            .update_medical("child::missing", UpdateMedicalInfoRequest::default())
            .expect("Update should not error");
        assert!(result.is_none());
    }

    #[test]
    fn test_update_schedule_and_medical() {
        let (service, _) = setup_service();
        let created = service
            .create_child(child_request("Emma", "Johnson"))
            .expect("Failed to create child");

        let response = service
            .update_schedule(
                &created.child.id,
                UpdateScheduleRequest {
                    friday: Some(false),
                    part_time: Some(true),
                    ..Default::default()
                },
            )
            .expect("Failed to update schedule")
            .expect("Child should exist");
        assert!(!response.child.schedule.friday);
        assert!(response.child.schedule.part_time);
        assert!(response.child.schedule.monday);

        let response = service
            .update_medical(
                &created.child.id,
                UpdateMedicalInfoRequest {
                    allergies: Some(vec!["peanuts".to_string()]),
                    ..Default::default()
                },
            )
            .expect("Failed to update medical info")
            .expect("Child should exist");
        assert_eq!(response.child.medical.allergies, vec!["peanuts"]);
        assert!(response.child.medical.medications.is_empty());
    }

    #[test]
    fn test_remove_child_cascades_attendance_but_keeps_contacts() {
        let (service, connection) = setup_service();
        let child = service
            .create_child(child_request("Emma", "Johnson"))
            .expect("Failed to create child")
            .child;
        let contact = service
            .create_contact(contact_request("Sarah Johnson"))
            .expect("Failed to create contact")
            .contact;
        service
            .link_parent(&child.id, &contact.id, "Mother")
            .expect("Failed to link parent");

        // Two attendance records for the child, one for another child
        let other_id = "child::other".to_string();
        connection.with_store_mut(|store| {
            for (child_id, day) in [(&child.id, 8), (&child.id, 9), (&other_id, 8)] {
                let now = Utc::now();
                store.attendance_mut().add(AttendanceRecord {
                    id: String::new(),
                    child_id: child_id.clone(),
                    date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
                    check_in: None,
                    check_out: None,
                    status: AttendanceStatus::Present,
                    meals: MealFlags::default(),
                    created_at: now,
                    updated_at: now,
                });
            }
        });

        let removed = service
            .remove_child(&child.id)
            .expect("Failed to remove child");
        assert!(removed.is_some());

        connection.with_store(|store| {
            assert_eq!(store.attendance().len(), 1);
            assert!(store.contacts().contains(&contact.id));
        });

        // Removing again is a no-op
        assert!(service
            .remove_child(&child.id)
            .expect("Remove should not error")
            .is_none());
    }

    #[test]
    fn test_contact_crud_and_employer_clear() {
        let (service, _) = setup_service();

        let mut request = contact_request("Sarah Johnson");
        request.employer = Some("Acme Corp".to_string());
        let contact = service
            .create_contact(request)
            .expect("Failed to create contact")
            .contact;
        assert_eq!(contact.employer.as_deref(), Some("Acme Corp"));
        assert!(!contact.primary_contact);
        assert!(contact.authorized_pickup);

        // Some(None) clears the employer
        let response = service
            .update_contact(
                &contact.id,
                UpdateContactRequest {
                    employer: Some(None),
                    phone: Some("555-0199".to_string()),
                    ..Default::default()
                },
            )
            .expect("Failed to update contact")
            .expect("Contact should exist");
        assert!(response.contact.employer.is_none());
        assert_eq!(response.contact.phone, "555-0199");

        assert!(service
            .update_contact("parent::missing", UpdateContactRequest::default())
            .expect("Update should not error")
            .is_none());

        let removed = service
            .remove_contact(&contact.id)
            .expect("Failed to remove contact");
        assert!(removed.is_some());
        assert!(service
            .list_contacts()
            .expect("Failed to list contacts")
            .contacts
            .is_empty());
    }

    #[test]
    fn test_create_contact_validation() {
        let (service, _) = setup_service();

        let mut request = contact_request("");
        assert!(service.create_contact(request).is_err());

        request = contact_request("Sarah Johnson");
        request.email = "not-an-email".to_string();
        assert!(service.create_contact(request).is_err());
    }

    #[test]
    fn test_link_and_primary_contact_through_service() {
        let (service, _) = setup_service();
        let child = service
            .create_child(child_request("Emma", "Johnson"))
            .expect("Failed to create child")
            .child;
        let mother = service
            .create_contact(contact_request("Sarah Johnson"))
            .expect("Failed to create contact")
            .contact;
        let father = service
            .create_contact(contact_request("Mark Johnson"))
            .expect("Failed to create contact")
            .contact;

        assert!(service
            .link_parent(&child.id, &mother.id, "Mother")
            .expect("Failed to link"));
        assert!(service
            .link_parent(&child.id, &father.id, "Father")
            .expect("Failed to link"));

        let parents = service.parents_of(&child.id).expect("Failed to list parents");
        assert_eq!(parents.len(), 2);

        assert!(service
            .set_primary_contact(&child.id, &father.id)
            .expect("Failed to set primary"));
        let parents = service.parents_of(&child.id).expect("Failed to list parents");
        assert!(!parents[0].primary_contact);
        assert!(parents[1].primary_contact);

        assert!(service
            .unlink_parent(&child.id, &mother.id)
            .expect("Failed to unlink"));
        assert_eq!(
            service.parents_of(&child.id).expect("Failed to list parents").len(),
            1
        );

        // Absent child is a quiet false
        assert!(!service
            .link_parent("child::missing", &mother.id, "Mother")
            .expect("Link should not error"));
    }

    #[test]
    fn test_search_roster() {
        let (service, _) = setup_service();
        service
            .create_child(child_request("Emma", "Johnson"))
            .expect("Failed to create child");
        service
            .create_child(child_request("Noah", "Smith"))
            .expect("Failed to create child");

        let hits = service.search_roster("smith").expect("Failed to search");
        assert_eq!(hits.children.len(), 1);
        assert_eq!(hits.children[0].first_name, "Noah");

        let all = service.search_roster("").expect("Failed to search");
        assert_eq!(all.children.len(), 2);
    }

    #[test]
    fn test_enrollment_summary_counts_and_open_spots() {
        let (service, _) = setup_service();
        service
            .create_child(child_request("Emma", "Johnson"))
            .expect("Failed to create child");
        let mut infant = child_request("Mia", "Brown");
        infant.age_group = Some(AgeGroup::Infant);
        service.create_child(infant).expect("Failed to create child");

        let summary = service
            .enrollment_summary()
            .expect("Failed to build summary");

        assert_eq!(summary.counts[&AgeGroup::Toddler], 1);
        assert_eq!(summary.counts[&AgeGroup::Infant], 1);
        assert_eq!(summary.capacity[&AgeGroup::Infant], 8);
        assert_eq!(summary.open_spots[&AgeGroup::Infant], 7);
        assert_eq!(summary.open_spots[&AgeGroup::SchoolAge], 24);
    }
}
