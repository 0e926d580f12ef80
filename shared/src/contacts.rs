//! Parent/guardian contact records.
//!
//! Links to children live on the child side (`ChildProfile::parent_ids`);
//! a contact record carries no child references of its own. Payment methods
//! are separate `BankingInfo` entities keyed by `parent_id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a contact wants to hear from the center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunicationPrefs {
    pub email_updates: bool,
    pub sms_alerts: bool,
    pub phone_calls: bool,
}

impl Default for CommunicationPrefs {
    fn default() -> Self {
        Self {
            email_updates: true,
            sms_alerts: false,
            phone_calls: false,
        }
    }
}

/// A parent or guardian contact on file with the center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentContact {
    pub id: String,
    pub full_name: String,
    /// Relationship label as entered on the form, e.g. "Mother".
    pub relationship: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub employer: Option<String>,
    /// At most one contact per child should carry this flag; the linker's
    /// `set_primary_contact` keeps it exclusive.
    pub primary_contact: bool,
    pub emergency_contact: bool,
    pub authorized_pickup: bool,
    pub prefs: CommunicationPrefs,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ParentContact {
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("parent::{}", epoch_millis)
    }

    pub fn display_name(&self) -> String {
        self.full_name.clone()
    }
}

/// Request for registering a new parent contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateContactRequest {
    pub full_name: String,
    pub relationship: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub employer: Option<String>,
    /// Defaults to false.
    pub emergency_contact: Option<bool>,
    /// Defaults to true.
    pub authorized_pickup: Option<bool>,
    pub prefs: Option<CommunicationPrefs>,
}

/// Partial update for a parent contact. `primary_contact` is deliberately
/// not patchable here; it only moves through `set_primary_contact`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateContactRequest {
    pub full_name: Option<String>,
    pub relationship: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// `Some(None)` clears the stored employer.
    pub employer: Option<Option<String>>,
    pub emergency_contact: Option<bool>,
    pub authorized_pickup: Option<bool>,
    pub prefs: Option<CommunicationPrefs>,
}

/// Response after creating or updating a contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactResponse {
    pub contact: ParentContact,
    pub success_message: String,
}

/// Response containing all contacts, in registration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactListResponse {
    pub contacts: Vec<ParentContact>,
}
