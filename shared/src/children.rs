//! Child profile types: identity, enrollment, schedule, medical notes, and
//! the embedded guardian links that tie a child to its parent contacts.

use chrono::{DateTime, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Age group buckets used for capacity counts and meal planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeGroup {
    Infant,
    Toddler,
    Preschool,
    SchoolAge,
}

impl AgeGroup {
    /// All groups in reporting order. Count maps are keyed over this so
    /// every bucket shows up even when its count is zero.
    pub const ALL: [AgeGroup; 4] = [
        AgeGroup::Infant,
        AgeGroup::Toddler,
        AgeGroup::Preschool,
        AgeGroup::SchoolAge,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::Infant => "infant",
            AgeGroup::Toddler => "toddler",
            AgeGroup::Preschool => "preschool",
            AgeGroup::SchoolAge => "schoolage",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "infant" => Ok(AgeGroup::Infant),
            "toddler" => Ok(AgeGroup::Toddler),
            "preschool" => Ok(AgeGroup::Preschool),
            "schoolage" => Ok(AgeGroup::SchoolAge),
            _ => Err(format!("Invalid age group: {}", s)),
        }
    }
}

/// Where a child stands in the enrollment pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    Active,
    Waitlist,
    Withdrawn,
    Graduated,
}

impl EnrollmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::Active => "active",
            EnrollmentStatus::Waitlist => "waitlist",
            EnrollmentStatus::Withdrawn => "withdrawn",
            EnrollmentStatus::Graduated => "graduated",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "active" => Ok(EnrollmentStatus::Active),
            "waitlist" => Ok(EnrollmentStatus::Waitlist),
            "withdrawn" => Ok(EnrollmentStatus::Withdrawn),
            "graduated" => Ok(EnrollmentStatus::Graduated),
            _ => Err(format!("Invalid enrollment status: {}", s)),
        }
    }
}

/// Which weekdays a child attends, plus the part-time flag from the
/// enrollment form. Weekends are never attended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    pub monday: bool,
    pub tuesday: bool,
    pub wednesday: bool,
    pub thursday: bool,
    pub friday: bool,
    pub part_time: bool,
}

impl WeeklySchedule {
    pub fn attends(&self, weekday: Weekday) -> bool {
        match weekday {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat | Weekday::Sun => false,
        }
    }
}

impl Default for WeeklySchedule {
    fn default() -> Self {
        Self {
            monday: true,
            tuesday: true,
            wednesday: true,
            thursday: true,
            friday: true,
            part_time: false,
        }
    }
}

/// Free-text medical notes collected at enrollment. The center never
/// interprets these beyond displaying them; no nutrition math happens here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MedicalInfo {
    pub allergies: Vec<String>,
    pub dietary_restrictions: Vec<String>,
    pub medications: Vec<String>,
}

/// Per-relationship record embedded in the child profile. One entry per
/// linked parent contact; `parent_id` mirrors an entry in
/// `ChildProfile::parent_ids`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guardian {
    pub parent_id: String,
    /// Relationship label shown on the roster, e.g. "Mother", "Grandfather".
    pub relationship: String,
    pub authorized_pickup: bool,
    pub legal_custody: bool,
    pub financially_responsible: bool,
    pub receives_correspondence: bool,
}

impl Guardian {
    /// New guardian entry with every permission granted, the default a
    /// fresh link gets until staff edit it.
    pub fn with_defaults(parent_id: &str, relationship: &str) -> Self {
        Self {
            parent_id: parent_id.to_string(),
            relationship: relationship.to_string(),
            authorized_pickup: true,
            legal_custody: true,
            financially_responsible: true,
            receives_correspondence: true,
        }
    }
}

/// A child enrolled at (or waitlisted for) the center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildProfile {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    /// Free text as entered on the enrollment form.
    pub gender: String,
    pub enrollment_date: NaiveDate,
    pub enrollment_status: EnrollmentStatus,
    /// None until staff assign a room; children without a group are left
    /// out of every age-group count.
    pub age_group: Option<AgeGroup>,
    pub schedule: WeeklySchedule,
    pub medical: MedicalInfo,
    /// Ids of linked parent contacts. Kept in sync with `guardians` by the
    /// link/unlink operations; never edit the two independently.
    pub parent_ids: Vec<String>,
    pub guardians: Vec<Guardian>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChildProfile {
    /// Generate a child ID from a timestamp.
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("child::{}", epoch_millis)
    }

    /// Display name used for roster search and portal screens.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Request for enrolling a new child.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateChildRequest {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    /// Defaults to today when not provided.
    pub enrollment_date: Option<NaiveDate>,
    /// Defaults to `Active`.
    pub enrollment_status: Option<EnrollmentStatus>,
    pub age_group: Option<AgeGroup>,
    pub schedule: Option<WeeklySchedule>,
    pub medical: Option<MedicalInfo>,
}

/// Partial update for the top-level profile fields. Absent fields are left
/// untouched; the schedule and medical blocks have their own requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateChildProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub enrollment_date: Option<NaiveDate>,
    pub enrollment_status: Option<EnrollmentStatus>,
    pub age_group: Option<AgeGroup>,
}

/// Partial update for the attendance schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateScheduleRequest {
    pub monday: Option<bool>,
    pub tuesday: Option<bool>,
    pub wednesday: Option<bool>,
    pub thursday: Option<bool>,
    pub friday: Option<bool>,
    pub part_time: Option<bool>,
}

/// Partial update for the medical block. A provided list replaces the
/// stored one wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateMedicalInfoRequest {
    pub allergies: Option<Vec<String>>,
    pub dietary_restrictions: Option<Vec<String>>,
    pub medications: Option<Vec<String>>,
}

/// Response after creating or updating a child profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildProfileResponse {
    pub child: ChildProfile,
    pub success_message: String,
}

/// Response containing a list of children, in roster (insertion) order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterResponse {
    pub children: Vec<ChildProfile>,
}

/// Active-enrollment counts next to licensed capacity, per age group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentSummaryResponse {
    pub counts: BTreeMap<AgeGroup, usize>,
    pub capacity: BTreeMap<AgeGroup, usize>,
    pub open_spots: BTreeMap<AgeGroup, usize>,
}
