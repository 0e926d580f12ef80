//! Daily attendance records with per-meal participation flags.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::children::AgeGroup;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    LeftEarly,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
            AttendanceStatus::LeftEarly => "left_early",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "present" => Ok(AttendanceStatus::Present),
            "absent" => Ok(AttendanceStatus::Absent),
            "late" => Ok(AttendanceStatus::Late),
            "left_early" => Ok(AttendanceStatus::LeftEarly),
            _ => Err(format!("Invalid attendance status: {}", s)),
        }
    }
}

/// Meal slots served over a center day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    MorningSnack,
    Lunch,
    AfternoonSnack,
    Supper,
}

impl MealType {
    pub const ALL: [MealType; 5] = [
        MealType::Breakfast,
        MealType::MorningSnack,
        MealType::Lunch,
        MealType::AfternoonSnack,
        MealType::Supper,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::MorningSnack => "morning_snack",
            MealType::Lunch => "lunch",
            MealType::AfternoonSnack => "afternoon_snack",
            MealType::Supper => "supper",
        }
    }
}

/// Which meals a child took on a given day. One flag per `MealType`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MealFlags {
    pub breakfast: bool,
    pub morning_snack: bool,
    pub lunch: bool,
    pub afternoon_snack: bool,
    pub supper: bool,
}

impl MealFlags {
    pub fn is_set(&self, meal: MealType) -> bool {
        match meal {
            MealType::Breakfast => self.breakfast,
            MealType::MorningSnack => self.morning_snack,
            MealType::Lunch => self.lunch,
            MealType::AfternoonSnack => self.afternoon_snack,
            MealType::Supper => self.supper,
        }
    }

    pub fn set(&mut self, meal: MealType, value: bool) {
        match meal {
            MealType::Breakfast => self.breakfast = value,
            MealType::MorningSnack => self.morning_snack = value,
            MealType::Lunch => self.lunch = value,
            MealType::AfternoonSnack => self.afternoon_snack = value,
            MealType::Supper => self.supper = value,
        }
    }
}

/// One child's attendance for one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: String,
    pub child_id: String,
    pub date: NaiveDate,
    pub check_in: Option<NaiveTime>,
    pub check_out: Option<NaiveTime>,
    pub status: AttendanceStatus,
    pub meals: MealFlags,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AttendanceRecord {
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("attendance::{}", epoch_millis)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordAttendanceRequest {
    pub child_id: String,
    pub date: NaiveDate,
    /// Defaults to `Present`.
    pub status: Option<AttendanceStatus>,
    pub check_in: Option<NaiveTime>,
    pub check_out: Option<NaiveTime>,
    pub meals: Option<MealFlags>,
}

/// Partial update; provided fields replace the stored ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateAttendanceRequest {
    pub status: Option<AttendanceStatus>,
    pub check_in: Option<NaiveTime>,
    pub check_out: Option<NaiveTime>,
    pub meals: Option<MealFlags>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceResponse {
    pub record: AttendanceRecord,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceListResponse {
    pub records: Vec<AttendanceRecord>,
}

/// Headcount for one meal on one date, bucketed by age group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealAttendanceResponse {
    pub date: NaiveDate,
    pub meal: MealType,
    pub counts: BTreeMap<AgeGroup, usize>,
}
