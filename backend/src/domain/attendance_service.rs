//! Attendance service: daily check-in/out, status corrections, and meal
//! participation flags.

use anyhow::{anyhow, Result};
use chrono::{Datelike, NaiveDate, NaiveTime, Utc};
use log::{info, warn};

use shared::{
    AttendanceListResponse, AttendanceRecord, AttendanceResponse, AttendanceStatus,
    MealAttendanceResponse, MealFlags, MealType, RecordAttendanceRequest,
    UpdateAttendanceRequest,
};

use crate::domain::views;
use crate::storage::memory::MemoryConnection;

/// Service for managing attendance in the center
#[derive(Clone)]
pub struct AttendanceService {
    connection: MemoryConnection,
}

impl AttendanceService {
    /// Create a new AttendanceService
    pub fn new(connection: MemoryConnection) -> Self {
        Self { connection }
    }

    /// Record attendance for a child on a date. One record exists per
    /// child and date; recording again merges into the existing record.
    pub fn record_attendance(&self, request: RecordAttendanceRequest) -> Result<AttendanceResponse> {
        info!(
            "Recording attendance for child {} on {}",
            request.child_id, request.date
        );

        self.warn_if_unknown_child(&request.child_id);

        let record = self.upsert_record(&request.child_id, request.date, |record| {
            if let Some(status) = request.status {
                record.status = status;
            }
            if let Some(check_in) = request.check_in {
                record.check_in = Some(check_in);
            }
            if let Some(check_out) = request.check_out {
                record.check_out = Some(check_out);
            }
            if let Some(meals) = request.meals {
                record.meals = meals;
            }
        })?;

        Ok(AttendanceResponse {
            record,
            success_message: "Attendance recorded successfully".to_string(),
        })
    }

    /// Check a child in. Arrival always marks the day `Present`, even if a
    /// record for the date said otherwise.
    pub fn check_in(
        &self,
        child_id: &str,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<AttendanceResponse> {
        info!("Checking in child {} on {} at {}", child_id, date, time);

        if let Some(child) = self
            .connection
            .with_store(|store| store.children().get(child_id).cloned())
        {
            if !child.schedule.attends(date.weekday()) {
                warn!(
                    "Child {} is not scheduled for {} ({})",
                    child_id,
                    date,
                    date.weekday()
                );
            }
        } else {
            warn!("Checking in unknown child: {}", child_id);
        }

        let record = self.upsert_record(child_id, date, |record| {
            record.check_in = Some(time);
            record.status = AttendanceStatus::Present;
        })?;

        Ok(AttendanceResponse {
            record,
            success_message: "Check-in recorded successfully".to_string(),
        })
    }

    /// Check a child out
    pub fn check_out(
        &self,
        child_id: &str,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<AttendanceResponse> {
        info!("Checking out child {} on {} at {}", child_id, date, time);

        let record = self.upsert_record(child_id, date, |record| {
            record.check_out = Some(time);
        })?;

        Ok(AttendanceResponse {
            record,
            success_message: "Check-out recorded successfully".to_string(),
        })
    }

    /// Patch an attendance record by its own ID. Returns `Ok(None)` when
    /// the record does not exist.
    pub fn update_attendance(
        &self,
        record_id: &str,
        request: UpdateAttendanceRequest,
    ) -> Result<Option<AttendanceResponse>> {
        info!("Updating attendance record: {}", record_id);

        let updated = self.connection.with_store_mut(|store| {
            let touched = store.attendance_mut().update(record_id, |record| {
                if let Some(status) = request.status {
                    record.status = status;
                }
                if let Some(check_in) = request.check_in {
                    record.check_in = Some(check_in);
                }
                if let Some(check_out) = request.check_out {
                    record.check_out = Some(check_out);
                }
                if let Some(meals) = request.meals {
                    record.meals = meals;
                }
                record.updated_at = Utc::now();
            });
            if touched {
                store.attendance().get(record_id).cloned()
            } else {
                None
            }
        });

        match updated {
            Some(record) => Ok(Some(AttendanceResponse {
                record,
                success_message: "Attendance updated successfully".to_string(),
            })),
            None => {
                warn!("Attendance record not found: {}", record_id);
                Ok(None)
            }
        }
    }

    /// Replace the meal flags on a child's record for a date, creating the
    /// record if the day has none yet
    pub fn set_meal_flags(
        &self,
        child_id: &str,
        date: NaiveDate,
        meals: MealFlags,
    ) -> Result<AttendanceResponse> {
        info!("Setting meal flags for child {} on {}", child_id, date);

        let record = self.upsert_record(child_id, date, |record| {
            record.meals = meals;
        })?;

        Ok(AttendanceResponse {
            record,
            success_message: "Meal flags updated successfully".to_string(),
        })
    }

    /// Headcount per age group for one meal on one date
    pub fn meal_attendance(&self, date: NaiveDate, meal: MealType) -> Result<MealAttendanceResponse> {
        let counts = self
            .connection
            .with_store(|store| views::meal_attendance_for_date(store, date, meal));

        Ok(MealAttendanceResponse { date, meal, counts })
    }

    /// A child's attendance history, most recent date first
    pub fn attendance_for_child(&self, child_id: &str) -> Result<AttendanceListResponse> {
        let mut records: Vec<AttendanceRecord> = self.connection.with_store(|store| {
            store
                .attendance()
                .iter()
                .filter(|record| record.child_id == child_id)
                .cloned()
                .collect()
        });
        records.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(AttendanceListResponse { records })
    }

    /// Find or create the record for (child, date) and apply a mutation
    fn upsert_record<F>(&self, child_id: &str, date: NaiveDate, apply: F) -> Result<AttendanceRecord>
    where
        F: FnOnce(&mut AttendanceRecord),
    {
        let record = self.connection.with_store_mut(|store| {
            let existing_id = store
                .attendance_for(child_id, date)
                .map(|record| record.id.clone());

            match existing_id {
                Some(id) => {
                    let mut snapshot = None;
                    store.attendance_mut().update(&id, |record| {
                        apply(record);
                        record.updated_at = Utc::now();
                        snapshot = Some(record.clone());
                    });
                    snapshot
                }
                None => {
                    let now = Utc::now();
                    let mut fresh = AttendanceRecord {
                        id: String::new(),
                        child_id: child_id.to_string(),
                        date,
                        check_in: None,
                        check_out: None,
                        status: AttendanceStatus::Present,
                        meals: MealFlags::default(),
                        created_at: now,
                        updated_at: now,
                    };
                    apply(&mut fresh);
                    let id = store.attendance_mut().add(fresh.clone());
                    fresh.id = id;
                    Some(fresh)
                }
            }
        });

        record.ok_or_else(|| anyhow!("Attendance record for {} on {} vanished", child_id, date))
    }

    fn warn_if_unknown_child(&self, child_id: &str) {
        let known = self
            .connection
            .with_store(|store| store.children().contains(child_id));
        if !known {
            warn!("Recording attendance for unknown child: {}", child_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared::{AgeGroup, ChildProfile, EnrollmentStatus};

    fn setup_service() -> (AttendanceService, MemoryConnection) {
        let connection = MemoryConnection::new();
        (AttendanceService::new(connection.clone()), connection)
    }

    fn seed_child(connection: &MemoryConnection, name: &str, age_group: AgeGroup) -> String {
        let now = Utc::now();
        connection.with_store_mut(|store| {
            store.children_mut().add(ChildProfile {
                id: String::new(),
                first_name: name.to_string(),
                last_name: "Test".to_string(),
                date_of_birth: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
                gender: "F".to_string(),
                enrollment_date: NaiveDate::from_ymd_opt(2023, 9, 1).unwrap(),
                enrollment_status: EnrollmentStatus::Active,
                age_group: Some(age_group),
                schedule: Default::default(),
                medical: Default::default(),
                parent_ids: vec![],
                guardians: vec![],
                created_at: now,
                updated_at: now,
            })
        })
    }

    fn request_for(child_id: &str, date: NaiveDate) -> RecordAttendanceRequest {
        RecordAttendanceRequest {
            child_id: child_id.to_string(),
            date,
            status: None,
            check_in: None,
            check_out: None,
            meals: None,
        }
    }

    #[test]
    fn test_record_attendance_defaults_to_present() {
        let (service, connection) = setup_service();
        let child_id = seed_child(&connection, "Emma", AgeGroup::Toddler);
        let date = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();

        let response = service
            .record_attendance(request_for(&child_id, date))
            .expect("Failed to record attendance");

        assert_eq!(response.record.status, AttendanceStatus::Present);
        assert!(response.record.id.starts_with("attendance::"));
        assert!(response.record.check_in.is_none());
    }

    #[test]
    fn test_record_attendance_merges_same_day() {
        let (service, connection) = setup_service();
        let child_id = seed_child(&connection, "Emma", AgeGroup::Toddler);
        let date = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();

        let mut request = request_for(&child_id, date);
        request.status = Some(AttendanceStatus::Late);
        let first = service
            .record_attendance(request)
            .expect("Failed to record attendance");

        let mut request = request_for(&child_id, date);
        request.check_in = Some(NaiveTime::from_hms_opt(9, 15, 0).unwrap());
        let second = service
            .record_attendance(request)
            .expect("Failed to record attendance");

        // Same record, merged fields
        assert_eq!(second.record.id, first.record.id);
        assert_eq!(second.record.status, AttendanceStatus::Late);
        assert_eq!(
            second.record.check_in,
            Some(NaiveTime::from_hms_opt(9, 15, 0).unwrap())
        );
        connection.with_store(|store| assert_eq!(store.attendance().len(), 1));
    }

    #[test]
    fn test_check_in_overrides_absent_and_check_out_completes_day() {
        let (service, connection) = setup_service();
        let child_id = seed_child(&connection, "Emma", AgeGroup::Toddler);
        let date = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();

        let mut request = request_for(&child_id, date);
        request.status = Some(AttendanceStatus::Absent);
        service
            .record_attendance(request)
            .expect("Failed to record attendance");

        let checked_in = service
            .check_in(&child_id, date, NaiveTime::from_hms_opt(8, 30, 0).unwrap())
            .expect("Failed to check in");
        assert_eq!(checked_in.record.status, AttendanceStatus::Present);

        let checked_out = service
            .check_out(&child_id, date, NaiveTime::from_hms_opt(17, 0, 0).unwrap())
            .expect("Failed to check out");
        assert_eq!(checked_out.record.id, checked_in.record.id);
        assert_eq!(
            checked_out.record.check_out,
            Some(NaiveTime::from_hms_opt(17, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_check_in_on_weekend_still_records() {
        let (service, connection) = setup_service();
        let child_id = seed_child(&connection, "Emma", AgeGroup::Toddler);
        // 2024-01-06 is a Saturday
        let saturday = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap();

        let response = service
            .check_in(&child_id, saturday, NaiveTime::from_hms_opt(9, 0, 0).unwrap())
            .expect("Failed to check in");

        assert_eq!(response.record.date, saturday);
        assert_eq!(response.record.status, AttendanceStatus::Present);
    }

    #[test]
    fn test_attendance_for_unknown_child_is_kept() {
        let (service, connection) = setup_service();
        let date = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();

        let response = service
            .record_attendance(request_for("child::ghost", date))
            .expect("Failed to record attendance");

        assert_eq!(response.record.child_id, "child::ghost");
        connection.with_store(|store| assert_eq!(store.attendance().len(), 1));
    }

    #[test]
    fn test_update_attendance_by_record_id() {
        let (service, connection) = setup_service();
        let child_id = seed_child(&connection, "Emma", AgeGroup::Toddler);
        let date = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        let created = service
            .record_attendance(request_for(&child_id, date))
            .expect("Failed to record attendance");

        let updated = service
            .update_attendance(
                &created.record.id,
                UpdateAttendanceRequest {
                    status: Some(AttendanceStatus::LeftEarly),
                    check_out: Some(NaiveTime::from_hms_opt(14, 0, 0).unwrap()),
                    ..Default::default()
                },
            )
            .expect("Failed to update attendance")
            .expect("Record should exist");
        assert_eq!(updated.record.status, AttendanceStatus::LeftEarly);

        assert!(service
            .update_attendance("attendance::missing", UpdateAttendanceRequest::default())
            .expect("Update should not error")
            .is_none());
    }

    #[test]
    fn test_meal_attendance_counts_by_age_group() {
        let (service, connection) = setup_service();
        let toddler_a = seed_child(&connection, "Emma", AgeGroup::Toddler);
        let toddler_b = seed_child(&connection, "Liam", AgeGroup::Toddler);
        let infant = seed_child(&connection, "Mia", AgeGroup::Infant);
        let toddler_c = seed_child(&connection, "Ava", AgeGroup::Toddler);
        let date = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();

        let mut lunch = MealFlags::default();
        lunch.set(MealType::Lunch, true);
        for child_id in [&toddler_a, &toddler_b, &infant] {
            service
                .set_meal_flags(child_id, date, lunch)
                .expect("Failed to set meal flags");
        }
        // Present but not having lunch
        service
            .record_attendance(request_for(&toddler_c, date))
            .expect("Failed to record attendance");

        let response = service
            .meal_attendance(date, MealType::Lunch)
            .expect("Failed to count meal attendance");
        assert_eq!(response.counts[&AgeGroup::Toddler], 2);
        assert_eq!(response.counts[&AgeGroup::Infant], 1);
        assert_eq!(response.counts[&AgeGroup::Preschool], 0);

        // A different meal on the same date counts nothing
        let response = service
            .meal_attendance(date, MealType::Breakfast)
            .expect("Failed to count meal attendance");
        assert!(response.counts.values().all(|count| *count == 0));
    }

    #[test]
    fn test_attendance_for_child_most_recent_first() {
        let (service, connection) = setup_service();
        let child_id = seed_child(&connection, "Emma", AgeGroup::Toddler);

        for day in [8, 10, 9] {
            let date = NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
            service
                .record_attendance(request_for(&child_id, date))
                .expect("Failed to record attendance");
        }

        let history = service
            .attendance_for_child(&child_id)
            .expect("Failed to list attendance");
        let days: Vec<u32> = history.records.iter().map(|r| r.date.day()).collect();
        assert_eq!(days, vec![10, 9, 8]);
    }
}
