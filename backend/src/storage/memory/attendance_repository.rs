//! In-memory attendance repository.

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, warn};

use shared::AttendanceRecord;

use crate::storage::memory::connection::MemoryConnection;
use crate::storage::traits::AttendanceStorage;

#[derive(Clone)]
pub struct AttendanceRepository {
    connection: MemoryConnection,
}

impl AttendanceRepository {
    pub fn new(connection: MemoryConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl AttendanceStorage for AttendanceRepository {
    async fn store_attendance(&self, record: AttendanceRecord) -> Result<String> {
        let id = self
            .connection
            .with_store_mut(|store| store.attendance_mut().add(record));
        debug!("Stored attendance record: {}", id);
        Ok(id)
    }

    async fn get_attendance(&self, record_id: &str) -> Result<Option<AttendanceRecord>> {
        Ok(self
            .connection
            .with_store(|store| store.attendance().get(record_id).cloned()))
    }

    async fn list_attendance_for_child(
        &self,
        child_id: &str,
        limit: Option<u32>,
    ) -> Result<Vec<AttendanceRecord>> {
        let mut records: Vec<AttendanceRecord> = self.connection.with_store(|store| {
            store
                .attendance()
                .iter()
                .filter(|record| record.child_id == child_id)
                .cloned()
                .collect()
        });

        // Most recent date first
        records.sort_by(|a, b| b.date.cmp(&a.date));
        if let Some(limit) = limit {
            records.truncate(limit as usize);
        }

        Ok(records)
    }

    async fn update_attendance(&self, record: &AttendanceRecord) -> Result<bool> {
        let updated = self.connection.with_store_mut(|store| {
            store
                .attendance_mut()
                .update(&record.id, |stored| *stored = record.clone())
        });
        if !updated {
            warn!("Attendance record not found for update: {}", record.id);
        }
        Ok(updated)
    }

    async fn delete_attendance(&self, record_id: &str) -> Result<bool> {
        let removed = self
            .connection
            .with_store_mut(|store| store.attendance_mut().remove(record_id).is_some());
        if !removed {
            warn!("Attendance record not found for delete: {}", record_id);
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use shared::{AttendanceStatus, MealFlags};

    fn record_on(child_id: &str, date: NaiveDate) -> AttendanceRecord {
        let now = Utc::now();
        AttendanceRecord {
            id: String::new(),
            child_id: child_id.to_string(),
            date,
            check_in: None,
            check_out: None,
            status: AttendanceStatus::Present,
            meals: MealFlags::default(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_list_is_most_recent_first_with_limit() {
        let repo = AttendanceRepository::new(MemoryConnection::new());
        let child = "child::1";

        for day in [8, 10, 9] {
            repo.store_attendance(record_on(child, NaiveDate::from_ymd_opt(2024, 1, day).unwrap()))
                .await
                .expect("Failed to store record");
        }
        repo.store_attendance(record_on("child::other", NaiveDate::from_ymd_opt(2024, 1, 11).unwrap()))
            .await
            .expect("Failed to store record");

        let records = repo
            .list_attendance_for_child(child, None)
            .await
            .expect("Failed to list records");
        let days: Vec<u32> = records
            .iter()
            .map(|r| r.date.format("%d").to_string().parse().unwrap())
            .collect();
        assert_eq!(days, vec![10, 9, 8]);

        let limited = repo
            .list_attendance_for_child(child, Some(2))
            .await
            .expect("Failed to list records");
        assert_eq!(limited.len(), 2);
    }

    #[tokio::test]
    async fn test_update_and_delete_round_trip() {
        let repo = AttendanceRepository::new(MemoryConnection::new());
        let id = repo
            .store_attendance(record_on("child::1", NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()))
            .await
            .expect("Failed to store record");

        let mut record = repo
            .get_attendance(&id)
            .await
            .expect("Failed to get record")
            .unwrap();
        record.status = AttendanceStatus::Late;
        assert!(repo.update_attendance(&record).await.expect("Failed to update"));

        assert!(repo.delete_attendance(&id).await.expect("Failed to delete"));
        assert!(repo
            .get_attendance(&id)
            .await
            .expect("Failed to get record")
            .is_none());
    }
}
