//! In-memory payment method repository.

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info, warn};

use shared::BankingInfo;

use crate::storage::memory::connection::MemoryConnection;
use crate::storage::traits::BankingStorage;

#[derive(Clone)]
pub struct BankingRepository {
    connection: MemoryConnection,
}

impl BankingRepository {
    pub fn new(connection: MemoryConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl BankingStorage for BankingRepository {
    async fn store_banking_info(&self, info: BankingInfo) -> Result<String> {
        let id = self
            .connection
            .with_store_mut(|store| store.banking_mut().add(info));
        debug!("Stored banking info: {}", id);
        Ok(id)
    }

    async fn get_banking_info(&self, banking_id: &str) -> Result<Option<BankingInfo>> {
        Ok(self
            .connection
            .with_store(|store| store.banking().get(banking_id).cloned()))
    }

    async fn list_banking_for_parent(&self, parent_id: &str) -> Result<Vec<BankingInfo>> {
        Ok(self.connection.with_store(|store| {
            store
                .banking()
                .iter()
                .filter(|info| info.parent_id == parent_id)
                .cloned()
                .collect()
        }))
    }

    async fn update_banking_info(&self, info: &BankingInfo) -> Result<bool> {
        let updated = self.connection.with_store_mut(|store| {
            store
                .banking_mut()
                .update(&info.id, |stored| *stored = info.clone())
        });
        if !updated {
            warn!("Banking info not found for update: {}", info.id);
        }
        Ok(updated)
    }

    async fn delete_banking_info(&self, banking_id: &str) -> Result<bool> {
        let removed = self
            .connection
            .with_store_mut(|store| store.banking_mut().remove(banking_id).is_some());
        if !removed {
            warn!("Banking info not found for delete: {}", banking_id);
        }
        Ok(removed)
    }

    async fn set_default_method(&self, parent_id: &str, banking_id: &str) -> Result<bool> {
        let changed = self
            .connection
            .with_store_mut(|store| store.set_default_method(parent_id, banking_id));
        if changed {
            info!("Default payment method for {} is now {}", parent_id, banking_id);
        } else {
            warn!(
                "Cannot set default method {} for {}: not found or not theirs",
                banking_id, parent_id
            );
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared::PaymentInstrument;

    fn sample_info(parent_id: &str) -> BankingInfo {
        let now = Utc::now();
        BankingInfo {
            id: String::new(),
            parent_id: parent_id.to_string(),
            instrument: PaymentInstrument::Checking,
            masked_number: "****6789".to_string(),
            billing_address: "12 Elm St".to_string(),
            is_default: false,
            autopay: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_banking_crud_and_default_sweep() {
        let repo = BankingRepository::new(MemoryConnection::new());

        let first = repo
            .store_banking_info(sample_info("parent::1"))
            .await
            .expect("Failed to store banking info");
        let second = repo
            .store_banking_info(sample_info("parent::1"))
            .await
            .expect("Failed to store banking info");

        assert!(repo
            .set_default_method("parent::1", &second)
            .await
            .expect("Failed to set default"));

        let methods = repo
            .list_banking_for_parent("parent::1")
            .await
            .expect("Failed to list methods");
        let defaults: Vec<bool> = methods.iter().map(|m| m.is_default).collect();
        assert_eq!(defaults, vec![false, true]);

        let mut info = repo
            .get_banking_info(&first)
            .await
            .expect("Failed to get banking info")
            .unwrap();
        info.billing_address = "99 Oak Ave".to_string();
        assert!(repo.update_banking_info(&info).await.expect("Failed to update"));

        assert!(repo.delete_banking_info(&first).await.expect("Failed to delete"));
        assert!(!repo
            .set_default_method("parent::1", &first)
            .await
            .expect("set_default should not error"));
    }
}
