//! In-memory parent contact repository.

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, warn};

use shared::ParentContact;

use crate::storage::memory::connection::MemoryConnection;
use crate::storage::traits::ContactStorage;

#[derive(Clone)]
pub struct ContactRepository {
    connection: MemoryConnection,
}

impl ContactRepository {
    pub fn new(connection: MemoryConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl ContactStorage for ContactRepository {
    async fn store_contact(&self, contact: ParentContact) -> Result<String> {
        let id = self
            .connection
            .with_store_mut(|store| store.contacts_mut().add(contact));
        debug!("Stored contact: {}", id);
        Ok(id)
    }

    async fn get_contact(&self, parent_id: &str) -> Result<Option<ParentContact>> {
        Ok(self
            .connection
            .with_store(|store| store.contacts().get(parent_id).cloned()))
    }

    async fn list_contacts(&self) -> Result<Vec<ParentContact>> {
        Ok(self
            .connection
            .with_store(|store| store.contacts().iter().cloned().collect()))
    }

    async fn update_contact(&self, contact: &ParentContact) -> Result<bool> {
        let updated = self.connection.with_store_mut(|store| {
            store
                .contacts_mut()
                .update(&contact.id, |stored| *stored = contact.clone())
        });
        if !updated {
            warn!("Contact not found for update: {}", contact.id);
        }
        Ok(updated)
    }

    async fn delete_contact(&self, parent_id: &str) -> Result<bool> {
        let removed = self
            .connection
            .with_store_mut(|store| store.contacts_mut().remove(parent_id).is_some());
        if !removed {
            warn!("Contact not found for delete: {}", parent_id);
        }
        Ok(removed)
    }
}
