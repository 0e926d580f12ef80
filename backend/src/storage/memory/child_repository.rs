//! In-memory child profile repository.

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, warn};

use shared::ChildProfile;

use crate::storage::memory::connection::MemoryConnection;
use crate::storage::traits::ChildProfileStorage;

/// Child repository backed by the session's in-memory store. Resolves
/// immediately; the async surface exists so a real persistence backend can
/// slot in behind the same trait.
#[derive(Clone)]
pub struct ChildRepository {
    connection: MemoryConnection,
}

impl ChildRepository {
    pub fn new(connection: MemoryConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl ChildProfileStorage for ChildRepository {
    async fn store_child(&self, child: ChildProfile) -> Result<String> {
        let id = self
            .connection
            .with_store_mut(|store| store.children_mut().add(child));
        debug!("Stored child: {}", id);
        Ok(id)
    }

    async fn get_child(&self, child_id: &str) -> Result<Option<ChildProfile>> {
        Ok(self
            .connection
            .with_store(|store| store.children().get(child_id).cloned()))
    }

    async fn list_children(&self) -> Result<Vec<ChildProfile>> {
        Ok(self
            .connection
            .with_store(|store| store.children().iter().cloned().collect()))
    }

    async fn children_of_parent(&self, parent_id: &str) -> Result<Vec<ChildProfile>> {
        Ok(self.connection.with_store(|store| {
            store
                .children()
                .iter()
                .filter(|child| child.parent_ids.iter().any(|id| id == parent_id))
                .cloned()
                .collect()
        }))
    }

    async fn update_child(&self, child: &ChildProfile) -> Result<bool> {
        let updated = self.connection.with_store_mut(|store| {
            store
                .children_mut()
                .update(&child.id, |stored| *stored = child.clone())
        });
        if !updated {
            warn!("Child not found for update: {}", child.id);
        }
        Ok(updated)
    }

    async fn delete_child(&self, child_id: &str) -> Result<bool> {
        let removed = self
            .connection
            .with_store_mut(|store| store.children_mut().remove(child_id).is_some());
        if removed {
            debug!("Deleted child: {}", child_id);
        } else {
            warn!("Child not found for delete: {}", child_id);
        }
        Ok(removed)
    }
}
