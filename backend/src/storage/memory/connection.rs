//! Shared handle to one session's in-memory store.

use std::sync::{Arc, RwLock};

use shared::CenterConfig;

use crate::domain::store::CenterStore;
use crate::storage::memory::{
    AttendanceRepository, BankingRepository, ChildRepository, ContactRepository, InvoiceRepository,
};
use crate::storage::traits::Connection;

/// MemoryConnection owns the store for one application session. Cloning it
/// hands out another handle to the same store; building a new one starts a
/// fresh, empty session, so tests and parallel sessions stay isolated.
#[derive(Clone)]
pub struct MemoryConnection {
    store: Arc<RwLock<CenterStore>>,
    config: CenterConfig,
}

impl MemoryConnection {
    pub fn new() -> Self {
        Self::with_config(CenterConfig::default())
    }

    pub fn with_config(config: CenterConfig) -> Self {
        Self {
            store: Arc::new(RwLock::new(CenterStore::new())),
            config,
        }
    }

    pub fn config(&self) -> &CenterConfig {
        &self.config
    }

    /// Run a read-only closure against the store. A poisoned lock is
    /// recovered rather than propagated; the store holds plain data and
    /// stays structurally valid even if a writer panicked.
    pub fn with_store<R>(&self, f: impl FnOnce(&CenterStore) -> R) -> R {
        let guard = self.store.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&guard)
    }

    /// Run a mutating closure against the store.
    pub fn with_store_mut<R>(&self, f: impl FnOnce(&mut CenterStore) -> R) -> R {
        let mut guard = self
            .store
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard)
    }
}

impl Default for MemoryConnection {
    fn default() -> Self {
        Self::new()
    }
}

impl Connection for MemoryConnection {
    type ChildRepository = ChildRepository;
    type ContactRepository = ContactRepository;
    type BankingRepository = BankingRepository;
    type InvoiceRepository = InvoiceRepository;
    type AttendanceRepository = AttendanceRepository;

    fn create_child_repository(&self) -> ChildRepository {
        ChildRepository::new(self.clone())
    }

    fn create_contact_repository(&self) -> ContactRepository {
        ContactRepository::new(self.clone())
    }

    fn create_banking_repository(&self) -> BankingRepository {
        BankingRepository::new(self.clone())
    }

    fn create_invoice_repository(&self) -> InvoiceRepository {
        InvoiceRepository::new(self.clone())
    }

    fn create_attendance_repository(&self) -> AttendanceRepository {
        AttendanceRepository::new(self.clone())
    }
}
