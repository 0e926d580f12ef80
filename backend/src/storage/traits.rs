//! # Storage Traits
//!
//! This module defines the storage abstraction traits the portal-facing
//! services are written against. The in-memory implementation under
//! `memory/` is the only one today; a real persistence backend can replace
//! it without touching calling code.

use anyhow::Result;
use async_trait::async_trait;
use shared::{
    AttendanceRecord, BankingInfo, ChildProfile, Invoice, Money, ParentContact, Payment,
    PaymentOutcome,
};

/// Trait defining the interface for child profile storage operations
///
/// Mutating operations mirror the store's permissive contract: updating or
/// deleting an absent id reports `false` through the return value rather
/// than erroring.
#[async_trait]
pub trait ChildProfileStorage: Send + Sync {
    /// Store a child profile, assigning an id when the profile's id is
    /// empty. Returns the stored id.
    async fn store_child(&self, child: ChildProfile) -> Result<String>;

    /// Retrieve a specific child by ID
    async fn get_child(&self, child_id: &str) -> Result<Option<ChildProfile>>;

    /// List all children in enrollment (insertion) order
    async fn list_children(&self) -> Result<Vec<ChildProfile>>;

    /// List the children linked to one parent contact
    async fn children_of_parent(&self, parent_id: &str) -> Result<Vec<ChildProfile>>;

    /// Replace the stored record under `child.id`
    /// Returns true if the child was found and updated, false otherwise
    async fn update_child(&self, child: &ChildProfile) -> Result<bool>;

    /// Delete a child profile
    /// Returns true if the child was found and deleted, false otherwise
    async fn delete_child(&self, child_id: &str) -> Result<bool>;
}

/// Trait defining the interface for parent contact storage operations
#[async_trait]
pub trait ContactStorage: Send + Sync {
    async fn store_contact(&self, contact: ParentContact) -> Result<String>;

    async fn get_contact(&self, parent_id: &str) -> Result<Option<ParentContact>>;

    /// List all contacts in registration order
    async fn list_contacts(&self) -> Result<Vec<ParentContact>>;

    /// Replace the stored record under `contact.id`
    async fn update_contact(&self, contact: &ParentContact) -> Result<bool>;

    async fn delete_contact(&self, parent_id: &str) -> Result<bool>;
}

/// Trait defining the interface for stored payment method operations
#[async_trait]
pub trait BankingStorage: Send + Sync {
    async fn store_banking_info(&self, info: BankingInfo) -> Result<String>;

    async fn get_banking_info(&self, banking_id: &str) -> Result<Option<BankingInfo>>;

    /// List one parent's payment methods, oldest first
    async fn list_banking_for_parent(&self, parent_id: &str) -> Result<Vec<BankingInfo>>;

    /// Replace the stored record under `info.id`
    async fn update_banking_info(&self, info: &BankingInfo) -> Result<bool>;

    async fn delete_banking_info(&self, banking_id: &str) -> Result<bool>;

    /// Make `banking_id` the single default among `parent_id`'s methods,
    /// clearing the flag on every other method in the same pass.
    /// Returns false when the method is absent or owned by another parent.
    async fn set_default_method(&self, parent_id: &str, banking_id: &str) -> Result<bool>;
}

/// Trait defining the interface for invoice and payment storage operations
///
/// Payments ride along here so the facade covers the full billing surface:
/// recording a payment through this trait behaves exactly like the store's
/// own payment application, orphan acceptance included.
#[async_trait]
pub trait InvoiceStorage: Send + Sync {
    async fn store_invoice(&self, invoice: Invoice) -> Result<String>;

    async fn get_invoice(&self, invoice_id: &str) -> Result<Option<Invoice>>;

    /// List the invoices billed to one parent account, oldest first
    async fn list_invoices_for_account(&self, account_id: &str) -> Result<Vec<Invoice>>;

    /// Record a payment, applying it to its invoice when one matches.
    /// Returns the stored payment id and what happened to it.
    async fn record_payment(&self, payment: Payment) -> Result<(String, PaymentOutcome)>;

    async fn get_payment(&self, payment_id: &str) -> Result<Option<Payment>>;

    async fn list_payments_for_invoice(&self, invoice_id: &str) -> Result<Vec<Payment>>;

    /// Sum of balances over the account's outstanding invoices
    async fn outstanding_balance(&self, account_id: &str) -> Result<Money>;
}

/// Trait defining the interface for attendance record storage operations
#[async_trait]
pub trait AttendanceStorage: Send + Sync {
    async fn store_attendance(&self, record: AttendanceRecord) -> Result<String>;

    async fn get_attendance(&self, record_id: &str) -> Result<Option<AttendanceRecord>>;

    /// List one child's records, most recent date first, up to `limit`
    async fn list_attendance_for_child(
        &self,
        child_id: &str,
        limit: Option<u32>,
    ) -> Result<Vec<AttendanceRecord>>;

    /// Replace the stored record under `record.id`
    async fn update_attendance(&self, record: &AttendanceRecord) -> Result<bool>;

    async fn delete_attendance(&self, record_id: &str) -> Result<bool>;
}

/// Trait for abstracting connection creation and repository factories
///
/// This trait abstracts away the specific connection type and provides
/// factory methods for creating repositories. This allows the domain
/// layer to work with any storage backend without knowing the
/// implementation details.
pub trait Connection: Send + Sync + Clone {
    type ChildRepository: ChildProfileStorage + Clone;
    type ContactRepository: ContactStorage + Clone;
    type BankingRepository: BankingStorage + Clone;
    type InvoiceRepository: InvoiceStorage + Clone;
    type AttendanceRepository: AttendanceStorage + Clone;

    fn create_child_repository(&self) -> Self::ChildRepository;
    fn create_contact_repository(&self) -> Self::ContactRepository;
    fn create_banking_repository(&self) -> Self::BankingRepository;
    fn create_invoice_repository(&self) -> Self::InvoiceRepository;
    fn create_attendance_repository(&self) -> Self::AttendanceRepository;
}
