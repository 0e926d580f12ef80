//! Parent portal facade. Written entirely against the storage traits so
//! the in-memory backend can be swapped for a real one without touching
//! this layer.

use anyhow::{anyhow, Result};
use chrono::Utc;
use log::{info, warn};

use shared::{
    AttendanceRecord, ChildProfile, ContactResponse, FamilyOverview, Money, Payment,
    PaymentOutcome, PortalPaymentReceipt, UpdateContactRequest,
};

use crate::storage::traits::{
    AttendanceStorage, BankingStorage, ChildProfileStorage, Connection, ContactStorage,
    InvoiceStorage,
};

/// Parent-facing service assembled from injected repositories
#[derive(Clone)]
pub struct PortalService<C: Connection> {
    child_repository: C::ChildRepository,
    contact_repository: C::ContactRepository,
    banking_repository: C::BankingRepository,
    invoice_repository: C::InvoiceRepository,
    attendance_repository: C::AttendanceRepository,
}

impl<C: Connection> PortalService<C> {
    /// Create a new PortalService backed by the given connection
    pub fn new(connection: &C) -> Self {
        Self {
            child_repository: connection.create_child_repository(),
            contact_repository: connection.create_contact_repository(),
            banking_repository: connection.create_banking_repository(),
            invoice_repository: connection.create_invoice_repository(),
            attendance_repository: connection.create_attendance_repository(),
        }
    }

    /// Everything the portal landing page needs in one call. Returns
    /// `Ok(None)` when the parent is not on file.
    pub async fn family_overview(&self, parent_id: &str) -> Result<Option<FamilyOverview>> {
        info!("Building family overview for parent: {}", parent_id);

        let parent = match self.contact_repository.get_contact(parent_id).await? {
            Some(parent) => parent,
            None => {
                warn!("Parent not found for overview: {}", parent_id);
                return Ok(None);
            }
        };

        let children = self.child_repository.children_of_parent(parent_id).await?;
        let outstanding_balance = self
            .invoice_repository
            .outstanding_balance(parent_id)
            .await?;
        let default_payment_method = self
            .banking_repository
            .list_banking_for_parent(parent_id)
            .await?
            .into_iter()
            .find(|info| info.is_default);

        Ok(Some(FamilyOverview {
            parent,
            children,
            outstanding_balance,
            default_payment_method,
        }))
    }

    /// The children linked to a parent
    pub async fn children_of(&self, parent_id: &str) -> Result<Vec<ChildProfile>> {
        self.child_repository.children_of_parent(parent_id).await
    }

    /// Let a parent correct their own contact details. Returns `Ok(None)`
    /// when the parent is not on file.
    pub async fn update_contact_details(
        &self,
        parent_id: &str,
        request: UpdateContactRequest,
    ) -> Result<Option<ContactResponse>> {
        info!("Portal contact update for parent: {}", parent_id);

        if let Some(ref full_name) = request.full_name {
            if full_name.trim().is_empty() {
                return Err(anyhow!("Contact name cannot be empty"));
            }
        }
        if let Some(ref email) = request.email {
            if !email.contains('@') {
                return Err(anyhow!("Email address is not valid"));
            }
        }

        let mut contact = match self.contact_repository.get_contact(parent_id).await? {
            Some(contact) => contact,
            None => {
                warn!("Parent not found for contact update: {}", parent_id);
                return Ok(None);
            }
        };

        if let Some(full_name) = request.full_name {
            contact.full_name = full_name.trim().to_string();
        }
        if let Some(relationship) = request.relationship {
            contact.relationship = relationship.trim().to_string();
        }
        if let Some(email) = request.email {
            contact.email = email.trim().to_string();
        }
        if let Some(phone) = request.phone {
            contact.phone = phone.trim().to_string();
        }
        if let Some(address) = request.address {
            contact.address = address.trim().to_string();
        }
        if let Some(employer) = request.employer {
            contact.employer = employer;
        }
        if let Some(emergency_contact) = request.emergency_contact {
            contact.emergency_contact = emergency_contact;
        }
        if let Some(authorized_pickup) = request.authorized_pickup {
            contact.authorized_pickup = authorized_pickup;
        }
        if let Some(prefs) = request.prefs {
            contact.prefs = prefs;
        }
        contact.updated_at = Utc::now();

        if !self.contact_repository.update_contact(&contact).await? {
            // Deleted between read and write
            warn!("Parent disappeared during contact update: {}", parent_id);
            return Ok(None);
        }

        Ok(Some(ContactResponse {
            contact,
            success_message: "Contact updated successfully".to_string(),
        }))
    }

    /// Pay toward an invoice from the portal. The payment is accepted even
    /// when the invoice reference does not match; those are held for
    /// reconciliation.
    pub async fn submit_payment(
        &self,
        invoice_id: &str,
        amount: Money,
        method: Option<String>,
    ) -> Result<PortalPaymentReceipt> {
        info!("Portal payment of {} toward invoice {}", amount, invoice_id);

        if amount.is_zero() || amount.is_negative() {
            return Err(anyhow!("Payment amount must be positive"));
        }

        let payment = Payment {
            id: String::new(),
            invoice_id: invoice_id.to_string(),
            amount,
            method,
            received_at: Utc::now(),
        };

        let (payment_id, outcome) = self.invoice_repository.record_payment(payment).await?;

        let success_message = match &outcome {
            PaymentOutcome::Applied { new_balance, .. } => {
                format!("Payment received. Remaining balance: {}", new_balance)
            }
            PaymentOutcome::Orphaned { .. } => {
                warn!("Portal payment {} did not match an invoice", payment_id);
                "Payment received and held for reconciliation".to_string()
            }
        };

        Ok(PortalPaymentReceipt {
            payment_id,
            outcome,
            success_message,
        })
    }

    /// Choose which stored method future payments default to
    pub async fn set_default_payment_method(
        &self,
        parent_id: &str,
        banking_id: &str,
    ) -> Result<bool> {
        info!(
            "Portal default method change for parent {} to {}",
            parent_id, banking_id
        );

        let changed = self
            .banking_repository
            .set_default_method(parent_id, banking_id)
            .await?;

        if !changed {
            warn!(
                "Cannot set default method: {} not on file for parent {}",
                banking_id, parent_id
            );
        }

        Ok(changed)
    }

    /// A child's recent attendance, most recent date first
    pub async fn recent_attendance(
        &self,
        child_id: &str,
        limit: Option<u32>,
    ) -> Result<Vec<AttendanceRecord>> {
        self.attendance_repository
            .list_attendance_for_child(child_id, limit)
            .await
    }
}
