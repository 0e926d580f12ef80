//! Invoice lifecycle and payment application.
//!
//! Payments are denormalized: every payment lands in the standalone
//! payments map, and those that find their invoice are additionally copied
//! into the invoice's embedded list. A payment whose invoice does not
//! exist is kept anyway (orphaned) rather than rejected.

use chrono::Utc;
use shared::{InvoiceStatus, InvoiceTransitionError, Money, Payment, PaymentOutcome};

use crate::domain::store::CenterStore;

impl CenterStore {
    /// Record a payment. The payment is always stored; when its invoice
    /// exists, the invoice's balance drops by the payment amount and its
    /// status becomes `Paid` when the balance reaches zero or below, else
    /// `Partial`. Overpayment drives the balance negative without any
    /// clamp, and the status stays `Paid`. Returns the stored payment id
    /// and what happened.
    pub fn record_payment(&mut self, payment: Payment) -> (String, PaymentOutcome) {
        let invoice_id = payment.invoice_id.clone();
        let amount = payment.amount;

        let mut embedded = payment.clone();
        let payment_id = self.payments_mut().add(payment);
        embedded.id = payment_id.clone();

        let mut applied: Option<(Money, InvoiceStatus)> = None;
        self.invoices_mut().update(&invoice_id, |invoice| {
            invoice.payments.push(embedded);
            invoice.balance -= amount;
            invoice.status = if invoice.balance <= Money::ZERO {
                InvoiceStatus::Paid
            } else {
                InvoiceStatus::Partial
            };
            invoice.updated_at = Utc::now();
            applied = Some((invoice.balance, invoice.status));
        });

        let outcome = match applied {
            Some((new_balance, status)) => PaymentOutcome::Applied {
                invoice_id,
                new_balance,
                status,
            },
            None => PaymentOutcome::Orphaned { invoice_id },
        };

        (payment_id, outcome)
    }

    /// Move a draft invoice to issued.
    pub fn issue_invoice(
        &mut self,
        invoice_id: &str,
    ) -> Result<Option<InvoiceStatus>, InvoiceTransitionError> {
        self.transition_invoice(invoice_id, InvoiceStatus::Issued)
    }

    /// Void an invoice. Allowed from every status except paid.
    pub fn void_invoice(
        &mut self,
        invoice_id: &str,
    ) -> Result<Option<InvoiceStatus>, InvoiceTransitionError> {
        self.transition_invoice(invoice_id, InvoiceStatus::Void)
    }

    /// Flag an issued or partially paid invoice as overdue.
    pub fn mark_overdue(
        &mut self,
        invoice_id: &str,
    ) -> Result<Option<InvoiceStatus>, InvoiceTransitionError> {
        self.transition_invoice(invoice_id, InvoiceStatus::Overdue)
    }

    /// Make `banking_id` the single default payment method among
    /// `parent_id`'s stored methods: every method the parent owns has its
    /// `is_default` flag rewritten in one pass. Returns false when the
    /// method is absent or owned by a different parent.
    pub fn set_default_method(&mut self, parent_id: &str, banking_id: &str) -> bool {
        match self.banking().get(banking_id) {
            Some(info) if info.parent_id == parent_id => {}
            _ => return false,
        }

        let method_ids: Vec<String> = self
            .banking()
            .iter()
            .filter(|info| info.parent_id == parent_id)
            .map(|info| info.id.clone())
            .collect();

        for id in &method_ids {
            self.banking_mut().update(id, |info| {
                info.is_default = info.id == banking_id;
            });
        }

        true
    }

    /// Shared transition path: `Ok(None)` when the invoice is absent, an
    /// error when the move is outside the allowed set, `Ok(Some(new))`
    /// on success.
    fn transition_invoice(
        &mut self,
        invoice_id: &str,
        to: InvoiceStatus,
    ) -> Result<Option<InvoiceStatus>, InvoiceTransitionError> {
        let from = match self.invoices().get(invoice_id) {
            Some(invoice) => invoice.status,
            None => return Ok(None),
        };

        if !from.can_transition(to) {
            return Err(InvoiceTransitionError {
                id: invoice_id.to_string(),
                from,
                to,
            });
        }

        self.invoices_mut().update(invoice_id, |invoice| {
            invoice.status = to;
            invoice.updated_at = Utc::now();
        });

        Ok(Some(to))
    }
}
