//! In-memory invoice and payment repository.

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info, warn};

use shared::{Invoice, Money, Payment, PaymentOutcome};

use crate::domain::views;
use crate::storage::memory::connection::MemoryConnection;
use crate::storage::traits::InvoiceStorage;

#[derive(Clone)]
pub struct InvoiceRepository {
    connection: MemoryConnection,
}

impl InvoiceRepository {
    pub fn new(connection: MemoryConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl InvoiceStorage for InvoiceRepository {
    async fn store_invoice(&self, invoice: Invoice) -> Result<String> {
        let id = self
            .connection
            .with_store_mut(|store| store.invoices_mut().add(invoice));
        debug!("Stored invoice: {}", id);
        Ok(id)
    }

    async fn get_invoice(&self, invoice_id: &str) -> Result<Option<Invoice>> {
        Ok(self
            .connection
            .with_store(|store| store.invoices().get(invoice_id).cloned()))
    }

    async fn list_invoices_for_account(&self, account_id: &str) -> Result<Vec<Invoice>> {
        Ok(self.connection.with_store(|store| {
            store
                .invoices()
                .iter()
                .filter(|invoice| invoice.account_id == account_id)
                .cloned()
                .collect()
        }))
    }

    async fn record_payment(&self, payment: Payment) -> Result<(String, PaymentOutcome)> {
        let (payment_id, outcome) = self
            .connection
            .with_store_mut(|store| store.record_payment(payment));

        match &outcome {
            PaymentOutcome::Applied {
                invoice_id,
                new_balance,
                ..
            } => info!(
                "Payment {} applied to {}: balance now {}",
                payment_id, invoice_id, new_balance
            ),
            PaymentOutcome::Orphaned { invoice_id } => warn!(
                "Payment {} kept without invoice: {} does not exist",
                payment_id, invoice_id
            ),
        }

        Ok((payment_id, outcome))
    }

    async fn get_payment(&self, payment_id: &str) -> Result<Option<Payment>> {
        Ok(self
            .connection
            .with_store(|store| store.payments().get(payment_id).cloned()))
    }

    async fn list_payments_for_invoice(&self, invoice_id: &str) -> Result<Vec<Payment>> {
        Ok(self.connection.with_store(|store| {
            store
                .payments()
                .iter()
                .filter(|payment| payment.invoice_id == invoice_id)
                .cloned()
                .collect()
        }))
    }

    async fn outstanding_balance(&self, account_id: &str) -> Result<Money> {
        Ok(self
            .connection
            .with_store(|store| views::account_balance(store, account_id)))
    }
}
