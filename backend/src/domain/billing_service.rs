//! Billing service: banking info on file, invoices, and payment intake.

use anyhow::{anyhow, Result};
use chrono::Utc;
use log::{info, warn};

use shared::{
    AccountBalanceResponse, AutopayConfig, BankingInfo, BankingResponse,
    CreateBankingInfoRequest, CreateInvoiceRequest, Invoice, InvoiceResponse, InvoiceStatus,
    Payment, PaymentOutcome, PaymentResponse, RecordPaymentRequest, UpdateBankingInfoRequest,
};

use crate::domain::views;
use crate::storage::memory::MemoryConnection;

/// Service for managing billing in the center
#[derive(Clone)]
pub struct BillingService {
    connection: MemoryConnection,
}

impl BillingService {
    /// Create a new BillingService
    pub fn new(connection: MemoryConnection) -> Self {
        Self { connection }
    }

    /// Put a payment method on file for a parent. Only the masked account
    /// number is retained. The first method stored for a parent becomes
    /// their default.
    pub fn add_banking_info(&self, request: CreateBankingInfoRequest) -> Result<BankingResponse> {
        info!("Adding banking info for parent: {}", request.parent_id);

        self.validate_account_number(&request.account_number)?;
        if let Some(ref autopay) = request.autopay {
            self.validate_autopay(autopay)?;
        }

        let now = Utc::now();
        let mut banking = BankingInfo {
            id: String::new(),
            parent_id: request.parent_id,
            instrument: request.instrument,
            masked_number: shared::mask_account_number(&request.account_number),
            billing_address: request.billing_address.trim().to_string(),
            is_default: false,
            autopay: request.autopay,
            created_at: now,
            updated_at: now,
        };

        let (id, is_default) = self.connection.with_store_mut(|store| {
            let first_for_parent = !store
                .banking()
                .iter()
                .any(|info| info.parent_id == banking.parent_id);
            let mut stored = banking.clone();
            stored.is_default = first_for_parent;
            (store.banking_mut().add(stored), first_for_parent)
        });
        banking.id = id;
        banking.is_default = is_default;

        info!(
            "Stored banking info {} ({}) for parent {}",
            banking.id, banking.masked_number, banking.parent_id
        );

        Ok(BankingResponse {
            banking,
            success_message: "Banking info saved successfully".to_string(),
        })
    }

    /// Get a payment method by ID
    pub fn get_banking(&self, banking_id: &str) -> Result<Option<BankingInfo>> {
        Ok(self
            .connection
            .with_store(|store| store.banking().get(banking_id).cloned()))
    }

    /// All payment methods on file for a parent, in insertion order
    pub fn list_banking_for_parent(&self, parent_id: &str) -> Result<Vec<BankingInfo>> {
        Ok(self.connection.with_store(|store| {
            store
                .banking()
                .iter()
                .filter(|info| info.parent_id == parent_id)
                .cloned()
                .collect()
        }))
    }

    /// Update a payment method. Returns `Ok(None)` when it does not exist.
    pub fn update_banking(
        &self,
        banking_id: &str,
        request: UpdateBankingInfoRequest,
    ) -> Result<Option<BankingResponse>> {
        info!("Updating banking info: {}", banking_id);

        if let Some(Some(ref autopay)) = request.autopay {
            self.validate_autopay(autopay)?;
        }

        let updated = self.connection.with_store_mut(|store| {
            let touched = store.banking_mut().update(banking_id, |banking| {
                if let Some(instrument) = request.instrument {
                    banking.instrument = instrument;
                }
                if let Some(billing_address) = request.billing_address {
                    banking.billing_address = billing_address.trim().to_string();
                }
                if let Some(autopay) = request.autopay {
                    banking.autopay = autopay;
                }
                banking.updated_at = Utc::now();
            });
            if touched {
                store.banking().get(banking_id).cloned()
            } else {
                None
            }
        });

        match updated {
            Some(banking) => Ok(Some(BankingResponse {
                banking,
                success_message: "Banking info updated successfully".to_string(),
            })),
            None => {
                warn!("Banking info not found for update: {}", banking_id);
                Ok(None)
            }
        }
    }

    /// Remove a payment method
    pub fn remove_banking(&self, banking_id: &str) -> Result<Option<BankingInfo>> {
        info!("Removing banking info: {}", banking_id);

        let removed = self
            .connection
            .with_store_mut(|store| store.banking_mut().remove(banking_id));

        if removed.is_none() {
            warn!("Banking info not found for removal: {}", banking_id);
        }

        Ok(removed)
    }

    /// Make one of a parent's methods the single default
    pub fn set_default_method(&self, parent_id: &str, banking_id: &str) -> Result<bool> {
        info!(
            "Setting default payment method for parent {} to {}",
            parent_id, banking_id
        );

        let changed = self
            .connection
            .with_store_mut(|store| store.set_default_method(parent_id, banking_id));

        if !changed {
            warn!(
                "Cannot set default method: {} not on file for parent {}",
                banking_id, parent_id
            );
        }

        Ok(changed)
    }

    /// Attach or replace the autopay schedule on a payment method
    pub fn configure_autopay(
        &self,
        banking_id: &str,
        autopay: AutopayConfig,
    ) -> Result<Option<BankingResponse>> {
        info!(
            "Configuring autopay on {} for day {}",
            banking_id, autopay.day_of_month
        );

        self.validate_autopay(&autopay)?;

        self.update_banking(
            banking_id,
            UpdateBankingInfoRequest {
                autopay: Some(Some(autopay)),
                ..Default::default()
            },
        )
    }

    /// Create a draft invoice. The balance starts at the sum of the line
    /// items.
    pub fn create_invoice(&self, request: CreateInvoiceRequest) -> Result<InvoiceResponse> {
        info!("Creating invoice for account: {}", request.account_id);

        self.validate_create_invoice(&request)?;

        let now = Utc::now();
        let balance = request.line_items.iter().map(|item| item.amount).sum();
        let mut invoice = Invoice {
            id: String::new(),
            account_id: request.account_id.trim().to_string(),
            line_items: request.line_items,
            balance,
            status: InvoiceStatus::Draft,
            payments: vec![],
            due_date: request.due_date,
            created_at: now,
            updated_at: now,
        };

        let id = self
            .connection
            .with_store_mut(|store| store.invoices_mut().add(invoice.clone()));
        invoice.id = id;

        info!(
            "Created invoice {} for {} totaling {}",
            invoice.id, invoice.account_id, invoice.balance
        );

        Ok(InvoiceResponse {
            invoice,
            success_message: "Invoice created successfully".to_string(),
        })
    }

    /// Get an invoice by ID
    pub fn get_invoice(&self, invoice_id: &str) -> Result<Option<Invoice>> {
        Ok(self
            .connection
            .with_store(|store| store.invoices().get(invoice_id).cloned()))
    }

    /// All invoices for an account regardless of status, in creation order
    pub fn invoices_for_account(&self, account_id: &str) -> Result<Vec<Invoice>> {
        Ok(self.connection.with_store(|store| {
            store
                .invoices()
                .iter()
                .filter(|invoice| invoice.account_id == account_id)
                .cloned()
                .collect()
        }))
    }

    /// Move a draft invoice to issued. Returns `Ok(None)` when the invoice
    /// does not exist and an error when its current status forbids the move.
    pub fn issue_invoice(&self, invoice_id: &str) -> Result<Option<InvoiceResponse>> {
        info!("Issuing invoice: {}", invoice_id);

        let issued = self
            .connection
            .with_store_mut(|store| store.issue_invoice(invoice_id))?;

        self.transition_response(invoice_id, issued, "Invoice issued successfully")
    }

    /// Void an invoice. Paid and already-void invoices cannot be voided.
    pub fn void_invoice(&self, invoice_id: &str) -> Result<Option<InvoiceResponse>> {
        info!("Voiding invoice: {}", invoice_id);

        let voided = self
            .connection
            .with_store_mut(|store| store.void_invoice(invoice_id))?;

        self.transition_response(invoice_id, voided, "Invoice voided successfully")
    }

    /// Flag an issued or partially paid invoice as overdue
    pub fn mark_overdue(&self, invoice_id: &str) -> Result<Option<InvoiceResponse>> {
        info!("Marking invoice overdue: {}", invoice_id);

        let marked = self
            .connection
            .with_store_mut(|store| store.mark_overdue(invoice_id))?;

        self.transition_response(invoice_id, marked, "Invoice marked overdue")
    }

    /// Record a payment. The payment is always stored; when the target
    /// invoice exists the balance and status are updated as well.
    pub fn record_payment(&self, request: RecordPaymentRequest) -> Result<PaymentResponse> {
        info!(
            "Recording payment of {} against invoice {}",
            request.amount, request.invoice_id
        );

        if request.amount.is_zero() || request.amount.is_negative() {
            return Err(anyhow!("Payment amount must be positive"));
        }

        let mut payment = Payment {
            id: String::new(),
            invoice_id: request.invoice_id,
            amount: request.amount,
            method: request.method,
            received_at: Utc::now(),
        };

        let (payment_id, outcome) = self
            .connection
            .with_store_mut(|store| store.record_payment(payment.clone()));
        payment.id = payment_id;

        if let PaymentOutcome::Orphaned { ref invoice_id } = outcome {
            warn!(
                "Payment {} references unknown invoice {}; kept for reconciliation",
                payment.id, invoice_id
            );
        }

        Ok(PaymentResponse {
            payment,
            outcome,
            success_message: "Payment recorded successfully".to_string(),
        })
    }

    /// Outstanding balance and open invoices for an account
    pub fn account_balance(&self, account_id: &str) -> Result<AccountBalanceResponse> {
        let (balance, open_invoices) = self.connection.with_store(|store| {
            let balance = views::account_balance(store, account_id);
            let open_invoices = store
                .invoices()
                .iter()
                .filter(|invoice| {
                    invoice.account_id == account_id && invoice.status.is_outstanding()
                })
                .cloned()
                .collect();
            (balance, open_invoices)
        });

        Ok(AccountBalanceResponse {
            account_id: account_id.to_string(),
            balance,
            open_invoices,
        })
    }

    /// Shared tail for the status transition endpoints
    fn transition_response(
        &self,
        invoice_id: &str,
        new_status: Option<InvoiceStatus>,
        success_message: &str,
    ) -> Result<Option<InvoiceResponse>> {
        match new_status {
            Some(_) => {
                let invoice = self
                    .connection
                    .with_store(|store| store.invoices().get(invoice_id).cloned())
                    .ok_or_else(|| anyhow!("Invoice {} disappeared mid transition", invoice_id))?;
                Ok(Some(InvoiceResponse {
                    invoice,
                    success_message: success_message.to_string(),
                }))
            }
            None => {
                warn!("Invoice not found: {}", invoice_id);
                Ok(None)
            }
        }
    }

    /// Validate an invoice creation request
    fn validate_create_invoice(&self, request: &CreateInvoiceRequest) -> Result<()> {
        if request.account_id.trim().is_empty() {
            return Err(anyhow!("Account ID cannot be empty"));
        }
        if request.line_items.is_empty() {
            return Err(anyhow!("Invoice must have at least one line item"));
        }

        let max = self.connection.config().max_description_length;
        for item in &request.line_items {
            if item.description.trim().is_empty() {
                return Err(anyhow!("Line item description cannot be empty"));
            }
            if item.description.len() > max {
                return Err(anyhow!(
                    "Line item description cannot exceed {} characters",
                    max
                ));
            }
        }

        Ok(())
    }

    /// Validate a raw account number before masking
    fn validate_account_number(&self, raw: &str) -> Result<()> {
        let digits = raw.chars().filter(|c| c.is_ascii_digit()).count();
        if digits < 4 {
            return Err(anyhow!("Account number must contain at least 4 digits"));
        }
        Ok(())
    }

    /// Validate an autopay schedule
    fn validate_autopay(&self, autopay: &AutopayConfig) -> Result<()> {
        if autopay.day_of_month < 1 || autopay.day_of_month > 28 {
            return Err(anyhow!("Autopay day of month must be between 1 and 28"));
        }
        Ok(())
    }
}
