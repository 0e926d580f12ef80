//! Billing types: money, stored payment methods, invoices, payments, and
//! the invoice status machine.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use thiserror::Error;

/// A currency amount in integer cents. Keeping cents in an integer avoids
/// the drift that float currency accumulates over repeated payments.
///
/// Serialized as the raw cent count.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Convert a dollar amount, rounding half away from zero.
    pub fn from_dollars(dollars: f64) -> Self {
        Money((dollars * 100.0).round() as i64)
    }

    pub fn cents(&self) -> i64 {
        self.0
    }

    pub fn as_dollars(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(f, "{}${}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Add for Money {
    type Output = Money;
    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;
    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Money;
    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        Money(iter.map(|m| m.0).sum())
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        Money(iter.map(|m| m.0).sum())
    }
}

/// Payment instrument kind for a stored method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentInstrument {
    Checking,
    Savings,
    CreditCard,
}

impl PaymentInstrument {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentInstrument::Checking => "checking",
            PaymentInstrument::Savings => "savings",
            PaymentInstrument::CreditCard => "credit_card",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "checking" => Ok(PaymentInstrument::Checking),
            "savings" => Ok(PaymentInstrument::Savings),
            "credit_card" => Ok(PaymentInstrument::CreditCard),
            _ => Err(format!("Invalid payment instrument: {}", s)),
        }
    }
}

/// What autopay drafts each cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutopayPolicy {
    FullBalance,
    FixedAmount(Money),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AutopayConfig {
    /// Day of month the draft runs, 1-28.
    pub day_of_month: u8,
    pub policy: AutopayPolicy,
}

/// Mask an account number down to its last four digits. Non-digit
/// separators are dropped before masking.
pub fn mask_account_number(raw: &str) -> String {
    let digits: Vec<char> = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let start = digits.len().saturating_sub(4);
    let tail: String = digits[start..].iter().collect();
    format!("****{}", tail)
}

/// A payment method on file for a parent contact. Only the masked tail of
/// the account number is ever stored or shown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankingInfo {
    pub id: String,
    pub parent_id: String,
    pub instrument: PaymentInstrument,
    pub masked_number: String,
    pub billing_address: String,
    /// At most one method per parent should carry this flag;
    /// `set_default_method` keeps it exclusive.
    pub is_default: bool,
    pub autopay: Option<AutopayConfig>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BankingInfo {
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("banking::{}", epoch_millis)
    }
}

/// Invoice lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Issued,
    Partial,
    Paid,
    Overdue,
    Void,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Issued => "issued",
            InvoiceStatus::Partial => "partial",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
            InvoiceStatus::Void => "void",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(InvoiceStatus::Draft),
            "issued" => Ok(InvoiceStatus::Issued),
            "partial" => Ok(InvoiceStatus::Partial),
            "paid" => Ok(InvoiceStatus::Paid),
            "overdue" => Ok(InvoiceStatus::Overdue),
            "void" => Ok(InvoiceStatus::Void),
            _ => Err(format!("Invalid invoice status: {}", s)),
        }
    }

    /// Statuses that count toward an account's outstanding balance.
    pub fn is_outstanding(&self) -> bool {
        matches!(
            self,
            InvoiceStatus::Issued | InvoiceStatus::Partial | InvoiceStatus::Overdue
        )
    }

    /// Whether moving from `self` to `to` is an allowed transition. Void is
    /// reachable from every non-paid state; paid is terminal for explicit
    /// transitions (payments reach it through `record_payment`, which does
    /// not go through this check).
    pub fn can_transition(&self, to: InvoiceStatus) -> bool {
        use InvoiceStatus::*;
        match (*self, to) {
            (Draft, Issued) => true,
            (Issued, Partial) | (Issued, Paid) | (Issued, Overdue) => true,
            (Partial, Paid) | (Partial, Overdue) => true,
            (Overdue, Partial) | (Overdue, Paid) => true,
            (from, Void) => from != Paid && from != Void,
            _ => false,
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rejected invoice status transition.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invoice {id}: cannot move from {from} to {to}")]
pub struct InvoiceTransitionError {
    pub id: String,
    pub from: InvoiceStatus,
    pub to: InvoiceStatus,
}

/// One billed charge on an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub amount: Money,
}

/// An invoice against a parent account. Payments applied to the invoice are
/// embedded here as well as stored standalone in the payments map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    /// Parent contact id the invoice bills.
    pub account_id: String,
    pub line_items: Vec<LineItem>,
    /// Remaining amount due. Overpayment drives this negative; it is never
    /// clamped.
    pub balance: Money,
    pub status: InvoiceStatus,
    pub payments: Vec<Payment>,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("invoice::{}", epoch_millis)
    }

    /// Sum of line item amounts, independent of payments received.
    pub fn total(&self) -> Money {
        self.line_items.iter().map(|li| li.amount).sum()
    }
}

/// A received payment. Stored standalone even when no matching invoice
/// exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    pub invoice_id: String,
    pub amount: Money,
    /// Free-text method note, e.g. "check #2041".
    pub method: Option<String>,
    pub received_at: DateTime<Utc>,
}

impl Payment {
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("payment::{}", epoch_millis)
    }
}

/// What happened to a recorded payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentOutcome {
    /// The payment reached its invoice and moved the balance.
    Applied {
        invoice_id: String,
        new_balance: Money,
        status: InvoiceStatus,
    },
    /// No invoice matched; the payment was kept standalone.
    Orphaned { invoice_id: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateInvoiceRequest {
    pub account_id: String,
    pub line_items: Vec<LineItem>,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPaymentRequest {
    pub invoice_id: String,
    pub amount: Money,
    pub method: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceResponse {
    pub invoice: Invoice,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentResponse {
    pub payment: Payment,
    pub outcome: PaymentOutcome,
    pub success_message: String,
}

/// Outstanding balance for one parent account, with the invoices behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountBalanceResponse {
    pub account_id: String,
    pub balance: Money,
    pub open_invoices: Vec<Invoice>,
}

/// Request for adding a payment method. Carries the raw account number;
/// only the masked form is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBankingInfoRequest {
    pub parent_id: String,
    pub instrument: PaymentInstrument,
    pub account_number: String,
    pub billing_address: String,
    pub autopay: Option<AutopayConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateBankingInfoRequest {
    pub instrument: Option<PaymentInstrument>,
    pub billing_address: Option<String>,
    /// `Some(None)` turns autopay off.
    pub autopay: Option<Option<AutopayConfig>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankingResponse {
    pub banking: BankingInfo,
    pub success_message: String,
}
