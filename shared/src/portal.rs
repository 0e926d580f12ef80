//! Response types for the parent portal facade.

use serde::{Deserialize, Serialize};

use crate::billing::{BankingInfo, Money, PaymentOutcome};
use crate::children::ChildProfile;
use crate::contacts::ParentContact;

/// Everything the portal home screen needs for one family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyOverview {
    pub parent: ParentContact,
    pub children: Vec<ChildProfile>,
    pub outstanding_balance: Money,
    pub default_payment_method: Option<BankingInfo>,
}

/// Receipt handed back after a portal payment submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortalPaymentReceipt {
    pub payment_id: String,
    pub outcome: PaymentOutcome,
    pub success_message: String,
}
