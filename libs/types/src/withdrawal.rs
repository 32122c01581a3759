//! Withdrawal account and request types
//!
//! One `WithdrawalAccount` exists per user, keyed by email. It carries the
//! aggregate balances, the last-saved payout destination, and the ordered
//! history of withdrawal requests. History is append-only; existing entries
//! mutate in place only for status and admin note.
//!
//! Serialized field names follow the persisted document shape
//! (`availableBalance`, `totalAmount`, ...).

use crate::ids::{EmailAddress, WithdrawalId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a withdrawal request.
///
/// `Pending` → `Approved` → `Complete` | `Returned`;
/// `Pending` | `Approved` → `Cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WithdrawalStatus {
    /// Submitted by the user, awaiting admin review
    Pending,
    /// Accepted by an admin, awaiting payout
    Approved,
    /// Paid out (terminal)
    Complete,
    /// Cancelled by an admin before payout (terminal)
    Cancelled,
    /// Sent back to the user, funds refunded (terminal)
    Returned,
}

impl WithdrawalStatus {
    /// Terminal statuses never change again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Cancelled | Self::Returned)
    }

    /// Statuses that still tie up pending balance.
    pub fn is_open(&self) -> bool {
        !self.is_terminal()
    }
}

impl fmt::Display for WithdrawalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Complete => "Complete",
            Self::Cancelled => "Cancelled",
            Self::Returned => "Returned",
        };
        write!(f, "{}", s)
    }
}

/// Admin action on a withdrawal request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminAction {
    Approve,
    Complete,
    Cancel,
    Return,
}

impl AdminAction {
    /// Parse an action name from the wire, `None` for anything unknown.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "approve" => Some(Self::Approve),
            "complete" => Some(Self::Complete),
            "cancel" => Some(Self::Cancel),
            "return" => Some(Self::Return),
            _ => None,
        }
    }

    /// Past tense for human-readable result messages.
    pub fn past_tense(&self) -> &'static str {
        match self {
            Self::Approve => "approved",
            Self::Complete => "completed",
            Self::Cancel => "cancelled",
            Self::Return => "returned",
        }
    }
}

impl fmt::Display for AdminAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Approve => "approve",
            Self::Complete => "complete",
            Self::Cancel => "cancel",
            Self::Return => "return",
        };
        write!(f, "{}", s)
    }
}

/// Payout method chosen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayoutMethod {
    #[serde(rename = "PayPal")]
    PayPal,
    #[serde(rename = "UPI")]
    Upi,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
}

impl fmt::Display for PayoutMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::PayPal => "PayPal",
            Self::Upi => "UPI",
            Self::BankTransfer => "Bank Transfer",
        };
        write!(f, "{}", s)
    }
}

/// PayPal payout fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaypalDetails {
    pub email: String,
}

/// UPI payout fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpiDetails {
    pub id: String,
}

/// Bank transfer payout fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankDetails {
    pub bank_name: String,
    pub account_number: String,
    pub ifsc_code: String,
    pub account_holder_name: String,
}

/// Last-saved payout destination. Overwritten wholesale on update; no
/// history kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutDetails {
    pub selected_method: PayoutMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paypal: Option<PaypalDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upi: Option<UpiDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank: Option<BankDetails>,
}

impl PayoutDetails {
    /// Short destination string for admin listings. Bank account numbers
    /// are masked down to the last four digits.
    pub fn masked_destination(&self) -> String {
        match self.selected_method {
            PayoutMethod::PayPal => self
                .paypal
                .as_ref()
                .map(|p| p.email.clone())
                .unwrap_or_else(|| "N/A".to_string()),
            PayoutMethod::Upi => self
                .upi
                .as_ref()
                .map(|u| u.id.clone())
                .unwrap_or_else(|| "N/A".to_string()),
            PayoutMethod::BankTransfer => self
                .bank
                .as_ref()
                .map(|b| {
                    let tail: String = b
                        .account_number
                        .chars()
                        .rev()
                        .take(4)
                        .collect::<Vec<_>>()
                        .into_iter()
                        .rev()
                        .collect();
                    format!("****{}", tail)
                })
                .unwrap_or_else(|| "N/A".to_string()),
        }
    }
}

/// A single withdrawal request embedded in the account history.
///
/// `total_amount` is fixed at creation and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalRequest {
    pub withdrawal_id: WithdrawalId,
    pub total_amount: Decimal,
    pub status: WithdrawalStatus,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_note: Option<String>,
}

impl WithdrawalRequest {
    /// Create a fresh request in `Pending` status.
    pub fn new(total_amount: Decimal, date: DateTime<Utc>) -> Self {
        Self {
            withdrawal_id: WithdrawalId::new(),
            total_amount,
            status: WithdrawalStatus::Pending,
            date,
            admin_note: None,
        }
    }
}

/// Withdrawal account for one user.
///
/// Invariant: `available_balance + pending_balance` reflects all funds not
/// yet withdrawn; `total_withdrawn` increases only when a request
/// transitions to `Complete`, by exactly that request's `total_amount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalAccount {
    pub user_email: EmailAddress,
    pub available_balance: Decimal,
    pub pending_balance: Decimal,
    pub total_withdrawn: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub withdrawal_details: Option<PayoutDetails>,
    #[serde(default)]
    pub history: Vec<WithdrawalRequest>,
    /// Monotonic mutation counter; bumped on every persisted change.
    #[serde(default)]
    pub version: u64,
}

impl WithdrawalAccount {
    /// Create a zero-balance account for a user.
    pub fn new(user_email: EmailAddress) -> Self {
        Self {
            user_email,
            available_balance: Decimal::ZERO,
            pending_balance: Decimal::ZERO,
            total_withdrawn: Decimal::ZERO,
            withdrawal_details: None,
            history: Vec::new(),
            version: 0,
        }
    }

    /// Find a request in the history by ID.
    pub fn find_request(&self, id: &WithdrawalId) -> Option<&WithdrawalRequest> {
        self.history.iter().find(|r| r.withdrawal_id == *id)
    }

    /// Find a request in the history by ID, mutably.
    pub fn find_request_mut(&mut self, id: &WithdrawalId) -> Option<&mut WithdrawalRequest> {
        self.history.iter_mut().find(|r| r.withdrawal_id == *id)
    }

    /// Sum of every balance bucket. Conserved across requests and admin
    /// actions; only earnings credits increase it.
    pub fn lifetime_total(&self) -> Decimal {
        self.available_balance + self.pending_balance + self.total_withdrawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_details() -> PayoutDetails {
        PayoutDetails {
            selected_method: PayoutMethod::PayPal,
            paypal: Some(PaypalDetails {
                email: "alice@example.com".to_string(),
            }),
            upi: None,
            bank: None,
        }
    }

    #[test]
    fn test_status_terminal() {
        assert!(!WithdrawalStatus::Pending.is_terminal());
        assert!(!WithdrawalStatus::Approved.is_terminal());
        assert!(WithdrawalStatus::Complete.is_terminal());
        assert!(WithdrawalStatus::Cancelled.is_terminal());
        assert!(WithdrawalStatus::Returned.is_terminal());
    }

    #[test]
    fn test_status_serializes_as_document_strings() {
        let json = serde_json::to_string(&WithdrawalStatus::Pending).unwrap();
        assert_eq!(json, "\"Pending\"");
        let status: WithdrawalStatus = serde_json::from_str("\"Cancelled\"").unwrap();
        assert_eq!(status, WithdrawalStatus::Cancelled);
    }

    #[test]
    fn test_admin_action_parse() {
        assert_eq!(AdminAction::parse("approve"), Some(AdminAction::Approve));
        assert_eq!(AdminAction::parse("return"), Some(AdminAction::Return));
        assert_eq!(AdminAction::parse("reject"), None);
        assert_eq!(AdminAction::parse("Approve"), None);
    }

    #[test]
    fn test_payout_method_wire_names() {
        let json = serde_json::to_string(&PayoutMethod::BankTransfer).unwrap();
        assert_eq!(json, "\"Bank Transfer\"");
        let method: PayoutMethod = serde_json::from_str("\"UPI\"").unwrap();
        assert_eq!(method, PayoutMethod::Upi);
    }

    #[test]
    fn test_masked_destination_bank() {
        let details = PayoutDetails {
            selected_method: PayoutMethod::BankTransfer,
            paypal: None,
            upi: None,
            bank: Some(BankDetails {
                bank_name: "First National".to_string(),
                account_number: "12345678901234".to_string(),
                ifsc_code: "FNB0001234".to_string(),
                account_holder_name: "Alice".to_string(),
            }),
        };
        assert_eq!(details.masked_destination(), "****1234");
    }

    #[test]
    fn test_masked_destination_missing_fields() {
        let details = PayoutDetails {
            selected_method: PayoutMethod::Upi,
            paypal: None,
            upi: None,
            bank: None,
        };
        assert_eq!(details.masked_destination(), "N/A");
    }

    #[test]
    fn test_account_serialized_field_names() {
        let mut account = WithdrawalAccount::new(EmailAddress::new("alice@example.com"));
        account.withdrawal_details = Some(sample_details());
        account.history.push(WithdrawalRequest::new(
            Decimal::new(4000, 2),
            Utc::now(),
        ));

        let json = serde_json::to_value(&account).unwrap();
        assert!(json.get("userEmail").is_some());
        assert!(json.get("availableBalance").is_some());
        assert!(json.get("pendingBalance").is_some());
        assert!(json.get("totalWithdrawn").is_some());
        assert!(json["withdrawalDetails"].get("selectedMethod").is_some());
        assert!(json["history"][0].get("withdrawalId").is_some());
        assert!(json["history"][0].get("totalAmount").is_some());
    }

    #[test]
    fn test_find_request() {
        let mut account = WithdrawalAccount::new(EmailAddress::new("bob@example.com"));
        let request = WithdrawalRequest::new(Decimal::from(10), Utc::now());
        let id = request.withdrawal_id;
        account.history.push(request);

        assert!(account.find_request(&id).is_some());
        assert!(account.find_request(&WithdrawalId::new()).is_none());
    }

    #[test]
    fn test_lifetime_total() {
        let mut account = WithdrawalAccount::new(EmailAddress::new("bob@example.com"));
        account.available_balance = Decimal::from(60);
        account.pending_balance = Decimal::from(40);
        account.total_withdrawn = Decimal::from(25);
        assert_eq!(account.lifetime_total(), Decimal::from(125));
    }
}
