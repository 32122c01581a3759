//! Ledger events
//!
//! Immutable records emitted by state-changing ledger operations. The
//! ledger appends them to an in-process log that callers can inspect or
//! drain.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::ids::{EmailAddress, WithdrawalId};
use types::withdrawal::PayoutMethod;

/// A zero-balance account was created for a new user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountProvisioned {
    pub user_email: EmailAddress,
}

/// The payout destination was overwritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailsUpdated {
    pub user_email: EmailAddress,
    pub method: PayoutMethod,
}

/// Click earnings were credited to the available balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarningsCredited {
    pub user_email: EmailAddress,
    pub amount: Decimal,
}

/// A user submitted a withdrawal request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalRequested {
    pub user_email: EmailAddress,
    pub withdrawal_id: WithdrawalId,
    pub amount: Decimal,
}

/// An admin approved a pending request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalApproved {
    pub user_email: EmailAddress,
    pub withdrawal_id: WithdrawalId,
}

/// An approved request was paid out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalCompleted {
    pub user_email: EmailAddress,
    pub withdrawal_id: WithdrawalId,
    pub amount: Decimal,
}

/// An open request was cancelled and its funds refunded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalCancelled {
    pub user_email: EmailAddress,
    pub withdrawal_id: WithdrawalId,
    pub amount: Decimal,
}

/// An open request was returned to the user and its funds refunded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalReturned {
    pub user_email: EmailAddress,
    pub withdrawal_id: WithdrawalId,
    pub amount: Decimal,
}

/// Enum wrapper for all ledger events, enabling uniform handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LedgerEvent {
    AccountProvisioned(AccountProvisioned),
    DetailsUpdated(DetailsUpdated),
    EarningsCredited(EarningsCredited),
    WithdrawalRequested(WithdrawalRequested),
    WithdrawalApproved(WithdrawalApproved),
    WithdrawalCompleted(WithdrawalCompleted),
    WithdrawalCancelled(WithdrawalCancelled),
    WithdrawalReturned(WithdrawalReturned),
}
