//! Withdrawal status transition table
//!
//! The single source of truth for which admin action is valid from which
//! status, what the resulting status is, and how the account's aggregate
//! balances move. Callers apply the returned `BalanceEffect` with the
//! request's fixed `total_amount`.
//!
//! ```text
//! Pending ──approve──▶ Approved ──complete──▶ Complete
//!    │                    │
//!    ├──cancel────────────┼──cancel──▶ Cancelled
//!    └──return────────────┴──return──▶ Returned
//! ```

use crate::errors::LedgerError;
use types::withdrawal::{AdminAction, WithdrawalStatus};

/// How an accepted transition moves the account balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceEffect {
    /// No balance movement (approve)
    None,
    /// `pending -= amount`, `total_withdrawn += amount` (complete)
    Payout,
    /// `pending -= amount`, `available += amount` (cancel, return)
    Refund,
}

/// An accepted transition: the status to write and the balance movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: WithdrawalStatus,
    pub effect: BalanceEffect,
}

/// Resolve an action against the request's current status.
///
/// Rejected combinations return `InvalidTransition` and imply no state
/// change of any kind.
pub fn apply(action: AdminAction, current: WithdrawalStatus) -> Result<Transition, LedgerError> {
    let transition = match (action, current) {
        (AdminAction::Approve, WithdrawalStatus::Pending) => Transition {
            next: WithdrawalStatus::Approved,
            effect: BalanceEffect::None,
        },
        (AdminAction::Complete, WithdrawalStatus::Approved) => Transition {
            next: WithdrawalStatus::Complete,
            effect: BalanceEffect::Payout,
        },
        (AdminAction::Cancel, WithdrawalStatus::Pending | WithdrawalStatus::Approved) => {
            Transition {
                next: WithdrawalStatus::Cancelled,
                effect: BalanceEffect::Refund,
            }
        }
        (AdminAction::Return, WithdrawalStatus::Pending | WithdrawalStatus::Approved) => {
            Transition {
                next: WithdrawalStatus::Returned,
                effect: BalanceEffect::Refund,
            }
        }
        _ => {
            return Err(LedgerError::InvalidTransition {
                action,
                status: current,
            })
        }
    };
    Ok(transition)
}
