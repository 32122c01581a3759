//! Ledger error taxonomy
//!
//! Every failure is a structured value returned to the caller; nothing is
//! retried automatically and nothing is fatal to the process.

use rust_decimal::Decimal;
use thiserror::Error;
use types::withdrawal::{AdminAction, WithdrawalStatus};

/// Withdrawal ledger errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Withdrawal account not found: {user_email}")]
    AccountNotFound { user_email: String },

    #[error("Withdrawal request not found: {withdrawal_id}")]
    RequestNotFound { withdrawal_id: String },

    #[error("Cannot {action} a request with status {status}")]
    InvalidTransition {
        action: AdminAction,
        status: WithdrawalStatus,
    },

    #[error("Unknown action: {action}")]
    UnknownAction { action: String },

    #[error("Amount must be positive")]
    InvalidAmount,

    #[error("Amount is below the minimum payout of {minimum}")]
    BelowMinimum { minimum: Decimal },

    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: String, available: String },

    #[error("Validation failed: {message}")]
    Validation { message: String },

    #[error("Arithmetic overflow in balance calculation")]
    Overflow,

    #[error("Storage error: {message}")]
    Storage { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_display() {
        let err = LedgerError::InvalidTransition {
            action: AdminAction::Complete,
            status: WithdrawalStatus::Pending,
        };
        assert_eq!(
            err.to_string(),
            "Cannot complete a request with status Pending"
        );
    }

    #[test]
    fn test_unknown_action_display() {
        let err = LedgerError::UnknownAction {
            action: "reject".to_string(),
        };
        assert!(err.to_string().contains("reject"));
    }

    #[test]
    fn test_below_minimum_display() {
        let err = LedgerError::BelowMinimum {
            minimum: Decimal::new(500, 2),
        };
        assert!(err.to_string().contains("5.00"));
    }
}
