//! Withdrawal Ledger for the LinkShorti earnings platform
//!
//! Tracks each user's available balance, pending balance, and lifetime
//! withdrawn total, together with the full history of withdrawal requests
//! and the admin-driven status state machine over them.
//!
//! # Modules
//! - `errors`: Ledger error taxonomy
//! - `events`: Ledger events with a drainable in-process log
//! - `transition`: The action × status transition table
//! - `store`: Account store with per-account atomic updates
//! - `ledger`: The `WithdrawalLedger` facade used by request handlers

pub mod errors;
pub mod events;
pub mod ledger;
pub mod store;
pub mod transition;

pub use errors::LedgerError;
pub use ledger::{PendingWithdrawal, WithdrawalLedger};
