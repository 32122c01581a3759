//! Withdrawal ledger — balances, request creation, admin actions
//!
//! One `WithdrawalLedger` instance owns the account store and is shared by
//! reference across request handlers. Every state-changing operation goes
//! through [`AccountStore::update`], so the read-modify-write for one
//! account is a single atomic step: concurrent admin actions on the same
//! request resolve to exactly one winner, and concurrent operations on
//! different requests of the same account cannot lose balance updates.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use types::ids::{EmailAddress, WithdrawalId};
use types::withdrawal::{
    AdminAction, PayoutDetails, PayoutMethod, WithdrawalAccount, WithdrawalRequest,
    WithdrawalStatus,
};

use crate::errors::LedgerError;
use crate::events::{
    AccountProvisioned, DetailsUpdated, EarningsCredited, LedgerEvent, WithdrawalApproved,
    WithdrawalCancelled, WithdrawalCompleted, WithdrawalRequested, WithdrawalReturned,
};
use crate::store::AccountStore;
use crate::transition::{self, BalanceEffect};

/// A Pending/Approved request joined with its account context, as shown in
/// the admin review queue.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingWithdrawal {
    pub user_email: EmailAddress,
    pub request: WithdrawalRequest,
    pub details: Option<PayoutDetails>,
}

/// The withdrawal ledger.
pub struct WithdrawalLedger {
    store: AccountStore,
    /// Smallest amount a user may request (the advertised minimum payout).
    minimum_withdrawal: Decimal,
    /// Emitted events log (append-only)
    events: Mutex<Vec<LedgerEvent>>,
}

impl WithdrawalLedger {
    /// Create a ledger with the default 5.00 minimum payout.
    pub fn new() -> Self {
        Self::with_minimum(Decimal::new(500, 2))
    }

    /// Create a ledger with a custom minimum payout.
    pub fn with_minimum(minimum_withdrawal: Decimal) -> Self {
        Self {
            store: AccountStore::new(),
            minimum_withdrawal,
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn minimum_withdrawal(&self) -> Decimal {
        self.minimum_withdrawal
    }

    // ───────────────────────── Provisioning ─────────────────────────

    /// Create a zero-balance account on signup/OAuth provisioning.
    /// Idempotent: returns `true` only when the account was created.
    pub fn provision(&self, email: &EmailAddress) -> bool {
        let created = self.store.provision(email);
        if created {
            tracing::info!(user = %email, "withdrawal account provisioned");
            self.record(LedgerEvent::AccountProvisioned(AccountProvisioned {
                user_email: email.clone(),
            }));
        }
        created
    }

    /// Snapshot read of one account.
    pub fn account(&self, email: &EmailAddress) -> Result<WithdrawalAccount, LedgerError> {
        self.store
            .get(email)
            .ok_or_else(|| LedgerError::AccountNotFound {
                user_email: email.to_string(),
            })
    }

    // ───────────────────────── Payout details ─────────────────────────

    /// Overwrite the saved payout destination, creating the account when
    /// missing. The previous destination is not kept.
    pub fn save_details(
        &self,
        email: &EmailAddress,
        details: PayoutDetails,
    ) -> Result<(), LedgerError> {
        validate_details(&details)?;
        let method = details.selected_method;

        self.store.upsert_update(email, |account| {
            account.withdrawal_details = Some(details);
            Ok(())
        })?;

        self.record(LedgerEvent::DetailsUpdated(DetailsUpdated {
            user_email: email.clone(),
            method,
        }));
        Ok(())
    }

    // ───────────────────────── Earnings ─────────────────────────

    /// Credit click earnings to the available balance.
    pub fn credit_earnings(
        &self,
        email: &EmailAddress,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount);
        }

        self.store.update(email, |account| {
            account.available_balance = credit(account.available_balance, amount)?;
            Ok(())
        })?;

        self.record(LedgerEvent::EarningsCredited(EarningsCredited {
            user_email: email.clone(),
            amount,
        }));
        Ok(())
    }

    // ───────────────────────── Request creation ─────────────────────────

    /// Submit a withdrawal request: moves `amount` from available to
    /// pending and appends a `Pending` history entry.
    ///
    /// Rejects non-positive amounts, amounts below the minimum payout,
    /// amounts exceeding the available balance, and accounts without a
    /// saved payout destination.
    pub fn request_withdrawal(
        &self,
        email: &EmailAddress,
        amount: Decimal,
        now: DateTime<Utc>,
    ) -> Result<WithdrawalRequest, LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount);
        }
        if amount < self.minimum_withdrawal {
            return Err(LedgerError::BelowMinimum {
                minimum: self.minimum_withdrawal,
            });
        }

        let request = self.store.update(email, |account| {
            if account.withdrawal_details.is_none() {
                return Err(LedgerError::Validation {
                    message: "Payout details must be saved before requesting a withdrawal"
                        .to_string(),
                });
            }
            if account.available_balance < amount {
                return Err(LedgerError::InsufficientBalance {
                    required: amount.to_string(),
                    available: account.available_balance.to_string(),
                });
            }

            account.available_balance = debit(account.available_balance, amount)?;
            account.pending_balance = credit(account.pending_balance, amount)?;

            let request = WithdrawalRequest::new(amount, now);
            account.history.push(request.clone());
            Ok(request)
        })?;

        tracing::info!(
            user = %email,
            withdrawal = %request.withdrawal_id,
            %amount,
            "withdrawal requested"
        );
        self.record(LedgerEvent::WithdrawalRequested(WithdrawalRequested {
            user_email: email.clone(),
            withdrawal_id: request.withdrawal_id,
            amount,
        }));
        Ok(request)
    }

    // ───────────────────────── Admin actions ─────────────────────────

    /// Apply an admin action to one request.
    ///
    /// The action name is resolved before any lookup (`UnknownAction`).
    /// Status, balance movement, and the optional note are written in one
    /// atomic store update; any failure leaves the account untouched.
    pub fn admin_action(
        &self,
        email: &EmailAddress,
        withdrawal_id: &WithdrawalId,
        action_name: &str,
        note: Option<String>,
    ) -> Result<WithdrawalStatus, LedgerError> {
        let action =
            AdminAction::parse(action_name).ok_or_else(|| LedgerError::UnknownAction {
                action: action_name.to_string(),
            })?;

        let (next, amount) = self.store.update(email, |account| {
            let index = account
                .history
                .iter()
                .position(|r| r.withdrawal_id == *withdrawal_id)
                .ok_or_else(|| LedgerError::RequestNotFound {
                    withdrawal_id: withdrawal_id.to_string(),
                })?;

            let current = account.history[index].status;
            let amount = account.history[index].total_amount;
            let transition = transition::apply(action, current)?;

            match transition.effect {
                BalanceEffect::None => {}
                BalanceEffect::Payout => {
                    account.pending_balance = debit(account.pending_balance, amount)?;
                    account.total_withdrawn = credit(account.total_withdrawn, amount)?;
                }
                BalanceEffect::Refund => {
                    account.pending_balance = debit(account.pending_balance, amount)?;
                    account.available_balance = credit(account.available_balance, amount)?;
                }
            }

            let entry = &mut account.history[index];
            entry.status = transition.next;
            if let Some(note) = note {
                entry.admin_note = Some(note);
            }
            Ok((transition.next, amount))
        })?;

        tracing::info!(
            user = %email,
            withdrawal = %withdrawal_id,
            %action,
            status = %next,
            "withdrawal transition applied"
        );
        self.record(match action {
            AdminAction::Approve => LedgerEvent::WithdrawalApproved(WithdrawalApproved {
                user_email: email.clone(),
                withdrawal_id: *withdrawal_id,
            }),
            AdminAction::Complete => LedgerEvent::WithdrawalCompleted(WithdrawalCompleted {
                user_email: email.clone(),
                withdrawal_id: *withdrawal_id,
                amount,
            }),
            AdminAction::Cancel => LedgerEvent::WithdrawalCancelled(WithdrawalCancelled {
                user_email: email.clone(),
                withdrawal_id: *withdrawal_id,
                amount,
            }),
            AdminAction::Return => LedgerEvent::WithdrawalReturned(WithdrawalReturned {
                user_email: email.clone(),
                withdrawal_id: *withdrawal_id,
                amount,
            }),
        });
        Ok(next)
    }

    // ───────────────────────── Admin queries ─────────────────────────

    /// Every Pending/Approved request across all accounts, newest first,
    /// joined with the account's payout details.
    pub fn pending_requests(&self) -> Vec<PendingWithdrawal> {
        let mut pending: Vec<PendingWithdrawal> = self
            .store
            .snapshot_all()
            .into_iter()
            .flat_map(|account| {
                let email = account.user_email.clone();
                let details = account.withdrawal_details.clone();
                account
                    .history
                    .into_iter()
                    .filter(|r| r.status.is_open())
                    .map(move |request| PendingWithdrawal {
                        user_email: email.clone(),
                        request,
                        details: details.clone(),
                    })
            })
            .collect();

        pending.sort_by(|a, b| b.request.date.cmp(&a.request.date));
        pending
    }

    // ───────────────────────── Events ─────────────────────────

    /// Get a copy of all emitted events.
    pub fn events(&self) -> Vec<LedgerEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&self) -> Vec<LedgerEvent> {
        std::mem::take(
            &mut *self
                .events
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }

    fn record(&self, event: LedgerEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event);
    }
}

impl Default for WithdrawalLedger {
    fn default() -> Self {
        Self::new()
    }
}

/// Checked add for balance fields.
fn credit(balance: Decimal, amount: Decimal) -> Result<Decimal, LedgerError> {
    balance.checked_add(amount).ok_or(LedgerError::Overflow)
}

/// Checked subtract for balance fields; a negative result means the caller
/// asked for more than the bucket holds.
fn debit(balance: Decimal, amount: Decimal) -> Result<Decimal, LedgerError> {
    let next = balance.checked_sub(amount).ok_or(LedgerError::Overflow)?;
    if next < Decimal::ZERO {
        return Err(LedgerError::InsufficientBalance {
            required: amount.to_string(),
            available: balance.to_string(),
        });
    }
    Ok(next)
}

/// Method-specific required-field validation for a payout destination.
fn validate_details(details: &PayoutDetails) -> Result<(), LedgerError> {
    fn missing(message: &str) -> LedgerError {
        LedgerError::Validation {
            message: message.to_string(),
        }
    }

    match details.selected_method {
        PayoutMethod::PayPal => {
            let ok = details
                .paypal
                .as_ref()
                .map(|p| !p.email.trim().is_empty())
                .unwrap_or(false);
            if !ok {
                return Err(missing("PayPal email is required"));
            }
        }
        PayoutMethod::Upi => {
            let ok = details
                .upi
                .as_ref()
                .map(|u| !u.id.trim().is_empty())
                .unwrap_or(false);
            if !ok {
                return Err(missing("UPI id is required"));
            }
        }
        PayoutMethod::BankTransfer => {
            let bank = details
                .bank
                .as_ref()
                .ok_or_else(|| missing("Bank details are required"))?;
            if bank.account_number.trim().is_empty()
                || bank.ifsc_code.trim().is_empty()
                || bank.account_holder_name.trim().is_empty()
            {
                return Err(missing(
                    "Bank account number, IFSC code and holder name are required",
                ));
            }
        }
    }
    Ok(())
}
