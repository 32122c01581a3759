//! Account store with per-account atomic updates
//!
//! Accounts live in a concurrent map keyed by normalized email. The store's
//! one write path is [`AccountStore::update`]: the caller's mutation runs
//! against a draft copy while the map entry's write guard is held, and the
//! draft replaces the stored document only if the mutation succeeds. That
//! gives every account a serialization point — two concurrent mutations of
//! the same account cannot interleave, and a failed mutation leaves the
//! stored document untouched.
//!
//! The document `version` counter is bumped on every successful update.

use crate::errors::LedgerError;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use types::ids::EmailAddress;
use types::withdrawal::WithdrawalAccount;

/// Concurrent map of withdrawal accounts keyed by user email.
#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: DashMap<EmailAddress, WithdrawalAccount>,
}

impl AccountStore {
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
        }
    }

    /// Create a zero-balance account if none exists. Idempotent; returns
    /// `true` only when the account was created by this call.
    pub fn provision(&self, email: &EmailAddress) -> bool {
        match self.accounts.entry(email.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(vacant) => {
                vacant.insert(WithdrawalAccount::new(email.clone()));
                true
            }
        }
    }

    /// Snapshot read of one account.
    pub fn get(&self, email: &EmailAddress) -> Option<WithdrawalAccount> {
        self.accounts.get(email).map(|entry| entry.clone())
    }

    /// Run `mutate` atomically against an existing account.
    ///
    /// The entry's write guard is held for the whole read-modify-write, so
    /// concurrent updates to the same account serialize. `mutate` works on
    /// a draft; an `Err` discards the draft and the stored document keeps
    /// its prior value and version.
    pub fn update<T>(
        &self,
        email: &EmailAddress,
        mutate: impl FnOnce(&mut WithdrawalAccount) -> Result<T, LedgerError>,
    ) -> Result<T, LedgerError> {
        let mut entry =
            self.accounts
                .get_mut(email)
                .ok_or_else(|| LedgerError::AccountNotFound {
                    user_email: email.to_string(),
                })?;

        let mut draft = entry.clone();
        let out = mutate(&mut draft)?;
        draft.version = entry.version + 1;
        *entry = draft;
        Ok(out)
    }

    /// Like [`update`](Self::update), but creates the account first when
    /// missing. Used by the payout-details save path, which upserts.
    pub fn upsert_update<T>(
        &self,
        email: &EmailAddress,
        mutate: impl FnOnce(&mut WithdrawalAccount) -> Result<T, LedgerError>,
    ) -> Result<T, LedgerError> {
        let mut entry = self
            .accounts
            .entry(email.clone())
            .or_insert_with(|| WithdrawalAccount::new(email.clone()));

        let mut draft = entry.clone();
        let out = mutate(&mut draft)?;
        draft.version = entry.version + 1;
        *entry = draft;
        Ok(out)
    }

    /// Snapshot of every account. Used by admin listings; not a consistent
    /// cross-account cut, which the listings do not need.
    pub fn snapshot_all(&self) -> Vec<WithdrawalAccount> {
        self.accounts.iter().map(|entry| entry.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn email(s: &str) -> EmailAddress {
        EmailAddress::new(s)
    }

    #[test]
    fn test_provision_idempotent() {
        let store = AccountStore::new();
        let alice = email("alice@example.com");

        assert!(store.provision(&alice));
        assert!(!store.provision(&alice), "second provision is a no-op");
        assert_eq!(store.len(), 1);

        let account = store.get(&alice).unwrap();
        assert_eq!(account.available_balance, Decimal::ZERO);
        assert_eq!(account.version, 0);
    }

    #[test]
    fn test_update_missing_account() {
        let store = AccountStore::new();
        let result = store.update(&email("ghost@example.com"), |_| Ok(()));
        assert!(matches!(result, Err(LedgerError::AccountNotFound { .. })));
    }

    #[test]
    fn test_update_bumps_version() {
        let store = AccountStore::new();
        let alice = email("alice@example.com");
        store.provision(&alice);

        store
            .update(&alice, |account| {
                account.available_balance = Decimal::from(10);
                Ok(())
            })
            .unwrap();

        let account = store.get(&alice).unwrap();
        assert_eq!(account.available_balance, Decimal::from(10));
        assert_eq!(account.version, 1);
    }

    #[test]
    fn test_failed_update_leaves_document_untouched() {
        let store = AccountStore::new();
        let alice = email("alice@example.com");
        store.provision(&alice);
        store
            .update(&alice, |account| {
                account.available_balance = Decimal::from(50);
                Ok(())
            })
            .unwrap();

        let result: Result<(), _> = store.update(&alice, |account| {
            // Mutate the draft, then fail — nothing may stick.
            account.available_balance = Decimal::from(999);
            Err(LedgerError::InvalidAmount)
        });
        assert_eq!(result, Err(LedgerError::InvalidAmount));

        let account = store.get(&alice).unwrap();
        assert_eq!(account.available_balance, Decimal::from(50));
        assert_eq!(account.version, 1, "failed update must not bump version");
    }

    #[test]
    fn test_upsert_update_creates_account() {
        let store = AccountStore::new();
        let bob = email("bob@example.com");

        store
            .upsert_update(&bob, |account| {
                account.available_balance = Decimal::from(3);
                Ok(())
            })
            .unwrap();

        let account = store.get(&bob).unwrap();
        assert_eq!(account.available_balance, Decimal::from(3));
        assert_eq!(account.version, 1);
    }

    #[test]
    fn test_snapshot_all() {
        let store = AccountStore::new();
        store.provision(&email("a@example.com"));
        store.provision(&email("b@example.com"));
        assert_eq!(store.snapshot_all().len(), 2);
    }
}
