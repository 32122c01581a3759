//! User directory
//!
//! In-process registry of user records keyed by normalized email. Signup
//! and OAuth sign-in share one provisioning path: create when missing,
//! otherwise merge the OAuth identity into the existing record. Blocked
//! users are rejected at provisioning and at every authenticated request.

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use types::ids::EmailAddress;
use types::user::UserRecord;

use crate::error::AppError;

pub struct UserDirectory {
    users: DashMap<EmailAddress, UserRecord>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
        }
    }

    /// Signup / OAuth provisioning.
    ///
    /// Creates the record when missing. For an existing record: blocked
    /// users are rejected; a first OAuth sign-in links the Google identity
    /// and marks the email verified.
    pub fn register(
        &self,
        full_name: impl Into<String>,
        email: EmailAddress,
        google_id: Option<String>,
        profile_image: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<UserRecord, AppError> {
        match self.users.entry(email) {
            Entry::Occupied(mut occupied) => {
                let user = occupied.get_mut();
                if user.is_blocked {
                    return Err(AppError::Forbidden(
                        "Your account has been blocked. Please contact support.".to_string(),
                    ));
                }
                if user.google_id.is_none() {
                    if let Some(google_id) = google_id {
                        user.google_id = Some(google_id);
                        user.profile_image = profile_image;
                        user.is_email_verified = true;
                    }
                }
                Ok(user.clone())
            }
            Entry::Vacant(vacant) => {
                let email = vacant.key().clone();
                let record =
                    UserRecord::new(full_name, email, google_id, profile_image, now);
                Ok(vacant.insert(record).clone())
            }
        }
    }

    /// Create or promote the bootstrap admin account from configuration.
    pub fn bootstrap_admin(&self, email: EmailAddress, now: DateTime<Utc>) {
        let mut record = self
            .users
            .entry(email.clone())
            .or_insert_with(|| UserRecord::new("Administrator", email, None, None, now));
        record.is_admin = true;
        record.is_email_verified = true;
    }

    pub fn get(&self, email: &EmailAddress) -> Option<UserRecord> {
        self.users.get(email).map(|entry| entry.clone())
    }

    pub fn is_blocked(&self, email: &EmailAddress) -> bool {
        self.users
            .get(email)
            .map(|entry| entry.is_blocked)
            .unwrap_or(false)
    }

    pub fn full_name(&self, email: &EmailAddress) -> Option<String> {
        self.users.get(email).map(|entry| entry.full_name.clone())
    }

    /// Block or unblock a user. Admin records cannot be blocked.
    pub fn set_blocked(
        &self,
        email: &EmailAddress,
        block: bool,
        reason: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<UserRecord, AppError> {
        let mut entry = self
            .users
            .get_mut(email)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if block {
            if entry.is_admin {
                return Err(AppError::BadRequest("Cannot block admin users".to_string()));
            }
            entry.block(reason, now);
        } else {
            entry.unblock();
        }
        Ok(entry.clone())
    }

    /// All users, newest first.
    pub fn list(&self) -> Vec<UserRecord> {
        let mut users: Vec<UserRecord> =
            self.users.iter().map(|entry| entry.clone()).collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        users
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(s: &str) -> EmailAddress {
        EmailAddress::new(s)
    }

    #[test]
    fn test_register_then_oauth_merge() {
        let directory = UserDirectory::new();
        let alice = email("alice@example.com");

        let created = directory
            .register("Alice", alice.clone(), None, None, Utc::now())
            .unwrap();
        assert!(!created.is_email_verified);

        let merged = directory
            .register(
                "Alice",
                alice.clone(),
                Some("google-123".to_string()),
                Some("https://img.example.com/a.png".to_string()),
                Utc::now(),
            )
            .unwrap();
        assert_eq!(merged.google_id.as_deref(), Some("google-123"));
        assert!(merged.is_email_verified);
    }

    #[test]
    fn test_register_blocked_user_rejected() {
        let directory = UserDirectory::new();
        let alice = email("alice@example.com");
        directory
            .register("Alice", alice.clone(), None, None, Utc::now())
            .unwrap();
        directory
            .set_blocked(&alice, true, Some("abuse".to_string()), Utc::now())
            .unwrap();

        let result = directory.register("Alice", alice, None, None, Utc::now());
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[test]
    fn test_cannot_block_admin() {
        let directory = UserDirectory::new();
        let root = email("root@example.com");
        directory.bootstrap_admin(root.clone(), Utc::now());

        let result = directory.set_blocked(&root, true, None, Utc::now());
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_unblock_clears_moderation_fields() {
        let directory = UserDirectory::new();
        let bob = email("bob@example.com");
        directory
            .register("Bob", bob.clone(), None, None, Utc::now())
            .unwrap();
        directory
            .set_blocked(&bob, true, Some("spam".to_string()), Utc::now())
            .unwrap();
        let user = directory.set_blocked(&bob, false, None, Utc::now()).unwrap();

        assert!(!user.is_blocked);
        assert!(user.blocked_reason.is_none());
    }

    #[test]
    fn test_list_newest_first() {
        let directory = UserDirectory::new();
        let t0 = Utc::now();
        directory
            .register("Old", email("old@example.com"), None, None, t0)
            .unwrap();
        directory
            .register(
                "New",
                email("new@example.com"),
                None,
                None,
                t0 + chrono::Duration::seconds(5),
            )
            .unwrap();

        let users = directory.list();
        assert_eq!(users[0].full_name, "New");
        assert_eq!(users[1].full_name, "Old");
    }
}
