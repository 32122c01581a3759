//! User account records
//!
//! A user record tracks identity and moderation state. Password and email
//! verification flows live outside this system; OAuth-provisioned users
//! arrive pre-verified.

use crate::ids::EmailAddress;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub full_name: String,
    pub email: EmailAddress,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    pub is_email_verified: bool,
    pub is_admin: bool,
    pub is_blocked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Create a new user record. OAuth users (with a Google ID) are
    /// pre-verified.
    pub fn new(
        full_name: impl Into<String>,
        email: EmailAddress,
        google_id: Option<String>,
        profile_image: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let is_email_verified = google_id.is_some();
        Self {
            full_name: full_name.into(),
            email,
            google_id,
            profile_image,
            is_email_verified,
            is_admin: false,
            is_blocked: false,
            blocked_at: None,
            blocked_reason: None,
            created_at,
        }
    }

    /// Block this user. Reason defaults when not provided.
    pub fn block(&mut self, reason: Option<String>, at: DateTime<Utc>) {
        self.is_blocked = true;
        self.blocked_at = Some(at);
        self.blocked_reason = Some(reason.unwrap_or_else(|| "No reason provided".to_string()));
    }

    /// Unblock this user and clear the moderation fields.
    pub fn unblock(&mut self) {
        self.is_blocked = false;
        self.blocked_at = None;
        self.blocked_reason = None;
    }
}
