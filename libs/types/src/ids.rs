//! Unique identifier types for platform entities
//!
//! Withdrawal and link IDs use UUID v7 for time-sortable ordering, so
//! history listings can be sorted chronologically without a secondary
//! timestamp index. User-owned records are keyed by normalized email
//! address.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Normalized email address used as the primary key for user-owned records.
///
/// Normalization: surrounding whitespace trimmed, lowercased. Two inputs
/// that normalize to the same string address the same account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a normalized email address.
    ///
    /// # Panics
    /// Panics if the input does not look like an email (must contain '@').
    pub fn new(raw: impl Into<String>) -> Self {
        Self::try_new(raw).expect("EmailAddress must contain '@'")
    }

    /// Try to create a normalized email address, returning `None` if the
    /// input is empty or has no '@' with text on both sides.
    pub fn try_new(raw: impl Into<String>) -> Option<Self> {
        let normalized = raw.into().trim().to_lowercase();
        let at = normalized.find('@')?;
        if at == 0 || at + 1 == normalized.len() {
            return None;
        }
        Some(Self(normalized))
    }

    /// Get the normalized address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a withdrawal request within an account's history.
///
/// Uses UUID v7 so request IDs sort by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WithdrawalId(Uuid);

impl WithdrawalId {
    /// Create a new WithdrawalId with current timestamp
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create from existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse from a string representation, `None` if not a valid UUID.
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }

    /// Get inner UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for WithdrawalId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WithdrawalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a shortened link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkId(Uuid);

impl LinkId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for LinkId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
