//! Shortened link records

use crate::ids::{EmailAddress, LinkId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A shortened link owned by a user.
///
/// `short_code` is globally unique; `alias` is an optional user-chosen
/// name, also globally unique when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub link_id: LinkId,
    pub user_email: EmailAddress,
    pub original_url: String,
    pub short_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    pub clicks: u64,
    pub created_at: DateTime<Utc>,
}

impl Link {
    pub fn new(
        user_email: EmailAddress,
        original_url: impl Into<String>,
        short_code: impl Into<String>,
        alias: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            link_id: LinkId::new(),
            user_email,
            original_url: original_url.into(),
            short_code: short_code.into(),
            alias,
            clicks: 0,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_link_has_zero_clicks() {
        let link = Link::new(
            EmailAddress::new("alice@example.com"),
            "https://example.com/article",
            "ab3xk9p",
            None,
            Utc::now(),
        );
        assert_eq!(link.clicks, 0);
        assert_eq!(link.short_code, "ab3xk9p");
    }

    #[test]
    fn test_link_serialized_field_names() {
        let link = Link::new(
            EmailAddress::new("alice@example.com"),
            "https://example.com",
            "zzz1111",
            Some("my-page".to_string()),
            Utc::now(),
        );
        let json = serde_json::to_value(&link).unwrap();
        assert!(json.get("originalUrl").is_some());
        assert!(json.get("shortCode").is_some());
        assert!(json.get("userEmail").is_some());
        assert_eq!(json["alias"], "my-page");
    }
}
