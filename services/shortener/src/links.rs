//! Link book — creation, resolution, click recording
//!
//! Links live in a concurrent map keyed by short code, with a secondary
//! alias index. Codes are drawn at random and re-drawn on collision; the
//! map entry API makes the reserve-and-insert race-free.

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use types::ids::EmailAddress;
use types::link::Link;

use crate::codes;
use crate::errors::ShortenerError;

/// Give up drawing codes after this many collisions in a row; at any
/// plausible fill level of a 36^7 space this is unreachable.
const MAX_CODE_ATTEMPTS: usize = 32;

/// Concurrent store of shortened links.
#[derive(Debug, Default)]
pub struct LinkBook {
    by_code: DashMap<String, Link>,
    /// alias → short code
    alias_index: DashMap<String, String>,
}

impl LinkBook {
    pub fn new() -> Self {
        Self {
            by_code: DashMap::new(),
            alias_index: DashMap::new(),
        }
    }

    /// Create a link for a user. The destination URL is normalized
    /// (`https://` prefixed when scheme-less); a blank alias counts as no
    /// alias; a taken alias is rejected before any code is allocated.
    pub fn create_link(
        &self,
        user_email: EmailAddress,
        original_url: &str,
        alias: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Link, ShortenerError> {
        let url = codes::normalize_url(original_url)?;
        let alias = alias
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());

        // Reserve the alias first so a conflict costs nothing.
        if let Some(ref alias) = alias {
            match self.alias_index.entry(alias.clone()) {
                Entry::Occupied(_) => {
                    return Err(ShortenerError::AliasTaken {
                        alias: alias.clone(),
                    })
                }
                Entry::Vacant(vacant) => {
                    // Patched to the real code once allocated below.
                    vacant.insert(String::new());
                }
            }
        }

        let mut attempts = 0;
        let link = loop {
            let code = codes::random_code();
            match self.by_code.entry(code) {
                Entry::Occupied(_) => {
                    attempts += 1;
                    if attempts >= MAX_CODE_ATTEMPTS {
                        if let Some(ref alias) = alias {
                            self.alias_index.remove(alias);
                        }
                        return Err(ShortenerError::CodeSpaceExhausted);
                    }
                }
                Entry::Vacant(vacant) => {
                    let link = Link::new(
                        user_email,
                        url,
                        vacant.key().clone(),
                        alias.clone(),
                        now,
                    );
                    vacant.insert(link.clone());
                    break link;
                }
            }
        };

        if let Some(ref alias) = alias {
            if let Some(mut target) = self.alias_index.get_mut(alias) {
                *target = link.short_code.clone();
            }
        }

        tracing::info!(user = %link.user_email, code = %link.short_code, "link created");
        Ok(link)
    }

    /// Look up a link by short code or alias.
    pub fn resolve(&self, code_or_alias: &str) -> Result<Link, ShortenerError> {
        if let Some(link) = self.by_code.get(code_or_alias) {
            return Ok(link.clone());
        }
        // Copy the code out before touching by_code; holding guards on
        // both maps at once would invert create_link's lock order.
        let aliased = self
            .alias_index
            .get(code_or_alias)
            .map(|code| code.value().clone());
        if let Some(code) = aliased {
            if let Some(link) = self.by_code.get(&code) {
                return Ok(link.clone());
            }
        }
        Err(ShortenerError::LinkNotFound {
            code: code_or_alias.to_string(),
        })
    }

    /// Record one click against a link, returning the updated snapshot.
    pub fn record_click(&self, code_or_alias: &str) -> Result<Link, ShortenerError> {
        let code = self.resolve(code_or_alias)?.short_code;
        let mut link = self
            .by_code
            .get_mut(&code)
            .ok_or_else(|| ShortenerError::LinkNotFound {
                code: code_or_alias.to_string(),
            })?;
        link.clicks += 1;
        Ok(link.clone())
    }

    /// All links owned by a user, newest first.
    pub fn links_for(&self, user_email: &EmailAddress) -> Vec<Link> {
        let mut links: Vec<Link> = self
            .by_code
            .iter()
            .filter(|entry| entry.user_email == *user_email)
            .map(|entry| entry.clone())
            .collect();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        links
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(s: &str) -> EmailAddress {
        EmailAddress::new(s)
    }

    #[test]
    fn test_create_and_resolve() {
        let book = LinkBook::new();
        let link = book
            .create_link(email("alice@example.com"), "example.com/a", None, Utc::now())
            .unwrap();

        let resolved = book.resolve(&link.short_code).unwrap();
        assert_eq!(resolved.original_url, "https://example.com/a");
        assert_eq!(resolved.clicks, 0);
    }

    #[test]
    fn test_resolve_by_alias() {
        let book = LinkBook::new();
        book.create_link(
            email("alice@example.com"),
            "https://example.com",
            Some("launch".to_string()),
            Utc::now(),
        )
        .unwrap();

        let resolved = book.resolve("launch").unwrap();
        assert_eq!(resolved.original_url, "https://example.com");
    }

    #[test]
    fn test_alias_conflict() {
        let book = LinkBook::new();
        book.create_link(
            email("alice@example.com"),
            "https://example.com/1",
            Some("promo".to_string()),
            Utc::now(),
        )
        .unwrap();

        let result = book.create_link(
            email("bob@example.com"),
            "https://example.com/2",
            Some("promo".to_string()),
            Utc::now(),
        );
        assert_eq!(
            result,
            Err(ShortenerError::AliasTaken {
                alias: "promo".to_string()
            })
        );
        assert_eq!(book.len(), 1, "conflicting create must not allocate a code");
    }

    #[test]
    fn test_blank_alias_is_no_alias() {
        let book = LinkBook::new();
        let link = book
            .create_link(
                email("alice@example.com"),
                "https://example.com",
                Some("   ".to_string()),
                Utc::now(),
            )
            .unwrap();
        assert!(link.alias.is_none());
    }

    #[test]
    fn test_record_click_increments() {
        let book = LinkBook::new();
        let link = book
            .create_link(email("alice@example.com"), "example.com", None, Utc::now())
            .unwrap();

        book.record_click(&link.short_code).unwrap();
        let after = book.record_click(&link.short_code).unwrap();
        assert_eq!(after.clicks, 2);
    }

    #[test]
    fn test_unknown_code() {
        let book = LinkBook::new();
        assert!(matches!(
            book.resolve("zzzzzzz"),
            Err(ShortenerError::LinkNotFound { .. })
        ));
        assert!(matches!(
            book.record_click("zzzzzzz"),
            Err(ShortenerError::LinkNotFound { .. })
        ));
    }

    #[test]
    fn test_links_for_newest_first() {
        let book = LinkBook::new();
        let alice = email("alice@example.com");
        let t0 = Utc::now();
        let first = book
            .create_link(alice.clone(), "https://example.com/old", None, t0)
            .unwrap();
        let second = book
            .create_link(
                alice.clone(),
                "https://example.com/new",
                None,
                t0 + chrono::Duration::seconds(10),
            )
            .unwrap();
        book.create_link(email("bob@example.com"), "https://example.com/x", None, t0)
            .unwrap();

        let links = book.links_for(&alice);
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].short_code, second.short_code);
        assert_eq!(links[1].short_code, first.short_code);
    }
}
