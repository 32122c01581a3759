//! Per-user statistics
//!
//! Aggregate counters shown on the user dashboard. Provisioned alongside
//! the withdrawal account on signup; updated as links are created and
//! clicked.

use dashmap::DashMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::ids::EmailAddress;

/// Lifetime totals for one user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_links: u64,
    pub total_clicks: u64,
    pub total_earned: Decimal,
}

/// Concurrent map of user statistics keyed by email.
#[derive(Debug, Default)]
pub struct StatsBook {
    stats: DashMap<EmailAddress, UserStats>,
}

impl StatsBook {
    pub fn new() -> Self {
        Self {
            stats: DashMap::new(),
        }
    }

    /// Ensure a zeroed stats record exists. Idempotent.
    pub fn provision(&self, user_email: &EmailAddress) {
        self.stats.entry(user_email.clone()).or_default();
    }

    pub fn on_link_created(&self, user_email: &EmailAddress) {
        self.stats
            .entry(user_email.clone())
            .or_default()
            .total_links += 1;
    }

    pub fn on_click(&self, user_email: &EmailAddress, earned: Decimal) {
        let mut entry = self.stats.entry(user_email.clone()).or_default();
        entry.total_clicks += 1;
        entry.total_earned += earned;
    }

    pub fn get(&self, user_email: &EmailAddress) -> Option<UserStats> {
        self.stats.get(user_email).map(|entry| entry.clone())
    }
}
