//! Shared application state
//!
//! All long-lived services are constructed once at startup and handed to
//! handlers by reference through this container; there are no process-wide
//! singletons.

use chrono::Utc;
use ledger::WithdrawalLedger;
use shortener::{LinkBook, StatsBook};
use std::sync::Arc;
use types::ids::EmailAddress;

use crate::config::ApiConfig;
use crate::rate_limit::RateLimiter;
use crate::registry::UserDirectory;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ApiConfig>,
    pub users: Arc<UserDirectory>,
    pub ledger: Arc<WithdrawalLedger>,
    pub links: Arc<LinkBook>,
    pub stats: Arc<StatsBook>,
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(config: ApiConfig) -> Self {
        let users = UserDirectory::new();
        if let Some(raw) = &config.admin_email {
            match EmailAddress::try_new(raw.as_str()) {
                Some(email) => users.bootstrap_admin(email, Utc::now()),
                None => tracing::warn!(admin = %raw, "ignoring invalid bootstrap admin email"),
            }
        }

        Self {
            ledger: Arc::new(WithdrawalLedger::with_minimum(config.minimum_withdrawal)),
            config: Arc::new(config),
            users: Arc::new(users),
            links: Arc::new(LinkBook::new()),
            stats: Arc::new(StatsBook::new()),
            rate_limiter: Arc::new(RateLimiter::new()),
        }
    }
}
