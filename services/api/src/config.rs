//! Environment-derived service configuration
//!
//! Built once in `main` and injected through `AppState`; nothing reads the
//! environment after startup.

use rust_decimal::Decimal;
use std::net::SocketAddr;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Socket the HTTP server binds to (`LINKSHORTI_BIND`).
    pub bind_addr: SocketAddr,
    /// HMAC secret for session token verification (`LINKSHORTI_JWT_SECRET`).
    pub jwt_secret: String,
    /// Smallest withdrawal a user may request (`LINKSHORTI_MIN_WITHDRAWAL`).
    pub minimum_withdrawal: Decimal,
    /// Optional bootstrap admin account (`LINKSHORTI_ADMIN_EMAIL`).
    pub admin_email: Option<String>,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let bind_addr = std::env::var("LINKSHORTI_BIND")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()?;

        let jwt_secret = match std::env::var("LINKSHORTI_JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!("LINKSHORTI_JWT_SECRET not set, using development secret");
                "dev-secret".to_string()
            }
        };

        let minimum_withdrawal = match std::env::var("LINKSHORTI_MIN_WITHDRAWAL") {
            Ok(raw) => raw.parse::<Decimal>()?,
            // Advertised minimum payout
            Err(_) => Decimal::new(500, 2),
        };

        let admin_email = std::env::var("LINKSHORTI_ADMIN_EMAIL").ok();

        Ok(Self {
            bind_addr,
            jwt_secret,
            minimum_withdrawal,
            admin_email,
        })
    }
}
