//! Request authentication
//!
//! Session tokens are JWTs issued by the out-of-process auth frontend;
//! this service only verifies them. The subject claim is the user's email.
//! Admin endpoints additionally require the `admin` claim.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use types::ids::EmailAddress;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User email
    pub sub: String,
    pub exp: usize,
    #[serde(default)]
    pub admin: bool,
}

pub struct AuthenticatedUser {
    pub email: EmailAddress,
    pub admin: bool,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts.headers.get("Authorization").ok_or_else(|| {
            AppError::Unauthorized("Missing authentication credentials".to_string())
        })?;
        let auth = header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid header string".to_string()))?;
        let token = auth
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("Expected bearer token".to_string()))?;

        let key = DecodingKey::from_secret(state.config.jwt_secret.as_bytes());
        let token_data = decode::<Claims>(token, &key, &Validation::default())
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))?;

        let email = EmailAddress::try_new(token_data.claims.sub.as_str())
            .ok_or_else(|| AppError::Unauthorized("Token subject is not an email".to_string()))?;

        // A block takes effect immediately, not at token expiry.
        if state.users.is_blocked(&email) {
            return Err(AppError::Forbidden(
                "Your account has been blocked. Please contact support.".to_string(),
            ));
        }

        Ok(AuthenticatedUser {
            email,
            admin: token_data.claims.admin,
        })
    }
}

/// Extractor for admin-only endpoints.
pub struct AdminUser {
    pub email: EmailAddress,
}

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;
        if !user.admin {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }
        Ok(AdminUser { email: user.email })
    }
}
