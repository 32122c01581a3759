//! User provisioning
//!
//! One endpoint serves both password signup and the OAuth callback: it
//! registers (or merges) the user record and idempotently provisions the
//! associated statistics and withdrawal accounts. Credential handling is
//! the auth frontend's job.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use shortener::stats::UserStats;
use types::ids::EmailAddress;

use crate::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::models::{ProvisionUserRequest, ProvisionUserResponse};
use crate::state::AppState;

pub async fn provision_user(
    State(state): State<AppState>,
    Json(payload): Json<ProvisionUserRequest>,
) -> Result<(StatusCode, Json<ProvisionUserResponse>), AppError> {
    if payload.full_name.trim().is_empty() {
        return Err(AppError::BadRequest("Full name is required".to_string()));
    }
    let email = EmailAddress::try_new(payload.email.as_str())
        .ok_or_else(|| AppError::BadRequest("A valid email is required".to_string()))?;

    let user = state.users.register(
        payload.full_name.trim(),
        email.clone(),
        payload.google_id,
        payload.profile_image,
        Utc::now(),
    )?;

    // Associated records; both upserts, so re-provisioning is harmless.
    state.ledger.provision(&email);
    state.stats.provision(&email);

    Ok((
        StatusCode::CREATED,
        Json(ProvisionUserResponse {
            success: true,
            user,
        }),
    ))
}

/// Dashboard totals for the authenticated user.
pub async fn my_stats(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Json<UserStats> {
    Json(state.stats.get(&user.email).unwrap_or_default())
}
