//! User withdrawal endpoints
//!
//! The account is always addressed by the authenticated identity — the
//! body never names the account owner.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use types::withdrawal::WithdrawalAccount;

use crate::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::models::{
    ApiMessage, CreateWithdrawalRequest, CreateWithdrawalResponse, SaveDetailsRequest,
};
use crate::state::AppState;

pub async fn get_account(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<WithdrawalAccount>, AppError> {
    Ok(Json(state.ledger.account(&user.email)?))
}

pub async fn save_details(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<SaveDetailsRequest>,
) -> Result<Json<ApiMessage>, AppError> {
    state
        .rate_limiter
        .check(&format!("{}:withdrawal_save", user.email), 10, 0.5)?;

    state.ledger.save_details(&user.email, payload.details)?;

    Ok(Json(ApiMessage {
        success: true,
        message: "Withdrawal details updated successfully.".to_string(),
    }))
}

pub async fn request_withdrawal(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateWithdrawalRequest>,
) -> Result<(StatusCode, Json<CreateWithdrawalResponse>), AppError> {
    state
        .rate_limiter
        .check(&format!("{}:withdrawal_request", user.email), 5, 0.2)?;

    let request = state
        .ledger
        .request_withdrawal(&user.email, payload.amount, Utc::now())?;

    Ok((
        StatusCode::CREATED,
        Json(CreateWithdrawalResponse {
            success: true,
            request,
        }),
    ))
}
