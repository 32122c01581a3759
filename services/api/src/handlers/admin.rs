//! Admin surface
//!
//! User management and the withdrawal review queue. All endpoints require
//! an admin token.

use axum::{extract::State, Json};
use chrono::Utc;
use types::ids::EmailAddress;
use types::withdrawal::AdminAction;

use crate::auth::AdminUser;
use crate::error::AppError;
use crate::models::{
    AdminUserList, AdminWithdrawalItem, AdminWithdrawalList, ApiMessage, BlockUserRequest,
    WithdrawalActionRequest,
};
use crate::state::AppState;

pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Json<AdminUserList> {
    Json(AdminUserList {
        success: true,
        users: state.users.list(),
    })
}

pub async fn block_user(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(payload): Json<BlockUserRequest>,
) -> Result<Json<ApiMessage>, AppError> {
    let email = EmailAddress::try_new(payload.email.as_str())
        .ok_or_else(|| AppError::BadRequest("A valid email is required".to_string()))?;

    let block = match payload.action.as_str() {
        "block" => true,
        "unblock" => false,
        _ => {
            return Err(AppError::BadRequest(
                "Invalid action. Must be 'block' or 'unblock'".to_string(),
            ))
        }
    };

    let user = state
        .users
        .set_blocked(&email, block, payload.reason, Utc::now())?;

    tracing::info!(admin = %admin.email, user = %email, action = %payload.action, "moderation action");
    Ok(Json(ApiMessage {
        success: true,
        message: format!(
            "User {} successfully",
            if user.is_blocked { "blocked" } else { "unblocked" }
        ),
    }))
}

/// All Pending/Approved withdrawal requests, newest first, joined with the
/// requester's name and payout destination.
pub async fn list_withdrawals(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Json<AdminWithdrawalList> {
    let requests = state
        .ledger
        .pending_requests()
        .into_iter()
        .map(|pending| {
            let user_name = state
                .users
                .full_name(&pending.user_email)
                .unwrap_or_else(|| "Unknown".to_string());
            AdminWithdrawalItem::from_pending(pending, user_name)
        })
        .collect();

    Json(AdminWithdrawalList {
        success: true,
        requests,
    })
}

/// Dispatch one admin action (approve/complete/cancel/return) against a
/// withdrawal request.
pub async fn withdrawal_action(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(payload): Json<WithdrawalActionRequest>,
) -> Result<Json<ApiMessage>, AppError> {
    let email = EmailAddress::try_new(payload.user_email.as_str())
        .ok_or_else(|| AppError::BadRequest("A valid userEmail is required".to_string()))?;

    state.ledger.admin_action(
        &email,
        &payload.withdrawal_id,
        &payload.action,
        payload.reason,
    )?;

    tracing::info!(
        admin = %admin.email,
        user = %email,
        withdrawal = %payload.withdrawal_id,
        action = %payload.action,
        "withdrawal action"
    );
    Ok(Json(ApiMessage {
        success: true,
        message: format!(
            "Withdrawal {} successfully",
            AdminAction::parse(&payload.action)
                .map(|action| action.past_tense())
                .unwrap_or("updated")
        ),
    }))
}
