//! Request and response bodies
//!
//! Wire field names are camelCase, matching the persisted document shapes.

use chrono::{DateTime, Utc};
use ledger::PendingWithdrawal;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::ids::{EmailAddress, WithdrawalId};
use types::link::Link;
use types::user::UserRecord;
use types::withdrawal::{PayoutDetails, WithdrawalRequest, WithdrawalStatus};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionUserRequest {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub google_id: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProvisionUserResponse {
    pub success: bool,
    pub user: UserRecord,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    pub original_url: String,
    #[serde(default)]
    pub alias: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkResponse {
    pub message: String,
    pub new_link: Link,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SaveDetailsRequest {
    pub details: PayoutDetails,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateWithdrawalRequest {
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateWithdrawalResponse {
    pub success: bool,
    pub request: WithdrawalRequest,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalActionRequest {
    pub user_email: String,
    pub withdrawal_id: WithdrawalId,
    pub action: String,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockUserRequest {
    pub email: String,
    /// "block" or "unblock"
    pub action: String,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiMessage {
    pub success: bool,
    pub message: String,
}

/// One row in the admin review queue.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminWithdrawalItem {
    pub user_name: String,
    pub user_email: EmailAddress,
    pub withdrawal_id: WithdrawalId,
    pub total_amount: Decimal,
    pub status: WithdrawalStatus,
    pub date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub withdrawal_details: Option<PayoutDetails>,
}

impl AdminWithdrawalItem {
    pub fn from_pending(pending: PendingWithdrawal, user_name: String) -> Self {
        Self {
            user_name,
            user_email: pending.user_email,
            withdrawal_id: pending.request.withdrawal_id,
            total_amount: pending.request.total_amount,
            status: pending.request.status,
            date: pending.request.date,
            admin_note: pending.request.admin_note,
            withdrawal_details: pending.details,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminWithdrawalList {
    pub success: bool,
    pub requests: Vec<AdminWithdrawalItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminUserList {
    pub success: bool,
    pub users: Vec<UserRecord>,
}
