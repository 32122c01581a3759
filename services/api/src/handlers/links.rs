//! Link endpoints
//!
//! Creation and listing are authenticated; resolution is the public
//! redirect path, which also records the click and credits the owner's
//! earnings at the per-country rate.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Redirect,
    Json,
};
use chrono::Utc;
use shortener::rates;
use types::link::Link;

use crate::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::models::{CreateLinkRequest, CreateLinkResponse};
use crate::state::AppState;

pub async fn create_link(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<CreateLinkResponse>), AppError> {
    state
        .rate_limiter
        .check(&format!("{}:link_create", user.email), 30, 1.0)?;

    let link = state.links.create_link(
        user.email.clone(),
        &payload.original_url,
        payload.alias,
        Utc::now(),
    )?;
    state.stats.on_link_created(&user.email);

    Ok((
        StatusCode::CREATED,
        Json(CreateLinkResponse {
            message: "Link successfully created".to_string(),
            new_link: link,
        }),
    ))
}

pub async fn list_links(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Json<Vec<Link>> {
    Json(state.links.links_for(&user.email))
}

/// Public redirect: `GET /r/{code}` by short code or alias.
pub async fn resolve_link(
    State(state): State<AppState>,
    Path(code): Path<String>,
    headers: HeaderMap,
) -> Result<Redirect, AppError> {
    let link = state.links.record_click(&code)?;

    // Country comes from the edge proxy; anything missing or unknown
    // earns the rest-of-world rate.
    let country = headers
        .get("cf-ipcountry")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("WW");
    let earned = rates::per_click(country);

    state.stats.on_click(&link.user_email, earned);
    if let Err(err) = state.ledger.credit_earnings(&link.user_email, earned) {
        // The visitor still gets redirected; only the credit is lost.
        tracing::warn!(user = %link.user_email, %err, "click credit failed");
    }

    Ok(Redirect::temporary(&link.original_url))
}
