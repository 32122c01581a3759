use crate::handlers::{admin, links, users, withdrawals};
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/users", post(users::provision_user))
        .route("/stats", get(users::my_stats))
        .route("/links", post(links::create_link).get(links::list_links))
        .route(
            "/withdrawals",
            get(withdrawals::get_account).post(withdrawals::request_withdrawal),
        )
        .route("/withdrawals/details", put(withdrawals::save_details))
        .route("/admin/users", get(admin::list_users))
        .route("/admin/users/block", post(admin::block_user))
        .route(
            "/admin/withdrawals",
            get(admin::list_withdrawals).post(admin::withdrawal_action),
        );

    Router::new()
        .nest("/v1", api_routes)
        .route("/r/:code", get(links::resolve_link))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
