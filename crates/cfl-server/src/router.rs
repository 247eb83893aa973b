use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// Build the axum router with all ledger endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/health", get(handler::health_handler))
        .route("/v1/chain", get(handler::chain_handler))
        .route("/v1/transactions", post(handler::transaction_handler))
        .route("/v1/series", get(handler::series_handler))
        .route("/v1/verify", get(handler::verify_handler))
        .route("/v1/replay", get(handler::replay_handler))
        .route("/v1/calculator", post(handler::calculator_handler))
        .fallback(handler::not_found_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
