use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
///
/// CORS is wide open: the only expected caller is a browser extension on an
/// arbitrary game origin.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Bundles
        .route("/bundles", post(handlers::build_bundle))
        // Ranking
        .route("/rank", post(handlers::rank_moves))
        // Settings
        .route("/settings/filter", get(handlers::get_filter))
        .route("/settings/filter", put(handlers::put_filter))
        .route("/settings/token", put(handlers::put_token))
        // Cache maintenance
        .route("/cache/clear", post(handlers::clear_cache))
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(axum_middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
