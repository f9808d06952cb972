//! Axum router construction.

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::Method;
use axum::routing::{get, put};
use axum::Router;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::presentation::handlers;
use crate::presentation::state::SharedState;
use dailydev_infrastructure::config::TimeoutConfig;

/// Build the complete router with all API routes.
pub fn build_router(state: SharedState, timeouts: &TimeoutConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::PUT, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/health", get(handlers::health::health_handler))
        // Profile API
        .route(
            "/profile/update-streak",
            put(handlers::profile::update_streak_handler),
        )
        .route("/profile/streak", get(handlers::profile::get_streak_handler))
        .layer(TimeoutLayer::new(timeouts.http_request))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
