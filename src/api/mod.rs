pub mod graphql;
pub mod health;

use axum::http::StatusCode;
use axum::Router;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;

/// Full HTTP surface: GraphQL endpoint plus health checks.
pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    Router::new()
        .merge(health::health_routes())
        .merge(graphql::graphql_routes())
        .layer(RequestBodyLimitLayer::new(config.body_limit_bytes))
        .layer(timeout_layer(config.request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Requests running past `timeout` are answered with `408 Request Timeout`.
fn timeout_layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}
