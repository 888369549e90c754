//! HTTP route handlers.

pub mod book;
pub mod genre;
pub mod health;
pub mod helpers;

use std::time::Duration;

use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .merge(book::router())
        .merge(genre::router())
        .merge(health::router())
        // Last added = first executed: TraceLayer → timeout → routes
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
