use axum::{
    http::StatusCode,
    middleware,
    routing::{get, patch},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use super::links::BASE_PATH;
use super::middleware::metrics_middleware;
use super::{handlers, tickets};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let timeout = Duration::from_secs(state.config().server.request_timeout_secs);
    let path = |suffix: &str| format!("{}{}", BASE_PATH, suffix);

    Router::new()
        // Health
        .route(&path("/ping"), get(handlers::ping))
        // Tickets
        .route(
            BASE_PATH,
            get(tickets::list_tickets).post(tickets::create_ticket),
        )
        .route(
            &path("/{id}"),
            get(tickets::get_ticket)
                .put(tickets::update_ticket)
                .delete(tickets::delete_ticket),
        )
        .route(&path("/{id}/estado"), patch(tickets::change_status))
        // Secondary lookups
        .route(
            &path("/cliente/{customer_id}"),
            get(tickets::list_by_customer),
        )
        .route(&path("/estado/{status}"), get(tickets::list_by_status))
        // Observability
        .route("/metrics", get(handlers::metrics))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(request_timeout(timeout))
                .layer(middleware::from_fn(metrics_middleware)),
        )
        .with_state(state)
}

/// Requests running longer than `timeout` are answered with 408.
fn request_timeout(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}
