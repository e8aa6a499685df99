use axum::{extract::State, http::header, response::IntoResponse};
use std::sync::Arc;

use crate::metrics::{collect_dynamic_metrics, encode_metrics};
use crate::state::AppState;

/// Fixed liveness message returned by the ping endpoint.
pub const PING_MESSAGE: &str = "Microservicio Servicio al Cliente Activo";

pub async fn ping() -> &'static str {
    PING_MESSAGE
}

/// Prometheus scrape endpoint
pub async fn metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    collect_dynamic_metrics(&state);
    (
        [(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)],
        encode_metrics(),
    )
}
