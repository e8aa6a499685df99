//! Prometheus metrics for core components.
//!
//! The server registers these alongside its HTTP metrics via [`all_metrics`].

use once_cell::sync::Lazy;
use prometheus::{IntCounter, IntCounterVec, Opts};

// =============================================================================
// Ticket Lifecycle Metrics
// =============================================================================

/// Tickets created total.
pub static TICKETS_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "edutech_tickets_created_total",
        "Total tickets created since startup",
    )
    .unwrap()
});

/// Ticket updates total (full updates and status changes).
pub static TICKETS_UPDATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "edutech_tickets_updated_total",
        "Total ticket updates since startup",
    )
    .unwrap()
});

/// Ticket deletions total.
pub static TICKETS_DELETED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "edutech_tickets_deleted_total",
        "Total ticket deletions since startup",
    )
    .unwrap()
});

// =============================================================================
// Storage Metrics
// =============================================================================

/// Store failures by operation.
pub static STORE_ERRORS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("edutech_store_errors_total", "Ticket store failures"),
        &["operation"], // "insert", "get", "list", "count", "update", "delete"
    )
    .unwrap()
});

/// Record a failed store call.
pub fn record_store_error(operation: &str) {
    STORE_ERRORS_TOTAL.with_label_values(&[operation]).inc();
}

/// All core metrics, for registration in the server registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(TICKETS_CREATED_TOTAL.clone()),
        Box::new(TICKETS_UPDATED_TOTAL.clone()),
        Box::new(TICKETS_DELETED_TOTAL.clone()),
        Box::new(STORE_ERRORS_TOTAL.clone()),
    ]
}
