//! HTTP server for the Edutech customer support ticket service.

pub mod api;
pub mod metrics;
pub mod state;
