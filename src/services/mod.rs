//! Services module - Coordinatore per tutti i service handler HTTP
//!
//! Questo modulo organizza i service handlers in sotto-moduli separati per una migliore manutenibilità.
//! Ogni modulo gestisce gli endpoint HTTP per una specifica funzionalità.

pub mod bid;
pub mod job;
pub mod session;

// Re-exports per facilitare l'import
pub use bid::{create_bid, list_bid_requests, list_my_bids, update_bid_status};
pub use job::{
    count_jobs, create_job, delete_job, get_job, list_jobs, list_jobs_page, list_posted_jobs,
    upsert_job,
};
pub use session::{issue_token, logout};

use axum::{http::StatusCode, response::IntoResponse};

/// Root endpoint - health check
pub async fn root() -> impl IntoResponse {
    (StatusCode::OK, "Solo Sphere server is running")
}
