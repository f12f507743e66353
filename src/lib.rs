//! Server library - espone i moduli principali per i test

pub mod core;
pub mod dtos;
pub mod entities;
pub mod repositories;
pub mod services;

// Re-export dei tipi principali per facilitare l'import
pub use crate::core::{AppError, AppState, auth, config};
pub use services::root;

use axum::{
    Router,
    http::{Method, header},
    middleware,
    routing::{delete, get, patch, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Crea il router principale dell'applicazione
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = configure_cors(&state);

    Router::new()
        .route("/", get(root))
        .merge(configure_session_routes())
        .merge(configure_job_routes())
        .merge(configure_owner_routes(state.clone()))
        .merge(configure_bid_routes())
        .layer(cors)
        .with_state(state)
}

/// Una sola origine ammessa, con cookie (credentials)
fn configure_cors(state: &AppState) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(state.allowed_origin.clone())
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

/// Configura le routes della sessione (emissione e cancellazione del cookie)
fn configure_session_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new()
        .route("/jwt", post(issue_token))
        .route("/logout", get(logout))
}

/// Configura le routes pubbliche dei job (nessuna sessione richiesta)
fn configure_job_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new()
        .route("/jobs", get(list_jobs))
        .route("/job-count", get(count_jobs))
        .route("/all-jobs", get(list_jobs_page))
        .route("/job", post(create_job))
        .route("/job/{id}", get(get_job).put(upsert_job))
        .route("/jobs/{id}", delete(delete_job))
}

/// Routes that need a session whose email owns the requested resource.
/// Only the posted-jobs listing is guarded today.
fn configure_owner_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::authentication_middleware;
    use services::*;

    Router::new()
        .route("/postedJob/{email}", get(list_posted_jobs))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

/// Configura le routes delle offerte
fn configure_bid_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new()
        .route("/bids", post(create_bid))
        .route("/my-bids/{email}", get(list_my_bids))
        .route("/bid-request/{email}", get(list_bid_requests))
        .route("/bid-status/{id}", patch(update_bid_status))
}
