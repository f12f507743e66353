//! Application State - Stato globale dell'applicazione
//!
//! Contiene i repository e le impostazioni condivise da tutte le route e i middleware.

use crate::core::Config;
use crate::repositories::{BidRepository, BidStore, JobRepository, JobStore};
use axum::http::HeaderValue;
use sqlx::MySqlPool;
use std::sync::Arc;

/// Stato globale dell'applicazione condiviso tra tutte le route e middleware
pub struct AppState {
    /// Store dei job
    pub jobs: Arc<dyn JobStore>,

    /// Store delle offerte (bid)
    pub bids: Arc<dyn BidStore>,

    /// Secret key per la firma dei token di sessione
    pub jwt_secret: String,

    /// `Secure; SameSite=None` cookies (production) instead of `SameSite=Strict`
    pub secure_cookies: bool,

    /// Unica origine ammessa dal CORS, con credenziali
    pub allowed_origin: HeaderValue,
}

impl AppState {
    /// Crea lo stato di produzione: repository MySQL sul pool fornito
    pub fn new(pool: MySqlPool, config: &Config) -> Self {
        Self::with_stores(
            Arc::new(JobRepository::new(pool.clone())),
            Arc::new(BidRepository::new(pool)),
            config.jwt_secret.clone(),
        )
        .with_secure_cookies(config.is_production())
        .with_allowed_origin(config.client_origin.clone())
    }

    /// Builds a state over arbitrary stores (in-memory or failing doubles in tests).
    /// Defaults to development cookies and the `http://localhost:5173` origin.
    pub fn with_stores(
        jobs: Arc<dyn JobStore>,
        bids: Arc<dyn BidStore>,
        jwt_secret: String,
    ) -> Self {
        Self {
            jobs,
            bids,
            jwt_secret,
            secure_cookies: false,
            allowed_origin: HeaderValue::from_static("http://localhost:5173"),
        }
    }

    pub fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.secure_cookies = secure;
        self
    }

    pub fn with_allowed_origin(mut self, origin: HeaderValue) -> Self {
        self.allowed_origin = origin;
        self
    }
}
