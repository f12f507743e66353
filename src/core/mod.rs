//! Core Module - Componenti infrastrutturali dell'applicazione
//!
//! Questo modulo contiene tutti i componenti "core" dell'applicazione:
//! - Token di sessione (JWT) e middleware di autenticazione
//! - Cookie di sessione
//! - Configurazione
//! - Gestione errori
//! - Stato applicazione

pub mod auth;
pub mod config;
pub mod cookie;
pub mod error;
pub mod state;

// Re-exports per facilitare l'import
pub use auth::{Claims, TokenError, authentication_middleware, decode_jwt, encode_jwt, require_owner};
pub use config::Config;
pub use error::AppError;
pub use state::AppState;
