//! Entities module - Entità del dominio applicativo
//!
//! Questo modulo contiene tutte le entità (models) che rappresentano i dati persistiti nel database.
//! Ogni entity corrisponde a una collezione (tabella) nel database.

pub mod bid;
pub mod job;

// Re-exports per facilitare l'import
pub use bid::{Bid, DEFAULT_BID_STATUS};
pub use job::{Buyer, Job};
