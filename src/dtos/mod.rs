//! DTOs module - Data Transfer Objects
//!
//! Questo modulo contiene tutti i DTOs usati per la comunicazione client-server.
//! I DTOs separano la rappresentazione esterna (API) dalla rappresentazione interna (entities).

pub mod ack;
pub mod bid;
pub mod job;
pub mod query;

pub use ack::{CountDTO, DeleteAckDTO, InsertAckDTO, SuccessDTO, UpdateAckDTO};
pub use bid::{CreateBidDTO, UpdateBidStatusDTO};
pub use job::{CreateJobDTO, UpdateJobDTO};
pub use query::PaginationQuery;
