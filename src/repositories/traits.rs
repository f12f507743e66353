//! Store traits
//!
//! This module defines the interfaces the handlers use to reach the database.
//! `AppState` holds them as trait objects so tests can swap the MySQL
//! repositories for in-memory ones.

use crate::dtos::{CreateBidDTO, CreateJobDTO, UpdateJobDTO};
use crate::entities::{Bid, Job};
use async_trait::async_trait;

/// Result of an update-style write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteOutcome {
    /// Documents matched by the id
    pub matched: u64,
    /// Documents whose stored values actually changed
    pub modified: u64,
    /// Set when the write created a new document (upsert on a missing id)
    pub upserted_id: Option<i32>,
}

impl WriteOutcome {
    pub fn updated(modified: u64) -> Self {
        Self {
            matched: 1,
            modified,
            upserted_id: None,
        }
    }

    pub fn upserted(id: i32) -> Self {
        Self {
            matched: 0,
            modified: 0,
            upserted_id: Some(id),
        }
    }

    pub fn unmatched() -> Self {
        Self::default()
    }
}

/// Operations over the `jobs` collection
#[async_trait]
pub trait JobStore: Send + Sync {
    /// All jobs in natural (insertion id) order
    async fn find_all(&self) -> Result<Vec<Job>, sqlx::Error>;

    async fn count(&self) -> Result<u64, sqlx::Error>;

    /// One page of jobs, optionally restricted to an exact category
    ///
    /// # Arguments
    /// * `category` - Exact-match filter, `None` for every category
    /// * `skip` - Number of jobs to skip in natural order
    /// * `limit` - Maximum number of jobs returned, `None` for no limit
    async fn find_page(
        &self,
        category: Option<&str>,
        skip: u64,
        limit: Option<u64>,
    ) -> Result<Vec<Job>, sqlx::Error>;

    /// Jobs whose embedded buyer has the given email
    async fn find_by_buyer_email(&self, email: &str) -> Result<Vec<Job>, sqlx::Error>;

    /// # Returns
    /// * `Ok(Some(Job))` - Job found
    /// * `Ok(None)` - No job with that id
    async fn read(&self, id: i32) -> Result<Option<Job>, sqlx::Error>;

    /// Inserts a new job and returns it with the id assigned by the database
    async fn create(&self, data: CreateJobDTO) -> Result<Job, sqlx::Error>;

    /// Writes the supplied fields on the job with this id, creating a job with
    /// exactly this id when none exists
    async fn upsert(&self, id: i32, data: UpdateJobDTO) -> Result<WriteOutcome, sqlx::Error>;

    /// Returns the number of deleted jobs (0 or 1)
    async fn delete(&self, id: i32) -> Result<u64, sqlx::Error>;
}

/// Operations over the `bids` collection
#[async_trait]
pub trait BidStore: Send + Sync {
    /// Inserts a new bid.
    ///
    /// # Returns
    /// * `Ok(Some(Bid))` - Created bid with the id assigned by the database
    /// * `Ok(None)` - A bid for the same (email, jobId) pair already exists
    async fn create(&self, data: CreateBidDTO) -> Result<Option<Bid>, sqlx::Error>;

    /// Bids placed by `email`
    async fn find_by_bidder(&self, email: &str) -> Result<Vec<Bid>, sqlx::Error>;

    /// Bids received on jobs posted by `email`
    async fn find_by_buyer(&self, email: &str) -> Result<Vec<Bid>, sqlx::Error>;

    async fn update_status(&self, id: i32, status: &str) -> Result<WriteOutcome, sqlx::Error>;
}
