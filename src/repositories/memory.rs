//! In-memory stores
//!
//! Process-local implementations of [`JobStore`] and [`BidStore`] with the same
//! observable semantics as the MySQL repositories (natural id order, upsert on
//! explicit id, unique (email, jobId) pair). Used as test doubles.

use super::{BidStore, JobStore, WriteOutcome};
use crate::dtos::{CreateBidDTO, CreateJobDTO, UpdateJobDTO};
use crate::entities::{Bid, Job};
use async_trait::async_trait;
use sqlx::Error;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// Collezione con id autoincrementale, ordinata per id
struct Collection<T> {
    /// `None` once every positive `i32` has been handed out
    next_id: Option<i32>,
    documents: BTreeMap<i32, T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            next_id: Some(1),
            documents: BTreeMap::new(),
        }
    }
}

impl<T> Collection<T> {
    /// Fails like an exhausted AUTO_INCREMENT column
    fn allocate_id(&mut self) -> Result<i32, Error> {
        let id = self
            .next_id
            .ok_or_else(|| Error::Protocol("no identifiers left for a new document".to_string()))?;
        self.next_id = id.checked_add(1);
        Ok(id)
    }

    /// Keeps AUTO_INCREMENT behaviour when a document is inserted with an explicit id
    fn insert_with_id(&mut self, id: i32, document: T) {
        if self.next_id.is_some_and(|next| id >= next) {
            self.next_id = id.checked_add(1);
        }
        self.documents.insert(id, document);
    }
}

#[derive(Default)]
pub struct InMemoryJobRepository {
    jobs: RwLock<Collection<Job>>,
}

impl InMemoryJobRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobStore for InMemoryJobRepository {
    async fn find_all(&self) -> Result<Vec<Job>, Error> {
        Ok(self.jobs.read().await.documents.values().cloned().collect())
    }

    async fn count(&self) -> Result<u64, Error> {
        Ok(self.jobs.read().await.documents.len() as u64)
    }

    async fn find_page(
        &self,
        category: Option<&str>,
        skip: u64,
        limit: Option<u64>,
    ) -> Result<Vec<Job>, Error> {
        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let limit = limit.map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(usize::MAX));

        let jobs = self.jobs.read().await;
        Ok(jobs
            .documents
            .values()
            .filter(|job| category.is_none_or(|c| job.category.as_deref() == Some(c)))
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn find_by_buyer_email(&self, email: &str) -> Result<Vec<Job>, Error> {
        let jobs = self.jobs.read().await;
        Ok(jobs
            .documents
            .values()
            .filter(|job| job.buyer_email() == Some(email))
            .cloned()
            .collect())
    }

    async fn read(&self, id: i32) -> Result<Option<Job>, Error> {
        Ok(self.jobs.read().await.documents.get(&id).cloned())
    }

    async fn create(&self, data: CreateJobDTO) -> Result<Job, Error> {
        let mut jobs = self.jobs.write().await;
        let id = jobs.allocate_id()?;
        let job = data.into_job(id);
        jobs.insert_with_id(id, job.clone());
        Ok(job)
    }

    async fn upsert(&self, id: i32, data: UpdateJobDTO) -> Result<WriteOutcome, Error> {
        let mut jobs = self.jobs.write().await;
        match jobs.documents.get_mut(&id) {
            Some(job) => {
                let before = job.clone();
                data.apply_to(job);
                Ok(WriteOutcome::updated(u64::from(*job != before)))
            }
            None => {
                jobs.insert_with_id(id, data.into_job(id));
                Ok(WriteOutcome::upserted(id))
            }
        }
    }

    async fn delete(&self, id: i32) -> Result<u64, Error> {
        let removed = self.jobs.write().await.documents.remove(&id);
        Ok(u64::from(removed.is_some()))
    }
}

#[derive(Default)]
pub struct InMemoryBidRepository {
    bids: RwLock<Collection<Bid>>,
}

impl InMemoryBidRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BidStore for InMemoryBidRepository {
    async fn create(&self, data: CreateBidDTO) -> Result<Option<Bid>, Error> {
        // check and insert under the same write lock, like the unique key in MySQL
        let mut bids = self.bids.write().await;
        let duplicate = bids
            .documents
            .values()
            .any(|bid| bid.email == data.email && bid.job_id == data.job_id);
        if duplicate {
            return Ok(None);
        }

        let id = bids.allocate_id()?;
        let bid = data.into_bid(id);
        bids.insert_with_id(id, bid.clone());
        Ok(Some(bid))
    }

    async fn find_by_bidder(&self, email: &str) -> Result<Vec<Bid>, Error> {
        let bids = self.bids.read().await;
        Ok(bids
            .documents
            .values()
            .filter(|bid| bid.email == email)
            .cloned()
            .collect())
    }

    async fn find_by_buyer(&self, email: &str) -> Result<Vec<Bid>, Error> {
        let bids = self.bids.read().await;
        Ok(bids
            .documents
            .values()
            .filter(|bid| bid.buyer_email == email)
            .cloned()
            .collect())
    }

    async fn update_status(&self, id: i32, status: &str) -> Result<WriteOutcome, Error> {
        let mut bids = self.bids.write().await;
        let outcome = match bids.documents.get_mut(&id) {
            None => WriteOutcome::unmatched(),
            Some(bid) if bid.status == status => WriteOutcome::updated(0),
            Some(bid) => {
                bid.status = status.to_string();
                WriteOutcome::updated(1)
            }
        };
        Ok(outcome)
    }
}
