#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use serde_json::{Value, json};
use solosphere_server::core::AppState;
use solosphere_server::dtos::{CreateBidDTO, CreateJobDTO, UpdateJobDTO};
use solosphere_server::entities::{Bid, Job};
use solosphere_server::repositories::{
    BidStore, InMemoryBidRepository, InMemoryJobRepository, JobStore, WriteOutcome,
};
use std::sync::Arc;

pub const TEST_SECRET: &str = "ilmiobellissimosegretochevaassolutamentecambiato";

/// Crea un AppState per i test, con store in memoria
///
/// # Returns
/// Arc<AppState> configurato con il secret di test e cookie di sviluppo
pub fn create_test_state() -> Arc<AppState> {
    Arc::new(AppState::with_stores(
        Arc::new(InMemoryJobRepository::new()),
        Arc::new(InMemoryBidRepository::new()),
        TEST_SECRET.to_string(),
    ))
}

/// Crea un TestServer per i test
///
/// # Arguments
/// * `state` - AppState da utilizzare per il server
pub fn create_test_server(state: Arc<AppState>) -> TestServer {
    let app = solosphere_server::create_router(state);
    TestServer::new(app).expect("Failed to create test server")
}

/// Genera un token di sessione valido per `email`
pub fn create_test_jwt(email: &str) -> String {
    let identity = json!({ "email": email });
    solosphere_server::core::encode_jwt(identity.as_object().cloned().unwrap(), TEST_SECRET)
        .expect("Failed to create session token")
}

/// Genera un token per `email` già scaduto da un'ora
pub fn create_expired_jwt(email: &str) -> String {
    use chrono::Utc;
    use jsonwebtoken::{EncodingKey, Header, encode};

    let now = Utc::now().timestamp();
    let claims = json!({
        "email": email,
        "iat": now - 7200,
        "exp": now - 3600,
    });

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("Failed to create session token")
}

/// Valore dell'header `Cookie` che porta il token
pub fn cookie_header(token: &str) -> String {
    format!("token={}", token)
}

/// Extracts the `token=<value>` pair from a `Set-Cookie` header, like a browser would store it
pub fn stored_cookie(set_cookie: &str) -> String {
    set_cookie
        .split(';')
        .next()
        .expect("Set-Cookie should not be empty")
        .trim()
        .to_string()
}

/// Body di un job valido
pub fn job_body(title: &str, category: &str, buyer_email: &str) -> Value {
    json!({
        "buyer": { "email": buyer_email, "name": "Test Buyer", "photo": "https://example.com/p.png" },
        "job_title": title,
        "minimum_price": 100,
        "maximum_price": 250,
        "category": category,
        "deadline": "2024-06-01T00:00:00Z",
        "description": format!("Description of {}", title)
    })
}

/// Body di un'offerta valida
pub fn bid_body(email: &str, job_id: i32, buyer_email: &str) -> Value {
    json!({
        "email": email,
        "jobId": job_id,
        "buyer_email": buyer_email,
        "price": 180,
        "comment": "I can start tomorrow",
        "job_title": "Some job",
        "category": "Web Development"
    })
}

/// Store che fallisce sempre, per verificare la mappatura degli errori a 500
pub struct FailingJobStore;

#[async_trait]
impl JobStore for FailingJobStore {
    async fn find_all(&self) -> Result<Vec<Job>, sqlx::Error> {
        Err(sqlx::Error::PoolClosed)
    }

    async fn count(&self) -> Result<u64, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn find_page(
        &self,
        _category: Option<&str>,
        _skip: u64,
        _limit: Option<u64>,
    ) -> Result<Vec<Job>, sqlx::Error> {
        Err(sqlx::Error::PoolClosed)
    }

    async fn find_by_buyer_email(&self, _email: &str) -> Result<Vec<Job>, sqlx::Error> {
        Err(sqlx::Error::PoolClosed)
    }

    async fn read(&self, _id: i32) -> Result<Option<Job>, sqlx::Error> {
        Err(sqlx::Error::PoolClosed)
    }

    async fn create(&self, _data: CreateJobDTO) -> Result<Job, sqlx::Error> {
        Err(sqlx::Error::PoolClosed)
    }

    async fn upsert(&self, _id: i32, _data: UpdateJobDTO) -> Result<WriteOutcome, sqlx::Error> {
        Err(sqlx::Error::PoolClosed)
    }

    async fn delete(&self, _id: i32) -> Result<u64, sqlx::Error> {
        Err(sqlx::Error::PoolClosed)
    }
}

pub struct FailingBidStore;

#[async_trait]
impl BidStore for FailingBidStore {
    async fn create(&self, _data: CreateBidDTO) -> Result<Option<Bid>, sqlx::Error> {
        Err(sqlx::Error::PoolClosed)
    }

    async fn find_by_bidder(&self, _email: &str) -> Result<Vec<Bid>, sqlx::Error> {
        Err(sqlx::Error::PoolClosed)
    }

    async fn find_by_buyer(&self, _email: &str) -> Result<Vec<Bid>, sqlx::Error> {
        Err(sqlx::Error::PoolClosed)
    }

    async fn update_status(&self, _id: i32, _status: &str) -> Result<WriteOutcome, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }
}

/// AppState in cui entrambi gli store falliscono
pub fn create_failing_state() -> Arc<AppState> {
    Arc::new(AppState::with_stores(
        Arc::new(FailingJobStore),
        Arc::new(FailingBidStore),
        TEST_SECRET.to_string(),
    ))
}
