//! BidRepository - Repository MySQL per la gestione delle offerte

use super::{BidStore, WriteOutcome};
use crate::dtos::CreateBidDTO;
use crate::entities::Bid;
use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::{Error, MySqlPool};
use tracing::warn;

const SELECT_BIDS: &str = "SELECT bid_id, email, job_id, buyer_email, status, extra FROM bids";

#[derive(sqlx::FromRow)]
struct BidRow {
    bid_id: i32,
    email: String,
    job_id: i32,
    buyer_email: String,
    status: String,
    extra: Option<Json<Map<String, Value>>>,
}

impl From<BidRow> for Bid {
    fn from(row: BidRow) -> Self {
        Self {
            bid_id: row.bid_id,
            email: row.email,
            job_id: row.job_id,
            buyer_email: row.buyer_email,
            status: row.status,
            extra: row.extra.map(|e| e.0).unwrap_or_default(),
        }
    }
}

//BID REPOSITORY
pub struct BidRepository {
    connection_pool: MySqlPool,
}

impl BidRepository {
    pub fn new(connection_pool: MySqlPool) -> Self {
        Self { connection_pool }
    }

    async fn find_where(&self, column: &str, email: &str) -> Result<Vec<Bid>, Error> {
        let sql = format!("{} WHERE {} = ? ORDER BY bid_id", SELECT_BIDS, column);
        let rows = sqlx::query_as::<_, BidRow>(&sql)
            .bind(email)
            .fetch_all(&self.connection_pool)
            .await?;

        Ok(rows.into_iter().map(Bid::from).collect())
    }
}

#[async_trait]
impl BidStore for BidRepository {
    async fn create(&self, data: CreateBidDTO) -> Result<Option<Bid>, Error> {
        let mut bid = data.into_bid(0);

        // il vincolo UNIQUE (email, job_id) rende il controllo dei duplicati atomico
        let result = sqlx::query(
            "INSERT INTO bids (email, job_id, buyer_email, status, extra) \
             VALUES (?, ?, ?, ?, CAST(? AS JSON))",
        )
        .bind(&bid.email)
        .bind(bid.job_id)
        .bind(&bid.buyer_email)
        .bind(&bid.status)
        .bind(Json(&bid.extra))
        .execute(&self.connection_pool)
        .await;

        match result {
            Ok(done) => {
                bid.bid_id = done.last_insert_id() as i32;
                Ok(Some(bid))
            }
            Err(Error::Database(db_err)) if db_err.is_unique_violation() => {
                warn!("Duplicate bid of {} on job {}", bid.email, bid.job_id);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn find_by_bidder(&self, email: &str) -> Result<Vec<Bid>, Error> {
        self.find_where("email", email).await
    }

    async fn find_by_buyer(&self, email: &str) -> Result<Vec<Bid>, Error> {
        self.find_where("buyer_email", email).await
    }

    async fn update_status(&self, id: i32, status: &str) -> Result<WriteOutcome, Error> {
        let mut tx = self.connection_pool.begin().await?;

        let current: Option<(String,)> =
            sqlx::query_as("SELECT status FROM bids WHERE bid_id = ? FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let outcome = match current {
            None => WriteOutcome::unmatched(),
            Some((current,)) if current == status => WriteOutcome::updated(0),
            Some(_) => {
                sqlx::query("UPDATE bids SET status = ? WHERE bid_id = ?")
                    .bind(status)
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
                WriteOutcome::updated(1)
            }
        };

        tx.commit().await?;
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sqlx::MySqlPool;

    fn new_bid(email: &str, job_id: i32) -> CreateBidDTO {
        serde_json::from_value(json!({
            "email": email,
            "jobId": job_id,
            "buyer_email": "alice@example.com",
            "price": 150
        }))
        .unwrap()
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("jobs", "bids")))]
    #[ignore = "needs a MySQL server reachable through DATABASE_URL"]
    async fn test_duplicate_bid_is_rejected_by_unique_key(pool: MySqlPool) -> sqlx::Result<()> {
        let repo = BidRepository::new(pool);

        let first = repo.create(new_bid("dave@example.com", 2)).await?;
        assert!(first.is_some());
        let second = repo.create(new_bid("dave@example.com", 2)).await?;
        assert!(second.is_none());

        let mine = repo.find_by_bidder("dave@example.com").await?;
        let on_job_two: Vec<&Bid> = mine.iter().filter(|b| b.job_id == 2).collect();
        assert_eq!(on_job_two.len(), 1);
        assert_eq!(on_job_two[0].extra.get("price"), Some(&json!(150)));
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("jobs", "bids")))]
    #[ignore = "needs a MySQL server reachable through DATABASE_URL"]
    async fn test_emails_match_exact_case(pool: MySqlPool) -> sqlx::Result<()> {
        let repo = BidRepository::new(pool);

        // differs from carol@example.com only in case: a different bidder
        assert!(repo.create(new_bid("Carol@example.com", 1)).await?.is_some());

        let upper = repo.find_by_bidder("Carol@example.com").await?;
        assert_eq!(upper.len(), 1);
        assert_eq!(repo.find_by_bidder("carol@example.com").await?.len(), 2);
        assert!(repo.find_by_buyer("ALICE@example.com").await?.is_empty());
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("jobs", "bids")))]
    #[ignore = "needs a MySQL server reachable through DATABASE_URL"]
    async fn test_update_status(pool: MySqlPool) -> sqlx::Result<()> {
        let repo = BidRepository::new(pool);

        assert_eq!(repo.update_status(1, "In Progress").await?, WriteOutcome::updated(1));
        assert_eq!(repo.update_status(1, "In Progress").await?, WriteOutcome::updated(0));
        assert_eq!(repo.update_status(999, "Rejected").await?, WriteOutcome::unmatched());
        Ok(())
    }
}
