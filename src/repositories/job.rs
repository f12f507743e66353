//! JobRepository - Repository MySQL per la gestione dei job

use super::{JobStore, WriteOutcome};
use crate::dtos::{CreateJobDTO, UpdateJobDTO};
use crate::entities::{Buyer, Job};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::mysql::MySqlArguments;
use sqlx::query::Query;
use sqlx::types::Json;
use sqlx::{Error, MySql, MySqlPool, QueryBuilder};
use tracing::debug;

const SELECT_JOBS: &str = "SELECT job_id, buyer, job_title, minimum_price, maximum_price, \
     category, deadline, description, extra FROM jobs";

// una NULL su job_id fa assegnare l'id all'AUTO_INCREMENT
const INSERT_JOB: &str = "INSERT INTO jobs \
     (buyer, job_title, minimum_price, maximum_price, category, deadline, description, extra, job_id) \
     VALUES (CAST(? AS JSON), ?, ?, ?, ?, ?, ?, CAST(? AS JSON), ?)";

const UPDATE_JOB: &str = "UPDATE jobs SET buyer = CAST(? AS JSON), job_title = ?, minimum_price = ?, \
     maximum_price = ?, category = ?, deadline = ?, description = ?, extra = CAST(? AS JSON) \
     WHERE job_id = ?";

#[derive(sqlx::FromRow)]
struct JobRow {
    job_id: i32,
    buyer: Option<Json<Buyer>>,
    job_title: Option<String>,
    minimum_price: Option<f64>,
    maximum_price: Option<f64>,
    category: Option<String>,
    deadline: Option<DateTime<Utc>>,
    description: Option<String>,
    extra: Option<Json<Map<String, Value>>>,
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        Self {
            job_id: row.job_id,
            buyer: row.buyer.map(|b| b.0),
            job_title: row.job_title,
            minimum_price: row.minimum_price,
            maximum_price: row.maximum_price,
            category: row.category,
            deadline: row.deadline,
            description: row.description,
            extra: row.extra.map(|e| e.0).unwrap_or_default(),
        }
    }
}

/// Binds every document column of `job`, in the order used by INSERT_JOB and UPDATE_JOB
fn bind_document<'q>(
    query: Query<'q, MySql, MySqlArguments>,
    job: &'q Job,
) -> Query<'q, MySql, MySqlArguments> {
    query
        .bind(job.buyer.as_ref().map(Json))
        .bind(job.job_title.as_deref())
        .bind(job.minimum_price)
        .bind(job.maximum_price)
        .bind(job.category.as_deref())
        .bind(job.deadline)
        .bind(job.description.as_deref())
        .bind(Json(&job.extra))
}

// JOB REPOSITORY
pub struct JobRepository {
    connection_pool: MySqlPool,
}

impl JobRepository {
    pub fn new(connection_pool: MySqlPool) -> Self {
        Self { connection_pool }
    }
}

#[async_trait]
impl JobStore for JobRepository {
    async fn find_all(&self) -> Result<Vec<Job>, Error> {
        let sql = format!("{} ORDER BY job_id", SELECT_JOBS);
        let rows = sqlx::query_as::<_, JobRow>(&sql)
            .fetch_all(&self.connection_pool)
            .await?;

        Ok(rows.into_iter().map(Job::from).collect())
    }

    async fn count(&self) -> Result<u64, Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM jobs")
            .fetch_one(&self.connection_pool)
            .await?;

        Ok(count.max(0) as u64)
    }

    async fn find_page(
        &self,
        category: Option<&str>,
        skip: u64,
        limit: Option<u64>,
    ) -> Result<Vec<Job>, Error> {
        // Build the paginated SELECT using QueryBuilder (idiomatic SQLx way)
        let mut query_builder = QueryBuilder::<MySql>::new(SELECT_JOBS);
        if let Some(category) = category {
            query_builder.push(" WHERE category = ");
            query_builder.push_bind(category);
        }
        query_builder.push(" ORDER BY job_id");
        // MySQL non accetta OFFSET senza LIMIT
        if let Some(limit) = limit {
            query_builder.push(" LIMIT ");
            query_builder.push_bind(limit);
            query_builder.push(" OFFSET ");
            query_builder.push_bind(skip);
        }

        let rows = query_builder
            .build_query_as::<JobRow>()
            .fetch_all(&self.connection_pool)
            .await?;

        Ok(rows.into_iter().map(Job::from).collect())
    }

    async fn find_by_buyer_email(&self, email: &str) -> Result<Vec<Job>, Error> {
        // buyer_email è una colonna generata da buyer->'$.email', indicizzata
        let sql = format!("{} WHERE buyer_email = ? ORDER BY job_id", SELECT_JOBS);
        let rows = sqlx::query_as::<_, JobRow>(&sql)
            .bind(email)
            .fetch_all(&self.connection_pool)
            .await?;

        Ok(rows.into_iter().map(Job::from).collect())
    }

    async fn read(&self, id: i32) -> Result<Option<Job>, Error> {
        let sql = format!("{} WHERE job_id = ?", SELECT_JOBS);
        let row = sqlx::query_as::<_, JobRow>(&sql)
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await?;

        Ok(row.map(Job::from))
    }

    async fn create(&self, data: CreateJobDTO) -> Result<Job, Error> {
        let mut job = data.into_job(0);

        let result = bind_document(sqlx::query(INSERT_JOB), &job)
            .bind(None::<i32>)
            .execute(&self.connection_pool)
            .await?;

        job.job_id = result.last_insert_id() as i32;
        Ok(job)
    }

    async fn upsert(&self, id: i32, data: UpdateJobDTO) -> Result<WriteOutcome, Error> {
        let mut tx = self.connection_pool.begin().await?;

        let sql = format!("{} WHERE job_id = ? FOR UPDATE", SELECT_JOBS);
        let current = sqlx::query_as::<_, JobRow>(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let outcome = match current {
            Some(row) => {
                let before = Job::from(row);
                let mut after = before.clone();
                data.apply_to(&mut after);

                if after == before {
                    debug!("Upsert on job {} left the document unchanged", id);
                    WriteOutcome::updated(0)
                } else {
                    bind_document(sqlx::query(UPDATE_JOB), &after)
                        .bind(id)
                        .execute(&mut *tx)
                        .await?;
                    WriteOutcome::updated(1)
                }
            }
            None => {
                debug!("Job {} not found, inserting it", id);
                let job = data.into_job(id);
                bind_document(sqlx::query(INSERT_JOB), &job)
                    .bind(Some(id))
                    .execute(&mut *tx)
                    .await?;
                WriteOutcome::upserted(id)
            }
        };

        tx.commit().await?;
        Ok(outcome)
    }

    async fn delete(&self, id: i32) -> Result<u64, Error> {
        let result = sqlx::query("DELETE FROM jobs WHERE job_id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        Ok(result.rows_affected())
    }
}
