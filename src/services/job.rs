//! Job services - Gestione degli annunci di lavoro

use crate::core::{AppError, AppState, Claims, require_owner};
use crate::dtos::{
    CountDTO, CreateJobDTO, DeleteAckDTO, InsertAckDTO, PaginationQuery, UpdateAckDTO,
    UpdateJobDTO,
};
use crate::entities::Job;
use axum::{
    Extension,
    extract::{Json, Path, Query, State},
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

#[instrument(skip(state))]
pub async fn list_jobs(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Job>>, AppError> {
    let jobs = state.jobs.find_all().await?;
    debug!("Found {} jobs", jobs.len());
    Ok(Json(jobs))
}

#[instrument(skip(state))]
pub async fn count_jobs(State(state): State<Arc<AppState>>) -> Result<Json<CountDTO>, AppError> {
    let count = state.jobs.count().await?;
    Ok(Json(CountDTO { count }))
}

/// GET /all-jobs?page=&size=&filter=
#[instrument(skip(state), fields(page = ?params.page, size = ?params.size, filter = ?params.filter))]
pub async fn list_jobs_page(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PaginationQuery>, // i valori arrivano come stringhe, serde li converte
) -> Result<Json<Vec<Job>>, AppError> {
    // 1. Validare page e size (interi positivi, size senza limite massimo)
    // 2. Calcolare skip = (page-1)*size e limit = size
    // 3. Filtrare per categoria esatta solo se il filtro non è vuoto
    params.validate()?;
    let (skip, limit) = params.window();
    debug!("Fetching jobs page: skip {}, limit {:?}", skip, limit);

    let jobs = state.jobs.find_page(params.category(), skip, limit).await?;
    info!("Returning {} jobs", jobs.len());
    Ok(Json(jobs))
}

/// Returns `null` rather than 404 when the id is unknown
#[instrument(skip(state), fields(job_id = %job_id))]
pub async fn get_job(
    State(state): State<Arc<AppState>>,
    Path(job_id): Path<i32>,
) -> Result<Json<Option<Job>>, AppError> {
    let job = state.jobs.read(job_id).await?;
    if job.is_none() {
        warn!("Job not found");
    }
    Ok(Json(job))
}

#[instrument(skip(state, body), fields(buyer = %body.buyer.email))]
pub async fn create_job(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateJobDTO>,
) -> Result<Json<InsertAckDTO>, AppError> {
    body.validate()?;

    let job = state.jobs.create(body).await?;
    info!("Job {} created", job.job_id);
    Ok(Json(InsertAckDTO::new(job.job_id)))
}

/// PUT /job/{id} - `$set` dei campi ricevuti, con upsert se l'id non esiste
#[instrument(skip(state, body), fields(job_id = %job_id))]
pub async fn upsert_job(
    State(state): State<Arc<AppState>>,
    Path(job_id): Path<i32>,
    Json(body): Json<UpdateJobDTO>,
) -> Result<Json<UpdateAckDTO>, AppError> {
    // AUTO_INCREMENT tratta un id 0 esplicito come "genera un nuovo id"
    if job_id <= 0 {
        warn!("Rejected upsert on non-positive id");
        return Err(AppError::bad_request("job id must be a positive integer"));
    }
    body.validate()?;

    let outcome = state.jobs.upsert(job_id, body.without_identifier()).await?;
    if outcome.upserted_id.is_some() {
        info!("Job did not exist, created by upsert");
    } else {
        info!("Job updated, {} document(s) modified", outcome.modified);
    }
    Ok(Json(UpdateAckDTO::from(outcome)))
}

#[instrument(skip(state), fields(job_id = %job_id))]
pub async fn delete_job(
    State(state): State<Arc<AppState>>,
    Path(job_id): Path<i32>,
) -> Result<Json<DeleteAckDTO>, AppError> {
    let deleted = state.jobs.delete(job_id).await?;
    info!("Deleted {} job(s)", deleted);
    Ok(Json(DeleteAckDTO::new(deleted)))
}

/// GET /postedJob/{email} - solo il proprietario della sessione può vedere i propri annunci
#[instrument(skip(state, claims), fields(email = %email))]
pub async fn list_posted_jobs(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
    Extension(claims): Extension<Claims>, // ottenuto dall'authentication_middleware
) -> Result<Json<Vec<Job>>, AppError> {
    require_owner(&claims, &email)?;

    let jobs = state.jobs.find_by_buyer_email(&email).await?;
    info!("Found {} jobs posted by owner", jobs.len());
    Ok(Json(jobs))
}
