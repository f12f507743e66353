//! Bid services - Gestione delle offerte sui job

use crate::core::{AppError, AppState};
use crate::dtos::{CreateBidDTO, InsertAckDTO, UpdateAckDTO, UpdateBidStatusDTO};
use crate::entities::Bid;
use axum::extract::{Json, Path, State};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

#[instrument(skip(state, body), fields(email = %body.email, job_id = %body.job_id))]
pub async fn create_bid(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateBidDTO>,
) -> Result<Json<InsertAckDTO>, AppError> {
    // 1. Validare il body
    // 2. Inserire l'offerta: il vincolo unico (email, jobId) dello store rifiuta i duplicati
    // 3. Duplicato -> 400 in testo semplice, come si aspetta il client
    body.validate()?;

    match state.bids.create(body).await? {
        Some(bid) => {
            info!("Bid {} placed", bid.bid_id);
            Ok(Json(InsertAckDTO::new(bid.bid_id)))
        }
        None => {
            warn!("Bid already placed for this job");
            Err(AppError::duplicate_bid())
        }
    }
}

#[instrument(skip(state), fields(email = %email))]
pub async fn list_my_bids(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Bid>>, AppError> {
    let bids = state.bids.find_by_bidder(&email).await?;
    debug!("Found {} bids placed", bids.len());
    Ok(Json(bids))
}

/// Offerte ricevute sui job pubblicati da `email`
#[instrument(skip(state), fields(email = %email))]
pub async fn list_bid_requests(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Bid>>, AppError> {
    let bids = state.bids.find_by_buyer(&email).await?;
    debug!("Found {} bid requests", bids.len());
    Ok(Json(bids))
}

#[instrument(skip(state, body), fields(bid_id = %bid_id, status = %body.status))]
pub async fn update_bid_status(
    State(state): State<Arc<AppState>>,
    Path(bid_id): Path<i32>,
    Json(body): Json<UpdateBidStatusDTO>,
) -> Result<Json<UpdateAckDTO>, AppError> {
    body.validate()?;

    let outcome = state.bids.update_status(bid_id, &body.status).await?;
    if outcome.matched == 0 {
        warn!("Bid not found");
    }
    Ok(Json(UpdateAckDTO::from(outcome)))
}
