//! Bid DTOs - Data Transfer Objects per le offerte

use crate::entities::{Bid, DEFAULT_BID_STATUS};
use serde::Deserialize;
use serde_json::{Map, Value};
use validator::Validate;

/// DTO per creare una nuova offerta (senza `_id`)
#[derive(Deserialize, Debug, Clone, Validate)]
pub struct CreateBidDTO {
    #[validate(email(message = "Bidder email must be a valid email address"))]
    pub email: String,
    #[serde(rename = "jobId")]
    pub job_id: i32,
    #[validate(email(message = "Buyer email must be a valid email address"))]
    pub buyer_email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Status cannot be empty"))]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CreateBidDTO {
    pub fn into_bid(mut self, bid_id: i32) -> Bid {
        self.extra.remove("_id");
        Bid {
            bid_id,
            email: self.email,
            job_id: self.job_id,
            buyer_email: self.buyer_email,
            status: self
                .status
                .unwrap_or_else(|| DEFAULT_BID_STATUS.to_string()),
            extra: self.extra,
        }
    }
}

/// DTO per aggiornare lo stato di un'offerta (solo lo stato è modificabile)
#[derive(Deserialize, Debug, Clone, Validate)]
pub struct UpdateBidStatusDTO {
    #[validate(length(min = 1, message = "Status cannot be empty"))]
    pub status: String,
}
