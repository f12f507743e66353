//! Bid entity - Offerta di un freelancer su un job

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_BID_STATUS: &str = "Pending";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Bid {
    #[serde(rename = "_id")]
    pub bid_id: i32,
    pub email: String, // chi fa l'offerta
    #[serde(rename = "jobId")]
    pub job_id: i32, // non è una foreign key
    pub buyer_email: String, // copiata dal job al momento dell'offerta
    pub status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
