//! Ack DTOs - Risposte delle operazioni di scrittura

use crate::repositories::WriteOutcome;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct InsertAckDTO {
    pub acknowledged: bool,
    pub inserted_id: i32,
}

impl InsertAckDTO {
    pub fn new(inserted_id: i32) -> Self {
        Self {
            acknowledged: true,
            inserted_id,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAckDTO {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id: Option<i32>,
}

impl From<WriteOutcome> for UpdateAckDTO {
    fn from(value: WriteOutcome) -> Self {
        Self {
            acknowledged: true,
            matched_count: value.matched,
            modified_count: value.modified,
            upserted_count: u64::from(value.upserted_id.is_some()),
            upserted_id: value.upserted_id,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAckDTO {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteAckDTO {
    pub fn new(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct CountDTO {
    pub count: u64,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SuccessDTO {
    pub success: bool,
}
