//! Job entity - Annuncio di lavoro pubblicato da un buyer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

/// Chi ha pubblicato il job, incorporato nel documento
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Validate)]
pub struct Buyer {
    #[validate(email(message = "Buyer email must be a valid email address"))]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

/// Every field but the id may be absent: documents created through an upsert
/// only hold the fields that were sent.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Job {
    #[serde(rename = "_id")]
    pub job_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer: Option<Buyer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Campi del documento non modellati esplicitamente
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Job {
    pub fn buyer_email(&self) -> Option<&str> {
        self.buyer.as_ref().map(|b| b.email.as_str())
    }
}
