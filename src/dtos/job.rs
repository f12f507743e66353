//! Job DTOs - Data Transfer Objects per i job

use crate::entities::{Buyer, Job};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};
use validator::Validate;

/// DTO per creare un nuovo job (senza `_id`, assegnato dal database).
/// Only the buyer is required, since owner listings filter on its email;
/// everything else is stored as sent.
#[derive(Deserialize, Debug, Clone, Validate)]
pub struct CreateJobDTO {
    #[validate(nested)]
    pub buyer: Buyer,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub minimum_price: Option<f64>,
    #[serde(default)]
    pub maximum_price: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CreateJobDTO {
    pub fn into_job(mut self, job_id: i32) -> Job {
        strip_identifier(&mut self.extra);
        Job {
            job_id,
            buyer: Some(self.buyer),
            job_title: self.job_title,
            minimum_price: self.minimum_price,
            maximum_price: self.maximum_price,
            category: self.category,
            deadline: self.deadline,
            description: self.description,
            extra: self.extra,
        }
    }
}

/// DTO per l'upsert di un job: solo i campi presenti vengono scritti.
/// A `null` value counts as not supplied.
#[derive(Deserialize, Debug, Clone, Default, Validate)]
pub struct UpdateJobDTO {
    #[serde(default)]
    #[validate(nested)]
    pub buyer: Option<Buyer>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub minimum_price: Option<f64>,
    #[serde(default)]
    pub maximum_price: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UpdateJobDTO {
    /// Drops a client supplied `_id`: identifiers never change
    pub fn without_identifier(mut self) -> Self {
        strip_identifier(&mut self.extra);
        self
    }

    /// Document created by an upsert on a missing id
    pub fn into_job(self, job_id: i32) -> Job {
        let mut job = Job {
            job_id,
            buyer: None,
            job_title: None,
            minimum_price: None,
            maximum_price: None,
            category: None,
            deadline: None,
            description: None,
            extra: Map::new(),
        };
        self.apply_to(&mut job);
        job
    }

    /// `$set` semantics: supplied fields overwrite, the others are left alone
    pub fn apply_to(self, job: &mut Job) {
        if self.buyer.is_some() {
            job.buyer = self.buyer;
        }
        if self.job_title.is_some() {
            job.job_title = self.job_title;
        }
        if self.minimum_price.is_some() {
            job.minimum_price = self.minimum_price;
        }
        if self.maximum_price.is_some() {
            job.maximum_price = self.maximum_price;
        }
        if self.category.is_some() {
            job.category = self.category;
        }
        if self.deadline.is_some() {
            job.deadline = self.deadline;
        }
        if self.description.is_some() {
            job.description = self.description;
        }
        for (key, value) in self.extra {
            if key != "_id" {
                job.extra.insert(key, value);
            }
        }
    }
}

fn strip_identifier(extra: &mut Map<String, Value>) {
    extra.remove("_id");
}
