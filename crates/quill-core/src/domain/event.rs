use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use bson::Document;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A recorded application event (e.g. `postViewed`) with a free-form payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    #[serde(default)]
    pub payload: Document,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn new(fields: NewEvent) -> Result<Self, DomainError> {
        if fields.name.trim().is_empty() {
            return Err(DomainError::Validation("`name` is required".to_string()));
        }

        Ok(Self {
            id: ObjectId::new(),
            name: fields.name,
            payload: fields.payload.unwrap_or_default(),
            created_at: Utc::now(),
        })
    }
}

/// Fields accepted when recording an event.
#[derive(Debug, Clone, Default)]
pub struct NewEvent {
    pub name: String,
    pub payload: Option<Document>,
}
