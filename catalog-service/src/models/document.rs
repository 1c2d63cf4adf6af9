use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Origin domain accepted at the create boundary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DocumentOrigin {
    Internal,
    External,
}

impl DocumentOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentOrigin::Internal => "internal",
            DocumentOrigin::External => "external",
        }
    }
}

/// Type domain accepted at the create boundary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Contract,
    Invoice,
    Report,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Contract => "contract",
            DocumentType::Invoice => "invoice",
            DocumentType::Report => "report",
        }
    }
}

/// Persisted catalog record.
///
/// Origin and type are stored as plain strings: the collection may hold
/// legacy rows with empty fields, which is why every read carries the
/// non-empty hygiene clause instead of trusting the stored values. Enum
/// validity is enforced only when a record is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub origin: String,
    #[serde(rename = "type")]
    pub doc_type: String,
    pub emitter: String,
    #[serde(rename = "tributeValue")]
    pub tribute_value: String,
    #[serde(rename = "liquidValue")]
    pub liquid_value: String,
    #[serde(rename = "fileUrl")]
    pub file_url: String,
    #[serde(rename = "fileSize")]
    pub file_size: i64,
    #[serde(
        rename = "createdAt",
        with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime"
    )]
    pub created_at: DateTime<Utc>,
    #[serde(
        rename = "updatedAt",
        with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime"
    )]
    pub updated_at: DateTime<Utc>,
}

impl Document {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: String,
        origin: DocumentOrigin,
        doc_type: DocumentType,
        emitter: String,
        tribute_value: String,
        liquid_value: String,
        file_url: String,
        file_size: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            origin: origin.as_str().to_string(),
            doc_type: doc_type.as_str().to_string(),
            emitter,
            tribute_value,
            liquid_value,
            file_url,
            file_size,
            created_at: now,
            updated_at: now,
        }
    }
}
