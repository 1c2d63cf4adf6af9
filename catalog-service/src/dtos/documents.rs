use crate::models::{Document, DocumentOrigin, DocumentType};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Raw query parameters of the list endpoint. Everything arrives as an
/// optional string; the query builder owns parsing and defaulting.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentListParams {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub doc_type: Option<String>,
    pub origin: Option<String>,
    pub date: Option<String>,
    pub document_type: Option<String>,
    pub emitter: Option<String>,
    pub tribute_value: Option<String>,
    pub liquid_value: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResponse {
    pub id: String,
    pub name: String,
    pub origin: String,
    #[serde(rename = "type")]
    pub doc_type: String,
    pub emitter: String,
    pub tribute_value: String,
    pub liquid_value: String,
    pub file_url: String,
    pub file_size: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Document> for DocumentResponse {
    fn from(doc: Document) -> Self {
        Self {
            id: doc.id,
            name: doc.name,
            origin: doc.origin,
            doc_type: doc.doc_type,
            emitter: doc.emitter,
            tribute_value: doc.tribute_value,
            liquid_value: doc.liquid_value,
            file_url: doc.file_url,
            file_size: doc.file_size,
            created_at: doc.created_at.to_rfc3339(),
            updated_at: doc.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentListResponse {
    pub documents: Vec<DocumentResponse>,
    pub total_pages: u64,
    pub current_page: u64,
    pub total_documents: u64,
}

/// JSON metadata part of the multipart create request. Origin and type
/// deserialize into their enum domains, so out-of-domain values fail before
/// validation runs.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentMetadata {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub origin: DocumentOrigin,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    #[validate(length(min = 1, message = "Emitter is required"))]
    pub emitter: String,
    #[validate(length(min = 1, message = "Tribute value is required"))]
    pub tribute_value: String,
    #[validate(length(min = 1, message = "Liquid value is required"))]
    pub liquid_value: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    pub id: Option<String>,
}
