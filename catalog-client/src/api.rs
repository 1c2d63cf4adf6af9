use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Api { status: u16, message: String },
}

/// Shape of the `{ error, details? }` failure payload.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    details: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPage {
    pub documents: Vec<Document>,
    pub total_pages: u64,
    pub current_page: u64,
    pub total_documents: u64,
}

/// Metadata part of the create request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDocument {
    pub name: String,
    pub origin: String,
    #[serde(rename = "type")]
    pub doc_type: String,
    pub emitter: String,
    pub tribute_value: String,
    pub liquid_value: String,
}

/// The full query snapshot sent with one list request.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentQuery {
    pub search: Option<String>,
    pub doc_type: Option<String>,
    pub origin: Option<String>,
    pub date: Option<String>,
    pub document_type: Option<String>,
    pub emitter: Option<String>,
    pub tribute_value: Option<String>,
    pub liquid_value: Option<String>,
    pub page: u64,
    pub limit: u64,
}

impl Default for DocumentQuery {
    fn default() -> Self {
        Self {
            search: None,
            doc_type: None,
            origin: None,
            date: None,
            document_type: None,
            emitter: None,
            tribute_value: None,
            liquid_value: None,
            page: 1,
            limit: crate::fetcher::PAGE_SIZE,
        }
    }
}

impl DocumentQuery {
    /// Query-string pairs; absent filters produce no pair at all.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let optional = [
            ("search", &self.search),
            ("type", &self.doc_type),
            ("origin", &self.origin),
            ("date", &self.date),
            ("documentType", &self.document_type),
            ("emitter", &self.emitter),
            ("tributeValue", &self.tribute_value),
            ("liquidValue", &self.liquid_value),
        ];
        for (name, value) in optional {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                pairs.push((name, value.to_string()));
            }
        }
        pairs.push(("page", self.page.to_string()));
        pairs.push(("limit", self.limit.to_string()));
        pairs
    }
}

/// The catalog's read/write surface. Abstracted behind a trait so the fetch
/// orchestrator can be exercised against a scripted in-memory API.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list_documents(&self, query: &DocumentQuery) -> Result<DocumentPage, ApiError>;

    async fn create_document(
        &self,
        metadata: &NewDocument,
        filename: &str,
        data: Vec<u8>,
    ) -> Result<Document, ApiError>;

    async fn delete_document(&self, id: &str) -> Result<(), ApiError>;
}

/// HTTP client against the catalog service.
pub struct HttpCatalogApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalogApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn check<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|body| match body.details {
                    Some(details) => format!("{}: {}", body.error, details),
                    None => body.error,
                })
                .unwrap_or_else(|_| status.to_string());
            Err(ApiError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn list_documents(&self, query: &DocumentQuery) -> Result<DocumentPage, ApiError> {
        let response = self
            .client
            .get(format!("{}/api/documents", self.base_url))
            .query(&query.query_pairs())
            .send()
            .await?;
        Self::check(response).await
    }

    async fn create_document(
        &self,
        metadata: &NewDocument,
        filename: &str,
        data: Vec<u8>,
    ) -> Result<Document, ApiError> {
        let metadata_json =
            serde_json::to_string(metadata).map_err(|e| ApiError::Api {
                status: 0,
                message: format!("Failed to encode metadata: {}", e),
            })?;

        let form = reqwest::multipart::Form::new()
            .text("metadata", metadata_json)
            .part(
                "file",
                reqwest::multipart::Part::bytes(data).file_name(filename.to_string()),
            );

        let response = self
            .client
            .post(format!("{}/api/documents", self.base_url))
            .multipart(form)
            .send()
            .await?;
        Self::check(response).await
    }

    async fn delete_document(&self, id: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(format!("{}/api/documents", self.base_url))
            .query(&[("id", id)])
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| status.to_string());
            Err(ApiError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}
