use crate::dtos::{
    CreateDocumentMetadata, DeleteParams, DocumentListParams, DocumentListResponse,
    DocumentResponse,
};
use crate::models::Document;
use crate::query;
use crate::startup::AppState;
use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use service_core::error::AppError;
use uuid::Uuid;
use validator::Validate;

/// Largest accepted file part. The router's body limit is sized from this,
/// with headroom for the metadata part and multipart framing.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub async fn list_documents(
    State(state): State<AppState>,
    Query(params): Query<DocumentListParams>,
) -> Result<impl IntoResponse, AppError> {
    let query = query::build(&params)?;

    let mut total = state.repo.count(&query.predicate).await?;

    // Bootstrap convenience: an empty store observed through the unfiltered
    // first page gets the sample records once, then the unchanged query
    // re-executes.
    if total == 0 && query.unfiltered && query.page == 1 && state.repo.seed_if_empty().await? {
        total = state.repo.count(&query.predicate).await?;
    }

    let documents = state
        .repo
        .find_page(&query.predicate, query.skip, query.limit)
        .await?;

    let total_pages = total.div_ceil(query.limit);

    Ok(Json(DocumentListResponse {
        documents: documents.into_iter().map(DocumentResponse::from).collect(),
        total_pages,
        current_page: query.page,
        total_documents: total,
    }))
}

pub async fn upload_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut metadata: Option<CreateDocumentMetadata> = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!("Failed to read multipart field: {}", e))
    })? {
        match field.name() {
            Some("metadata") => {
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::BadRequest(anyhow::anyhow!("Failed to read metadata part: {}", e))
                })?;
                let parsed = serde_json::from_slice(&bytes).map_err(|e| {
                    AppError::BadRequest(anyhow::anyhow!("Invalid metadata payload: {}", e))
                })?;
                metadata = Some(parsed);
            }
            Some("file") => {
                let filename = field.file_name().unwrap_or("unnamed").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| {
                        AppError::BadRequest(anyhow::anyhow!("Failed to read file bytes: {}", e))
                    })?
                    .to_vec();
                file = Some((filename, data));
            }
            _ => {}
        }
    }

    let metadata =
        metadata.ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("No metadata part")))?;
    let (original_name, data) =
        file.ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("No file uploaded")))?;

    metadata.validate()?;

    if data.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "File too large (max 10MB)"
        )));
    }
    let size = data.len() as i64;

    let extension = std::path::Path::new(&original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("bin");
    let storage_key = format!("{}/{}.{}", Uuid::new_v4(), Uuid::new_v4(), extension);

    // Blob upload first; the metadata record only exists once the file does.
    let file_url = state
        .storage
        .upload(&storage_key, data)
        .await
        .map_err(|e| {
            tracing::error!("Failed to upload file {} to storage: {}", storage_key, e);
            e
        })?;

    let document = Document::new(
        metadata.name,
        metadata.origin,
        metadata.doc_type,
        metadata.emitter,
        metadata.tribute_value,
        metadata.liquid_value,
        file_url,
        size,
    );

    tracing::info!(
        document_id = %document.id,
        name = %document.name,
        size = %size,
        "Document upload started"
    );

    if let Err(e) = state.repo.insert(&document).await {
        // The uploaded blob stays behind; there is no compensating delete.
        tracing::warn!(
            storage_key = %storage_key,
            "Record creation failed after blob upload; blob is orphaned"
        );
        return Err(e);
    }

    tracing::info!(
        document_id = %document.id,
        "Document upload completed successfully"
    );

    Ok((StatusCode::CREATED, Json(DocumentResponse::from(document))))
}

pub async fn delete_document(
    State(state): State<AppState>,
    Query(params): Query<DeleteParams>,
) -> Result<impl IntoResponse, AppError> {
    // Validate before touching storage.
    let id = params
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("Missing document id")))?;

    let deleted = state.repo.delete_by_id(id).await?;
    if !deleted {
        return Err(AppError::NotFound(anyhow::anyhow!("Document not found")));
    }

    tracing::info!(document_id = %id, "Document deleted");

    Ok(Json(json!({ "message": "Document deleted" })))
}

/// Serve the stored blob back for preview, inline with its content type.
pub async fn download_file(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let document = state
        .repo
        .find_by_id(&document_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Document not found")))?;

    let public_base = state.config.storage.public_base.trim_end_matches('/');
    let storage_key = document
        .file_url
        .strip_prefix(&format!("{}/", public_base))
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("File is not available")))?;

    let file_data = state.storage.download(storage_key).await.map_err(|e| {
        tracing::error!(
            document_id = %document_id,
            storage_key = %storage_key,
            error = %e,
            "Failed to download file"
        );
        AppError::NotFound(anyhow::anyhow!("File not found"))
    })?;

    tracing::info!(
        document_id = %document_id,
        storage_key = %storage_key,
        size = file_data.len(),
        "Document download completed"
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, detect_content_type(storage_key)),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{}\"", document.name),
            ),
        ],
        file_data,
    ))
}

fn detect_content_type(path: &str) -> String {
    if path.ends_with(".pdf") {
        "application/pdf".to_string()
    } else if path.ends_with(".doc") || path.ends_with(".docx") {
        "application/msword".to_string()
    } else {
        "application/octet-stream".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_detection() {
        assert_eq!(detect_content_type("a/b.pdf"), "application/pdf");
        assert_eq!(detect_content_type("a/b.docx"), "application/msword");
        assert_eq!(detect_content_type("a/b"), "application/octet-stream");
    }
}
