//! Record store gateway: executes predicates against MongoDB and owns no
//! business logic beyond translation. Ordering is always createdAt
//! descending here; any in-page sort belongs to the client.

use crate::models::{Document, DocumentOrigin, DocumentType};
use crate::services::MongoDb;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, Document as BsonDocument};
use mongodb::options::FindOptions;
use service_core::error::AppError;

#[derive(Clone)]
pub struct DocumentRepository {
    db: MongoDb,
}

impl DocumentRepository {
    pub fn new(db: MongoDb) -> Self {
        Self { db }
    }

    /// Total number of records matching the predicate, before windowing.
    pub async fn count(&self, predicate: &BsonDocument) -> Result<u64, AppError> {
        let total = self
            .db
            .documents()
            .count_documents(predicate.clone(), None)
            .await
            .map_err(AppError::from)?;
        Ok(total)
    }

    pub async fn find_page(
        &self,
        predicate: &BsonDocument,
        skip: u64,
        take: u64,
    ) -> Result<Vec<Document>, AppError> {
        let find_options = FindOptions::builder()
            .sort(doc! { "createdAt": -1 }) // Newest first
            .skip(skip)
            .limit(take as i64)
            .build();

        let mut cursor = self
            .db
            .documents()
            .find(predicate.clone(), find_options)
            .await
            .map_err(AppError::from)?;

        let mut documents = Vec::new();
        while let Some(doc) = cursor.try_next().await.map_err(AppError::from)? {
            documents.push(doc);
        }
        Ok(documents)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Document>, AppError> {
        let document = self
            .db
            .documents()
            .find_one(doc! { "_id": id }, None)
            .await
            .map_err(AppError::from)?;
        Ok(document)
    }

    pub async fn insert(&self, document: &Document) -> Result<(), AppError> {
        self.db
            .documents()
            .insert_one(document, None)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to insert document {} into database: {}",
                    document.id,
                    e
                );
                AppError::from(e)
            })?;
        Ok(())
    }

    /// Delete by identifier. The caller validates presence of the id; an
    /// unknown id reports `false` rather than an error.
    pub async fn delete_by_id(&self, id: &str) -> Result<bool, AppError> {
        let result = self
            .db
            .documents()
            .delete_one(doc! { "_id": id }, None)
            .await
            .map_err(AppError::from)?;
        Ok(result.deleted_count > 0)
    }

    /// Insert the deterministic sample records inside a single session
    /// transaction so partial seeding is never observable. Returns true when
    /// seeding actually ran.
    pub async fn seed_if_empty(&self) -> Result<bool, AppError> {
        let existing = self
            .db
            .documents()
            .count_documents(doc! {}, None)
            .await
            .map_err(AppError::from)?;
        if existing > 0 {
            return Ok(false);
        }

        tracing::info!("Seeding empty catalog with sample documents");

        let mut session = self
            .db
            .client()
            .start_session(None)
            .await
            .map_err(AppError::from)?;
        session
            .start_transaction(None)
            .await
            .map_err(AppError::from)?;

        for document in seed_documents() {
            if let Err(e) = self
                .db
                .documents()
                .insert_one_with_session(&document, None, &mut session)
                .await
            {
                tracing::error!("Failed to insert seed document: {}", e);
                session.abort_transaction().await.ok();
                return Err(AppError::from(e));
            }
        }

        session
            .commit_transaction()
            .await
            .map_err(AppError::from)?;

        tracing::info!("Seeded sample documents");
        Ok(true)
    }

    pub fn db(&self) -> &MongoDb {
        &self.db
    }
}

fn seed_documents() -> Vec<Document> {
    vec![
        Document::new(
            "Service Agreement".to_string(),
            DocumentOrigin::Internal,
            DocumentType::Contract,
            "Acme Ltda".to_string(),
            "R$ 500,00".to_string(),
            "R$ 5.000,00".to_string(),
            "/files/contract.pdf".to_string(),
            1024 * 1024,
        ),
        Document::new(
            "Invoice 001".to_string(),
            DocumentOrigin::External,
            DocumentType::Invoice,
            "Globex S.A.".to_string(),
            "R$ 200,00".to_string(),
            "R$ 2.000,00".to_string(),
            "/files/invoice-001.pdf".to_string(),
            512 * 1024,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_content_is_fixed_at_two_records() {
        let seeds = seed_documents();
        assert_eq!(seeds.len(), 2);
        // Scenario fixture: "200" must match one record's tribute value as a
        // substring and the other's liquid value only via "2.000".
        assert_eq!(seeds[1].tribute_value, "R$ 200,00");
        assert!(seeds.iter().all(|d| !d.name.is_empty()));
        assert!(seeds.iter().all(|d| !d.origin.is_empty()));
        assert!(seeds.iter().all(|d| !d.doc_type.is_empty()));
    }
}
