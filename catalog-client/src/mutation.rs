//! Mutation invalidation: create/delete flag the catalog as dirty; the
//! fetch orchestrator consumes the flag when it starts the triggered fetch.

use crate::api::{ApiError, CatalogApi, Document, NewDocument};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared "should refetch" flag. Mutators set it; only the orchestrator
/// clears it, after the triggered fetch has been issued — clearing earlier
/// would race the fetch that is supposed to observe the mutation.
#[derive(Debug, Clone, Default)]
pub struct MutationSignal(Arc<AtomicBool>);

impl MutationSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub(crate) fn clear(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Write-side wrapper: performs create/delete and marks the signal on
/// success only.
pub struct DocumentMutator<A: CatalogApi> {
    api: A,
    signal: MutationSignal,
}

impl<A: CatalogApi> DocumentMutator<A> {
    pub fn new(api: A, signal: MutationSignal) -> Self {
        Self { api, signal }
    }

    pub async fn create(
        &self,
        metadata: &NewDocument,
        filename: &str,
        data: Vec<u8>,
    ) -> Result<Document, ApiError> {
        let document = self.api.create_document(metadata, filename, data).await?;
        tracing::info!(document_id = %document.id, "Document created");
        self.signal.mark();
        Ok(document)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.api.delete_document(id).await?;
        tracing::info!(document_id = %id, "Document deleted");
        self.signal.mark();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_starts_unset_and_is_sticky_until_cleared() {
        let signal = MutationSignal::new();
        assert!(!signal.is_set());

        signal.mark();
        signal.mark();
        assert!(signal.is_set());

        signal.clear();
        assert!(!signal.is_set());
    }

    #[test]
    fn clones_share_the_flag() {
        let signal = MutationSignal::new();
        let observer = signal.clone();
        signal.mark();
        assert!(observer.is_set());
    }
}
