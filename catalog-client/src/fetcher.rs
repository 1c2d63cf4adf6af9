//! Fetch orchestration: an explicit state machine replacing the reactive
//! fetch-on-change effect. Every state change issues one request carrying a
//! monotonically increasing sequence number; a response is applied only if
//! no newer request has been issued since, so a slow early request can never
//! clobber a later fast one.

use crate::api::{ApiError, CatalogApi, Document, DocumentPage, DocumentQuery};
use crate::filters::FilterStore;
use crate::mutation::MutationSignal;

/// The catalog UI shows fixed-size pages.
pub const PAGE_SIZE: u64 = 10;

/// Handle for one issued request: the sequence number it was born with plus
/// the query snapshot to send.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    seq: u64,
    pub query: DocumentQuery,
}

#[derive(Debug)]
pub struct FetchOrchestrator {
    filters: FilterStore,
    page: u64,
    seq: u64,
    loading: bool,
    error: Option<String>,
    documents: Vec<Document>,
    total_pages: u64,
    total_documents: u64,
    mutations: MutationSignal,
}

impl FetchOrchestrator {
    pub fn new(mutations: MutationSignal) -> Self {
        Self {
            filters: FilterStore::new(),
            page: 1,
            seq: 0,
            loading: false,
            error: None,
            documents: Vec::new(),
            total_pages: 0,
            total_documents: 0,
            mutations,
        }
    }

    pub fn filters(&self) -> &FilterStore {
        &self.filters
    }

    /// Mutable access for drawer edits; follow up with [`apply_filters`] to
    /// trigger the fetch.
    ///
    /// [`apply_filters`]: Self::apply_filters
    pub fn filters_mut(&mut self) -> &mut FilterStore {
        &mut self.filters
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn current_page(&self) -> u64 {
        self.page
    }

    pub fn total_pages(&self) -> u64 {
        self.total_pages
    }

    pub fn total_documents(&self) -> u64 {
        self.total_documents
    }

    /// Search action: updates the text and resets to the first page.
    pub fn search(&mut self, text: impl Into<String>) -> FetchTicket {
        self.filters.set_search(text);
        self.page = 1;
        self.begin()
    }

    /// Clear action: drawer filters back to defaults, first page.
    pub fn clear_filters(&mut self) -> FetchTicket {
        self.filters.clear_filters();
        self.page = 1;
        self.begin()
    }

    /// Apply the drawer filters as currently edited; the page is kept.
    pub fn apply_filters(&mut self) -> FetchTicket {
        self.begin()
    }

    /// Page-change request; filters are untouched.
    pub fn set_page(&mut self, page: u64) -> FetchTicket {
        self.page = page.max(1);
        self.begin()
    }

    /// Consume a pending mutation invalidation, if any. The flag is cleared
    /// here — after the fetch has been issued — never by the mutator.
    pub fn take_invalidation(&mut self) -> Option<FetchTicket> {
        if self.mutations.is_set() {
            let ticket = self.begin();
            self.mutations.clear();
            Some(ticket)
        } else {
            None
        }
    }

    fn begin(&mut self) -> FetchTicket {
        self.seq += 1;
        self.loading = true;
        FetchTicket {
            seq: self.seq,
            query: self.snapshot_query(),
        }
    }

    fn snapshot_query(&self) -> DocumentQuery {
        fn text(value: &str) -> Option<String> {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }

        DocumentQuery {
            search: text(self.filters.search()),
            doc_type: self.filters.doc_type().as_param().map(String::from),
            origin: self.filters.origin().as_param().map(String::from),
            date: self
                .filters
                .date()
                .map(|d| d.format("%Y-%m-%d").to_string()),
            document_type: self.filters.document_type().as_param().map(String::from),
            emitter: text(self.filters.emitter()),
            tribute_value: text(self.filters.tribute_value()),
            liquid_value: text(self.filters.liquid_value()),
            page: self.page,
            limit: PAGE_SIZE,
        }
    }

    /// Feed a response back. Returns true when the response was applied,
    /// false when it was discarded as stale.
    pub fn apply(&mut self, ticket: &FetchTicket, outcome: Result<DocumentPage, ApiError>) -> bool {
        if ticket.seq != self.seq {
            tracing::debug!(
                response_seq = ticket.seq,
                latest_seq = self.seq,
                "Discarding stale response"
            );
            return false;
        }

        match outcome {
            Ok(page) => {
                self.documents = page.documents;
                self.total_pages = page.total_pages;
                self.total_documents = page.total_documents;
                self.page = page.current_page;
                self.error = None;
            }
            Err(e) => {
                // Previous documents stay on screen; no automatic retry.
                tracing::warn!(error = %e, "Fetch failed; keeping last good state");
                self.error = Some(e.to_string());
            }
        }
        self.loading = false;
        true
    }

    /// Begin, fetch, apply — the non-overlapping path.
    pub async fn refresh<A: CatalogApi + ?Sized>(&mut self, api: &A) -> bool {
        let ticket = self.begin();
        let outcome = api.list_documents(&ticket.query).await;
        self.apply(&ticket, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::TypeFilter;

    fn page_of(names: &[&str], total: u64) -> DocumentPage {
        use chrono::{TimeZone, Utc};
        let at = Utc.with_ymd_and_hms(2024, 4, 12, 12, 0, 0).unwrap();
        DocumentPage {
            documents: names
                .iter()
                .map(|name| Document {
                    id: name.to_string(),
                    name: name.to_string(),
                    origin: "internal".to_string(),
                    doc_type: "contract".to_string(),
                    emitter: "Acme".to_string(),
                    tribute_value: "R$ 1,00".to_string(),
                    liquid_value: "R$ 1,00".to_string(),
                    file_url: "/files/a.pdf".to_string(),
                    file_size: 1,
                    created_at: at,
                    updated_at: at,
                })
                .collect(),
            total_pages: total.div_ceil(PAGE_SIZE),
            current_page: 1,
            total_documents: total,
        }
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut orch = FetchOrchestrator::new(MutationSignal::new());

        let slow = orch.search("a");
        let fast = orch.search("ab");

        // The later request resolves first.
        assert!(orch.apply(&fast, Ok(page_of(&["ab-result"], 1))));
        // The earlier one arrives afterwards and must be dropped.
        assert!(!orch.apply(&slow, Ok(page_of(&["a-result"], 1))));

        assert_eq!(orch.documents().len(), 1);
        assert_eq!(orch.documents()[0].name, "ab-result");
        assert!(!orch.is_loading());
    }

    #[test]
    fn search_resets_page_but_page_change_keeps_filters() {
        let mut orch = FetchOrchestrator::new(MutationSignal::new());
        orch.filters_mut().set_document_type(TypeFilter::Invoice);

        let ticket = orch.set_page(4);
        assert_eq!(ticket.query.page, 4);
        assert_eq!(ticket.query.document_type.as_deref(), Some("invoice"));

        let ticket = orch.search("report");
        assert_eq!(ticket.query.page, 1);
        assert_eq!(ticket.query.search.as_deref(), Some("report"));
        assert_eq!(ticket.query.document_type.as_deref(), Some("invoice"));
    }

    #[test]
    fn failure_keeps_last_good_documents() {
        let mut orch = FetchOrchestrator::new(MutationSignal::new());

        let ticket = orch.search("a");
        assert!(orch.apply(&ticket, Ok(page_of(&["kept"], 1))));

        let ticket = orch.set_page(2);
        assert!(orch.apply(
            &ticket,
            Err(ApiError::Api {
                status: 500,
                message: "Database error".to_string(),
            })
        ));

        assert_eq!(orch.documents()[0].name, "kept");
        assert!(orch.error().is_some());
        assert!(!orch.is_loading());

        // The next successful fetch clears the error indicator.
        let ticket = orch.set_page(1);
        assert!(orch.apply(&ticket, Ok(page_of(&["fresh"], 1))));
        assert!(orch.error().is_none());
    }

    #[test]
    fn invalidation_is_consumed_exactly_once() {
        let signal = MutationSignal::new();
        let mut orch = FetchOrchestrator::new(signal.clone());

        assert!(orch.take_invalidation().is_none());

        signal.mark();
        let ticket = orch.take_invalidation().expect("pending invalidation");
        assert!(!signal.is_set());
        assert!(orch.take_invalidation().is_none());

        assert!(orch.apply(&ticket, Ok(page_of(&[], 0))));
    }

    #[test]
    fn loading_is_set_while_a_request_is_outstanding() {
        let mut orch = FetchOrchestrator::new(MutationSignal::new());
        assert!(!orch.is_loading());

        let ticket = orch.search("a");
        assert!(orch.is_loading());

        orch.apply(&ticket, Ok(page_of(&[], 0)));
        assert!(!orch.is_loading());
    }
}
