//! Client-side library for the document catalog: filter state, fetch
//! orchestration with stale-response suppression, in-page sorting, currency
//! formatting, and the HTTP API client.

pub mod api;
pub mod currency;
pub mod fetcher;
pub mod filters;
pub mod mutation;
pub mod sort;

pub use api::{
    ApiError, CatalogApi, Document, DocumentPage, DocumentQuery, HttpCatalogApi, NewDocument,
};
pub use fetcher::{FetchOrchestrator, FetchTicket, PAGE_SIZE};
pub use filters::{FilterStore, OriginFilter, TypeFilter};
pub use mutation::{DocumentMutator, MutationSignal};
pub use sort::{SortDirection, SortField, SortState};
