//! service-core: Shared infrastructure for the document catalog services.
pub mod config;
pub mod error;
pub mod observability;
