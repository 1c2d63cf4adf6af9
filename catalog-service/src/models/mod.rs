pub mod document;

pub use document::{Document, DocumentOrigin, DocumentType};
