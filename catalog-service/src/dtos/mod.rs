pub mod documents;

pub use documents::{
    CreateDocumentMetadata, DeleteParams, DocumentListParams, DocumentListResponse,
    DocumentResponse,
};
