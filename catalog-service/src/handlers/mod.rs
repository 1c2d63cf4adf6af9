pub mod documents;
pub mod health;

pub use documents::{delete_document, download_file, list_documents, upload_document};
pub use health::health_check;
