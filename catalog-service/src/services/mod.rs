pub mod database;
pub mod repository;
pub mod storage;

pub use database::MongoDb;
pub use repository::DocumentRepository;
pub use storage::{LocalStorage, Storage};
