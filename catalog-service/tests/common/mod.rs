use catalog_service::config::CatalogConfig;
use catalog_service::services::DocumentRepository;
use catalog_service::startup::Application;
use uuid::Uuid;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub repo: DocumentRepository,
    pub db_name: String,
    pub storage_path: String,
}

impl TestApp {
    pub async fn spawn() -> Self {
        if std::env::var("MONGODB_URI").is_err() {
            std::env::set_var("MONGODB_URI", "mongodb://localhost:27017");
        }

        let db_name = format!("catalog_test_{}", Uuid::new_v4().simple());
        let storage_path = format!("target/test-storage-{}", Uuid::new_v4());

        let mut config = CatalogConfig::load().expect("Failed to load configuration");
        config.common.port = 0; // Random port for testing
        config.mongodb.database = db_name.clone();
        config.storage.local_path = storage_path.clone();

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let repo = app.repo().clone();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to come up by polling the health endpoint.
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            repo,
            db_name,
            storage_path,
        }
    }

    /// Cleanup test resources (database and storage).
    pub async fn cleanup(&self) {
        let _ = self
            .repo
            .db()
            .client()
            .database(&self.db_name)
            .drop(None)
            .await;
        let _ = tokio::fs::remove_dir_all(&self.storage_path).await;
    }
}
