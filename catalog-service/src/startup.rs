use crate::config::CatalogConfig;
use crate::handlers;
use crate::services::{DocumentRepository, LocalStorage, MongoDb, Storage};
use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};
use service_core::error::AppError;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: CatalogConfig,
    pub repo: DocumentRepository,
    pub storage: Arc<dyn Storage>,
}

pub struct Application {
    port: u16,
    server: std::pin::Pin<Box<dyn std::future::Future<Output = std::io::Result<()>> + Send>>,
    state: AppState,
}

impl Application {
    pub async fn build(config: CatalogConfig) -> Result<Self, AppError> {
        let db = MongoDb::connect(&config.mongodb.uri, &config.mongodb.database)
            .await
            .map_err(|e| {
                tracing::error!("Failed to connect to MongoDB: {}", e);
                e
            })?;
        db.initialize_indexes().await.map_err(|e| {
            tracing::error!("Failed to initialize database indexes: {}", e);
            e
        })?;

        let storage: Arc<dyn Storage> = Arc::new(
            LocalStorage::new(&config.storage.local_path, &config.storage.public_base)
                .await
                .map_err(|e| {
                    tracing::error!(
                        "Failed to initialize local storage at {}: {}",
                        config.storage.local_path,
                        e
                    );
                    e
                })?,
        );

        let state = AppState {
            config: config.clone(),
            repo: DocumentRepository::new(db),
            storage,
        };

        let app = Router::new()
            .route("/health", get(handlers::health_check))
            .route(
                "/api/documents",
                get(handlers::list_documents)
                    .post(handlers::upload_document)
                    .delete(handlers::delete_document),
            )
            .route("/api/documents/:id/file", get(handlers::download_file))
            // The default 2 MB body cap would reject uploads before the
            // handler's own file-size check runs.
            .layer(DefaultBodyLimit::max(
                handlers::documents::MAX_UPLOAD_BYTES + 64 * 1024,
            ))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(state.clone());

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::pin(server.into_future()),
            state,
        })
    }

    pub fn repo(&self) -> &DocumentRepository {
        &self.state.repo
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
