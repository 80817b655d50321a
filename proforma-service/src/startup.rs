//! Application startup and lifecycle management.

use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware, security_headers::security_headers_middleware,
    tracing::{http_trace_layer, request_id_middleware},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::config::Config;
use crate::handlers;
use crate::services::{init_metrics, Database, DemoStore, SharedStore};
use crate::AppState;

/// Build the HTTP router with every route and middleware layer.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/clients",
            get(handlers::clients::list_clients).post(handlers::clients::create_client),
        )
        .route(
            "/clients/:id",
            get(handlers::clients::get_client).delete(handlers::clients::delete_client),
        )
        .route(
            "/vendors",
            get(handlers::vendors::list_vendors).post(handlers::vendors::create_vendor),
        )
        .route(
            "/vendors/:id",
            get(handlers::vendors::get_vendor).delete(handlers::vendors::delete_vendor),
        )
        .route(
            "/items",
            get(handlers::items::list_items).post(handlers::items::create_item),
        )
        .route("/items/:id", axum::routing::delete(handlers::items::delete_item))
        .route(
            "/invoices",
            get(handlers::invoices::list_invoices).post(handlers::invoices::create_invoice),
        )
        .route("/invoices/preview", post(handlers::invoices::preview_invoice))
        .route("/invoices/next-number", get(handlers::invoices::next_number))
        .route(
            "/invoices/:id",
            get(handlers::invoices::get_invoice).delete(handlers::invoices::delete_invoice),
        )
        .route("/invoices/:id/print", get(handlers::print::print_invoice))
        .route(
            "/company-profile",
            get(handlers::company_profile::get_company_profile)
                .post(handlers::company_profile::save_company_profile),
        )
        .route("/dashboard", get(handlers::dashboard::dashboard));

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route("/metrics", get(handlers::metrics::metrics))
        .nest("/api", api)
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(metrics_middleware))
        .layer(CorsLayer::permissive())
        .layer(http_trace_layer())
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
    demo: bool,
}

impl Application {
    /// Build the application with the given configuration.
    ///
    /// Connects to PostgreSQL when `database.url` is set, otherwise serves
    /// sample data in demo mode.
    pub async fn build(config: Config) -> Result<Self, AppError> {
        let store: SharedStore = match config.database.connection_url() {
            Some(url) => {
                let db = Database::new(
                    url,
                    config.database.max_connections,
                    config.database.min_connections,
                )
                .await
                .map_err(|e| {
                    tracing::error!("Failed to connect to PostgreSQL: {}", e);
                    e
                })?;

                if config.database.run_migrations {
                    db.run_migrations().await?;
                }

                Arc::new(db)
            }
            None => {
                tracing::warn!(
                    "No database configured - running in demo mode, changes will not be saved"
                );
                Arc::new(DemoStore::new())
            }
        };

        Self::with_store(config, store).await
    }

    /// Build the application around an existing store.
    pub async fn with_store(config: Config, store: SharedStore) -> Result<Self, AppError> {
        init_metrics();

        let demo = store.is_demo();
        let state = AppState {
            store,
            config: config.clone(),
        };

        // Port 0 = random port for testing
        let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!("Invalid server address: {}", e)))?;
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(port = port, demo_mode = demo, "Proforma service listening");

        Ok(Self {
            port,
            listener,
            router: build_router(state),
            demo,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn is_demo(&self) -> bool {
        self.demo
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router).await
    }
}
