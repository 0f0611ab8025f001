//! Pantry Backend
//!
//! Layered architecture:
//! - domain: Records, request bodies and the matching rule
//! - repository: SQLite data access
//! - api: axum handlers for the storage, shopping, budget, menu and receipts resources

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod repository;
pub mod telemetry;

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use config::Config;
use repository::init_db;

/// CORS for the browser client; an empty list allows any origin
pub fn cors_layer(origins: &[String]) -> anyhow::Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);
    if origins.is_empty() {
        return Ok(layer.allow_origin(Any));
    }
    let origins = origins
        .iter()
        .map(|origin| HeaderValue::from_str(origin).with_context(|| format!("invalid CORS origin '{origin}'")))
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(layer.allow_origin(AllowOrigin::list(origins)))
}

/// Full application router over an initialized database
pub fn build_router(config: &Config) -> anyhow::Result<Router> {
    let db = init_db(Path::new(&config.database_path))
        .with_context(|| format!("failed to open database at {}", config.database_path))?;
    let state = Arc::new(api::Repositories::new(db.connection(), config.default_calorie_goal));

    Ok(api::router(state)
        .layer(cors_layer(&config.cors_origins)?)
        .layer(TraceLayer::new_for_http()))
}

pub struct Application {
    router: Router,
    listener: TcpListener,
}

impl Application {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let router = build_router(&config)?;
        let listener = TcpListener::bind((config.host.as_str(), config.port))
            .await
            .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?;
        info!(
            "Pantry server listening on http://{}, database {}",
            listener.local_addr()?,
            config.database_path
        );
        Ok(Self { router, listener })
    }

    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;
        info!("Server stopped");
        Ok(())
    }
}
