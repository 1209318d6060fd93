//! # articled: a small article service
//!
//! `articled` stores articles (a title, a body, a category and a publication status) and exposes
//! them through a JSON API, together with a server-rendered web client that drives that API.
//!
//! ## Overview
//!
//! The crate ships two binaries:
//!
//! - **`articled`** serves the article API. It translates every request into a single call on an
//!   [`ArticleStore`](store::ArticleStore) and wraps the result in a `{"data": ...}` envelope, or
//!   `{"error": {"message": ...}}` on failure.
//! - **`articled-web`** serves HTML pages for listing, viewing, creating, updating and deleting
//!   articles. It holds no data of its own: every page refetches from the API over HTTP.
//!
//! ## Architecture
//!
//! The HTTP layer is [Axum](https://github.com/tokio-rs/axum). Articles live in PostgreSQL,
//! accessed through sqlx; for local experiments and tests the same API runs over an in-memory
//! store (`database.type: memory`).
//!
//! The **API layer** ([`api`]) holds request/response models and the handlers for the five
//! article endpoints. Request bodies are validated at the boundary before anything touches
//! storage.
//!
//! The **storage layer** ([`store`], backed by [`db`]) is the [`ArticleStore`](store::ArticleStore)
//! trait and its two implementations. The store is built once in [`Application::new`] and
//! injected into handlers through [`AppState`].
//!
//! The **web client** ([`web`]) is a second Axum application rendering minijinja templates with
//! data fetched by a reqwest-based [`ApiClient`](web::client::ApiClient).
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use articled::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = articled::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     articled::telemetry::init_telemetry("articled", config.enable_otel_export)?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     }).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Database Setup
//!
//! Migrations run on startup unless `run_migrations: false`. They can also be applied by hand:
//!
//! ```no_run
//! # use sqlx::PgPool;
//! # async fn example(pool: PgPool) -> Result<(), sqlx::migrate::MigrateError> {
//! articled::migrator().run(&pool).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.

pub mod api;
pub mod config;
pub mod db;
pub mod errors;
mod openapi;
pub mod store;
pub mod telemetry;
pub mod types;
pub mod web;

#[cfg(test)]
pub mod test_utils;

use crate::{
    api::handlers::articles,
    config::{CorsOrigin, DatabaseConfig, PoolSettings},
    openapi::ApiDoc,
    store::{SharedArticleStore, in_memory::InMemoryArticleStore, postgres::PostgresArticleStore},
};
use axum::{
    Json, Router,
    http::{self, HeaderValue},
    routing::{get, post},
};
use bon::Builder;
pub use config::Config;
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info, instrument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use types::ArticleId;

/// Application state shared across all request handlers.
///
/// # Example
///
/// ```ignore
/// let state = AppState::builder()
///     .store(Arc::new(InMemoryArticleStore::new()))
///     .config(config)
///     .build();
/// ```
#[derive(Clone, Builder)]
pub struct AppState {
    pub store: SharedArticleStore,
    pub config: Config,
}

/// Get the articled database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Open a connection pool with the configured limits
#[instrument(skip_all)]
pub async fn connect_pool(url: &str, settings: &PoolSettings) -> anyhow::Result<PgPool> {
    // 0 disables the idle timeout / max lifetime
    let seconds = |secs: u64| (secs > 0).then(|| Duration::from_secs(secs));

    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
        .idle_timeout(seconds(settings.idle_timeout_secs))
        .max_lifetime(seconds(settings.max_lifetime_secs))
        .connect(url)
        .await?;

    Ok(pool)
}

/// Build the configured store. Returns the pool too when the store is PostgreSQL-backed, so it
/// can be closed on shutdown.
#[instrument(skip_all)]
async fn setup_store(config: &Config) -> anyhow::Result<(SharedArticleStore, Option<PgPool>)> {
    match &config.database {
        DatabaseConfig::External { url, pool } => {
            info!("Using external database");
            let pool = connect_pool(url, pool).await?;

            if config.run_migrations {
                migrator().run(&pool).await?;
            } else {
                info!("Skipping migrations (run_migrations: false)");
            }

            let store: SharedArticleStore = Arc::new(PostgresArticleStore::new(pool.clone()));
            Ok((store, Some(pool)))
        }
        DatabaseConfig::Memory => {
            info!("Using in-memory article store: data will be lost on shutdown");
            let store: SharedArticleStore = Arc::new(InMemoryArticleStore::new());
            Ok((store, None))
        }
    }
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let allow_origin = if config.cors.allowed_origins.iter().any(|o| matches!(o, CorsOrigin::Wildcard)) {
        if config.cors.allow_credentials {
            anyhow::bail!("CORS: a wildcard origin cannot be combined with allow_credentials");
        }
        AllowOrigin::any()
    } else {
        let mut origins = Vec::new();
        for origin in &config.cors.allowed_origins {
            if let CorsOrigin::Url(url) = origin {
                // Browsers send `Origin` without a trailing slash, `Url` always adds one
                origins.push(url.origin().ascii_serialization().parse::<HeaderValue>()?);
            }
        }
        AllowOrigin::list(origins)
    };

    let mut cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([http::Method::GET, http::Method::POST])
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_credentials(config.cors.allow_credentials);

    if let Some(max_age) = config.cors.max_age {
        cors = cors.max_age(Duration::from_secs(max_age));
    }

    Ok(cors)
}

async fn healthz() -> &'static str {
    "OK"
}

/// Build the API router: the article endpoints, a health check, the OpenAPI document and its
/// Scalar viewer, wrapped in CORS and request tracing.
#[instrument(skip_all)]
pub fn build_router(state: &AppState) -> anyhow::Result<Router> {
    let article_routes = Router::new()
        .route("/articles", get(articles::list_articles))
        .route("/articles/detail/{id}", get(articles::get_article))
        .route("/articles/create", post(articles::create_article))
        .route("/articles/update", post(articles::update_article))
        .route("/articles/delete", post(articles::delete_article))
        .with_state(state.clone());

    let router = Router::new()
        .route("/healthz", get(healthz))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        .merge(article_routes);

    let cors_layer = create_cors_layer(&state.config)?;

    let router = router.layer(cors_layer).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
pub async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}

/// The article API service.
///
/// 1. **Create**: [`Application::new`] connects storage and runs migrations
/// 2. **Serve**: [`Application::serve`] binds to a TCP port and handles requests
/// 3. **Shutdown**: when the shutdown future resolves, drains connections, closes the pool and
///    flushes telemetry
pub struct Application {
    router: Router,
    config: Config,
    pool: Option<PgPool>,
}

impl Application {
    /// Create a new application instance backed by the configured store
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting article service with configuration: {:#?}", config);

        let (store, pool) = setup_store(&config).await?;
        let mut app = Self::with_store(config, store)?;
        app.pool = pool;
        Ok(app)
    }

    /// Create an application around an already-built store
    pub fn with_store(config: Config, store: SharedArticleStore) -> anyhow::Result<Self> {
        let app_state = AppState::builder().store(store).config(config.clone()).build();
        let router = build_router(&app_state)?;

        Ok(Self { router, config, pool: None })
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router.into_make_service()).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "Article API listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        if let Some(pool) = self.pool {
            info!("Closing database connections...");
            pool.close().await;
        }

        info!("Shutting down telemetry...");
        telemetry::shutdown_telemetry();

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{config::CorsConfig, test_utils::*};
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    #[test_log::test(tokio::test)]
    async fn test_healthz() {
        let (server, _store) = create_test_app();

        let response = server.get("/healthz").await;

        response.assert_status_ok();
        response.assert_text("OK");
    }

    #[test_log::test(tokio::test)]
    async fn test_openapi_document_is_served() {
        let (server, _store) = create_test_app();

        let response = server.get("/api-docs/openapi.json").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert!(body["paths"]["/articles/create"].is_object());
    }

    #[test_log::test(tokio::test)]
    async fn test_unknown_route_is_404() {
        let (server, _store) = create_test_app();

        server.get("/nope").expect_failure().await.assert_status(StatusCode::NOT_FOUND);
    }

    #[test_log::test(tokio::test)]
    async fn test_cors_allows_configured_origin() {
        let (server, _store) = create_test_app();

        let response = server
            .get("/articles")
            .add_header(http::header::ORIGIN, HeaderValue::from_static("http://localhost:3000"))
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.header(http::header::ACCESS_CONTROL_ALLOW_ORIGIN),
            HeaderValue::from_static("http://localhost:3000")
        );
    }

    #[test_log::test(tokio::test)]
    async fn test_cors_ignores_other_origins() {
        let (server, _store) = create_test_app();

        let response = server
            .get("/articles")
            .add_header(http::header::ORIGIN, HeaderValue::from_static("https://evil.example.com"))
            .await;

        response.assert_status_ok();
        assert!(response.maybe_header(http::header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[test]
    fn test_cors_layer_accepts_wildcard() {
        let config = Config {
            cors: CorsConfig {
                allowed_origins: vec![CorsOrigin::Wildcard],
                allow_credentials: false,
                max_age: Some(600),
            },
            ..create_test_config()
        };

        assert!(create_cors_layer(&config).is_ok());
    }

    #[test]
    fn test_cors_rejects_wildcard_with_credentials() {
        let config = Config {
            cors: CorsConfig {
                allowed_origins: vec![CorsOrigin::Wildcard],
                allow_credentials: true,
                max_age: None,
            },
            ..create_test_config()
        };

        assert!(create_cors_layer(&config).is_err());
    }

    #[test_log::test(tokio::test)]
    async fn test_application_with_memory_database() {
        let config = create_test_config();

        let server = Application::new(config).await.unwrap().into_test_server();

        server.get("/articles").await.assert_json(&json!({ "data": [] }));
    }
}
