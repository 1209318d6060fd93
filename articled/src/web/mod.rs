//! Server-rendered web client for the article API.
//!
//! Runs as its own process (`articled-web`) and talks to the API over HTTP through
//! [`ApiClient`]. Nothing is cached: each page fetches fresh data.
//!
//! | Method | Path | |
//! |---|---|---|
//! | GET | `/` | list |
//! | GET | `/detail/{id}` | detail |
//! | GET, POST | `/create` | empty form, submit (redirects to `/`) |
//! | GET, POST | `/update/{id}` | prefilled form, submit (redirects to `/detail/{id}`) |
//! | POST | `/delete/{id}` | delete (redirects to `/`) |

pub mod assets;
pub mod client;
pub mod pages;
pub mod templates;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    routing::{get, post},
};
use bon::Builder;
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use url::Url;

use crate::{config::WebConfig, telemetry};
use client::ApiClient;
use templates::Templates;

#[derive(Clone, Builder)]
pub struct WebState {
    pub client: ApiClient,
    pub templates: Arc<Templates>,
}

pub fn create_web_state(api_url: Url, request_timeout: Duration) -> anyhow::Result<WebState> {
    let client = ApiClient::new(api_url, request_timeout)?;
    Ok(WebState::builder().client(client).templates(Arc::new(Templates::new())).build())
}

pub fn build_web_router(state: WebState) -> Router {
    Router::new()
        .route("/", get(pages::list_page))
        .route("/detail/{id}", get(pages::detail_page))
        .route("/create", get(pages::create_form).post(pages::create_submit))
        .route("/update/{id}", get(pages::update_form).post(pages::update_submit))
        .route("/delete/{id}", post(pages::delete_submit))
        .route("/static/{*path}", get(assets::serve_asset))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

/// The web client process
pub struct WebApplication {
    router: Router,
    config: WebConfig,
}

impl WebApplication {
    pub fn new(config: WebConfig) -> anyhow::Result<Self> {
        let state = create_web_state(config.api_url.clone(), config.request_timeout)?;
        Ok(Self {
            router: build_web_router(state),
            config,
        })
    }

    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "Web client listening on http://{}, using article API at {}",
            bind_addr, self.config.api_url
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Shutting down telemetry...");
        telemetry::shutdown_telemetry();

        Ok(())
    }
}
