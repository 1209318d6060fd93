//! Shared helpers for HTTP and store tests.

use std::sync::Arc;

use axum_test::TestServer;
use chrono::{DateTime, FixedOffset, Utc};

use crate::{
    Application,
    config::{Config, DatabaseConfig, DisplayTimezone},
    db::{
        errors::{DbError, Result},
        models::articles::{Article, ArticleCreateDBRequest, ArticleDBResponse, ArticleUpdateDBRequest},
    },
    store::{ArticleStore, in_memory::InMemoryArticleStore},
    types::ArticleId,
};

/// Config backed by the in-memory store, rendering timestamps in UTC+09:00
pub fn create_test_config() -> Config {
    Config {
        database: DatabaseConfig::Memory,
        display_timezone: DisplayTimezone(FixedOffset::east_opt(9 * 3600).expect("valid offset")),
        ..Config::default()
    }
}

/// API test server over a fresh in-memory store. The store handle is returned so tests can seed
/// and inspect it directly.
pub fn create_test_app() -> (TestServer, InMemoryArticleStore) {
    let store = InMemoryArticleStore::new();
    let app = Application::with_store(create_test_config(), Arc::new(store.clone())).expect("Failed to build test application");
    (app.into_test_server(), store)
}

/// A store whose every call fails, as if the database had gone away
pub struct FailingArticleStore;

impl FailingArticleStore {
    fn failure() -> DbError {
        DbError::Other(anyhow::anyhow!("connection refused"))
    }
}

#[async_trait::async_trait]
impl ArticleStore for FailingArticleStore {
    async fn find_all(&self) -> Result<Vec<ArticleDBResponse>> {
        Err(Self::failure())
    }

    async fn find_by_id(&self, _id: ArticleId) -> Result<Option<ArticleDBResponse>> {
        Err(Self::failure())
    }

    async fn insert(&self, _request: ArticleCreateDBRequest) -> Result<ArticleDBResponse> {
        Err(Self::failure())
    }

    async fn update_by_id(&self, _id: ArticleId, _request: ArticleUpdateDBRequest) -> Result<ArticleDBResponse> {
        Err(Self::failure())
    }

    async fn delete_by_id(&self, _id: ArticleId) -> Result<bool> {
        Err(Self::failure())
    }
}

/// API test server whose storage fails on every call
pub fn create_failing_test_app() -> TestServer {
    Application::with_store(create_test_config(), Arc::new(FailingArticleStore))
        .expect("Failed to build test application")
        .into_test_server()
}

/// An article as it would come out of storage, created and last updated at `created_at`
pub fn stored_article(id: ArticleId, title: &str, created_at: DateTime<Utc>) -> Article {
    Article {
        id,
        title: title.to_string(),
        content: format!("{title} content"),
        category: "general".to_string(),
        status: "draft".to_string(),
        created_at,
        updated_at: created_at,
    }
}

pub async fn create_test_article(store: &InMemoryArticleStore, title: &str) -> Article {
    store
        .insert(ArticleCreateDBRequest {
            title: title.to_string(),
            content: format!("{title} content"),
            category: "general".to_string(),
            status: "draft".to_string(),
        })
        .await
        .expect("Failed to create test article")
}
