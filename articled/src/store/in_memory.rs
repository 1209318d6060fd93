//! In-memory article store.
//!
//! Articles live in a `BTreeMap` behind a lock, so iteration order is insertion order
//! (ids are monotonically increasing). Everything is lost on restart. Used by the test
//! suite and by `database.type: memory` for running without Postgres.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;

use super::ArticleStore;
use crate::{
    db::{
        errors::{DbError, Result},
        models::articles::{Article, ArticleCreateDBRequest, ArticleDBResponse, ArticleUpdateDBRequest},
    },
    types::ArticleId,
};

#[derive(Default)]
struct Inner {
    articles: BTreeMap<ArticleId, Article>,
    last_id: ArticleId,
}

/// In-memory implementation of [`ArticleStore`].
#[derive(Clone, Default)]
pub struct InMemoryArticleStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryArticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully-formed record, bypassing id and timestamp assignment.
    ///
    /// Lets tests pin `created_at` values. The id sequence is advanced past `article.id`.
    pub fn insert_raw(&self, article: Article) {
        let mut inner = self.inner.write();
        inner.last_id = inner.last_id.max(article.id);
        inner.articles.insert(article.id, article);
    }
}

#[async_trait::async_trait]
impl ArticleStore for InMemoryArticleStore {
    async fn find_all(&self) -> Result<Vec<ArticleDBResponse>> {
        Ok(self.inner.read().articles.values().cloned().collect())
    }

    async fn find_by_id(&self, id: ArticleId) -> Result<Option<ArticleDBResponse>> {
        Ok(self.inner.read().articles.get(&id).cloned())
    }

    async fn insert(&self, request: ArticleCreateDBRequest) -> Result<ArticleDBResponse> {
        let mut inner = self.inner.write();
        inner.last_id += 1;
        let now = Utc::now();

        let article = Article {
            id: inner.last_id,
            title: request.title,
            content: request.content,
            category: request.category,
            status: request.status,
            created_at: now,
            updated_at: now,
        };
        inner.articles.insert(article.id, article.clone());

        Ok(article)
    }

    async fn update_by_id(&self, id: ArticleId, request: ArticleUpdateDBRequest) -> Result<ArticleDBResponse> {
        let mut inner = self.inner.write();
        let article = inner.articles.get_mut(&id).ok_or(DbError::NotFound)?;

        article.title = request.title;
        article.content = request.content;
        article.category = request.category;
        article.status = request.status;
        article.updated_at = Utc::now().max(article.created_at);

        Ok(article.clone())
    }

    async fn delete_by_id(&self, id: ArticleId) -> Result<bool> {
        Ok(self.inner.write().articles.remove(&id).is_some())
    }
}
