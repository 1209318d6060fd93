//! PostgreSQL-backed article store.

use sqlx::PgPool;
use tracing::instrument;

use super::ArticleStore;
use crate::{
    db::{
        errors::{DbError, Result},
        handlers::{Articles, Repository},
        models::articles::{ArticleCreateDBRequest, ArticleDBResponse, ArticleUpdateDBRequest},
    },
    types::ArticleId,
};

/// Article store over a Postgres connection pool.
///
/// Each call acquires a connection for the duration of one repository operation.
/// Mutations run in their own transaction so a failed statement never leaves partial state.
#[derive(Clone)]
pub struct PostgresArticleStore {
    pool: PgPool,
}

impl PostgresArticleStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ArticleStore for PostgresArticleStore {
    #[instrument(skip(self), err)]
    async fn find_all(&self) -> Result<Vec<ArticleDBResponse>> {
        let mut conn = self.pool.acquire().await.map_err(DbError::from)?;
        Articles::new(&mut conn).list().await
    }

    #[instrument(skip(self), err)]
    async fn find_by_id(&self, id: ArticleId) -> Result<Option<ArticleDBResponse>> {
        let mut conn = self.pool.acquire().await.map_err(DbError::from)?;
        Articles::new(&mut conn).get_by_id(id).await
    }

    #[instrument(skip(self, request), err)]
    async fn insert(&self, request: ArticleCreateDBRequest) -> Result<ArticleDBResponse> {
        let mut tx = self.pool.begin().await.map_err(DbError::from)?;
        let article = Articles::new(&mut tx).create(&request).await?;
        tx.commit().await.map_err(DbError::from)?;
        Ok(article)
    }

    #[instrument(skip(self, request), err)]
    async fn update_by_id(&self, id: ArticleId, request: ArticleUpdateDBRequest) -> Result<ArticleDBResponse> {
        let mut tx = self.pool.begin().await.map_err(DbError::from)?;
        let article = Articles::new(&mut tx).update(id, &request).await?;
        tx.commit().await.map_err(DbError::from)?;
        Ok(article)
    }

    #[instrument(skip(self), err)]
    async fn delete_by_id(&self, id: ArticleId) -> Result<bool> {
        let mut tx = self.pool.begin().await.map_err(DbError::from)?;
        let deleted = Articles::new(&mut tx).delete(id).await?;
        tx.commit().await.map_err(DbError::from)?;
        Ok(deleted)
    }
}
