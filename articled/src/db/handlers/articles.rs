//! Database repository for articles.

use sqlx::PgConnection;
use tracing::instrument;

use crate::{
    db::{
        errors::Result,
        handlers::repository::Repository,
        models::articles::{Article, ArticleCreateDBRequest, ArticleDBResponse, ArticleUpdateDBRequest},
    },
    types::ArticleId,
};

const ARTICLE_COLUMNS: &str = "id, title, content, category, status, created_at, updated_at";

pub struct Articles<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Articles<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Articles<'c> {
    type CreateRequest = ArticleCreateDBRequest;
    type UpdateRequest = ArticleUpdateDBRequest;
    type Response = ArticleDBResponse;
    type Id = ArticleId;

    #[instrument(skip(self, request), fields(title = %request.title), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let query = format!(
            "INSERT INTO articles (title, content, category, status) VALUES ($1, $2, $3, $4) RETURNING {ARTICLE_COLUMNS}"
        );

        let article = sqlx::query_as::<_, Article>(&query)
            .bind(&request.title)
            .bind(&request.content)
            .bind(&request.category)
            .bind(&request.status)
            .fetch_one(&mut *self.db)
            .await?;

        Ok(article)
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let query = format!("SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = $1");

        let article = sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(article)
    }

    /// Rows come back in insertion order; presentation order is decided by the caller.
    #[instrument(skip(self), err)]
    async fn list(&mut self) -> Result<Vec<Self::Response>> {
        let query = format!("SELECT {ARTICLE_COLUMNS} FROM articles ORDER BY id ASC");

        let articles = sqlx::query_as::<_, Article>(&query).fetch_all(&mut *self.db).await?;

        Ok(articles)
    }

    #[instrument(skip(self), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Replaces all content fields and refreshes `updated_at`.
    ///
    /// Returns [`DbError::NotFound`](crate::db::errors::DbError::NotFound) when no row matches.
    #[instrument(skip(self, request), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let query = format!(
            r#"
            UPDATE articles
            SET title = $2, content = $3, category = $4, status = $5, updated_at = GREATEST(NOW(), created_at)
            WHERE id = $1
            RETURNING {ARTICLE_COLUMNS}
            "#
        );

        let article = sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .bind(&request.title)
            .bind(&request.content)
            .bind(&request.category)
            .bind(&request.status)
            .fetch_one(&mut *self.db)
            .await?;

        Ok(article)
    }
}
