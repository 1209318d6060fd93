//! Database models for articles.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::types::ArticleId;

/// Database entity model, one row of the `articles` table
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub content: String,
    pub category: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request for creating an article. Timestamps and id are assigned by the database.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleCreateDBRequest {
    pub title: String,
    pub content: String,
    pub category: String,
    pub status: String,
}

/// Request for updating an article. All four content fields are replaced together.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleUpdateDBRequest {
    pub title: String,
    pub content: String,
    pub category: String,
    pub status: String,
}

/// Response type (same as entity)
pub type ArticleDBResponse = Article;
