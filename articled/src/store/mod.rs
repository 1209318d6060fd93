//! Storage client injected into the request handlers.
//!
//! [`ArticleStore`] is the seam between the HTTP layer and persistence. The process
//! entry point decides which implementation backs it and hands it to
//! [`AppState`](crate::AppState); handlers never reach for a global connection.
//!
//! - [`postgres::PostgresArticleStore`]: production store over a `PgPool`
//! - [`in_memory::InMemoryArticleStore`]: process-local store for tests and quick local runs

use std::sync::Arc;

use crate::{
    db::{
        errors::Result,
        models::articles::{ArticleCreateDBRequest, ArticleDBResponse, ArticleUpdateDBRequest},
    },
    types::ArticleId,
};

pub mod in_memory;
pub mod postgres;


pub use in_memory::InMemoryArticleStore;
pub use postgres::PostgresArticleStore;

/// Shared handle to whichever store the application was built with
pub type SharedArticleStore = Arc<dyn ArticleStore>;

/// The relational collaborator: find-all, find-by-id, insert, update-by-id, delete-by-id.
///
/// Every method maps to exactly one storage call. Implementations must assign ids that
/// are never reused, set both timestamps on insert, and refresh `updated_at` on update.
#[async_trait::async_trait]
pub trait ArticleStore: Send + Sync {
    /// Fetch every article in retrieval (insertion) order
    async fn find_all(&self) -> Result<Vec<ArticleDBResponse>>;

    /// Fetch one article, `None` if no record has this id
    async fn find_by_id(&self, id: ArticleId) -> Result<Option<ArticleDBResponse>>;

    /// Insert a new article and return the stored record
    async fn insert(&self, request: ArticleCreateDBRequest) -> Result<ArticleDBResponse>;

    /// Replace the content fields of an article.
    ///
    /// # Errors
    /// - [`DbError::NotFound`](crate::db::errors::DbError::NotFound) if no record has this id
    async fn update_by_id(&self, id: ArticleId, request: ArticleUpdateDBRequest) -> Result<ArticleDBResponse>;

    /// Permanently delete an article, returning whether a record was removed
    async fn delete_by_id(&self, id: ArticleId) -> Result<bool>;
}
