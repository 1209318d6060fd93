//! Repository implementations for database access.
//!
//! Each repository:
//! - Wraps a SQLx connection or transaction
//! - Provides strongly-typed CRUD operations
//! - Returns domain models from [`crate::db::models`]
//!
//! # Usage
//!
//! ```ignore
//! use articled::db::handlers::{Articles, Repository};
//!
//! async fn example(pool: &sqlx::PgPool) -> Result<(), Box<dyn std::error::Error>> {
//!     let mut conn = pool.acquire().await?;
//!     let mut repo = Articles::new(&mut conn);
//!
//!     let articles = repo.list().await?;
//!     Ok(())
//! }
//! ```

pub mod articles;
pub mod repository;

pub use articles::Articles;
pub use repository::Repository;
