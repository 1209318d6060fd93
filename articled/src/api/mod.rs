//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers for the article endpoints
//! - **[`models`]**: Request/response data structures for API communication
//! - **[`extract`]**: Extractors that reject malformed input with the error envelope
//!
//! # API Structure
//!
//! | Method | Path | Purpose |
//! |---|---|---|
//! | GET | `/articles` | list, newest first |
//! | GET | `/articles/detail/{id}` | one article |
//! | POST | `/articles/create` | insert |
//! | POST | `/articles/update` | replace content fields |
//! | POST | `/articles/delete` | remove permanently |
//!
//! Every response body is either `{ "data": ... }` or `{ "error": { "message": ... } }`.
//!
//! # OpenAPI Documentation
//!
//! All endpoints are documented with `utoipa` annotations. The document is served at
//! `/api-docs/openapi.json` and rendered at `/docs` when the server is running.

pub mod extract;
pub mod handlers;
pub mod models;
