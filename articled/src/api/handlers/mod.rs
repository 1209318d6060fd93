//! HTTP request handlers for the API endpoints.
//!
//! Each handler is responsible for:
//! - Request validation and deserialization
//! - One call to the injected [`crate::store::ArticleStore`]
//! - Response serialization into the `{ "data": ... }` envelope
//!
//! # Error Handling
//!
//! Handlers return [`crate::errors::Error`], which converts to the matching HTTP status
//! and the `{ "error": { "message": ... } }` envelope.

pub mod articles;
