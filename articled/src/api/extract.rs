//! Request extractors.

use axum::extract::FromRequest;

use crate::errors::Error;

/// JSON body extractor whose rejection is an [`Error`], so malformed bodies and wrong
/// content types are answered with the standard error envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct AppJson<T>(pub T);
