use crate::db::errors::DbError;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;
use utoipa::ToSchema;

pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields";
pub const INVALID_ID_MESSAGE: &str = "Invalid ID format";
pub const NOT_FOUND_MESSAGE: &str = "Article not found";
pub const STORAGE_FAILURE_MESSAGE: &str = "Database operation failed";

/// Where a malformed id was supplied. Decides the status code of [`Error::MalformedId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdOrigin {
    /// Path segment of the detail lookup (answers 404)
    Lookup,
    /// `articleId` body field of update / delete (answers 400)
    Mutation,
}

#[derive(ThisError, Debug)]
pub enum Error {
    /// A required text field was empty or absent
    #[error("Required field {field} is empty")]
    MissingField { field: &'static str },

    /// An article id that does not parse as an integer
    #[error("Malformed article ID {value:?}")]
    MalformedId { value: String, origin: IdOrigin },

    /// Requested article not found (detail lookup only)
    #[error("{resource} with ID {id} not found")]
    NotFound { resource: String, id: String },

    /// Request body could not be read as the expected JSON shape
    #[error("{message}")]
    BadRequest { message: String },

    /// Storage failure on a mutation, including a missing target row
    #[error(transparent)]
    Storage(#[from] DbError),
}

/// Body of every error response: `{ "error": { "message": "..." } }`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub message: String,
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::MissingField { .. } => StatusCode::BAD_REQUEST,
            Error::MalformedId { origin, .. } => match origin {
                IdOrigin::Lookup => StatusCode::NOT_FOUND,
                IdOrigin::Mutation => StatusCode::BAD_REQUEST,
            },
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Error::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a user-safe error message, without leaking internal implementation details
    pub fn user_message(&self) -> String {
        match self {
            Error::MissingField { .. } => MISSING_FIELDS_MESSAGE.to_string(),
            Error::MalformedId { .. } => INVALID_ID_MESSAGE.to_string(),
            Error::NotFound { .. } => NOT_FOUND_MESSAGE.to_string(),
            Error::BadRequest { message } => message.clone(),
            Error::Storage(_) => STORAGE_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match &self {
            Error::Storage(DbError::NotFound) => {
                tracing::warn!("Mutation target missing, reported as storage failure: {}", self);
            }
            Error::Storage(_) => {
                tracing::error!("Internal service error: {:#}", self);
            }
            Error::MissingField { .. } | Error::MalformedId { .. } | Error::NotFound { .. } | Error::BadRequest { .. } => {
                tracing::debug!("Client error: {}", self);
            }
        }

        let body = ErrorEnvelope {
            error: ErrorBody {
                message: self.user_message(),
            },
        };

        (self.status_code(), Json(body)).into_response()
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::BadRequest {
            message: rejection.body_text(),
        }
    }
}

/// Type alias for service operation results
pub type Result<T> = std::result::Result<T, Error>;
