//! Error types shared by the storage, builder and HTTP layers.
//!
//! The pricing and itinerary engines never produce these; they degrade
//! missing or malformed data to zero instead.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, QuoteError>;

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<std::io::Error> for QuoteError {
    fn from(err: std::io::Error) -> Self {
        QuoteError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for QuoteError {
    fn from(err: serde_json::Error) -> Self {
        QuoteError::Serialization(err.to_string())
    }
}

impl From<mongodb::error::Error> for QuoteError {
    fn from(err: mongodb::error::Error) -> Self {
        QuoteError::Storage(err.to_string())
    }
}

impl From<bson::ser::Error> for QuoteError {
    fn from(err: bson::ser::Error) -> Self {
        QuoteError::Serialization(err.to_string())
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl ResponseError for QuoteError {
    fn status_code(&self) -> StatusCode {
        match self {
            QuoteError::NotFound(_) => StatusCode::NOT_FOUND,
            QuoteError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            QuoteError::Storage(_) | QuoteError::Serialization(_) | QuoteError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            QuoteError::NotFound(msg) | QuoteError::InvalidInput(msg) => ErrorResponse {
                error: msg.clone(),
                details: None,
            },
            QuoteError::Storage(msg) => {
                log::error!("Storage failure: {}", msg);
                ErrorResponse {
                    error: "Storage error".to_string(),
                    details: Some(msg.clone()),
                }
            }
            QuoteError::Serialization(msg) => ErrorResponse {
                error: "Serialization error".to_string(),
                details: Some(msg.clone()),
            },
            QuoteError::Config(msg) => ErrorResponse {
                error: "Configuration error".to_string(),
                details: Some(msg.clone()),
            },
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}
