//! Error types for the primates service

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum ServiceError {
    Config(String),
    Upstream(redlist_api::RedListError),
    Database(Box<sqlx::Error>),
    Upsert(primates_db::UpsertError),
    /// The registry answered but left out something the ingester needs
    MissingField(&'static str),
    Io(std::io::Error),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Config(msg) => write!(f, "Configuration error: {}", msg),
            ServiceError::Upstream(err) => write!(f, "Upstream error: {}", err),
            ServiceError::Database(err) => write!(f, "Database error: {}", err),
            ServiceError::Upsert(err) => write!(f, "Upsert error: {}", err),
            ServiceError::MissingField(field) => {
                write!(f, "Upstream response is missing {}", field)
            }
            ServiceError::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServiceError::Upstream(err) => Some(err),
            ServiceError::Database(err) => Some(err.as_ref()),
            ServiceError::Upsert(err) => Some(err),
            ServiceError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<redlist_api::RedListError> for ServiceError {
    fn from(err: redlist_api::RedListError) -> Self {
        ServiceError::Upstream(err)
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        ServiceError::Database(Box::new(err))
    }
}

impl From<primates_db::UpsertError> for ServiceError {
    fn from(err: primates_db::UpsertError) -> Self {
        ServiceError::Upsert(err)
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(err: std::io::Error) -> Self {
        ServiceError::Io(err)
    }
}

impl From<tracing_subscriber::filter::ParseError> for ServiceError {
    fn from(err: tracing_subscriber::filter::ParseError) -> Self {
        ServiceError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;

/// HTTP-facing error, rendered as `{"error": "Error: <message>"}`
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) | AppError::Internal(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::NotFound(msg) => tracing::warn!(status = status.as_u16(), error = %msg, "Not found"),
            AppError::Internal(msg) => {
                tracing::error!(status = status.as_u16(), error = %msg, "Request failed")
            }
        }

        (status, axum::Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        AppError::Internal(err.to_string())
    }
}
