//! Error types for the Red List API client

use std::fmt;

/// Errors that can occur when interacting with the Red List API
#[derive(Debug)]
pub enum RedListError {
    /// HTTP request failed before a response was received
    Http(reqwest::Error),
    /// The API answered with a non-success status
    Status {
        status: reqwest::StatusCode,
        path: String,
    },
    /// Failed to parse JSON response
    Json(serde_json::Error),
}

impl fmt::Display for RedListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "Red List HTTP error: {}", e),
            Self::Status { status, path } => {
                write!(f, "Red List returned {} for {}", status, path)
            }
            Self::Json(e) => write!(f, "Red List JSON parse error: {}", e),
        }
    }
}

impl std::error::Error for RedListError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Status { .. } => None,
        }
    }
}

impl From<reqwest::Error> for RedListError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

impl From<serde_json::Error> for RedListError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Result type for Red List API operations
pub type Result<T> = std::result::Result<T, RedListError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = RedListError::Status {
            status: reqwest::StatusCode::NOT_FOUND,
            path: "species/page/3".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Red List returned 404 Not Found for species/page/3"
        );
    }

    #[test]
    fn test_json_error_display() {
        let err: RedListError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(format!("{}", err).starts_with("Red List JSON parse error"));
    }
}
