//! Error types for the database layer

use std::fmt;

/// Errors raised while building or executing an upsert
#[derive(Debug)]
pub enum UpsertError {
    /// Column and value lists have different lengths
    ArityMismatch { columns: usize, values: usize },
    /// No key columns were given
    EmptyKey,
    /// A key column is not part of the column list
    UnknownKeyColumn(String),
    /// A table or column name is not a plain SQL identifier
    InvalidIdentifier(String),
    Database(Box<sqlx::Error>),
}

impl fmt::Display for UpsertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpsertError::ArityMismatch { columns, values } => write!(
                f,
                "Upsert arity mismatch: {} columns but {} values",
                columns, values
            ),
            UpsertError::EmptyKey => write!(f, "Upsert needs at least one key column"),
            UpsertError::UnknownKeyColumn(col) => {
                write!(f, "Key column {} is not in the column list", col)
            }
            UpsertError::InvalidIdentifier(name) => write!(f, "Invalid SQL identifier: {}", name),
            UpsertError::Database(err) => write!(f, "Database error: {}", err),
        }
    }
}

impl std::error::Error for UpsertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UpsertError::Database(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for UpsertError {
    fn from(err: sqlx::Error) -> Self {
        UpsertError::Database(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, UpsertError>;
