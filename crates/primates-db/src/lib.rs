pub mod error;
pub mod primates;
pub mod records;
pub mod schema;
pub mod upsert;

pub use error::{Result, UpsertError};
pub use records::*;
pub use sqlx::postgres::PgPool;
pub use upsert::{upsert_record, SqlValue, UpsertStatement};
