//! Generic insert-or-update by key.
//!
//! One row per statement:
//!
//! ```text
//! INSERT INTO t (a, b, c) VALUES ($1, $2, $3)
//! ON CONFLICT (a) DO UPDATE SET b = EXCLUDED.b, c = EXCLUDED.c
//! RETURNING *
//! ```

use crate::error::{Result, UpsertError};
use crate::records::Record;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};
use std::time::Instant;
use tracing::debug;

/// A nullable value bound positionally into an upsert
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(Option<String>),
    Int(Option<i32>),
    Bool(Option<bool>),
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(Some(v))
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(Some(v.to_string()))
    }
}

impl From<Option<String>> for SqlValue {
    fn from(v: Option<String>) -> Self {
        SqlValue::Text(v)
    }
}

impl From<Option<i32>> for SqlValue {
    fn from(v: Option<i32>) -> Self {
        SqlValue::Int(v)
    }
}

impl From<Option<bool>> for SqlValue {
    fn from(v: Option<bool>) -> Self {
        SqlValue::Bool(v)
    }
}

/// A validated upsert statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertStatement {
    pub sql: String,
    /// Number of `col = EXCLUDED.col` assignments in the SET clause
    pub assignments: usize,
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn check_identifier(name: &str) -> Result<()> {
    if is_identifier(name) {
        Ok(())
    } else {
        Err(UpsertError::InvalidIdentifier(name.to_string()))
    }
}

/// Build the upsert statement for `columns`, conflicting on `keys`.
///
/// `values` is the number of values that will be bound and must equal the
/// column count. When every column is a key, the first key is re-assigned to
/// itself so that `RETURNING *` still yields the existing row.
pub fn build(table: &str, columns: &[&str], keys: &[&str], values: usize) -> Result<UpsertStatement> {
    if columns.len() != values {
        return Err(UpsertError::ArityMismatch {
            columns: columns.len(),
            values,
        });
    }
    if keys.is_empty() {
        return Err(UpsertError::EmptyKey);
    }
    check_identifier(table)?;
    for column in columns {
        check_identifier(column)?;
    }
    if let Some(missing) = keys.iter().find(|k| !columns.contains(*k)) {
        return Err(UpsertError::UnknownKeyColumn(missing.to_string()));
    }

    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("${}", i)).collect();
    let updates: Vec<String> = columns
        .iter()
        .filter(|c| !keys.contains(*c))
        .map(|c| format!("{c} = EXCLUDED.{c}"))
        .collect();
    let assignments = updates.len();
    let set_clause = if updates.is_empty() {
        format!("{k} = EXCLUDED.{k}", k = keys[0])
    } else {
        updates.join(", ")
    };

    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT ({}) DO UPDATE SET {} RETURNING *",
        table,
        columns.join(", "),
        placeholders.join(", "),
        keys.join(", "),
        set_clause
    );

    Ok(UpsertStatement { sql, assignments })
}

/// Insert one row or overwrite the non-key columns of the row sharing its key.
/// Returns the row(s) as stored.
pub async fn execute<T>(
    pool: &PgPool,
    table: &str,
    columns: &[&str],
    values: Vec<SqlValue>,
    keys: &[&str],
) -> Result<Vec<T>>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let statement = build(table, columns, keys, values.len())?;

    let mut query = sqlx::query_as::<_, T>(&statement.sql);
    for value in values {
        query = match value {
            SqlValue::Text(v) => query.bind(v),
            SqlValue::Int(v) => query.bind(v),
            SqlValue::Bool(v) => query.bind(v),
        };
    }

    let start = Instant::now();
    let rows = query.fetch_all(pool).await?;
    debug!(
        table,
        rows = rows.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Executed upsert"
    );
    Ok(rows)
}

/// Upsert a typed record into its table
pub async fn upsert_record<R: Record>(pool: &PgPool, record: &R) -> Result<Vec<R>> {
    execute(pool, R::TABLE, R::COLUMNS, record.values(), R::KEY).await
}
