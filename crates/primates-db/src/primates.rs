use crate::records::SpeciesRow;
use sqlx::PgPool;
use std::time::Instant;
use tracing::debug;

/// All stored species, ordered by name
pub async fn all(pool: &PgPool) -> Result<Vec<SpeciesRow>, sqlx::Error> {
    let start = Instant::now();
    let rows = sqlx::query_as::<_, SpeciesRow>("SELECT * FROM primates ORDER BY name")
        .fetch_all(pool)
        .await?;
    debug!(
        rows = rows.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Loaded primates"
    );
    Ok(rows)
}

/// Get a species by scientific name
pub async fn get(pool: &PgPool, name: &str) -> Result<Option<SpeciesRow>, sqlx::Error> {
    sqlx::query_as::<_, SpeciesRow>("SELECT * FROM primates WHERE name = $1")
        .bind(name)
        .fetch_optional(pool)
        .await
}

