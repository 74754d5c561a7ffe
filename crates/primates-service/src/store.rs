//! Storage seam between the ingester/HTTP layer and PostgreSQL

use crate::config::DatabaseConfig;
use crate::error::Result;
use async_trait::async_trait;
use primates_db::{
    upsert_record, AssessmentRow, CountryRow, DescriptionRow, HabitatRow, MeasureRow, SpeciesRow,
    ThreatRow,
};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::info;

/// Where ingested rows are written and species are read back from.
///
/// Every upsert returns the row(s) as stored.
#[async_trait]
pub trait SpeciesStore: Send + Sync {
    async fn all_species(&self) -> Result<Vec<SpeciesRow>>;
    async fn upsert_species(&self, row: &SpeciesRow) -> Result<Vec<SpeciesRow>>;
    async fn upsert_threat(&self, row: &ThreatRow) -> Result<Vec<ThreatRow>>;
    async fn upsert_measure(&self, row: &MeasureRow) -> Result<Vec<MeasureRow>>;
    async fn upsert_assessment(&self, row: &AssessmentRow) -> Result<Vec<AssessmentRow>>;
    async fn upsert_country(&self, row: &CountryRow) -> Result<Vec<CountryRow>>;
    async fn upsert_habitat(&self, row: &HabitatRow) -> Result<Vec<HabitatRow>>;
    async fn upsert_description(&self, row: &DescriptionRow) -> Result<Vec<DescriptionRow>>;
}

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect to the database
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        info!(host = %config.host, port = config.port, database = %config.name, "Connecting to database...");
        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.username)
            .password(&config.password)
            .database(&config.name);
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;
        info!("Database connection established");
        Ok(Self { pool })
    }

    /// Create missing tables
    pub async fn ensure_schema(&self) -> Result<()> {
        primates_db::schema::ensure(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl SpeciesStore for PgStore {
    async fn all_species(&self) -> Result<Vec<SpeciesRow>> {
        Ok(primates_db::primates::all(&self.pool).await?)
    }

    async fn upsert_species(&self, row: &SpeciesRow) -> Result<Vec<SpeciesRow>> {
        Ok(upsert_record(&self.pool, row).await?)
    }

    async fn upsert_threat(&self, row: &ThreatRow) -> Result<Vec<ThreatRow>> {
        Ok(upsert_record(&self.pool, row).await?)
    }

    async fn upsert_measure(&self, row: &MeasureRow) -> Result<Vec<MeasureRow>> {
        Ok(upsert_record(&self.pool, row).await?)
    }

    async fn upsert_assessment(&self, row: &AssessmentRow) -> Result<Vec<AssessmentRow>> {
        Ok(upsert_record(&self.pool, row).await?)
    }

    async fn upsert_country(&self, row: &CountryRow) -> Result<Vec<CountryRow>> {
        Ok(upsert_record(&self.pool, row).await?)
    }

    async fn upsert_habitat(&self, row: &HabitatRow) -> Result<Vec<HabitatRow>> {
        Ok(upsert_record(&self.pool, row).await?)
    }

    async fn upsert_description(&self, row: &DescriptionRow) -> Result<Vec<DescriptionRow>> {
        Ok(upsert_record(&self.pool, row).await?)
    }
}
