use sqlx::PgPool;
use tracing::info;

/// Table definitions in creation order (`primates` first: the others reference it)
pub const TABLES: &[(&str, &str)] = &[
    (
        "primates",
        r#"
        CREATE TABLE IF NOT EXISTS primates (
            name TEXT PRIMARY KEY,
            family TEXT,
            genus TEXT,
            category TEXT,
            common_name TEXT,
            published_year INTEGER,
            assessment_date TEXT,
            criteria TEXT,
            population_trend TEXT,
            marine_system BOOLEAN,
            freshwater_system BOOLEAN,
            terrestrial_system BOOLEAN,
            citation TEXT
        )
        "#,
    ),
    (
        "threats",
        r#"
        CREATE TABLE IF NOT EXISTS threats (
            name TEXT NOT NULL REFERENCES primates (name),
            code TEXT NOT NULL,
            title TEXT,
            timing TEXT,
            score TEXT,
            PRIMARY KEY (name, code)
        )
        "#,
    ),
    (
        "conservation_measures",
        r#"
        CREATE TABLE IF NOT EXISTS conservation_measures (
            name TEXT NOT NULL REFERENCES primates (name),
            code TEXT NOT NULL,
            title TEXT,
            PRIMARY KEY (name, code)
        )
        "#,
    ),
    (
        "assessments",
        r#"
        CREATE TABLE IF NOT EXISTS assessments (
            name TEXT NOT NULL REFERENCES primates (name),
            year INTEGER,
            code TEXT NOT NULL,
            category TEXT,
            PRIMARY KEY (name, code)
        )
        "#,
    ),
    (
        "countries",
        r#"
        CREATE TABLE IF NOT EXISTS countries (
            name TEXT NOT NULL REFERENCES primates (name),
            country TEXT NOT NULL,
            presence TEXT,
            origin TEXT,
            PRIMARY KEY (name, country)
        )
        "#,
    ),
    (
        "habitats",
        r#"
        CREATE TABLE IF NOT EXISTS habitats (
            name TEXT NOT NULL REFERENCES primates (name),
            code TEXT NOT NULL,
            habitat TEXT,
            PRIMARY KEY (name, code)
        )
        "#,
    ),
    (
        "descriptions",
        r#"
        CREATE TABLE IF NOT EXISTS descriptions (
            name TEXT PRIMARY KEY REFERENCES primates (name),
            taxonomicnotes TEXT,
            rationale TEXT,
            geographicrange TEXT,
            population TEXT,
            habitat TEXT,
            threats TEXT,
            conservationmeasures TEXT,
            usetrade TEXT
        )
        "#,
    ),
];

/// Create any missing tables. Existing tables are left untouched.
pub async fn ensure(pool: &PgPool) -> Result<(), sqlx::Error> {
    info!("Ensuring database schema...");
    for (table, ddl) in TABLES {
        sqlx::query(ddl).execute(pool).await?;
        tracing::debug!(table, "Table ready");
    }
    info!("Database schema ready");
    Ok(())
}
