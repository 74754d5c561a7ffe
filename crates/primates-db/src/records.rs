use crate::upsert::SqlValue;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::FromRow;

/// A row type that can be upserted into its own table.
///
/// `COLUMNS` lists every column in bind order; `values()` must return the
/// values in that same order. `KEY` is the conflict target.
pub trait Record: for<'r> FromRow<'r, PgRow> + Send + Unpin {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];
    const KEY: &'static [&'static str];

    fn values(&self) -> Vec<SqlValue>;
}

/// Species row (`primates` table)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SpeciesRow {
    pub name: String,
    pub family: Option<String>,
    pub genus: Option<String>,
    pub category: Option<String>,
    pub common_name: Option<String>,
    pub published_year: Option<i32>,
    pub assessment_date: Option<String>,
    pub criteria: Option<String>,
    pub population_trend: Option<String>,
    pub marine_system: Option<bool>,
    pub freshwater_system: Option<bool>,
    pub terrestrial_system: Option<bool>,
    pub citation: Option<String>,
}

impl Record for SpeciesRow {
    const TABLE: &'static str = "primates";
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "family",
        "genus",
        "category",
        "common_name",
        "published_year",
        "assessment_date",
        "criteria",
        "population_trend",
        "marine_system",
        "freshwater_system",
        "terrestrial_system",
        "citation",
    ];
    const KEY: &'static [&'static str] = &["name"];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.name.clone().into(),
            self.family.clone().into(),
            self.genus.clone().into(),
            self.category.clone().into(),
            self.common_name.clone().into(),
            self.published_year.into(),
            self.assessment_date.clone().into(),
            self.criteria.clone().into(),
            self.population_trend.clone().into(),
            self.marine_system.into(),
            self.freshwater_system.into(),
            self.terrestrial_system.into(),
            self.citation.clone().into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ThreatRow {
    pub name: String,
    pub code: String,
    pub title: Option<String>,
    pub timing: Option<String>,
    pub score: Option<String>,
}

impl Record for ThreatRow {
    const TABLE: &'static str = "threats";
    const COLUMNS: &'static [&'static str] = &["name", "code", "title", "timing", "score"];
    const KEY: &'static [&'static str] = &["name", "code"];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.name.clone().into(),
            self.code.clone().into(),
            self.title.clone().into(),
            self.timing.clone().into(),
            self.score.clone().into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct MeasureRow {
    pub name: String,
    pub code: String,
    pub title: Option<String>,
}

impl Record for MeasureRow {
    const TABLE: &'static str = "conservation_measures";
    const COLUMNS: &'static [&'static str] = &["name", "code", "title"];
    const KEY: &'static [&'static str] = &["name", "code"];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.name.clone().into(),
            self.code.clone().into(),
            self.title.clone().into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AssessmentRow {
    pub name: String,
    pub year: Option<i32>,
    pub code: String,
    pub category: Option<String>,
}

impl Record for AssessmentRow {
    const TABLE: &'static str = "assessments";
    const COLUMNS: &'static [&'static str] = &["name", "year", "code", "category"];
    const KEY: &'static [&'static str] = &["name", "code"];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.name.clone().into(),
            self.year.into(),
            self.code.clone().into(),
            self.category.clone().into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CountryRow {
    pub name: String,
    pub country: String,
    pub presence: Option<String>,
    pub origin: Option<String>,
}

impl Record for CountryRow {
    const TABLE: &'static str = "countries";
    const COLUMNS: &'static [&'static str] = &["name", "country", "presence", "origin"];
    const KEY: &'static [&'static str] = &["name", "country"];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.name.clone().into(),
            self.country.clone().into(),
            self.presence.clone().into(),
            self.origin.clone().into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct HabitatRow {
    pub name: String,
    pub code: String,
    pub habitat: Option<String>,
}

impl Record for HabitatRow {
    const TABLE: &'static str = "habitats";
    const COLUMNS: &'static [&'static str] = &["name", "code", "habitat"];
    const KEY: &'static [&'static str] = &["name", "code"];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.name.clone().into(),
            self.code.clone().into(),
            self.habitat.clone().into(),
        ]
    }
}

/// Narrative texts (`descriptions` table), one row per species
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DescriptionRow {
    pub name: String,
    pub taxonomicnotes: Option<String>,
    pub rationale: Option<String>,
    pub geographicrange: Option<String>,
    pub population: Option<String>,
    pub habitat: Option<String>,
    pub threats: Option<String>,
    pub conservationmeasures: Option<String>,
    pub usetrade: Option<String>,
}

impl Record for DescriptionRow {
    const TABLE: &'static str = "descriptions";
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "taxonomicnotes",
        "rationale",
        "geographicrange",
        "population",
        "habitat",
        "threats",
        "conservationmeasures",
        "usetrade",
    ];
    const KEY: &'static [&'static str] = &["name"];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.name.clone().into(),
            self.taxonomicnotes.clone().into(),
            self.rationale.clone().into(),
            self.geographicrange.clone().into(),
            self.population.clone().into(),
            self.habitat.clone().into(),
            self.threats.clone().into(),
            self.conservationmeasures.clone().into(),
            self.usetrade.clone().into(),
        ]
    }
}
