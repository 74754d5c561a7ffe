//! Data types for Red List API responses
//!
//! These structs mirror the v3 API responses. Every field is optional: the
//! registry omits or nulls fields freely and callers decide what is required.

use crate::lenient;
use serde::{Deserialize, Serialize};

/// Value of `order_name` for primates in the species listing
pub const PRIMATES_ORDER: &str = "PRIMATES";

/// Response of `/speciescount`
#[derive(Debug, Clone, Deserialize)]
pub struct SpeciesCount {
    #[serde(default, deserialize_with = "lenient::int")]
    pub count: Option<u64>,
}

/// Response of `/species/page/{page}`
#[derive(Debug, Clone, Deserialize)]
pub struct SpeciesPage {
    #[serde(default, deserialize_with = "lenient::int")]
    pub page: Option<u64>,
    #[serde(default)]
    pub result: Vec<ListedSpecies>,
}

/// One entry of the species listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListedSpecies {
    #[serde(default, deserialize_with = "lenient::int")]
    pub taxonid: Option<i64>,
    pub kingdom_name: Option<String>,
    pub phylum_name: Option<String>,
    pub class_name: Option<String>,
    pub order_name: Option<String>,
    pub family_name: Option<String>,
    pub genus_name: Option<String>,
    pub scientific_name: Option<String>,
    pub category: Option<String>,
}

impl ListedSpecies {
    pub fn is_primate(&self) -> bool {
        self.order_name.as_deref() == Some(PRIMATES_ORDER)
    }
}

/// Per-species envelope shared by the name-keyed endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct NamedResult<T> {
    pub name: Option<String>,
    #[serde(default = "Vec::new")]
    pub result: Vec<T>,
}

/// A `result` that is sometimes an object and sometimes a list of them
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_first(self) -> Option<T> {
        match self {
            Self::One(item) => Some(item),
            Self::Many(items) => items.into_iter().next(),
        }
    }
}

/// Response of `/species/citation/{name}`
#[derive(Debug, Clone, Deserialize)]
pub struct CitationResponse {
    pub name: Option<String>,
    pub result: Option<OneOrMany<Citation>>,
}

impl CitationResponse {
    /// The citation text, if the registry returned one
    pub fn citation(self) -> Option<String> {
        self.result.and_then(OneOrMany::into_first)?.citation
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Citation {
    pub citation: Option<String>,
}

/// Species assessment record from `/species/{name}`
#[derive(Debug, Clone, Deserialize)]
pub struct SpeciesRecord {
    #[serde(default, deserialize_with = "lenient::int")]
    pub taxonid: Option<i64>,
    pub scientific_name: Option<String>,
    pub kingdom: Option<String>,
    pub phylum: Option<String>,
    pub class: Option<String>,
    pub order: Option<String>,
    pub family: Option<String>,
    pub genus: Option<String>,
    pub main_common_name: Option<String>,
    pub authority: Option<String>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub published_year: Option<i32>,
    pub assessment_date: Option<String>,
    pub category: Option<String>,
    pub criteria: Option<String>,
    pub population_trend: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub marine_system: Option<bool>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub freshwater_system: Option<bool>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub terrestrial_system: Option<bool>,
}

/// Threat from `/threats/species/name/{name}`
#[derive(Debug, Clone, Deserialize)]
pub struct Threat {
    #[serde(default, deserialize_with = "lenient::text")]
    pub code: Option<String>,
    pub title: Option<String>,
    pub timing: Option<String>,
    pub scope: Option<String>,
    pub severity: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub score: Option<String>,
}

/// Conservation measure from `/measures/species/name/{name}`
#[derive(Debug, Clone, Deserialize)]
pub struct Measure {
    #[serde(default, deserialize_with = "lenient::text")]
    pub code: Option<String>,
    pub title: Option<String>,
}

/// Historic assessment from `/species/history/name/{name}`
#[derive(Debug, Clone, Deserialize)]
pub struct HistoricAssessment {
    #[serde(default, deserialize_with = "lenient::int")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub code: Option<String>,
    pub category: Option<String>,
}

/// Country occurrence from `/species/countries/name/{name}`
#[derive(Debug, Clone, Deserialize)]
pub struct CountryOccurrence {
    pub code: Option<String>,
    pub country: Option<String>,
    pub presence: Option<String>,
    pub origin: Option<String>,
    pub distribution_code: Option<String>,
}

/// Habitat from `/habitats/species/name/{name}`
#[derive(Debug, Clone, Deserialize)]
pub struct Habitat {
    #[serde(default, deserialize_with = "lenient::text")]
    pub code: Option<String>,
    pub habitat: Option<String>,
    pub suitability: Option<String>,
    pub season: Option<String>,
}

/// Narrative texts from `/species/narrative/{name}`
#[derive(Debug, Clone, Deserialize)]
pub struct Narrative {
    pub taxonomicnotes: Option<String>,
    pub rationale: Option<String>,
    pub geographicrange: Option<String>,
    pub population: Option<String>,
    pub populationtrend: Option<String>,
    pub habitat: Option<String>,
    pub threats: Option<String>,
    pub conservationmeasures: Option<String>,
    pub usetrade: Option<String>,
}
