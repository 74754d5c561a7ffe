//! Red List ingestion.
//!
//! One run pages through the full species listing, keeps the primates, then
//! walks each primate's sub-resources in order and upserts everything it
//! finds. All upstream calls go through the client's pacer, one at a time.
//!
//! Failures reaching the listing or a species record abort the run. Failures
//! on a child sub-resource are logged, counted in the [`IngestReport`] and
//! skipped.

use crate::error::{Result, ServiceError};
use crate::store::SpeciesStore;
use primates_db::{
    AssessmentRow, CountryRow, DescriptionRow, HabitatRow, MeasureRow, SpeciesRow, ThreatRow,
};
use redlist_api::{CitationResponse, RedListClient, SpeciesRecord};
use serde::Serialize;
use std::fmt::Display;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Page size of the registry's species listing
pub const SPECIES_PER_PAGE: u64 = 10_000;

/// Number of listing pages needed to cover `total` species
pub fn page_count(total: u64) -> u64 {
    total.div_ceil(SPECIES_PER_PAGE)
}

/// Counters for a single ingestion run
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct IngestReport {
    pub pages: u64,
    pub primates: usize,
    pub species: usize,
    pub threats: usize,
    pub measures: usize,
    pub assessments: usize,
    pub countries: usize,
    pub habitats: usize,
    pub descriptions: usize,
    /// Species whose record came back empty
    pub skipped_species: usize,
    /// Child items without a key (no code, no country)
    pub incomplete_rows: usize,
    /// Child fetches or writes that failed
    pub failures: usize,
}

#[derive(Debug)]
pub struct IngestOutcome {
    /// Species rows as stored, in listing order
    pub species: Vec<SpeciesRow>,
    pub report: IngestReport,
}

pub struct Ingester {
    client: Arc<RedListClient>,
    store: Arc<dyn SpeciesStore>,
}

impl Ingester {
    pub fn new(client: Arc<RedListClient>, store: Arc<dyn SpeciesStore>) -> Self {
        Self { client, store }
    }

    /// Run a full ingestion and return the stored species rows
    pub async fn run(&self) -> Result<IngestOutcome> {
        let started = Instant::now();
        let mut report = IngestReport::default();
        info!("Starting Red List ingestion");

        let names = self.primate_names(&mut report).await?;
        report.primates = names.len();

        let mut species = Vec::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            debug!(species = %name, position = i + 1, total = names.len(), "Ingesting species");
            species.extend(self.ingest_species(name, &mut report).await?);
        }

        info!(
            elapsed_secs = started.elapsed().as_secs(),
            report = ?report,
            "Ingestion finished"
        );
        Ok(IngestOutcome { species, report })
    }

    /// Scientific names of every primate in the listing, in listing order
    pub async fn primate_names(&self, report: &mut IngestReport) -> Result<Vec<String>> {
        let total = self
            .client
            .species_count()
            .await?
            .count
            .ok_or(ServiceError::MissingField("count"))?;
        let pages = page_count(total);
        report.pages = pages;
        debug!(total, pages, "Species listing size");

        let mut names = Vec::new();
        for page in 0..pages {
            let listing = self.client.species_page(page).await?;
            let before = names.len();
            names.extend(
                listing
                    .result
                    .into_iter()
                    .filter(|species| species.is_primate())
                    .filter_map(|species| species.scientific_name),
            );
            debug!(page, primates = names.len() - before, "Listing page scanned");
        }

        info!(count = names.len(), "Collected primate names");
        Ok(names)
    }

    async fn ingest_species(
        &self,
        listed_name: &str,
        report: &mut IngestReport,
    ) -> Result<Vec<SpeciesRow>> {
        let response = self.client.species(listed_name).await?;
        let Some(record) = response.result.into_iter().next() else {
            warn!(species = %listed_name, "Registry returned no record, skipping species");
            report.skipped_species += 1;
            return Ok(Vec::new());
        };

        let name = record
            .scientific_name
            .clone()
            .unwrap_or_else(|| listed_name.to_string());
        let citation = note(
            report,
            &name,
            "citation",
            self.client.citation(&name).await,
        )
        .and_then(CitationResponse::citation);

        let stored = self
            .store
            .upsert_species(&species_row(&name, record, citation))
            .await?;
        report.species += stored.len();

        self.ingest_children(&name, report).await;
        Ok(stored)
    }

    async fn ingest_children(&self, name: &str, report: &mut IngestReport) {
        if let Some(threats) = note(report, name, "threats", self.client.threats(name).await) {
            for threat in threats.result {
                let Some(code) = keyed(report, name, "threats", threat.code) else {
                    continue;
                };
                let row = ThreatRow {
                    name: name.to_string(),
                    code,
                    title: threat.title,
                    timing: threat.timing,
                    score: threat.score,
                };
                if note(report, name, "threats", self.store.upsert_threat(&row).await).is_some() {
                    report.threats += 1;
                }
            }
        }

        if let Some(measures) = note(report, name, "measures", self.client.measures(name).await) {
            for measure in measures.result {
                let Some(code) = keyed(report, name, "measures", measure.code) else {
                    continue;
                };
                let row = MeasureRow {
                    name: name.to_string(),
                    code,
                    title: measure.title,
                };
                if note(report, name, "measures", self.store.upsert_measure(&row).await).is_some() {
                    report.measures += 1;
                }
            }
        }

        // History comes newest first; write it oldest first so the newest row per code wins
        if let Some(history) = note(report, name, "history", self.client.history(name).await) {
            for assessment in history.result.into_iter().rev() {
                let Some(code) = keyed(report, name, "history", assessment.code) else {
                    continue;
                };
                let row = AssessmentRow {
                    name: name.to_string(),
                    year: assessment.year,
                    code,
                    category: assessment.category,
                };
                if note(report, name, "history", self.store.upsert_assessment(&row).await).is_some()
                {
                    report.assessments += 1;
                }
            }
        }

        if let Some(countries) = note(report, name, "countries", self.client.countries(name).await)
        {
            for occurrence in countries.result {
                let Some(country) = keyed(report, name, "countries", occurrence.country) else {
                    continue;
                };
                let row = CountryRow {
                    name: name.to_string(),
                    country,
                    presence: occurrence.presence,
                    origin: occurrence.origin,
                };
                if note(report, name, "countries", self.store.upsert_country(&row).await).is_some() {
                    report.countries += 1;
                }
            }
        }

        if let Some(habitats) = note(report, name, "habitats", self.client.habitats(name).await) {
            for habitat in habitats.result {
                let Some(code) = keyed(report, name, "habitats", habitat.code) else {
                    continue;
                };
                let row = HabitatRow {
                    name: name.to_string(),
                    code,
                    habitat: habitat.habitat,
                };
                if note(report, name, "habitats", self.store.upsert_habitat(&row).await).is_some() {
                    report.habitats += 1;
                }
            }
        }

        let narrative = note(report, name, "narrative", self.client.narrative(name).await)
            .and_then(|narratives| narratives.result.into_iter().next());
        if let Some(narrative) = narrative {
            let row = DescriptionRow {
                name: name.to_string(),
                taxonomicnotes: narrative.taxonomicnotes,
                rationale: narrative.rationale,
                geographicrange: narrative.geographicrange,
                population: narrative.population,
                habitat: narrative.habitat,
                threats: narrative.threats,
                conservationmeasures: narrative.conservationmeasures,
                usetrade: narrative.usetrade,
            };
            if note(report, name, "narrative", self.store.upsert_description(&row).await).is_some() {
                report.descriptions += 1;
            }
        }
    }
}

fn species_row(name: &str, record: SpeciesRecord, citation: Option<String>) -> SpeciesRow {
    SpeciesRow {
        name: name.to_string(),
        family: record.family,
        genus: record.genus,
        category: record.category,
        common_name: record.main_common_name,
        published_year: record.published_year,
        assessment_date: record.assessment_date,
        criteria: record.criteria,
        population_trend: record.population_trend,
        marine_system: record.marine_system,
        freshwater_system: record.freshwater_system,
        terrestrial_system: record.terrestrial_system,
        citation,
    }
}

/// Unwrap a child fetch or write, logging and counting the failure
fn note<T, E: Display>(
    report: &mut IngestReport,
    species: &str,
    resource: &'static str,
    result: std::result::Result<T, E>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(species = %species, resource, error = %e, "Skipping sub-resource");
            report.failures += 1;
            None
        }
    }
}

fn keyed(
    report: &mut IngestReport,
    species: &str,
    resource: &'static str,
    key: Option<String>,
) -> Option<String> {
    let key = key.filter(|k| !k.is_empty());
    if key.is_none() {
        warn!(species = %species, resource, "Item has no key, skipping");
        report.incomplete_rows += 1;
    }
    key
}
