//! Rust client for the IUCN Red List species registry API
//!
//! This crate provides typed bindings to the v3-style Red List endpoints used
//! to harvest conservation data, with every request gated by a [`Pacer`].
//!
//! # Example
//!
//! ```no_run
//! use redlist_api::{Pacer, PacingPolicy, RedListClient};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), redlist_api::RedListError> {
//! let client = RedListClient::new("https://apiv3.iucnredlist.org/api/v3", "token")?
//!     .with_pacer(Pacer::new(PacingPolicy::MinInterval(Duration::from_secs(1))));
//!
//! let count = client.species_count().await?;
//! let page = client.species_page(0).await?;
//! for species in page.result.iter().filter(|s| s.is_primate()) {
//!     println!("{:?} ({:?})", species.scientific_name, count.count);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # API Coverage
//!
//! - `GET /speciescount` - Total number of assessed species
//! - `GET /species/page/{page}` - One page of the species listing
//! - `GET /species/{name}` - Species assessment record
//! - `GET /species/citation/{name}` - Citation for the assessment
//! - `GET /threats/species/name/{name}` - Threats
//! - `GET /measures/species/name/{name}` - Conservation measures
//! - `GET /species/history/name/{name}` - Historic assessments
//! - `GET /species/countries/name/{name}` - Country occurrences
//! - `GET /habitats/species/name/{name}` - Habitats
//! - `GET /species/narrative/{name}` - Narrative descriptions

mod client;
mod error;
pub mod lenient;
mod pacer;
mod types;

pub use client::RedListClient;
pub use error::{RedListError, Result};
pub use pacer::{Pacer, PacingPolicy, DEFAULT_REQUEST_DELAY};
pub use types::{
    Citation, CitationResponse, CountryOccurrence, Habitat, HistoricAssessment, ListedSpecies,
    Measure, NamedResult, Narrative, OneOrMany, SpeciesCount, SpeciesPage, SpeciesRecord, Threat,
    PRIMATES_ORDER,
};
