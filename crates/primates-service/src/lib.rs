//! Primates registry service library
//!
//! Provides the components wired together by the `primates-service` binary:
//! configuration, logging, the storage seam, the Red List ingester and the
//! HTTP server.

pub mod config;
pub mod error;
pub mod ingest;
pub mod logging;
pub mod server;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use config::Config;
pub use error::{AppError, Result, ServiceError};
pub use ingest::{IngestOutcome, IngestReport, Ingester};
pub use server::{create_router, start_server, ServerState, SharedState};
pub use store::{PgStore, SpeciesStore};
