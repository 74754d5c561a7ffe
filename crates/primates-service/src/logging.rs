//! Logging setup.
//!
//! Console output at debug and above (plain text, or Stackdriver JSON when
//! `LOG_FORMAT=json`), plus two daily-rolling files under the log directory:
//! `info.log` (info and above) and `warn.log` (warnings and errors). Panics
//! are recorded as error events so they land in both files.
//!
//! `RUST_LOG` overrides the default filter.

use crate::config::LogConfig;
use crate::error::{Result, ServiceError};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "info,primates_service=debug,primates_db=debug,redlist_api=debug";

/// Keeps the file writers flushing; hold it until shutdown
pub struct LogGuards {
    _guards: Vec<WorkerGuard>,
}

pub fn init(config: &LogConfig) -> Result<LogGuards> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(DEFAULT_FILTER)?,
    };

    std::fs::create_dir_all(&config.dir)?;
    let (info_writer, info_guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(&config.dir, "info.log"));
    let (warn_writer, warn_guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(&config.dir, "warn.log"));

    let plain_console = (!config.json).then(fmt::layer);
    let json_console = config.json.then(tracing_stackdriver::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(plain_console)
        .with(json_console)
        .with(
            fmt::layer()
                .with_writer(info_writer)
                .with_ansi(false)
                .with_filter(LevelFilter::INFO),
        )
        .with(
            fmt::layer()
                .with_writer(warn_writer)
                .with_ansi(false)
                .with_filter(LevelFilter::WARN),
        )
        .try_init()
        .map_err(|e| ServiceError::Config(format!("Logging already initialized: {}", e)))?;

    std::panic::set_hook(Box::new(|info| {
        tracing::error!(panic = %info, "Unhandled panic");
    }));

    Ok(LogGuards {
        _guards: vec![info_guard, warn_guard],
    })
}
