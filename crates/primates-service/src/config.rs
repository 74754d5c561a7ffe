use crate::error::{Result, ServiceError};
use redlist_api::PacingPolicy;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Service configuration parsed from environment variables
#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub log: LogConfig,
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
}

#[derive(Clone)]
pub struct ApiConfig {
    pub token: String,
    pub url: String,
    pub pacing: PacingPolicy,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub dir: PathBuf,
    /// Stackdriver-style JSON on the console instead of plain text
    pub json: bool,
}

impl Config {
    /// Parse configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Parse configuration from any key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ServiceError::Config(format!("{} is not set", key)))
        };
        let optional = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let port = parse(&required("APP_PORT")?, "APP_PORT")?;

        let database = DatabaseConfig {
            host: required("DATABASE_HOST")?,
            port: parse(&required("DATABASE_PORT")?, "DATABASE_PORT")?,
            username: required("DATABASE_USERNAME")?,
            password: required("DATABASE_PASSWORD")?,
            name: required("DATABASE_NAME")?,
            max_connections: optional("DATABASE_MAX_CONNECTIONS")
                .map(|v| parse(&v, "DATABASE_MAX_CONNECTIONS"))
                .transpose()?
                .unwrap_or(10),
        };

        let delay = optional("RED_LIST_REQUEST_DELAY_MS")
            .map(|v| parse::<u64>(&v, "RED_LIST_REQUEST_DELAY_MS"))
            .transpose()?
            .map(Duration::from_millis)
            .unwrap_or(redlist_api::DEFAULT_REQUEST_DELAY);
        let pacing = match optional("RED_LIST_PACING").as_deref() {
            None | Some("fixed-delay") => PacingPolicy::FixedDelay(delay),
            Some("min-interval") => PacingPolicy::MinInterval(delay),
            Some("none") => PacingPolicy::Unthrottled,
            Some(other) => {
                return Err(ServiceError::Config(format!(
                    "RED_LIST_PACING must be fixed-delay, min-interval or none, got {}",
                    other
                )))
            }
        };

        let api = ApiConfig {
            token: required("RED_LIST_API_TOKEN")?,
            url: required("RED_LIST_API_URL")?,
            pacing,
        };

        let log = LogConfig {
            dir: optional("LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("logs")),
            json: optional("LOG_FORMAT").is_some_and(|v| v == "json"),
        };

        Ok(Self {
            port,
            database,
            api,
            log,
        })
    }
}

fn parse<T: FromStr>(value: &str, key: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ServiceError::Config(format!("{} has an invalid value: {}", key, value)))
}

/// Outcome of looking for a `.env` file, reported once logging is up
#[derive(Debug)]
pub enum EnvFile {
    Loaded(PathBuf),
    Skipped,
    Failed { path: String, error: String },
}

/// Load `.env` (development) or `.env.<APP_ENV>` into the process
/// environment. Production relies on the real environment only. Variables
/// already set are not overridden.
pub fn load_dotenv() -> EnvFile {
    let app_env = std::env::var("APP_ENV").unwrap_or_default();
    let path = match app_env.as_str() {
        "production" => return EnvFile::Skipped,
        "" | "development" => ".env".to_string(),
        other => format!(".env.{}", other),
    };
    match dotenvy::from_filename(&path) {
        Ok(loaded) => EnvFile::Loaded(loaded),
        Err(e) => EnvFile::Failed {
            path,
            error: e.to_string(),
        },
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("database", &self.database)
            .field("api", &self.api)
            .field("log", &self.log)
            .finish()
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("token", &"<redacted>")
            .field("url", &self.url)
            .field("pacing", &self.pacing)
            .finish()
    }
}
