use dotenvy::dotenv;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use thiserror::Error;

/// ✅ Global Config stored in `OnceLock`
static CONFIG: OnceLock<Arc<Config>> = OnceLock::new();

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
    #[error("config already initialized")]
    AlreadyInitialized,
}

/// Which data store backs the schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

impl FromStr for StoreKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "pg" => Ok(StoreKind::Postgres),
            "memory" | "mem" => Ok(StoreKind::Memory),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub data_store: StoreKind,
    pub database_url: Option<String>,
    pub bind_addr: SocketAddr,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub run_migrations: bool,
    pub graphql_playground: bool,
    pub graphql_depth_limit: usize,
    pub graphql_complexity_limit: usize,
    pub request_timeout: Duration,
    pub body_limit_bytes: usize,
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_store: StoreKind::Postgres,
            database_url: None,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            db_max_connections: 10,
            db_min_connections: 2,
            run_migrations: true,
            graphql_playground: true,
            graphql_depth_limit: 10,
            graphql_complexity_limit: 500,
            request_timeout: Duration::from_secs(30),
            body_limit_bytes: 1024 * 1024,
            log_dir: None,
        }
    }
}

impl Config {
    /// ✅ Load environment variables and set defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. `from_env` feeds it the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let data_store = match lookup("DATA_STORE") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid {
                key: "DATA_STORE",
                value: v,
            })?,
            None => defaults.data_store,
        };

        let database_url = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty());
        if data_store == StoreKind::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        Ok(Self {
            data_store,
            database_url,
            bind_addr: parse_or(&lookup, "BIND_ADDR", defaults.bind_addr)?,
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", defaults.db_max_connections)?,
            db_min_connections: parse_or(&lookup, "DB_MIN_CONNECTIONS", defaults.db_min_connections)?,
            run_migrations: flag_or(&lookup, "RUN_MIGRATIONS", defaults.run_migrations)?,
            graphql_playground: flag_or(&lookup, "GRAPHQL_PLAYGROUND", defaults.graphql_playground)?,
            graphql_depth_limit: parse_or(&lookup, "GRAPHQL_DEPTH_LIMIT", defaults.graphql_depth_limit)?,
            graphql_complexity_limit: parse_or(
                &lookup,
                "GRAPHQL_COMPLEXITY_LIMIT",
                defaults.graphql_complexity_limit,
            )?,
            request_timeout: Duration::from_secs(parse_or(
                &lookup,
                "REQUEST_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )?),
            body_limit_bytes: parse_or(&lookup, "BODY_LIMIT_BYTES", defaults.body_limit_bytes)?,
            log_dir: lookup("LOG_DIR")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    /// ✅ Initialize the global config
    pub fn init() -> Result<(), ConfigError> {
        CONFIG
            .set(Arc::new(Self::from_env()?))
            .map_err(|_| ConfigError::AlreadyInitialized)
    }

    /// ✅ Safe access to Config, falling back to defaults when `init` was never called
    pub fn get() -> Arc<Config> {
        CONFIG
            .get_or_init(|| Arc::new(Config::default()))
            .clone()
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

fn flag_or<F>(lookup: &F, key: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => match value.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid { key, value }),
        },
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn postgres_store_requires_database_url() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn memory_store_needs_no_database() {
        let config = Config::from_lookup(lookup_from(&[("DATA_STORE", "memory")])).unwrap();
        assert_eq!(config.data_store, StoreKind::Memory);
        assert_eq!(config.bind_addr, SocketAddr::from(([127, 0, 0, 1], 3000)));
        assert!(config.run_migrations);
        assert_eq!(config.graphql_depth_limit, 10);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/members"),
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("RUN_MIGRATIONS", "off"),
            ("GRAPHQL_COMPLEXITY_LIMIT", "42"),
            ("REQUEST_TIMEOUT_SECS", "5"),
            ("LOG_DIR", "logs"),
        ]))
        .unwrap();

        assert_eq!(config.data_store, StoreKind::Postgres);
        assert_eq!(config.bind_addr.port(), 8080);
        assert!(!config.run_migrations);
        assert_eq!(config.graphql_complexity_limit, 42);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.log_dir, Some(PathBuf::from("logs")));
    }

    #[test]
    fn garbage_values_are_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("DATA_STORE", "memory"),
            ("DB_MAX_CONNECTIONS", "lots"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "DB_MAX_CONNECTIONS", .. }));

        let err = Config::from_lookup(lookup_from(&[("DATA_STORE", "mongo")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "DATA_STORE", .. }));
    }
}
