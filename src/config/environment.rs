//! Environment configuration
//!
//! Everything the service needs besides the database URL is read here, once,
//! at startup.

use std::env;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

use super::schema::{SchemaConfig, SchemaVersion};

#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    pub schema: SchemaConfig,
    pub asset_make_filter: String,
    pub asset_status_filter: Option<String>,
    pub create_tables: bool,
    pub keygen_requires_api_key: bool,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        let schema = SchemaConfig::new(SchemaVersion::V1);
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            cors_origins: Vec::new(),
            asset_status_filter: schema.version.default_status_filter().map(str::to_string),
            schema,
            asset_make_filter: "Toyota".to_string(),
            create_tables: false,
            keygen_requires_api_key: false,
        }
    }
}

impl EnvironmentConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source; `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let version: SchemaVersion = match lookup("SCHEMA_VERSION") {
            Some(raw) => raw.parse().map_err(|e: String| anyhow!(e))?,
            None => defaults.schema.version,
        };
        let schema = SchemaConfig::new(version)
            .with_tables(
                lookup("ASSET_TABLE"),
                lookup("DRIVER_TABLE"),
                lookup("API_KEY_TABLE"),
            )
            .map_err(|e| anyhow!(e))?;

        // An explicitly empty ASSET_STATUS_FILTER turns the status filter off.
        let asset_status_filter = match lookup("ASSET_STATUS_FILTER") {
            Some(raw) if raw.trim().is_empty() => None,
            Some(raw) => Some(raw.trim().to_string()),
            None => version.default_status_filter().map(str::to_string),
        };

        Ok(Self {
            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),
            port: parse_var(&lookup, "PORT", defaults.port)?,
            host: lookup("HOST").unwrap_or(defaults.host),
            cors_origins: lookup("CORS_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            schema,
            asset_make_filter: lookup("ASSET_MAKE_FILTER").unwrap_or(defaults.asset_make_filter),
            asset_status_filter,
            create_tables: parse_var(&lookup, "CREATE_TABLES", defaults.create_tables)?,
            keygen_requires_api_key: parse_var(
                &lookup,
                "KEYGEN_REQUIRES_API_KEY",
                defaults.keygen_requires_api_key,
            )?,
        })
    }

    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub(crate) fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value '{}'", name, raw)),
        None => Ok(default),
    }
}
