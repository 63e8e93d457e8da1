//! Database configuration
//!
//! Connection settings for the PostgreSQL pool.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::{PgPool, PgPoolOptions};

use super::environment::parse_var;

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;
        let connect_timeout_secs: u64 = parse_var(&lookup, "DB_CONNECT_TIMEOUT_SECS", 30)?;

        Ok(Self {
            url,
            max_connections: parse_var(&lookup, "DB_MAX_CONNECTIONS", 10)?,
            min_connections: parse_var(&lookup, "DB_MIN_CONNECTIONS", 1)?,
            connect_timeout: Duration::from_secs(connect_timeout_secs),
        })
    }

    pub async fn create_pool(&self) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(self.connect_timeout)
            .connect(&self.url)
            .await
    }

    /// The URL with its credentials replaced, safe to log.
    pub fn masked_url(&self) -> String {
        mask_database_url(&self.url)
    }
}

fn mask_database_url(url: &str) -> String {
    let Some(scheme_end) = url.find("://") else {
        return url.to_string();
    };
    match url.rfind('@') {
        Some(at_pos) if at_pos > scheme_end => {
            format!("{}***:***@{}", &url[..scheme_end + 3], &url[at_pos + 1..])
        }
        _ => url.to_string(),
    }
}
