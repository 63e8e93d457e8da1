//! Shared application state
//!
//! Holds the configuration and the persistence handles every handler needs.
//! Built once at startup and cloned into each request by axum.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::EnvironmentConfig;
use crate::models::AssetFilter;
use crate::repositories::{ApiKeyStore, AssetStore, PgApiKeyRepository, PgAssetRepository};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<EnvironmentConfig>,
    pub assets: Arc<dyn AssetStore>,
    pub api_keys: Arc<dyn ApiKeyStore>,
}

impl AppState {
    pub fn new(
        config: EnvironmentConfig,
        assets: Arc<dyn AssetStore>,
        api_keys: Arc<dyn ApiKeyStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            assets,
            api_keys,
        }
    }

    /// State backed by PostgreSQL repositories sharing one pool.
    pub fn with_pool(pool: PgPool, config: EnvironmentConfig) -> Self {
        let assets = PgAssetRepository::new(pool.clone(), config.schema.clone());
        let api_keys = PgApiKeyRepository::new(pool, &config.schema);
        Self::new(config, Arc::new(assets), Arc::new(api_keys))
    }

    /// Filter baked into `GET /assets` for this deployment.
    pub fn listing_filter(&self) -> AssetFilter {
        AssetFilter {
            make: Some(self.config.asset_make_filter.clone()),
            status: self.config.asset_status_filter.clone(),
        }
    }
}
