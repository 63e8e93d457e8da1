#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use chrono::{NaiveDate, NaiveDateTime};
use tower::ServiceExt;

use sf_asset_api::config::{EnvironmentConfig, SchemaConfig, SchemaVersion};
use sf_asset_api::models::{Asset, AssetFilter, AssetWithDriver, ApiKey, Driver};
use sf_asset_api::repositories::{ApiKeyStore, AssetStore};
use sf_asset_api::utils::errors::AppError;
use sf_asset_api::{create_router, AppState};

pub const VALID_KEY: &str = "4f1c2a9e8b7d6c5f4e3d2c1b0a99887766554433221100ffeeddccbbaa998877";

#[derive(Default)]
pub struct MemoryAssetStore {
    assets: Mutex<Vec<Asset>>,
    drivers: Mutex<HashMap<String, Driver>>,
    writes: AtomicUsize,
}

impl MemoryAssetStore {
    pub fn insert_asset(&self, asset: Asset) {
        self.assets.lock().unwrap().push(asset);
    }

    pub fn insert_driver(&self, driver: Driver) {
        self.drivers.lock().unwrap().insert(driver.id.clone(), driver);
    }

    pub fn get(&self, asset_id: &str) -> Option<Asset> {
        self.assets
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.asset_id == asset_id)
            .cloned()
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AssetStore for MemoryAssetStore {
    async fn list_assets(&self, filter: &AssetFilter) -> Result<Vec<AssetWithDriver>, AppError> {
        let drivers = self.drivers.lock().unwrap();
        Ok(self
            .assets
            .lock()
            .unwrap()
            .iter()
            .filter(|a| filter.matches(a))
            .map(|a| {
                let driver = a
                    .linked_driver_id
                    .as_ref()
                    .and_then(|id| drivers.get(id))
                    .cloned();
                AssetWithDriver {
                    asset: a.clone(),
                    driver,
                }
            })
            .collect())
    }

    async fn find_by_id(&self, asset_id: &str) -> Result<Option<Asset>, AppError> {
        Ok(self.get(asset_id))
    }

    async fn find_by_registration(
        &self,
        registration_number: &str,
    ) -> Result<Option<Asset>, AppError> {
        Ok(self
            .assets
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.registration_number.as_deref() == Some(registration_number))
            .cloned())
    }

    async fn find_driver(&self, driver_id: &str) -> Result<Option<Driver>, AppError> {
        Ok(self.drivers.lock().unwrap().get(driver_id).cloned())
    }

    async fn save(&self, asset: &Asset) -> Result<Asset, AppError> {
        let mut assets = self.assets.lock().unwrap();
        let slot = assets
            .iter_mut()
            .find(|a| a.asset_id == asset.asset_id)
            .ok_or_else(|| AppError::NotFound("Asset not found".to_string()))?;
        *slot = asset.clone();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(asset.clone())
    }
}

#[derive(Default)]
pub struct MemoryApiKeyStore {
    keys: Mutex<HashMap<String, ApiKey>>,
}

impl MemoryApiKeyStore {
    pub fn with_key(key: &str) -> Self {
        let store = Self::default();
        store.keys.lock().unwrap().insert(
            key.to_string(),
            ApiKey::new(key.to_string(), "tests".to_string(), old_timestamp()),
        );
        store
    }

    pub fn owner_of(&self, key: &str) -> Option<String> {
        self.keys
            .lock()
            .unwrap()
            .get(key)
            .and_then(|k| k.owner.clone())
    }
}

#[async_trait]
impl ApiKeyStore for MemoryApiKeyStore {
    async fn insert(&self, api_key: &ApiKey) -> Result<(), AppError> {
        self.keys
            .lock()
            .unwrap()
            .insert(api_key.key.clone(), api_key.clone());
        Ok(())
    }

    async fn find(&self, key: &str) -> Result<Option<ApiKey>, AppError> {
        Ok(self.keys.lock().unwrap().get(key).cloned())
    }
}

pub struct TestApp {
    pub router: Router,
    pub assets: Arc<MemoryAssetStore>,
    pub api_keys: Arc<MemoryApiKeyStore>,
}

pub fn config_for(version: SchemaVersion) -> EnvironmentConfig {
    EnvironmentConfig {
        schema: SchemaConfig::new(version),
        asset_status_filter: version.default_status_filter().map(str::to_string),
        ..EnvironmentConfig::default()
    }
}

pub fn test_app(config: EnvironmentConfig) -> TestApp {
    let assets = Arc::new(MemoryAssetStore::default());
    let api_keys = Arc::new(MemoryApiKeyStore::with_key(VALID_KEY));
    let state = AppState::new(config, assets.clone(), api_keys.clone());
    TestApp {
        router: create_router(state),
        assets,
        api_keys,
    }
}

impl TestApp {
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        api_key: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(key) = api_key {
            builder = builder.header("X-API-Key", key);
        }
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };
        (status, json)
    }
}

pub fn old_timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

pub fn parse_timestamp(value: &serde_json::Value) -> NaiveDateTime {
    value
        .as_str()
        .expect("timestamp string")
        .parse()
        .expect("naive timestamp")
}

pub fn asset(asset_id: &str, registration: &str, make: &str, status: &str) -> Asset {
    Asset {
        asset_id: asset_id.to_string(),
        asset_status: Some(status.to_string()),
        last_movement_reason: Some("Returned from service".to_string()),
        registration_number: Some(registration.to_string()),
        vin_number: Some(format!("VIN-{}", asset_id)),
        asset_type: Some("LDV".to_string()),
        engine_number: Some(format!("ENG-{}", asset_id)),
        asset_make: Some(make.to_string()),
        asset_model: Some("Hilux".to_string()),
        asset_shape: Some("Double Cab".to_string()),
        current_odo: None,
        linked_driver_id: None,
        modified_time: Some(old_timestamp()),
        updated_at: Some(old_timestamp()),
    }
}

pub fn driver(id: &str) -> Driver {
    Driver {
        id: id.to_string(),
        name: Some("Naledi Mokoena".to_string()),
        phone: Some("+27 82 555 0101".to_string()),
        email: Some("naledi@example.com".to_string()),
    }
}
