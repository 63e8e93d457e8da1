//! Asset and Driver models
//!
//! `Asset` maps one row of the asset ("call report") table. Columns that only
//! exist in some schema versions carry `#[sqlx(default)]` so the same struct
//! decodes every shape.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::config::SchemaVersion;
use crate::dto::asset_dto::UpdateAssetRequest;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Asset {
    pub asset_id: String,
    pub asset_status: Option<String>,
    pub last_movement_reason: Option<String>,
    pub registration_number: Option<String>,
    pub vin_number: Option<String>,
    pub asset_type: Option<String>,
    pub engine_number: Option<String>,
    pub asset_make: Option<String>,
    pub asset_model: Option<String>,
    pub asset_shape: Option<String>,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_odo: Option<i64>,
    #[sqlx(default)]
    #[serde(skip_serializing)]
    pub linked_driver_id: Option<String>,
    pub modified_time: Option<NaiveDateTime>,
    #[sqlx(rename = "updatedAt")]
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Asset {
    /// Overwrites only the fields present in `patch`; a present null clears
    /// the column.
    pub fn apply_patch(&mut self, patch: UpdateAssetRequest) {
        if let Some(status) = patch.asset_status {
            self.asset_status = status;
        }
        if let Some(reason) = patch.last_movement_reason {
            self.last_movement_reason = reason;
        }
        if let Some(modified_time) = patch.modified_time {
            self.modified_time = modified_time;
        }
    }

    pub fn set_odometer(&mut self, reading: i64) {
        self.current_odo = Some(reading);
    }

    pub fn touch(&mut self, now: NaiveDateTime) {
        self.updated_at = Some(now);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Driver {
    pub id: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Asset row from the listing query, with the driver columns of the left join.
/// `driver_id` is null when the join found no driver.
#[derive(Debug, Clone, FromRow)]
pub struct AssetRow {
    #[sqlx(flatten)]
    pub asset: Asset,
    #[sqlx(default)]
    pub driver_id: Option<String>,
    #[sqlx(default)]
    pub driver_name: Option<String>,
    #[sqlx(default)]
    pub driver_phone: Option<String>,
    #[sqlx(default)]
    pub driver_email: Option<String>,
}

/// An asset together with its resolved driver, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetWithDriver {
    pub asset: Asset,
    pub driver: Option<Driver>,
}

impl From<AssetRow> for AssetWithDriver {
    fn from(row: AssetRow) -> Self {
        let driver = row.driver_id.map(|id| Driver {
            id,
            name: row.driver_name,
            phone: row.driver_phone,
            email: row.driver_email,
        });
        Self {
            asset: row.asset,
            driver,
        }
    }
}

/// Asset as returned by the API. Version 1 deployments nest the driver as an
/// object; later ones inline its contact details as `driver_*` columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AssetView {
    Nested(NestedAssetView),
    Flat(FlatAssetView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NestedAssetView {
    #[serde(flatten)]
    pub asset: Asset,
    pub driver: Option<Driver>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatAssetView {
    #[serde(flatten)]
    pub asset: Asset,
    pub driver_name: Option<String>,
    pub driver_phone: Option<String>,
    pub driver_email: Option<String>,
}

impl AssetView {
    pub fn new(version: SchemaVersion, asset: Asset, driver: Option<Driver>) -> Self {
        if version.nests_driver() {
            return AssetView::Nested(NestedAssetView { asset, driver });
        }

        let (driver_name, driver_phone, driver_email) = match driver {
            Some(driver) => (driver.name, driver.phone, driver.email),
            None => (None, None, None),
        };
        AssetView::Flat(FlatAssetView {
            asset,
            driver_name,
            driver_phone,
            driver_email,
        })
    }

    pub fn from_record(version: SchemaVersion, record: AssetWithDriver) -> Self {
        Self::new(version, record.asset, record.driver)
    }
}

/// Equality filter for the asset listing; `None` means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetFilter {
    pub make: Option<String>,
    pub status: Option<String>,
}

impl AssetFilter {
    pub fn matches(&self, asset: &Asset) -> bool {
        let make_ok = match &self.make {
            Some(make) => asset.asset_make.as_deref() == Some(make.as_str()),
            None => true,
        };
        let status_ok = match &self.status {
            Some(status) => asset.asset_status.as_deref() == Some(status.as_str()),
            None => true,
        };
        make_ok && status_ok
    }
}
