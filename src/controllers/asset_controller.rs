use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::config::SchemaVersion;
use crate::dto::asset_dto::UpdateAssetRequest;
use crate::models::{Asset, AssetFilter, AssetView, Driver};
use crate::repositories::AssetStore;
use crate::utils::errors::{asset_not_found_error, AppResult};

pub struct AssetController {
    repository: Arc<dyn AssetStore>,
    listing_filter: AssetFilter,
    version: SchemaVersion,
}

impl AssetController {
    pub fn new(
        repository: Arc<dyn AssetStore>,
        listing_filter: AssetFilter,
        version: SchemaVersion,
    ) -> Self {
        Self {
            repository,
            listing_filter,
            version,
        }
    }

    /// Assets matching the deployment's fixed listing filter.
    pub async fn list(&self) -> AppResult<Vec<AssetView>> {
        let assets = self.repository.list_assets(&self.listing_filter).await?;
        tracing::debug!(
            count = assets.len(),
            make = ?self.listing_filter.make,
            status = ?self.listing_filter.status,
            "Listed assets"
        );
        Ok(assets
            .into_iter()
            .map(|record| AssetView::from_record(self.version, record))
            .collect())
    }

    /// Applies a sparse patch and stamps the update time.
    pub async fn update_fields(
        &self,
        asset_id: &str,
        request: UpdateAssetRequest,
    ) -> AppResult<AssetView> {
        request.validate()?;

        let mut asset = self
            .repository
            .find_by_id(asset_id)
            .await?
            .ok_or_else(asset_not_found_error)?;

        asset.apply_patch(request);
        asset.touch(Utc::now().naive_utc());

        let stored = self.repository.save(&asset).await?;
        tracing::info!(asset_id = %stored.asset_id, "Asset updated");

        let driver = self.linked_driver(&stored).await?;
        Ok(AssetView::new(self.version, stored, driver))
    }

    /// Overwrites the odometer of the asset with this registration number.
    /// Any integer is accepted, including a lower reading than the stored one.
    pub async fn update_odometer(
        &self,
        registration_number: &str,
        reading: i64,
    ) -> AppResult<AssetView> {
        let mut asset = self
            .repository
            .find_by_registration(registration_number)
            .await?
            .ok_or_else(asset_not_found_error)?;

        if let Some(previous) = asset.current_odo {
            if reading < previous {
                tracing::warn!(
                    asset_id = %asset.asset_id,
                    previous,
                    reading,
                    "Odometer reading decreased"
                );
            }
        }

        asset.set_odometer(reading);
        asset.touch(Utc::now().naive_utc());

        let stored = self.repository.save(&asset).await?;
        tracing::info!(asset_id = %stored.asset_id, reading, "Odometer updated");

        let driver = self.linked_driver(&stored).await?;
        Ok(AssetView::new(self.version, stored, driver))
    }

    /// The asset's driver, or `None` when unlinked or the id does not resolve.
    async fn linked_driver(&self, asset: &Asset) -> AppResult<Option<Driver>> {
        match asset.linked_driver_id.as_deref() {
            Some(driver_id) => self.repository.find_driver(driver_id).await,
            None => Ok(None),
        }
    }
}
