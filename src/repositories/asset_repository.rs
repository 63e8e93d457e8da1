//! Asset and driver persistence
//!
//! `AssetStore` is the seam handlers talk to; `PgAssetRepository` implements
//! it over PostgreSQL for whichever schema version is configured.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::config::SchemaConfig;
use crate::models::{Asset, AssetFilter, AssetRow, AssetWithDriver, Driver};
use crate::utils::errors::AppError;

#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Every asset matching `filter`, with its driver when the schema links
    /// drivers and the link resolves. Order is whatever the database returns.
    async fn list_assets(&self, filter: &AssetFilter) -> Result<Vec<AssetWithDriver>, AppError>;

    async fn find_by_id(&self, asset_id: &str) -> Result<Option<Asset>, AppError>;

    async fn find_by_registration(&self, registration_number: &str)
        -> Result<Option<Asset>, AppError>;

    async fn find_driver(&self, driver_id: &str) -> Result<Option<Driver>, AppError>;

    /// Writes every mutable column of `asset` in a single statement and
    /// returns the stored row.
    async fn save(&self, asset: &Asset) -> Result<Asset, AppError>;
}

pub struct PgAssetRepository {
    pool: PgPool,
    schema: SchemaConfig,
}

impl PgAssetRepository {
    pub fn new(pool: PgPool, schema: SchemaConfig) -> Self {
        Self { pool, schema }
    }

    fn list_sql(&self, filter: &AssetFilter) -> String {
        let mut sql = if self.schema.version.has_driver_link() {
            format!(
                "SELECT a.*, d.id AS driver_id, d.name AS driver_name, d.phone AS driver_phone, \
                 d.email AS driver_email \
                 FROM {} a LEFT JOIN {} d ON a.linked_driver_id = d.id",
                self.schema.asset_table, self.schema.driver_table
            )
        } else {
            format!("SELECT a.* FROM {} a", self.schema.asset_table)
        };

        let mut conditions = Vec::new();
        let mut param = 0;
        if filter.make.is_some() {
            param += 1;
            conditions.push(format!("a.asset_make = ${}", param));
        }
        if filter.status.is_some() {
            param += 1;
            conditions.push(format!("a.asset_status = ${}", param));
        }
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql
    }

    fn update_sql(&self) -> String {
        let mut assignments = vec![
            "asset_status = $2",
            "last_movement_reason = $3",
            "modified_time = $4",
            r#""updatedAt" = $5"#,
        ];
        if self.schema.version.has_odometer() {
            assignments.push("current_odo = $6");
        }
        format!(
            "UPDATE {} SET {} WHERE asset_id = $1 RETURNING *",
            self.schema.asset_table,
            assignments.join(", ")
        )
    }
}

#[async_trait]
impl AssetStore for PgAssetRepository {
    async fn list_assets(&self, filter: &AssetFilter) -> Result<Vec<AssetWithDriver>, AppError> {
        let sql = self.list_sql(filter);
        let mut query = sqlx::query_as::<_, AssetRow>(&sql);
        if let Some(make) = &filter.make {
            query = query.bind(make);
        }
        if let Some(status) = &filter.status {
            query = query.bind(status);
        }

        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(AssetWithDriver::from).collect())
    }

    async fn find_by_id(&self, asset_id: &str) -> Result<Option<Asset>, AppError> {
        let sql = format!("SELECT * FROM {} WHERE asset_id = $1", self.schema.asset_table);
        let asset = sqlx::query_as::<_, Asset>(&sql)
            .bind(asset_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(asset)
    }

    async fn find_by_registration(
        &self,
        registration_number: &str,
    ) -> Result<Option<Asset>, AppError> {
        let sql = format!(
            "SELECT * FROM {} WHERE registration_number = $1 LIMIT 1",
            self.schema.asset_table
        );
        let asset = sqlx::query_as::<_, Asset>(&sql)
            .bind(registration_number)
            .fetch_optional(&self.pool)
            .await?;

        Ok(asset)
    }

    async fn find_driver(&self, driver_id: &str) -> Result<Option<Driver>, AppError> {
        if !self.schema.version.has_driver_link() {
            return Ok(None);
        }

        let sql = format!(
            "SELECT id, name, phone, email FROM {} WHERE id = $1",
            self.schema.driver_table
        );
        let driver = sqlx::query_as::<_, Driver>(&sql)
            .bind(driver_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(driver)
    }

    async fn save(&self, asset: &Asset) -> Result<Asset, AppError> {
        let sql = self.update_sql();
        let mut query = sqlx::query_as::<_, Asset>(&sql)
            .bind(&asset.asset_id)
            .bind(&asset.asset_status)
            .bind(&asset.last_movement_reason)
            .bind(asset.modified_time)
            .bind(asset.updated_at);
        if self.schema.version.has_odometer() {
            query = query.bind(asset.current_odo);
        }

        let stored = query
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(crate::utils::errors::asset_not_found_error)?;

        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SchemaVersion;
    use sqlx::postgres::PgPoolOptions;

    fn repository(version: SchemaVersion) -> PgAssetRepository {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgresql://localhost/fleet")
            .unwrap();
        PgAssetRepository::new(pool, SchemaConfig::new(version))
    }

    #[tokio::test]
    async fn test_list_sql_joins_drivers_when_linked() {
        let filter = AssetFilter {
            make: Some("Toyota".to_string()),
            status: None,
        };
        let sql = repository(SchemaVersion::V1).list_sql(&filter);
        assert!(sql.contains("d.id AS driver_id"));
        assert!(sql.contains("LEFT JOIN simplyfleet_driver d ON a.linked_driver_id = d.id"));
        assert!(sql.ends_with("WHERE a.asset_make = $1"));
    }

    #[tokio::test]
    async fn test_list_sql_numbers_parameters() {
        let filter = AssetFilter {
            make: Some("Toyota".to_string()),
            status: Some("Active".to_string()),
        };
        let sql = repository(SchemaVersion::V2).list_sql(&filter);
        assert!(!sql.contains("JOIN"));
        assert!(sql.ends_with("WHERE a.asset_make = $1 AND a.asset_status = $2"));

        let unfiltered = repository(SchemaVersion::V2).list_sql(&AssetFilter::default());
        assert!(!unfiltered.contains("WHERE"));
    }

    #[tokio::test]
    async fn test_update_sql_writes_odometer_only_when_present() {
        let v1 = repository(SchemaVersion::V1).update_sql();
        assert!(!v1.contains("current_odo"));
        assert!(v1.contains(r#""updatedAt" = $5"#));

        let v3 = repository(SchemaVersion::V3).update_sql();
        assert!(v3.contains("current_odo = $6"));
        assert!(v3.ends_with("WHERE asset_id = $1 RETURNING *"));
    }
}
