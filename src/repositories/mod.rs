pub mod api_key_repository;
pub mod asset_repository;

pub use api_key_repository::{ApiKeyStore, PgApiKeyRepository};
pub use asset_repository::{AssetStore, PgAssetRepository};
