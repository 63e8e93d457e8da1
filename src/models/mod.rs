//! Data models
//!
//! Row types for assets, drivers and API keys.

pub mod api_key;
pub mod asset;

pub use api_key::{generate_api_key, ApiKey};
pub use asset::{
    Asset, AssetFilter, AssetRow, AssetView, AssetWithDriver, Driver, FlatAssetView, NestedAssetView,
};
