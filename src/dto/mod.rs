//! Request and response bodies of the HTTP API.

pub mod api_key_dto;
pub mod asset_dto;

pub use api_key_dto::{GenerateKeyRequest, GenerateKeyResponse};
pub use asset_dto::{UpdateAssetRequest, UpdateOdometerQuery};
