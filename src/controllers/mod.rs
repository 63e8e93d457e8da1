pub mod api_key_controller;
pub mod asset_controller;

pub use api_key_controller::ApiKeyController;
pub use asset_controller::AssetController;
