//! HTTP middleware: the API key guard and CORS.

pub mod api_key;
pub mod cors;

pub use api_key::{require_api_key, API_KEY_HEADER};
pub use cors::cors_layer;
