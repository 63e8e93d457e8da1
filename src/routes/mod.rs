//! HTTP routing
//!
//! Assembles every endpoint into one router with tracing and CORS layers.

pub mod api_key_routes;
pub mod asset_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::middleware::cors_layer;
use crate::state::AppState;

pub const STATUS_MESSAGE: &str = "SF Asset API is running.";

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .merge(asset_routes::create_asset_router(state.clone()))
        .merge(api_key_routes::create_api_key_router(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({ "message": STATUS_MESSAGE }))
}
