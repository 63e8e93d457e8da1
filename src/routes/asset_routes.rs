use axum::{
    extract::{Path, Query, State},
    middleware,
    routing::{get, put},
    Json, Router,
};

use crate::controllers::AssetController;
use crate::dto::asset_dto::{UpdateAssetRequest, UpdateOdometerQuery};
use crate::middleware::require_api_key;
use crate::models::AssetView;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Asset endpoints, all behind the API key guard. The odometer route only
/// exists for schema versions that store an odometer.
pub fn create_asset_router(state: AppState) -> Router<AppState> {
    let mut router = Router::new()
        .route("/assets", get(list_assets))
        .route("/assets/:asset_id", put(update_asset));

    if state.config.schema.version.has_odometer() {
        router = router.route(
            "/assets/odo/:registration_number",
            put(update_odometer),
        );
    }

    router.route_layer(middleware::from_fn_with_state(state, require_api_key))
}

fn controller(state: &AppState) -> AssetController {
    AssetController::new(
        state.assets.clone(),
        state.listing_filter(),
        state.config.schema.version,
    )
}

async fn list_assets(State(state): State<AppState>) -> Result<Json<Vec<AssetView>>, AppError> {
    let assets = controller(&state).list().await?;
    Ok(Json(assets))
}

async fn update_asset(
    State(state): State<AppState>,
    Path(asset_id): Path<String>,
    Json(request): Json<UpdateAssetRequest>,
) -> Result<Json<AssetView>, AppError> {
    let asset = controller(&state).update_fields(&asset_id, request).await?;
    Ok(Json(asset))
}

async fn update_odometer(
    State(state): State<AppState>,
    Path(registration_number): Path<String>,
    Query(query): Query<UpdateOdometerQuery>,
) -> Result<Json<AssetView>, AppError> {
    let asset = controller(&state)
        .update_odometer(&registration_number, query.current_odo)
        .await?;
    Ok(Json(asset))
}
