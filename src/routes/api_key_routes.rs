use axum::{
    extract::{Query, State},
    middleware,
    routing::post,
    Json, Router,
};

use crate::controllers::ApiKeyController;
use crate::dto::api_key_dto::{GenerateKeyRequest, GenerateKeyResponse};
use crate::middleware::require_api_key;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// `POST /generate-key`. Open unless `KEYGEN_REQUIRES_API_KEY` is set.
pub fn create_api_key_router(state: AppState) -> Router<AppState> {
    let router = Router::new().route("/generate-key", post(generate_key));

    if state.config.keygen_requires_api_key {
        router.route_layer(middleware::from_fn_with_state(state, require_api_key))
    } else {
        tracing::warn!("POST /generate-key is not protected by an API key");
        router
    }
}

async fn generate_key(
    State(state): State<AppState>,
    Query(request): Query<GenerateKeyRequest>,
) -> Result<Json<GenerateKeyResponse>, AppError> {
    let controller = ApiKeyController::new(state.api_keys.clone());
    let response = controller.generate(request).await?;
    Ok(Json(response))
}
