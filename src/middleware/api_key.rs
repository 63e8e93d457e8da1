//! API key guard
//!
//! Rejects a request unless its `X-API-Key` header holds a stored key.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::controllers::ApiKeyController;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub const API_KEY_HEADER: &str = "x-api-key";

pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // A header that is not valid UTF-8 counts as missing.
    let key = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    ApiKeyController::new(state.api_keys.clone())
        .validate(key.as_deref())
        .await?;

    Ok(next.run(request).await)
}
