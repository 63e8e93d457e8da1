use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query string of `POST /generate-key`.
#[derive(Debug, Deserialize, Validate)]
pub struct GenerateKeyRequest {
    #[validate(length(min = 1, max = 100))]
    pub owner: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateKeyResponse {
    pub api_key: String,
}
