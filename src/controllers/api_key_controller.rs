use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::dto::api_key_dto::{GenerateKeyRequest, GenerateKeyResponse};
use crate::models::{generate_api_key, ApiKey};
use crate::repositories::ApiKeyStore;
use crate::utils::errors::{unauthorized_error, AppResult};

pub struct ApiKeyController {
    repository: Arc<dyn ApiKeyStore>,
}

impl ApiKeyController {
    pub fn new(repository: Arc<dyn ApiKeyStore>) -> Self {
        Self { repository }
    }

    pub async fn generate(&self, request: GenerateKeyRequest) -> AppResult<GenerateKeyResponse> {
        request.validate()?;

        let api_key = ApiKey::new(generate_api_key(), request.owner, Utc::now().naive_utc());
        self.repository.insert(&api_key).await?;

        tracing::info!(
            owner = ?api_key.owner,
            key_prefix = ApiKey::log_prefix(&api_key.key),
            "API key issued"
        );

        Ok(GenerateKeyResponse {
            api_key: api_key.key,
        })
    }

    /// Succeeds only when `key` is stored verbatim. A missing, empty or unknown
    /// key all produce the same Unauthorized error.
    pub async fn validate(&self, key: Option<&str>) -> AppResult<()> {
        let key = match key {
            Some(key) if !key.is_empty() => key,
            _ => return Err(unauthorized_error()),
        };

        match self.repository.find(key).await? {
            Some(_) => Ok(()),
            None => {
                tracing::debug!(key_prefix = ApiKey::log_prefix(key), "Unknown API key");
                Err(unauthorized_error())
            }
        }
    }
}
