use async_trait::async_trait;
use sqlx::PgPool;

use crate::config::SchemaConfig;
use crate::models::ApiKey;
use crate::utils::errors::AppError;

#[async_trait]
pub trait ApiKeyStore: Send + Sync {
    async fn insert(&self, api_key: &ApiKey) -> Result<(), AppError>;

    /// Exact match on the stored key value.
    async fn find(&self, key: &str) -> Result<Option<ApiKey>, AppError>;
}

pub struct PgApiKeyRepository {
    pool: PgPool,
    table: String,
}

impl PgApiKeyRepository {
    pub fn new(pool: PgPool, schema: &SchemaConfig) -> Self {
        Self {
            pool,
            table: schema.api_key_table.clone(),
        }
    }
}

#[async_trait]
impl ApiKeyStore for PgApiKeyRepository {
    async fn insert(&self, api_key: &ApiKey) -> Result<(), AppError> {
        let sql = format!(
            "INSERT INTO {} (key, owner, created_at) VALUES ($1, $2, $3)",
            self.table
        );
        sqlx::query(&sql)
            .bind(&api_key.key)
            .bind(&api_key.owner)
            .bind(api_key.created_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn find(&self, key: &str) -> Result<Option<ApiKey>, AppError> {
        let sql = format!(
            "SELECT key, owner, created_at FROM {} WHERE key = $1",
            self.table
        );
        let api_key = sqlx::query_as::<_, ApiKey>(&sql)
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(api_key)
    }
}
