//! PostgreSQL connection
//!
//! Owns the process-wide pool: opened in `main`, handed to the repositories,
//! closed on shutdown.

use sqlx::PgPool;

use crate::config::{DatabaseConfig, SchemaConfig};

pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        tracing::info!(url = %config.masked_url(), "Connecting to database");
        let pool = config.create_pool().await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the tables of `schema` that do not exist yet. Existing tables
    /// are left as they are.
    pub async fn ensure_schema(&self, schema: &SchemaConfig) -> Result<(), sqlx::Error> {
        for statement in schema.create_table_statements() {
            sqlx::query(&statement).execute(&self.pool).await?;
        }
        tracing::info!(version = %schema.version, "Schema tables ensured");
        Ok(())
    }

    pub async fn close(self) {
        self.pool.close().await;
        tracing::info!("Database pool closed");
    }
}
