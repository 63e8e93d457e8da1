use chrono::NaiveDateTime;
use rand::{rngs::OsRng, RngCore};
use serde::Serialize;
use sqlx::FromRow;

/// Number of random bytes behind every key (256 bits).
pub const API_KEY_BYTES: usize = 32;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct ApiKey {
    pub key: String,
    pub owner: Option<String>,
    pub created_at: NaiveDateTime,
}

impl ApiKey {
    pub fn new(key: String, owner: String, created_at: NaiveDateTime) -> Self {
        Self {
            key,
            owner: Some(owner),
            created_at,
        }
    }

    /// Prefix of the key that is safe to put in logs.
    pub fn log_prefix(key: &str) -> &str {
        key.get(..8).unwrap_or(key)
    }
}

/// Fresh key from the operating system's CSPRNG, hex encoded.
pub fn generate_api_key() -> String {
    let mut bytes = [0u8; API_KEY_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
