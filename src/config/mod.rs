//! Service configuration
//!
//! Database settings, environment variables and the versioned asset schema.

pub mod database;
pub mod environment;
pub mod schema;

pub use database::DatabaseConfig;
pub use environment::EnvironmentConfig;
pub use schema::{SchemaConfig, SchemaVersion};
