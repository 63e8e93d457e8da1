//! Versioned asset schema
//!
//! The fleet database has been deployed in three shapes over time. They share
//! one abstract schema; a `SchemaVersion` decides which optional parts exist
//! and the table names can be overridden per deployment.

use std::fmt;
use std::str::FromStr;

pub const DEFAULT_ASSET_TABLE: &str = "simplyfleet";
pub const DEFAULT_DRIVER_TABLE: &str = "simplyfleet_driver";
pub const DEFAULT_API_KEY_TABLE: &str = "api_keys";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVersion {
    /// Assets linked to drivers, no odometer.
    V1,
    /// Flat asset table, no drivers, no odometer.
    V2,
    /// Assets linked to drivers, with odometer.
    V3,
}

impl SchemaVersion {
    pub fn has_driver_link(self) -> bool {
        matches!(self, SchemaVersion::V1 | SchemaVersion::V3)
    }

    pub fn has_odometer(self) -> bool {
        matches!(self, SchemaVersion::V3)
    }

    /// Version 1 responses carry the driver as a nested object instead of
    /// inline `driver_*` columns.
    pub fn nests_driver(self) -> bool {
        matches!(self, SchemaVersion::V1)
    }

    /// Status the asset listing is restricted to when nothing else is configured.
    pub fn default_status_filter(self) -> Option<&'static str> {
        match self {
            SchemaVersion::V1 => None,
            SchemaVersion::V2 | SchemaVersion::V3 => Some("Active"),
        }
    }
}

impl FromStr for SchemaVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v1" | "1" => Ok(SchemaVersion::V1),
            "v2" | "2" => Ok(SchemaVersion::V2),
            "v3" | "3" => Ok(SchemaVersion::V3),
            other => Err(format!("unknown schema version '{}'", other)),
        }
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SchemaVersion::V1 => "v1",
            SchemaVersion::V2 => "v2",
            SchemaVersion::V3 => "v3",
        };
        f.write_str(name)
    }
}

/// Schema shape plus the concrete table names of one deployment.
#[derive(Debug, Clone)]
pub struct SchemaConfig {
    pub version: SchemaVersion,
    pub asset_table: String,
    pub driver_table: String,
    pub api_key_table: String,
}

impl SchemaConfig {
    pub fn new(version: SchemaVersion) -> Self {
        Self {
            version,
            asset_table: DEFAULT_ASSET_TABLE.to_string(),
            driver_table: DEFAULT_DRIVER_TABLE.to_string(),
            api_key_table: DEFAULT_API_KEY_TABLE.to_string(),
        }
    }

    pub fn with_tables(
        mut self,
        asset_table: Option<String>,
        driver_table: Option<String>,
        api_key_table: Option<String>,
    ) -> Result<Self, String> {
        if let Some(table) = asset_table {
            self.asset_table = table;
        }
        if let Some(table) = driver_table {
            self.driver_table = table;
        }
        if let Some(table) = api_key_table {
            self.api_key_table = table;
        }

        for table in [&self.asset_table, &self.driver_table, &self.api_key_table] {
            if !is_plain_identifier(table) {
                return Err(format!("invalid table name '{}'", table));
            }
        }

        Ok(self)
    }

    /// `CREATE TABLE IF NOT EXISTS` statements for the selected shape, in
    /// dependency order.
    pub fn create_table_statements(&self) -> Vec<String> {
        let mut statements = Vec::new();

        if self.version.has_driver_link() {
            statements.push(format!(
                r#"CREATE TABLE IF NOT EXISTS {} (
    id VARCHAR(50) PRIMARY KEY,
    name VARCHAR(100),
    phone VARCHAR(20),
    email VARCHAR(100)
)"#,
                self.driver_table
            ));
        }

        let mut columns = vec![
            "asset_id VARCHAR(50) PRIMARY KEY".to_string(),
            "asset_status VARCHAR(50)".to_string(),
            "last_movement_reason VARCHAR(255)".to_string(),
            "registration_number VARCHAR(50)".to_string(),
            "vin_number VARCHAR(50)".to_string(),
            "asset_type VARCHAR(100)".to_string(),
            "engine_number VARCHAR(100)".to_string(),
            "asset_make VARCHAR(100)".to_string(),
            "asset_model VARCHAR(100)".to_string(),
            "asset_shape VARCHAR(50)".to_string(),
        ];
        if self.version.has_odometer() {
            columns.push("current_odo BIGINT".to_string());
        }
        if self.version.has_driver_link() {
            columns.push(format!(
                "linked_driver_id VARCHAR(50) REFERENCES {}(id)",
                self.driver_table
            ));
        }
        columns.push("modified_time TIMESTAMP".to_string());
        columns.push(r#""updatedAt" TIMESTAMP"#.to_string());

        statements.push(format!(
            "CREATE TABLE IF NOT EXISTS {} (\n    {}\n)",
            self.asset_table,
            columns.join(",\n    ")
        ));

        statements.push(format!(
            r#"CREATE TABLE IF NOT EXISTS {} (
    key VARCHAR(64) PRIMARY KEY,
    owner VARCHAR(100),
    created_at TIMESTAMP NOT NULL DEFAULT (NOW() AT TIME ZONE 'utc')
)"#,
            self.api_key_table
        ));

        statements
    }
}

/// Table names are interpolated into SQL, so only `[A-Za-z_][A-Za-z0-9_]*` is accepted.
fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
