use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use validator::Validate;

/// Sparse patch for `PUT /assets/{asset_id}`.
///
/// * field absent  => `None`          (keep the stored value)
/// * field = null  => `Some(None)`    (set the column to NULL)
/// * field = value => `Some(Some(v))` (set the column to `v`)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAssetRequest {
    #[serde(default, deserialize_with = "double_option")]
    #[validate(length(max = 50))]
    pub asset_status: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    #[validate(length(max = 255))]
    pub last_movement_reason: Option<Option<String>>,

    #[serde(default, deserialize_with = "deserialize_patch_timestamp")]
    pub modified_time: Option<Option<NaiveDateTime>>,
}

/// Query string of `PUT /assets/odo/{registration_number}`.
#[derive(Debug, Deserialize)]
pub struct UpdateOdometerQuery {
    pub current_odo: i64,
}

/// Only called when the field is present, so a JSON null becomes `Some(None)`.
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}

/// Like `double_option`, accepting both naive ISO-8601 timestamps and RFC 3339
/// ones with an offset; the latter are converted to UTC.
fn deserialize_patch_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<Option<NaiveDateTime>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(Some(None));
    };

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(Some(with_offset.naive_utc())));
    }
    raw.parse::<NaiveDateTime>()
        .map(|parsed| Some(Some(parsed)))
        .map_err(|e| serde::de::Error::custom(format!("invalid timestamp '{}': {}", raw, e)))
}
