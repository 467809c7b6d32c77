use crate::domain::markup::Markup;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub slug: String,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub path_prefix: String,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub backend_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageSummary {
    #[serde(default, deserialize_with = "lenient_count")]
    pub total: u64,
    #[serde(default, deserialize_with = "lenient_counts")]
    pub by_api: BTreeMap<String, u64>,
}

// Field readers for backend payloads: a field of the wrong type reads as
// empty or zero without taking its siblings down with it.

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient_opt_string(deserializer)?.unwrap_or_default())
}

fn lenient_opt_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    Ok(count_of(&Value::deserialize(deserializer)?).unwrap_or(0))
}

fn lenient_counts<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, u64>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Object(entries) => Ok(entries
            .into_iter()
            .filter_map(|(api, count)| count_of(&count).map(|count| (api, count)))
            .collect()),
        _ => Ok(BTreeMap::new()),
    }
}

/// Non-negative JSON numbers; fractional counts round to the nearest whole.
fn count_of(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|n| n.is_finite() && *n >= 0.0)
            .map(|n| n.round() as u64)
    })
}

/// The three output regions. The string form doubles as the element id in
/// the host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegionId {
    Products,
    Apis,
    Usage,
}

impl RegionId {
    pub const ALL: [RegionId; 3] = [RegionId::Products, RegionId::Apis, RegionId::Usage];

    pub fn as_str(&self) -> &'static str {
        match self {
            RegionId::Products => "products",
            RegionId::Apis => "apis",
            RegionId::Usage => "usage",
        }
    }

    /// Resource path, relative to the backend's route prefix.
    pub fn resource_path(&self) -> &'static str {
        match self {
            RegionId::Products => "/products",
            RegionId::Apis => "/apis",
            RegionId::Usage => "/usage",
        }
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegionState {
    Loading,
    Loaded(Markup),
    Empty,
    Error(String),
}

/// Decodes a list payload. Anything that is not a JSON array is no list at
/// all. Mistyped fields read as empty; elements that are not objects still
/// count, as `T::default()`.
pub fn decode_list<T>(value: Value) -> Option<Vec<T>>
where
    T: DeserializeOwned + Default,
{
    match value {
        Value::Array(items) => Some(
            items
                .into_iter()
                .enumerate()
                .map(|(index, item)| {
                    serde_json::from_value(item).unwrap_or_else(|e| {
                        tracing::warn!("List element {} has unexpected shape: {}", index, e);
                        T::default()
                    })
                })
                .collect(),
        ),
        other => {
            tracing::warn!("Expected a JSON array, got {}", json_kind(&other));
            None
        }
    }
}

/// Falsy payloads (`null`, `false`, `0`, `""`) mean no summary; anything
/// else is read leniently, field by field.
pub fn decode_usage(value: Value) -> Option<UsageSummary> {
    if is_falsy(&value) {
        tracing::warn!("Usage payload is {}, treating it as absent", json_kind(&value));
        return None;
    }
    Some(serde_json::from_value(value).unwrap_or_else(|e| {
        tracing::warn!("Usage summary has unexpected shape: {}", e);
        UsageSummary::default()
    }))
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
