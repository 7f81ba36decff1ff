use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Any JSON value, as sent to and decoded from the API.
pub type AnyJson = serde_json::Value;

/// A point in time as reported by the API.
///
/// The API usually reports epoch milliseconds, but some payloads carry a preformatted string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Millis(i64),
    Text(String),
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Timestamp::Millis(ms) => write!(f, "{ms}"),
            Timestamp::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Whether a JSON payload carries nothing worth sending.
pub(crate) fn is_empty_payload(payload: &AnyJson) -> bool {
    match payload {
        AnyJson::Null => true,
        AnyJson::Object(map) => map.is_empty(),
        AnyJson::Array(items) => items.is_empty(),
        AnyJson::String(s) => s.is_empty(),
        _ => false,
    }
}
