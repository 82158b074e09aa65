// ABOUTME: Tagged view over the loosely-typed arguments Handlebars passes to helpers
// ABOUTME: Classifies JSON parameters, derives their string form and normalizes nested values

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use handlebars::Helper;
use serde_json::{Map, Number, Value as JsonValue};
use std::fmt;

/// Zone-less layouts accepted as timestamps; these are read as UTC.
const NAIVE_TIMESTAMP_LAYOUTS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// A single positional helper argument.
///
/// Strings that read as ISO-8601 date-times are classified as [`HelperValue::Timestamp`]
/// but keep their original text, so helpers that only care about the string form
/// see exactly what the event carried.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HelperValue<'a> {
    /// The template supplied fewer arguments than the requested position.
    Absent,
    Null,
    Bool(bool),
    Number(&'a Number),
    String(&'a str),
    Timestamp {
        text: &'a str,
        at: DateTime<FixedOffset>,
    },
    Sequence(&'a [JsonValue]),
    Mapping(&'a Map<String, JsonValue>),
}

impl<'a> HelperValue<'a> {
    pub fn from_json(value: &'a JsonValue) -> Self {
        match value {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(b) => Self::Bool(*b),
            JsonValue::Number(n) => Self::Number(n),
            JsonValue::String(s) => match parse_timestamp(s) {
                Some(at) => Self::Timestamp { text: s, at },
                None => Self::String(s),
            },
            JsonValue::Array(items) => Self::Sequence(items),
            JsonValue::Object(map) => Self::Mapping(map),
        }
    }

    /// Classify the helper parameter at `index`
    pub fn param(h: &'a Helper<'_, '_>, index: usize) -> Self {
        h.param(index)
            .map_or(Self::Absent, |param| Self::from_json(param.value()))
    }

    /// True for values that carry nothing: no argument at all, or null
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Absent | Self::Null)
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Sequence(_) | Self::Mapping(_))
    }

    /// Text of string-typed values; timestamps count since they arrive as strings
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Self::String(s) => Some(s),
            Self::Timestamp { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn timestamp(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            Self::Timestamp { at, .. } => Some(*at),
            _ => None,
        }
    }
}

/// The string form used for comparisons and substring extraction.
/// Null and absent values render as the empty string; containers as compact JSON.
impl fmt::Display for HelperValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent | Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Number(n) => write!(f, "{}", n),
            Self::String(s) => f.write_str(s),
            Self::Timestamp { text, .. } => f.write_str(text),
            Self::Sequence(_) | Self::Mapping(_) => write!(f, "{}", normalize(self)),
        }
    }
}

/// Recursively rebuild a helper value as plain JSON suitable for serialization.
///
/// Sequences keep their order, mappings keep their keys, and every other value
/// is passed through as a leaf.
pub fn normalize(value: &HelperValue<'_>) -> JsonValue {
    match value {
        HelperValue::Sequence(items) => JsonValue::Array(
            items
                .iter()
                .map(|item| normalize(&HelperValue::from_json(item)))
                .collect(),
        ),
        HelperValue::Mapping(map) => JsonValue::Object(
            map.iter()
                .map(|(key, item)| (key.clone(), normalize(&HelperValue::from_json(item))))
                .collect(),
        ),
        HelperValue::Absent | HelperValue::Null => JsonValue::Null,
        HelperValue::Bool(b) => JsonValue::Bool(*b),
        HelperValue::Number(n) => JsonValue::Number((*n).clone()),
        HelperValue::String(s) => JsonValue::String((*s).to_string()),
        HelperValue::Timestamp { text, .. } => JsonValue::String((*text).to_string()),
    }
}

/// Parse an ISO-8601 date-time; values without an offset are taken to be UTC
pub fn parse_timestamp(text: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Some(at);
    }

    NAIVE_TIMESTAMP_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(text, layout).ok())
        .map(|naive| naive.and_utc().fixed_offset())
}
