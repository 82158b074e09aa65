// ABOUTME: Event data rendered into notification templates
// ABOUTME: Defines the log event model and loads events from JSON documents

pub mod error;
pub mod level;

pub use error::{EventError, Result};
pub use level::LogEventLevel;

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::path::Path;

/// A single structured log event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEvent {
    pub id: String,
    #[serde(default = "default_timestamp")]
    pub timestamp: DateTime<FixedOffset>,
    pub level: LogEventLevel,
    #[serde(default)]
    pub message_template: String,
    #[serde(default)]
    pub rendered_message: Option<String>,
    #[serde(default)]
    pub exception: Option<String>,
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub properties: Map<String, JsonValue>,
}

fn default_timestamp() -> DateTime<FixedOffset> {
    Utc::now().fixed_offset()
}

impl LogEvent {
    pub fn new(
        id: impl Into<String>,
        level: LogEventLevel,
        message_template: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            timestamp: default_timestamp(),
            level,
            message_template: message_template.into(),
            rendered_message: None,
            exception: None,
            event_type: None,
            properties: Map::new(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<FixedOffset>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_rendered_message(mut self, message: impl Into<String>) -> Self {
        self.rendered_message = Some(message.into());
        self
    }

    pub fn with_exception(mut self, exception: impl Into<String>) -> Self {
        self.exception = Some(exception.into());
        self
    }

    pub fn with_event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = Some(event_type.into());
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// The rendered message, falling back to the raw message template
    pub fn message(&self) -> &str {
        self.rendered_message
            .as_deref()
            .unwrap_or(&self.message_template)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load an event from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}
