// ABOUTME: Template data context built from a log event and the host it was raised on
// ABOUTME: Exposes built-in $-prefixed event fields alongside the event's own properties

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::event::LogEvent;

/// Details about the server instance that raised the event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostInfo {
    #[serde(default)]
    pub instance: Option<String>,
    #[serde(default)]
    pub server_uri: Option<String>,
}

/// Data handed to Handlebars when rendering a notification.
///
/// Event properties appear as top-level fields. Built-in fields carry a `$`
/// prefix and take precedence when a property uses the same name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateContext {
    fields: Map<String, JsonValue>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the context for `event`
    pub fn from_event(event: &LogEvent, host: &HostInfo) -> Self {
        let mut context = Self {
            fields: event.properties.clone(),
        };

        let utc = event
            .timestamp
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::AutoSi, true);
        let local = event
            .timestamp
            .to_rfc3339_opts(SecondsFormat::AutoSi, true);

        context.set_field("$Id", event.id.as_str());
        context.set_field("$UtcTimestamp", utc);
        context.set_field("$LocalTimestamp", local);
        context.set_field("$Level", event.level.as_str());
        context.set_field("$MessageTemplate", event.message_template.as_str());
        context.set_field("$Message", event.message());
        context.set_field("$Exception", optional(event.exception.as_deref()));
        context.set_field("$Properties", JsonValue::Object(event.properties.clone()));
        context.set_field("$EventType", optional(event.event_type.as_deref()));
        context.set_field("$Instance", optional(host.instance.as_deref()));
        context.set_field("$ServerUri", optional(host.server_uri.as_deref()));

        context
    }

    /// Add or replace a field
    pub fn set_field(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get_field(&self, key: &str) -> Option<&JsonValue> {
        self.fields.get(key)
    }

    /// Convert context to JSON for handlebars rendering
    pub fn to_json(&self) -> JsonValue {
        JsonValue::Object(self.fields.clone())
    }
}

fn optional(value: Option<&str>) -> JsonValue {
    value.map_or(JsonValue::Null, |v| JsonValue::String(v.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::LogEventLevel;
    use chrono::{FixedOffset, TimeZone};
    use serde_json::json;

    fn sample_event() -> LogEvent {
        let timestamp = FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2021, 3, 1, 19, 30, 11)
            .unwrap();

        LogEvent::new("event-42", LogEventLevel::Fatal, "Disk {Drive} is full")
            .with_timestamp(timestamp)
            .with_rendered_message("Disk C: is full")
            .with_property("Drive", "C:")
            .with_property("$Level", "shadowed")
    }

    #[test]
    fn test_builtin_fields() {
        let host = HostInfo {
            instance: Some("prod-1".to_string()),
            server_uri: Some("https://logs.example.com".to_string()),
        };
        let context = TemplateContext::from_event(&sample_event(), &host);

        assert_eq!(context.get_field("$Id"), Some(&json!("event-42")));
        assert_eq!(context.get_field("$Level"), Some(&json!("Fatal")));
        assert_eq!(
            context.get_field("$UtcTimestamp"),
            Some(&json!("2021-03-01T17:30:11Z"))
        );
        assert_eq!(
            context.get_field("$LocalTimestamp"),
            Some(&json!("2021-03-01T19:30:11+02:00"))
        );
        assert_eq!(context.get_field("$Message"), Some(&json!("Disk C: is full")));
        assert_eq!(context.get_field("$Exception"), Some(&JsonValue::Null));
        assert_eq!(context.get_field("$Instance"), Some(&json!("prod-1")));
        assert_eq!(
            context.get_field("$ServerUri"),
            Some(&json!("https://logs.example.com"))
        );
    }

    #[test]
    fn test_properties_are_top_level() {
        let context = TemplateContext::from_event(&sample_event(), &HostInfo::default());

        assert_eq!(context.get_field("Drive"), Some(&json!("C:")));
        assert_eq!(context.get_field("$Properties").unwrap()["Drive"], json!("C:"));
        assert_eq!(context.get_field("$Instance"), Some(&JsonValue::Null));
    }

    #[test]
    fn test_context_json_conversion() {
        let mut context = TemplateContext::new();
        context.set_field("name", "ada");

        let json = context.to_json();
        assert!(json.is_object());
        assert_eq!(json["name"], "ada");
    }
}
