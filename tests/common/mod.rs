// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Provides sample events, engines and temporary template files

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use serde_json::Value as JsonValue;
use std::path::PathBuf;
use tempfile::TempDir;

use herald::{EngineConfig, EscapeMode, HostInfo, LogEvent, LogEventLevel, TemplateEngine};

pub struct TestEventBuilder {
    event: LogEvent,
}

impl TestEventBuilder {
    /// A Fatal event raised at 2021-03-01T17:30:11Z
    pub fn new() -> Self {
        let timestamp = Utc
            .with_ymd_and_hms(2021, 3, 1, 17, 30, 11)
            .unwrap()
            .fixed_offset();

        Self {
            event: LogEvent::new("event-1", LogEventLevel::Fatal, "Some text")
                .with_timestamp(timestamp)
                .with_rendered_message("Some text")
                .with_event_type("$A1B2C3D4"),
        }
    }

    pub fn with_level(mut self, level: LogEventLevel) -> Self {
        self.event.level = level;
        self
    }

    pub fn with_property(mut self, name: &str, value: impl Into<JsonValue>) -> Self {
        self.event = self.event.with_property(name, value);
        self
    }

    pub fn build(self) -> LogEvent {
        self.event
    }
}

impl Default for TestEventBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn html_engine() -> TemplateEngine {
    TemplateEngine::default()
}

pub fn plain_engine() -> TemplateEngine {
    TemplateEngine::new(&EngineConfig {
        escape: EscapeMode::Plain,
        strict_mode: false,
    })
}

pub fn some_host() -> HostInfo {
    HostInfo {
        instance: Some("test-instance".to_string()),
        server_uri: Some("https://logs.example.com".to_string()),
    }
}

/// Render `template` against `event` with a plain-text engine
pub fn render(template: &str, event: &LogEvent) -> String {
    plain_engine()
        .render_event(template, event, &some_host())
        .unwrap()
}

pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.temp_dir.path().to_path_buf()
    }

    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    pub fn write_event(&self, name: &str, event: &LogEvent) -> PathBuf {
        self.write_file(name, &serde_json::to_string_pretty(event).unwrap())
    }
}

impl Default for TestEnvironment {
    fn default() -> Self {
        Self::new()
    }
}
