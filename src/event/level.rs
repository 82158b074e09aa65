// ABOUTME: Severity levels carried by log events
// ABOUTME: Parses level names and their common abbreviations, rendering the canonical name

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::EventError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LogEventLevel {
    Verbose,
    Debug,
    Information,
    Warning,
    Error,
    Fatal,
}

impl LogEventLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogEventLevel::Verbose => "Verbose",
            LogEventLevel::Debug => "Debug",
            LogEventLevel::Information => "Information",
            LogEventLevel::Warning => "Warning",
            LogEventLevel::Error => "Error",
            LogEventLevel::Fatal => "Fatal",
        }
    }
}

impl fmt::Display for LogEventLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogEventLevel {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "verbose" | "trace" | "vrb" => Ok(LogEventLevel::Verbose),
            "debug" | "dbg" => Ok(LogEventLevel::Debug),
            "information" | "info" | "inf" => Ok(LogEventLevel::Information),
            "warning" | "warn" | "wrn" => Ok(LogEventLevel::Warning),
            "error" | "err" | "eror" => Ok(LogEventLevel::Error),
            "fatal" | "critical" | "ftl" => Ok(LogEventLevel::Fatal),
            _ => Err(EventError::UnknownLevel(s.to_string())),
        }
    }
}

impl TryFrom<String> for LogEventLevel {
    type Error = EventError;

    fn try_from(value: String) -> Result<Self, EventError> {
        value.parse()
    }
}

impl From<LogEventLevel> for String {
    fn from(level: LogEventLevel) -> Self {
        level.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_levels() {
        assert_eq!("Fatal".parse::<LogEventLevel>().unwrap(), LogEventLevel::Fatal);
        assert_eq!("warn".parse::<LogEventLevel>().unwrap(), LogEventLevel::Warning);
        assert_eq!(" INF ".parse::<LogEventLevel>().unwrap(), LogEventLevel::Information);
        assert!("loud".parse::<LogEventLevel>().is_err());
    }

    #[test]
    fn test_serde_uses_canonical_names() {
        let level: LogEventLevel = serde_json::from_str("\"err\"").unwrap();
        assert_eq!(level, LogEventLevel::Error);
        assert_eq!(serde_json::to_string(&level).unwrap(), "\"Error\"");
    }

    #[test]
    fn test_try_from_string() {
        assert_eq!(
            LogEventLevel::try_from("Error".to_string()).unwrap(),
            LogEventLevel::Error
        );
        assert!(matches!(
            LogEventLevel::try_from("loud".to_string()),
            Err(EventError::UnknownLevel(ref level)) if level == "loud"
        ));
    }

    #[test]
    fn test_ordering() {
        assert!(LogEventLevel::Fatal > LogEventLevel::Warning);
        assert!(LogEventLevel::Verbose < LogEventLevel::Debug);
    }
}
