// ABOUTME: Configuration management for the herald application
// ABOUTME: Handles loading and merging configuration from files and environment variables

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::template::{EngineConfig, EscapeMode, HostInfo};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub template: EngineConfig,

    #[serde(default)]
    pub host: HostInfo,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file path or default locations
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::find_config_file(),
        };

        let mut config = if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            serde_yaml::from_str::<Config>(&contents)?
        } else {
            Config::default()
        };

        config.merge_env()?;
        Ok(config)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> PathBuf {
        let possible_paths = [
            PathBuf::from("herald.yaml"),
            PathBuf::from("herald.yml"),
            PathBuf::from(".herald.yaml"),
        ];

        if let Some(path) = possible_paths.iter().find(|path| path.exists()) {
            return path.clone();
        }

        if let Some(home_dir) = dirs::home_dir() {
            let home_config = home_dir.join(".herald").join("config.yaml");
            if home_config.exists() {
                return home_config;
            }
        }

        // Return default path (may not exist)
        PathBuf::from("herald.yaml")
    }

    /// Merge environment variables into configuration
    fn merge_env(&mut self) -> Result<()> {
        if let Ok(escape) = std::env::var("HERALD_ESCAPE") {
            self.template.escape = parse_escape_mode(&escape)?;
        }
        if let Ok(strict) = std::env::var("HERALD_STRICT_MODE") {
            self.template.strict_mode = strict.parse()?;
        }

        if let Ok(instance) = std::env::var("HERALD_INSTANCE") {
            self.host.instance = Some(instance);
        }
        if let Ok(server_uri) = std::env::var("HERALD_SERVER_URI") {
            self.host.server_uri = Some(server_uri);
        }

        if let Ok(level) = std::env::var("HERALD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("HERALD_LOG_FORMAT") {
            self.logging.format = format;
        }

        Ok(())
    }

    /// Apply command-line overrides on top of file and environment settings
    pub fn apply_overrides(
        &mut self,
        instance: Option<String>,
        server_uri: Option<String>,
        escape: Option<&str>,
    ) -> Result<()> {
        if instance.is_some() {
            self.host.instance = instance;
        }
        if server_uri.is_some() {
            self.host.server_uri = server_uri;
        }
        if let Some(escape) = escape {
            self.template.escape = parse_escape_mode(escape)?;
        }
        Ok(())
    }
}

/// Parse an escape mode name (`html`, `plain` or `none`)
pub fn parse_escape_mode(value: &str) -> Result<EscapeMode> {
    serde_yaml::from_str(value.trim()).map_err(|_| {
        anyhow::anyhow!("Invalid escape mode '{}'. Expected 'html' or 'plain'", value)
    })
}
