// ABOUTME: Main template engine implementation using Handlebars
// ABOUTME: Owns the helper registry and renders notification templates against event data

use handlebars::Handlebars;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::debug;

use super::context::{HostInfo, TemplateContext};
use super::error::{Result, TemplateError};
use super::helpers;
use crate::event::LogEvent;

/// Escaping applied to `{{expression}}` output and escaped helper output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EscapeMode {
    /// HTML entity escaping, for email bodies
    #[default]
    Html,
    /// No escaping, for plain-text subjects and chat messages
    #[serde(alias = "none")]
    Plain,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub escape: EscapeMode,
    #[serde(default)]
    pub strict_mode: bool,
}

#[derive(Clone)]
pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with all notification helpers
    pub fn new(config: &EngineConfig) -> Self {
        let mut handlebars = Handlebars::new();

        handlebars.set_strict_mode(config.strict_mode);
        handlebars.set_dev_mode(false);

        if config.escape == EscapeMode::Plain {
            handlebars.register_escape_fn(handlebars::no_escape);
        }

        helpers::register_helpers(&mut handlebars);
        debug!(
            "Template engine ready (escape: {:?}, strict: {})",
            config.escape, config.strict_mode
        );

        Self { handlebars }
    }

    /// Render a template string with a JSON context
    pub fn render_template(&self, template: &str, context: &JsonValue) -> Result<String> {
        self.handlebars
            .render_template(template, context)
            .map_err(TemplateError::HandlebarsError)
    }

    /// Render a template string with a prepared template context
    pub fn render(&self, template: &str, context: &TemplateContext) -> Result<String> {
        self.render_template(template, &context.to_json())
    }

    /// Render a template string against a log event
    pub fn render_event(
        &self,
        template: &str,
        event: &LogEvent,
        host: &HostInfo,
    ) -> Result<String> {
        self.render(template, &TemplateContext::from_event(event, host))
    }

    /// Validate template syntax without rendering
    pub fn validate_template(&self, template: &str) -> Result<()> {
        match handlebars::Template::compile(template) {
            Ok(_) => Ok(()),
            Err(e) => Err(TemplateError::SyntaxError(e.to_string())),
        }
    }

    /// Check if a string contains template expressions
    pub fn has_templates(&self, text: &str) -> bool {
        text.contains("{{") && text.contains("}}")
    }

    /// Register a custom helper function, replacing any helper of the same name
    pub fn register_helper<F>(&mut self, name: &str, helper: F)
    where
        F: handlebars::HelperDef + Send + Sync + 'static,
    {
        self.handlebars.register_helper(name, Box::new(helper));
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}
