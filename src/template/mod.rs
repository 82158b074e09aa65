// ABOUTME: Template engine module for notification rendering
// ABOUTME: Provides the Handlebars engine, notification helpers and event render context

pub mod context;
pub mod datetime;
pub mod engine;
pub mod error;
pub mod helpers;
pub mod value;

pub use context::{HostInfo, TemplateContext};
pub use engine::{EngineConfig, EscapeMode, TemplateEngine};
pub use error::{Result, TemplateError};
pub use value::{normalize, HelperValue};
