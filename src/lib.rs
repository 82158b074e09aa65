// ABOUTME: Main library module for herald, the notification template renderer
// ABOUTME: Exports the Handlebars helpers, event model and CLI as the public API

pub mod cli;
pub mod event;
pub mod template;

// Re-export commonly used types
pub use cli::{App, Args, Config};
pub use event::{LogEvent, LogEventLevel};
pub use template::{EngineConfig, EscapeMode, HostInfo, TemplateContext, TemplateEngine};

// Error handling
pub type Result<T> = anyhow::Result<T>;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
