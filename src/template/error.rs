// ABOUTME: Error types for template engine operations
// ABOUTME: Defines specific error types for template validation, rendering and date-time handling

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template syntax error: {0}")]
    SyntaxError(String),

    #[error("A time zone with id '{0}' was not found")]
    UnknownTimeZone(String),

    #[error("Invalid date-time format: {0}")]
    InvalidFormat(String),

    #[error("Handlebars error: {0}")]
    HandlebarsError(#[from] handlebars::RenderError),
}

pub type Result<T> = std::result::Result<T, TemplateError>;
