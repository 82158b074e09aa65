// ABOUTME: Error types for loading event data
// ABOUTME: Covers unreadable event files, malformed JSON and unknown severity levels

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EventError {
    #[error("Unknown event level: {0}")]
    UnknownLevel(String),

    #[error("Failed to read event file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid event JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EventError>;
