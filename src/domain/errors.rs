//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Token and/or chat id are empty. Carries the names of the missing variables.
    #[error("Configuration error: set {0}")]
    ConfigMissing(String),

    #[error("Invalid upload: {0}")]
    InvalidPayload(String),

    #[error("Scratch storage error: {0}")]
    Scratch(String),

    /// The request did not complete within the configured timeout.
    #[error("Request timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("UI error: {0}")]
    Ui(String),
}
