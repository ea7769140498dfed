//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{ApiResponse, BotCredentials, DocumentUpload, DomainError};
use std::path::{Path, PathBuf};

/// Telegram Bot API gateway. Sends one document per call, no retries.
#[async_trait::async_trait]
pub trait BotGateway: Send + Sync {
    /// POST the document to `sendDocument` for `credentials.chat_id`.
    ///
    /// Any HTTP status is returned as `Ok`; only transport problems are errors.
    /// A timeout must surface as `DomainError::Timeout`, every other transport
    /// failure as `DomainError::Transport`.
    async fn send_document(
        &self,
        credentials: &BotCredentials,
        upload: &DocumentUpload,
    ) -> Result<ApiResponse, DomainError>;
}

/// Scratch storage. Holds an upload between receipt and forwarding.
#[async_trait::async_trait]
pub trait ScratchPort: Send + Sync {
    /// Path a file named `filename` would occupy. Pure, no IO.
    fn path_for(&self, filename: &str) -> PathBuf;

    /// Write `bytes` under `filename`, overwriting any previous file. Returns the full path.
    async fn write(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, DomainError>;

    /// Delete a file previously returned by `write`.
    async fn remove(&self, path: &Path) -> Result<(), DomainError>;
}
