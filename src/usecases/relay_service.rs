//! Relay use case: validate -> write scratch file -> sendDocument -> classify -> clean up.
//!
//! - Refuses before any IO when credentials are incomplete
//! - Exactly one send attempt per call; no retry, no queue
//! - Scratch file removal is best-effort and never overrides the delivery outcome

use crate::domain::{
    BotCredentials, DocumentUpload, DomainError, RelayOutcome, RelayReport, UploadPayload,
};
use crate::ports::{BotGateway, ScratchPort};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Caption attached to every relayed document.
pub fn caption_for(filename: &str) -> String {
    format!("📦 Uploaded via TG Uploader\nFile: {}", filename)
}

/// Relay service. Owns no state between calls.
pub struct RelayService {
    gateway: Arc<dyn BotGateway>,
    scratch: Arc<dyn ScratchPort>,
    max_upload_bytes: u64,
}

impl RelayService {
    pub fn new(
        gateway: Arc<dyn BotGateway>,
        scratch: Arc<dyn ScratchPort>,
        max_upload_bytes: u64,
    ) -> Self {
        Self {
            gateway,
            scratch,
            max_upload_bytes,
        }
    }

    /// Largest payload `relay` accepts, in bytes.
    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_bytes
    }

    /// Deliver `payload` as a document to `credentials.chat_id`.
    ///
    /// `Err` means the attempt was refused before anything was sent (configuration, invalid
    /// payload, scratch write). Once the request is issued the result is always `Ok`, with
    /// the delivery category in `RelayReport::outcome`.
    pub async fn relay(
        &self,
        credentials: &BotCredentials,
        payload: UploadPayload,
    ) -> Result<RelayReport, DomainError> {
        credentials.validate()?;
        validate_filename(&payload.filename)?;
        if payload.len() as u64 > self.max_upload_bytes {
            return Err(DomainError::InvalidPayload(format!(
                "{} is {} bytes; the limit is {} bytes",
                payload.filename,
                payload.len(),
                self.max_upload_bytes
            )));
        }

        let scratch_path = match self.scratch.write(&payload.filename, &payload.bytes).await {
            Ok(p) => p,
            Err(e) => {
                // A partial file may exist
                let partial = self.scratch.path_for(&payload.filename);
                self.cleanup(&partial).await;
                return Err(e);
            }
        };
        info!(
            path = %scratch_path.display(),
            bytes = payload.len(),
            "file saved locally"
        );

        let upload = DocumentUpload {
            path: scratch_path.clone(),
            filename: payload.filename.clone(),
            caption: caption_for(&payload.filename),
        };
        let outcome = match self.gateway.send_document(credentials, &upload).await {
            Ok(resp) if resp.status == 200 => RelayOutcome::Delivered,
            Ok(resp) => RelayOutcome::Rejected {
                status: resp.status,
                body: resp.body,
            },
            Err(DomainError::Timeout { .. }) => RelayOutcome::TimedOut,
            Err(e) => RelayOutcome::Failed {
                reason: e.to_string(),
            },
        };

        match &outcome {
            RelayOutcome::Delivered => info!(filename = %payload.filename, "document delivered"),
            RelayOutcome::Rejected { status, .. } => {
                warn!(filename = %payload.filename, status, "document rejected by Bot API")
            }
            RelayOutcome::TimedOut => warn!(filename = %payload.filename, "sendDocument timed out"),
            RelayOutcome::Failed { reason } => {
                error!(filename = %payload.filename, reason = %reason, "sendDocument failed")
            }
        }

        let cleaned_up = self.cleanup(&scratch_path).await;

        Ok(RelayReport {
            outcome,
            scratch_path,
            cleaned_up,
        })
    }

    /// Best-effort removal. Failure is logged and reported as `false`.
    async fn cleanup(&self, path: &Path) -> bool {
        match self.scratch.remove(path).await {
            Ok(()) => {
                info!(path = %path.display(), "temporary file cleaned up");
                true
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not remove temporary file");
                false
            }
        }
    }
}

/// Filename must be a single path component so the scratch file stays inside the scratch dir.
fn validate_filename(filename: &str) -> Result<(), DomainError> {
    if filename.is_empty() || filename == "." || filename == ".." {
        return Err(DomainError::InvalidPayload(format!(
            "invalid filename {:?}",
            filename
        )));
    }
    if filename.contains(['/', '\\']) || filename.contains('\0') {
        return Err(DomainError::InvalidPayload(format!(
            "filename {:?} must not contain path separators",
            filename
        )));
    }
    Ok(())
}
