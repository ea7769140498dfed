//! Dry-run gateway for running without network access.
//!
//! Logs the request and answers like a successful Bot API call.

use crate::domain::{ApiResponse, BotCredentials, DocumentUpload, DomainError};
use crate::ports::BotGateway;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::info;

/// Mock gateway. Never touches the network; counts calls.
#[derive(Default)]
pub struct DryRunGateway {
    sent: AtomicUsize,
}

impl DryRunGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of send_document calls so far.
    pub fn sent(&self) -> usize {
        self.sent.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl BotGateway for DryRunGateway {
    async fn send_document(
        &self,
        _credentials: &BotCredentials,
        upload: &DocumentUpload,
    ) -> Result<ApiResponse, DomainError> {
        self.sent.fetch_add(1, Ordering::SeqCst);
        info!(
            filename = %upload.filename,
            path = %upload.path.display(),
            "[DRY RUN] Skipping sendDocument"
        );
        Ok(ApiResponse {
            status: 200,
            body: r#"{"ok":true,"result":{}}"#.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_dry_run_answers_ok_and_counts() {
        let gateway = DryRunGateway::new();
        let upload = DocumentUpload {
            path: PathBuf::from("downloads/a.txt"),
            filename: "a.txt".into(),
            caption: String::new(),
        };
        let resp = gateway
            .send_document(&BotCredentials::new("t", "c"), &upload)
            .await
            .unwrap();
        assert_eq!(resp.status, 200);
        assert_eq!(gateway.sent(), 1);
    }
}
