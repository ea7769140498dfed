//! Implements BotGateway over the Telegram Bot HTTP API.
//!
//! One multipart POST to `sendDocument` per call. No retries: the relay makes a single attempt.

use crate::domain::{ApiResponse, BotCredentials, DocumentUpload, DomainError, mask_secret};
use crate::ports::BotGateway;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::error::Error as StdError;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Bot API adapter. Holds a client with a fixed per-request timeout.
pub struct BotApiGateway {
    client: Client,
    api_base_url: String,
    timeout: Duration,
}

/// Error envelope returned by the Bot API (`{"ok":false,"error_code":403,"description":"..."}`).
#[derive(Deserialize)]
struct BotApiReply {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

impl BotApiGateway {
    /// Create the gateway.
    ///
    /// # Arguments
    /// * `api_base_url` - e.g. "https://api.telegram.org" (no trailing slash)
    /// * `timeout` - applied to the whole request, upload and response body included
    pub fn new(api_base_url: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Transport(format!("build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_base_url: api_base_url.into(),
            timeout,
        })
    }

    fn endpoint(&self, bot_token: &str) -> String {
        format!("{}/bot{}/sendDocument", self.api_base_url, bot_token)
    }

    /// Map reqwest errors. The URL carries the token, so it is stripped before formatting.
    fn map_err(&self, e: reqwest::Error, bot_token: &str) -> DomainError {
        if e.is_timeout() {
            DomainError::Timeout {
                seconds: self.timeout.as_secs(),
            }
        } else {
            DomainError::Transport(describe(&e.without_url(), bot_token))
        }
    }
}

/// Top-level message followed by every `source()` cause, joined with ": ".
/// Any occurrence of the token is masked.
fn describe(e: &(dyn StdError + 'static), bot_token: &str) -> String {
    let mut text = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.ends_with(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    if bot_token.is_empty() {
        text
    } else {
        text.replace(bot_token, &mask_secret(bot_token))
    }
}

#[async_trait]
impl BotGateway for BotApiGateway {
    async fn send_document(
        &self,
        credentials: &BotCredentials,
        upload: &DocumentUpload,
    ) -> Result<ApiResponse, DomainError> {
        let bytes = tokio::fs::read(&upload.path)
            .await
            .map_err(|e| DomainError::Scratch(format!("read {}: {}", upload.path.display(), e)))?;
        let size = bytes.len();

        let form = Form::new()
            .text("chat_id", credentials.chat_id.clone())
            .text("caption", upload.caption.clone())
            .part(
                "document",
                Part::bytes(bytes).file_name(upload.filename.clone()),
            );

        info!(
            filename = %upload.filename,
            bytes = size,
            "sending document to Telegram"
        );

        let response = self
            .client
            .post(self.endpoint(&credentials.bot_token))
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.map_err(e, &credentials.bot_token))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| self.map_err(e, &credentials.bot_token))?;

        if status == 200 {
            debug!(status, "sendDocument accepted");
        } else {
            let description = serde_json::from_str::<BotApiReply>(&body)
                .ok()
                .filter(|r| !r.ok)
                .and_then(|r| r.description)
                .unwrap_or_default();
            warn!(status, description = %description, "sendDocument rejected");
        }

        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TOKEN: &str = "123:abc";

    async fn scratch_upload(dir: &std::path::Path) -> DocumentUpload {
        let file = dir.join("notes.txt");
        tokio::fs::write(&file, b"hello telegram").await.unwrap();
        DocumentUpload {
            path: file,
            filename: "notes.txt".to_string(),
            caption: "File: notes.txt".to_string(),
        }
    }

    #[tokio::test]
    async fn test_posts_multipart_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/bot{}/sendDocument", TOKEN)))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok":true}"#))
            .expect(1)
            .mount(&server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let upload = scratch_upload(tmp.path()).await;
        let gateway = BotApiGateway::new(server.uri(), Duration::from_secs(5)).unwrap();

        let response = gateway
            .send_document(&BotCredentials::new(TOKEN, "-100777"), &upload)
            .await
            .unwrap();
        assert_eq!(response.status, 200);

        let requests = server.received_requests().await.unwrap();
        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(body.contains(r#"name="chat_id""#));
        assert!(body.contains("-100777"));
        assert!(body.contains(r#"name="caption""#));
        assert!(body.contains("File: notes.txt"));
        assert!(body.contains(r#"name="document"; filename="notes.txt""#));
        assert!(body.contains("hello telegram"));
    }

    #[tokio::test]
    async fn test_non_200_is_returned_with_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
            .mount(&server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let upload = scratch_upload(tmp.path()).await;
        let gateway = BotApiGateway::new(server.uri(), Duration::from_secs(5)).unwrap();

        let response = gateway
            .send_document(&BotCredentials::new(TOKEN, "1"), &upload)
            .await
            .unwrap();
        assert_eq!(response.status, 403);
        assert_eq!(response.body, "Forbidden");
    }

    #[tokio::test]
    async fn test_slow_server_maps_to_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let upload = scratch_upload(tmp.path()).await;
        let gateway = BotApiGateway::new(server.uri(), Duration::from_millis(200)).unwrap();

        let err = gateway
            .send_document(&BotCredentials::new(TOKEN, "1"), &upload)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_connection_error_does_not_leak_token() {
        // Nothing listens on port 9 on loopback
        let gateway = BotApiGateway::new("http://127.0.0.1:9", Duration::from_secs(5)).unwrap();
        let tmp = tempfile::tempdir().unwrap();
        let upload = scratch_upload(tmp.path()).await;

        let err = gateway
            .send_document(&BotCredentials::new(TOKEN, "1"), &upload)
            .await
            .unwrap_err();
        let DomainError::Transport(reason) = &err else {
            panic!("expected Transport, got {:?}", err);
        };
        assert!(reason.starts_with("error sending request"));
        // The underlying cause (connection refused) is carried along
        assert!(reason.len() > "error sending request".len(), "{reason}");
        assert!(reason.contains(": "), "{reason}");
        assert!(!err.to_string().contains(TOKEN));
    }

    #[derive(Debug)]
    struct Layer {
        msg: String,
        source: Option<Box<Layer>>,
    }

    impl fmt::Display for Layer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(&self.msg)
        }
    }

    impl StdError for Layer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            self.source.as_deref().map(|s| s as &(dyn StdError + 'static))
        }
    }

    #[test]
    fn test_describe_joins_causes_and_masks_token() {
        let err = Layer {
            msg: "error sending request".into(),
            source: Some(Box::new(Layer {
                msg: "client error (Connect)".into(),
                source: Some(Box::new(Layer {
                    msg: format!("dns error for bot{}", TOKEN),
                    source: None,
                })),
            })),
        };
        assert_eq!(
            describe(&err, TOKEN),
            "error sending request: client error (Connect): dns error for bot*******"
        );
    }
}
