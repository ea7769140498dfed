//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/IO types here. Adapters map reqwest and filesystem results into these.

use crate::domain::DomainError;
use std::fmt;
use std::path::PathBuf;

/// One file handed over by the UI for a single relay attempt.
#[derive(Clone)]
pub struct UploadPayload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadPayload {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for UploadPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadPayload")
            .field("filename", &self.filename)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Bot token and destination chat. Loaded once at startup, read-only afterwards.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BotCredentials {
    pub bot_token: String,
    pub chat_id: String,
}

impl BotCredentials {
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
        }
    }

    /// Ok when both values are non-blank. Otherwise names every missing variable.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut missing = Vec::new();
        if self.bot_token.trim().is_empty() {
            missing.push("BOT_TOKEN");
        }
        if self.chat_id.trim().is_empty() {
            missing.push("CHAT_ID");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(DomainError::ConfigMissing(missing.join(" and ")))
        }
    }

    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }
}

// Never print the token, even in debug logs.
impl fmt::Debug for BotCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotCredentials")
            .field("bot_token", &mask_secret(&self.bot_token))
            .field("chat_id", &mask_secret(&self.chat_id))
            .finish()
    }
}

/// `*` repeated for every character of `value`, or "Not set" when empty.
pub fn mask_secret(value: &str) -> String {
    if value.is_empty() {
        "Not set".to_string()
    } else {
        "*".repeat(value.chars().count())
    }
}

/// What the gateway needs to send one document: the scratch copy plus its metadata.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub path: PathBuf,
    pub filename: String,
    pub caption: String,
}

/// Raw HTTP answer from the Bot API. Classification happens in the relay service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

/// Result category of one delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    /// Bot API answered 200.
    Delivered,
    /// Any other status. `body` is the raw response text.
    Rejected { status: u16, body: String },
    TimedOut,
    Failed { reason: String },
}

impl RelayOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, RelayOutcome::Delivered)
    }
}

/// Everything the UI renders after one interaction.
#[derive(Debug, Clone)]
pub struct RelayReport {
    pub outcome: RelayOutcome,
    pub scratch_path: PathBuf,
    /// False when removing the scratch file failed (logged, never fatal).
    pub cleaned_up: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_reports_all_missing_values() {
        let err = BotCredentials::default().validate().unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: set BOT_TOKEN and CHAT_ID");

        let err = BotCredentials::new("123:abc", "  ").validate().unwrap_err();
        assert!(matches!(err, DomainError::ConfigMissing(ref v) if v == "CHAT_ID"));

        assert!(BotCredentials::new("123:abc", "-100200").is_complete());
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret(""), "Not set");
        assert_eq!(mask_secret("12345"), "*****");
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let creds = BotCredentials::new("123:secret", "42");
        let printed = format!("{:?}", creds);
        assert!(!printed.contains("secret"));
        assert!(printed.contains("**********"));
    }
}
