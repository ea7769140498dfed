//! Application configuration. Bot credentials, scratch directory, HTTP tuning.

use crate::domain::BotCredentials;
use serde::Deserialize;

/// Bot API host. `sendDocument` is reached at `{base}/bot{token}/sendDocument`.
pub const DEFAULT_API_BASE_URL: &str = "https://api.telegram.org";

/// Scratch directory for uploads between receipt and forwarding.
pub const DEFAULT_DOWNLOAD_DIR: &str = "downloads";

/// Per-request timeout for the sendDocument call.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Bot API limit for documents sent by bots (50 MB).
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Bot token from @BotFather. Read from BOT_TOKEN (no prefix).
    #[serde(default)]
    pub bot_token: Option<String>,

    /// Destination chat. Read from CHAT_ID (no prefix).
    #[serde(default)]
    pub chat_id: Option<String>,

    /// Scratch directory. Read from TG_UPLOADER_DOWNLOAD_DIR.
    #[serde(default)]
    pub download_dir: Option<String>,

    /// Bot API base URL (override for self-hosted Bot API servers). Read from TG_UPLOADER_API_BASE_URL.
    #[serde(default)]
    pub api_base_url: Option<String>,

    /// Timeout in seconds for one upload request. Read from TG_UPLOADER_REQUEST_TIMEOUT_SECS.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Largest payload accepted before any network call. Read from TG_UPLOADER_MAX_UPLOAD_BYTES.
    #[serde(default)]
    pub max_upload_bytes: Option<u64>,

    /// Log requests instead of sending them. Read from TG_UPLOADER_DRY_RUN.
    #[serde(default)]
    pub dry_run: Option<bool>,
}

impl AppConfig {
    /// Build from the process environment. `.env` must already be loaded (main does this).
    pub fn load() -> Result<Self, config::ConfigError> {
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("TG_UPLOADER").try_parsing(true));
        if let Ok(path) = std::env::var("TG_UPLOADER_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        let mut cfg: Self = c.build()?.try_deserialize()?;
        // BOT_TOKEN / CHAT_ID are read directly (no prefix) so hosting dashboards can use the plain names
        if let Ok(token) = std::env::var("BOT_TOKEN") {
            cfg.bot_token = Some(token);
        }
        if let Ok(chat_id) = std::env::var("CHAT_ID") {
            cfg.chat_id = Some(chat_id);
        }
        Ok(cfg)
    }

    /// Credentials as loaded. Unset values become empty strings; callers validate.
    pub fn credentials(&self) -> BotCredentials {
        BotCredentials::new(
            self.bot_token.clone().unwrap_or_default(),
            self.chat_id.clone().unwrap_or_default(),
        )
    }

    /// Returns the scratch directory. Defaults to "downloads".
    pub fn download_dir_or_default(&self) -> String {
        self.download_dir
            .clone()
            .unwrap_or_else(|| DEFAULT_DOWNLOAD_DIR.to_string())
    }

    /// Returns the Bot API base URL without a trailing slash.
    pub fn api_base_url_or_default(&self) -> String {
        self.api_base_url
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_string()
    }

    /// Returns the request timeout in seconds. Defaults to 30; zero is treated as unset.
    pub fn request_timeout_secs_or_default(&self) -> u64 {
        self.request_timeout_secs
            .filter(|&s| s > 0)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
    }

    /// Returns the maximum upload size in bytes. Defaults to 50 MiB.
    pub fn max_upload_bytes_or_default(&self) -> u64 {
        self.max_upload_bytes.unwrap_or(DEFAULT_MAX_UPLOAD_BYTES)
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.download_dir_or_default(), "downloads");
        assert_eq!(cfg.api_base_url_or_default(), "https://api.telegram.org");
        assert_eq!(cfg.request_timeout_secs_or_default(), 30);
        assert_eq!(cfg.max_upload_bytes_or_default(), 52_428_800);
        assert!(!cfg.is_dry_run());
        assert!(!cfg.credentials().is_complete());
    }

    #[test]
    fn test_overrides() {
        let cfg = AppConfig {
            bot_token: Some("123:abc".into()),
            chat_id: Some("-1001".into()),
            api_base_url: Some("http://localhost:8081/".into()),
            request_timeout_secs: Some(0),
            ..Default::default()
        };
        assert_eq!(cfg.api_base_url_or_default(), "http://localhost:8081");
        assert_eq!(cfg.request_timeout_secs_or_default(), 30);
        assert_eq!(cfg.credentials(), BotCredentials::new("123:abc", "-1001"));
    }
}
