//! Implements InputPort. Inquire-based interactive prompts.
//!
//! Menu -> pick a file -> relay -> render status lines. One interaction at a time.

use crate::domain::{
    BotCredentials, DomainError, RelayOutcome, RelayReport, UploadPayload, mask_secret,
};
use crate::ports::InputPort;
use crate::usecases::RelayService;
use async_trait::async_trait;
use super::paint_lines;
use crossterm::style::Color;
use indicatif::{ProgressBar, ProgressStyle};
use inquire::{InquireError, Select, Text};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tracing::debug;

const MENU_UPLOAD: &str = "Upload a file";
const MENU_STATUS: &str = "Show configuration status";
const MENU_EXIT: &str = "Exit";

/// Severity of one rendered status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub level: Level,
    pub text: String,
}

impl StatusLine {
    fn new(level: Level, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

/// Applies the prompt theme for all subsequent inquire prompts.
pub fn apply_theme() {
    use inquire::ui::{Color as UiColor, RenderConfig, Styled};
    let accent = UiColor::Rgb {
        r: 0x22,
        g: 0x9e,
        b: 0xd9,
    };
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("›").with_fg(accent))
        .with_highlighted_option_prefix(Styled::new("➤").with_fg(accent));
    inquire::set_global_render_config(config);
}

/// Masked view of the credentials plus an overall verdict.
pub fn config_status_lines(credentials: &BotCredentials) -> Vec<StatusLine> {
    let verdict = if credentials.is_complete() {
        StatusLine::new(Level::Success, "✅ Configuration loaded successfully!")
    } else {
        StatusLine::new(Level::Error, "❌ Configuration missing")
    };
    vec![
        StatusLine::new(Level::Info, "🔧 Bot Configuration Status"),
        StatusLine::new(
            Level::Info,
            format!("Bot Token: {}", mask_secret(&credentials.bot_token)),
        ),
        StatusLine::new(
            Level::Info,
            format!("Chat ID: {}", mask_secret(&credentials.chat_id)),
        ),
        verdict,
    ]
}

/// Lines shown after a relay attempt that reached the network.
pub fn report_lines(report: &RelayReport) -> Vec<StatusLine> {
    let mut lines = vec![StatusLine::new(
        Level::Success,
        format!("✅ File saved locally: {}", report.scratch_path.display()),
    )];
    lines.push(match &report.outcome {
        RelayOutcome::Delivered => {
            StatusLine::new(Level::Success, "📨 File sent to Telegram successfully!")
        }
        RelayOutcome::Rejected { body, .. } => StatusLine::new(
            Level::Error,
            format!("❌ Failed to send file. Telegram API Response: {}", body),
        ),
        RelayOutcome::TimedOut => StatusLine::new(
            Level::Error,
            "❌ Request timeout: File too large or network issue",
        ),
        RelayOutcome::Failed { reason } => {
            StatusLine::new(Level::Error, format!("❌ Error sending file: {}", reason))
        }
    });
    if report.cleaned_up {
        lines.push(StatusLine::new(Level::Info, "🧹 Temporary file cleaned up"));
    }
    lines
}

/// Lines shown when the relay refused before sending.
pub fn refusal_lines(err: &DomainError) -> Vec<StatusLine> {
    match err {
        DomainError::ConfigMissing(_) => vec![
            StatusLine::new(Level::Error, format!("❌ {}", err)),
            StatusLine::new(
                Level::Info,
                "Set the BOT_TOKEN and CHAT_ID environment variables (or add them to .env)",
            ),
        ],
        other => vec![StatusLine::new(Level::Error, format!("❌ {}", other))],
    }
}

pub fn print_lines(lines: &[StatusLine]) {
    paint_lines(lines.iter().map(|line| {
        let color = match line.level {
            Level::Success => Color::Green,
            Level::Info => Color::Cyan,
            Level::Error => Color::Red,
        };
        (color, line.text.as_str())
    }));
}

/// Trim whitespace and the quotes terminals add on drag-and-drop. None for empty input.
pub fn parse_path_input(input: &str) -> Option<PathBuf> {
    let trimmed = input.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| trimmed.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
        .unwrap_or(trimmed);
    if unquoted.is_empty() {
        None
    } else {
        Some(PathBuf::from(unquoted))
    }
}

fn too_large(filename: &str, size: u64, max_bytes: u64) -> DomainError {
    DomainError::InvalidPayload(format!(
        "{} is {} bytes; the limit is {} bytes",
        filename, size, max_bytes
    ))
}

fn is_cancel(e: &InquireError) -> bool {
    matches!(
        e,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    relay: Arc<RelayService>,
    credentials: Arc<BotCredentials>,
}

impl TuiInputPort {
    pub fn new(relay: Arc<RelayService>, credentials: Arc<BotCredentials>) -> Self {
        Self { relay, credentials }
    }

    /// Read the chosen file into memory. The UI owns file picking; the relay only sees bytes.
    /// Size is checked from metadata first so oversized files are never loaded.
    async fn load_payload(path: &Path, max_bytes: u64) -> Result<UploadPayload, DomainError> {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| DomainError::InvalidPayload(format!("{} is not a file", path.display())))?;
        let meta = tokio::fs::metadata(path)
            .await
            .map_err(|e| DomainError::InvalidPayload(format!("read {}: {}", path.display(), e)))?;
        if !meta.is_file() {
            return Err(DomainError::InvalidPayload(format!(
                "{} is not a regular file",
                path.display()
            )));
        }
        if meta.len() > max_bytes {
            return Err(too_large(&filename, meta.len(), max_bytes));
        }

        let file = tokio::fs::File::open(path)
            .await
            .map_err(|e| DomainError::InvalidPayload(format!("read {}: {}", path.display(), e)))?;
        // File may have grown since the metadata call
        let mut bytes = Vec::with_capacity(meta.len() as usize);
        file.take(max_bytes.saturating_add(1))
            .read_to_end(&mut bytes)
            .await
            .map_err(|e| DomainError::InvalidPayload(format!("read {}: {}", path.display(), e)))?;
        if bytes.len() as u64 > max_bytes {
            return Err(too_large(&filename, bytes.len() as u64, max_bytes));
        }
        Ok(UploadPayload::new(filename, bytes))
    }

    /// One upload interaction. Every error ends here as status lines.
    async fn upload_once(&self) -> Result<(), DomainError> {
        let input = match Text::new("Choose a file to upload:")
            .with_help_message("Path to any file; empty input returns to the menu")
            .prompt()
        {
            Ok(s) => s,
            Err(e) if is_cancel(&e) => return Ok(()),
            Err(e) => return Err(DomainError::Ui(e.to_string())),
        };
        let Some(path) = parse_path_input(&input) else {
            return Ok(());
        };

        let payload = match Self::load_payload(&path, self.relay.max_upload_bytes()).await {
            Ok(p) => p,
            Err(e) => {
                print_lines(&refusal_lines(&e));
                return Ok(());
            }
        };
        debug!(filename = %payload.filename, bytes = payload.len(), "payload loaded");

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(format!("Sending {} to Telegram...", payload.filename));
        spinner.enable_steady_tick(Duration::from_millis(100));

        let result = self.relay.relay(&self.credentials, payload).await;
        spinner.finish_and_clear();

        match result {
            Ok(report) => print_lines(&report_lines(&report)),
            Err(e) => print_lines(&refusal_lines(&e)),
        }
        Ok(())
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        print_lines(&config_status_lines(&self.credentials));
        loop {
            let choice = match Select::new(
                "What would you like to do?",
                vec![MENU_UPLOAD, MENU_STATUS, MENU_EXIT],
            )
            .prompt()
            {
                Ok(c) => c,
                Err(e) if is_cancel(&e) => break,
                Err(e) => return Err(DomainError::Ui(e.to_string())),
            };

            match choice {
                MENU_UPLOAD => self.upload_once().await?,
                MENU_STATUS => print_lines(&config_status_lines(&self.credentials)),
                _ => break,
            }
        }
        Ok(())
    }
}
