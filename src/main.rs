//! Wiring & DI. Entry point: load config, bootstrap adapters, inject into services, run UI.
//! No business logic here; the relay flow lives in RelayService.

use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tg_uploader::adapters::persistence::FsScratch;
use tg_uploader::adapters::telegram::{BotApiGateway, DryRunGateway};
use tg_uploader::adapters::ui::tui::{TuiInputPort, config_status_lines, print_lines, refusal_lines};
use tg_uploader::ports::{BotGateway, InputPort};
use tg_uploader::shared::config::AppConfig;
use tg_uploader::usecases::RelayService;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    tg_uploader::adapters::ui::init_ui();

    let cfg = AppConfig::load().map_err(|e| anyhow::anyhow!("load configuration: {}", e))?;

    let scratch = FsScratch::new(cfg.download_dir_or_default());
    scratch
        .ensure_dir()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    let scratch_abs = scratch
        .base_dir()
        .canonicalize()
        .unwrap_or_else(|_| scratch.base_dir().to_path_buf());
    info!(path = %scratch_abs.display(), "scratch directory ready");

    // Loaded once; passed by reference into every relay call.
    let credentials = Arc::new(cfg.credentials());
    if let Err(e) = credentials.validate() {
        print_lines(&config_status_lines(&credentials));
        print_lines(&refusal_lines(&e));
        anyhow::bail!("{}", e);
    }

    let timeout_secs = cfg.request_timeout_secs_or_default();
    let gateway: Arc<dyn BotGateway> = if cfg.is_dry_run() {
        warn!("TG_UPLOADER_DRY_RUN is set, documents will not be sent");
        Arc::new(DryRunGateway::new())
    } else {
        info!(
            url = %cfg.api_base_url_or_default(),
            timeout_secs,
            "Telegram Bot API gateway enabled"
        );
        Arc::new(
            BotApiGateway::new(
                cfg.api_base_url_or_default(),
                Duration::from_secs(timeout_secs),
            )
            .map_err(|e| anyhow::anyhow!("{}", e))?,
        )
    };

    let relay_service = Arc::new(RelayService::new(
        gateway,
        Arc::new(scratch),
        cfg.max_upload_bytes_or_default(),
    ));

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(relay_service, credentials));

    // --- Run (menu -> upload / status / exit) ---
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
