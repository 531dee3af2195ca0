// Tutor Cascade - HTTP server entry point

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use tutor_cascade::models::settings::SettingsUpdate;
use tutor_cascade::storage::ConfigService;
use tutor_cascade::{serve, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config_service = ConfigService::new().context("failed to load configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config_service.get_config().log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let overrides = SettingsUpdate::from_env(config_service.get_config());
    if !overrides.is_empty() {
        config_service
            .apply_overrides(overrides)
            .context("invalid environment overrides")?;
    }
    tracing::info!(
        "[Main] Configuration loaded from {}",
        config_service.path().display()
    );

    let config = config_service.get_config().clone();
    if config.model.api_key.is_none() {
        tracing::warn!("[Main] No model API key configured; chat requests will fail");
    }

    let state = AppState::from_config(config)
        .context("failed to initialize services")?
        .into_shared();
    serve(state).await
}
