use std::env;

use budget_sync_relay::{
    api::{self, config::ApiConfig},
    utils::app_config::AppConfig,
};
use dotenvy::dotenv;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenv();
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            env::var("RUST_LOG")
                .unwrap_or_else(|_| "info".to_string())
                .as_str(),
        )
        .init();

    // Refuse to start without a usable Web App endpoint
    let api_config = ApiConfig::from_env().inspect_err(|e| {
        tracing::error!("Invalid configuration: {}", e);
    })?;
    tracing::info!("API configuration loaded successfully");

    let app_config = AppConfig::from_api_config(&api_config)?;
    tracing::info!(
        host = app_config.sheets.endpoint().host_str().unwrap_or_default(),
        timeout_secs = api_config.sync_timeout_secs,
        "Sheets client ready"
    );

    let router = api::router(app_config, &api_config)?;

    let addr = format!("0.0.0.0:{}", api_config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        "Starting budget sync relay on {} (allowed origin {})",
        addr,
        api_config.allowed_origin
    );

    axum::serve(listener, router).await?;

    Ok(())
}
