use anyhow::{Result, anyhow};
use axum::http::HeaderValue;
use clap::Parser;
use reqwest::Url;

pub const DEFAULT_ALLOWED_ORIGIN: &str = "https://vue-fastapi-budgettargets.onrender.com";

#[derive(Parser, Debug, Clone)]
#[command(name = "budget-sync-relay", about = "Relays budget rows to a spreadsheet Web App")]
pub struct ApiConfig {
    /// Spreadsheet Web App endpoint that receives synced rows
    #[clap(long, env = "APP_SCRIPT_URL")]
    pub app_script_url: String,
    /// The single browser origin allowed to call the API
    #[clap(long, env = "ALLOWED_ORIGIN", default_value = DEFAULT_ALLOWED_ORIGIN)]
    pub allowed_origin: String,
    #[clap(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,
    /// Whole-request timeout for the outbound sync call
    #[clap(long, env = "SYNC_TIMEOUT_SECS", default_value_t = 30)]
    pub sync_timeout_secs: u64,
    #[clap(long, env = "MAX_UPLOAD_BYTES", default_value_t = 10 * 1024 * 1024)]
    pub max_upload_bytes: usize,
}

impl ApiConfig {
    /// Reads the configuration and refuses to start without a usable
    /// Web App endpoint.
    pub fn from_env() -> Result<Self> {
        let config = Self::try_parse().map_err(|e| anyhow!(e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.app_script_endpoint()?;
        self.allowed_origin_header()?;
        if self.sync_timeout_secs == 0 {
            return Err(anyhow!("SYNC_TIMEOUT_SECS must be greater than zero"));
        }
        Ok(())
    }

    pub fn app_script_endpoint(&self) -> Result<Url> {
        let raw = self.app_script_url.trim();
        if raw.is_empty() {
            return Err(anyhow!("APP_SCRIPT_URL environment variable is not set."));
        }

        let url = Url::parse(raw).map_err(|e| anyhow!("APP_SCRIPT_URL is not a valid URL: {}", e))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(anyhow!("APP_SCRIPT_URL must use http or https, got '{}'", other)),
        }
    }

    pub fn allowed_origin_header(&self) -> Result<HeaderValue> {
        HeaderValue::from_str(self.allowed_origin.trim())
            .map_err(|e| anyhow!("ALLOWED_ORIGIN is not a valid origin: {}", e))
    }
}
