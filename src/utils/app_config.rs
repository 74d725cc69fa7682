use std::time::Duration;

use anyhow::Result;

use crate::api::config::ApiConfig;
use crate::sheets::SheetsWebApp;

/// Shared request state. Cheap to clone: the HTTP client is reference
/// counted internally.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub sheets: SheetsWebApp,
}

impl AppConfig {
    pub fn new(sheets: SheetsWebApp) -> Self {
        Self { sheets }
    }

    pub fn from_api_config(api_config: &ApiConfig) -> Result<Self> {
        let endpoint = api_config.app_script_endpoint()?;
        let sheets = SheetsWebApp::new(
            endpoint,
            Duration::from_secs(api_config.sync_timeout_secs),
        )?;

        Ok(Self::new(sheets))
    }
}
