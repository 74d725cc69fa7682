use std::time::Duration;

use anyhow::{Result, anyhow};
use reqwest::{Client, Url};
use serde_json::Value;

use crate::budget_sync::error::SyncError;
use crate::budget_sync::records::BudgetRecord;

/// Client for the spreadsheet-backed Web App that stores synced rows.
#[derive(Debug, Clone)]
pub struct SheetsWebApp {
    client: Client,
    endpoint: Url,
}

impl SheetsWebApp {
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow!("failed to build HTTP client: {}", e))?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Posts every record in one request and hands back the parsed JSON body
    /// the Web App answers with.
    pub async fn sync(&self, records: &[BudgetRecord]) -> Result<Value, SyncError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(records)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        let response = response.error_for_status().map_err(classify)?;

        let body = response.json::<Value>().await.map_err(classify)?;

        tracing::info!(%status, records = records.len(), "sheets sync completed");

        Ok(body)
    }
}

fn classify(err: reqwest::Error) -> SyncError {
    if err.is_decode() || err.is_builder() {
        tracing::error!(error = %err, "sheets sync failed unexpectedly");
        SyncError::Unexpected(err.to_string())
    } else {
        tracing::error!(error = %err, "sheets sync transport failure");
        SyncError::Transport(err.to_string())
    }
}
