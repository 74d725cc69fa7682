use axum::{Json, extract::State, http::StatusCode};
use serde_json::Value;

use crate::{
    api::{
        error::ApiError,
        extractors::{ManualEntriesExtractor, UploadedFile},
    },
    budget_sync::processor_enums::{BudgetSyncProcessorInput, BudgetSyncProcessorOutput},
    utils::{app_config::AppConfig, traits::ActionProcessor},
};

/// POST /api/upload-file - Parse a CSV/Excel upload and sync its rows
pub async fn upload_file(
    State(app_config): State<AppConfig>,
    UploadedFile(upload): UploadedFile,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    tracing::info!(
        filename = %upload.filename,
        bytes = upload.contents.len(),
        "received budget upload"
    );

    let action = BudgetSyncProcessorInput::UploadFile(upload);

    match action
        .process(&app_config)
        .await
        .map_err(ApiError::from_upload_failure)?
    {
        BudgetSyncProcessorOutput::Synced(body) => Ok((StatusCode::OK, Json(body))),
    }
}

/// POST /api/manual-sync - Sync manually entered rows
pub async fn manual_sync(
    State(app_config): State<AppConfig>,
    ManualEntriesExtractor(items): ManualEntriesExtractor,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    tracing::info!(items = items.len(), "received manual budget entries");

    let action = BudgetSyncProcessorInput::ManualSync(items);

    match action
        .process(&app_config)
        .await
        .map_err(ApiError::from_manual_sync_failure)?
    {
        BudgetSyncProcessorOutput::Synced(body) => Ok((StatusCode::OK, Json(body))),
    }
}
