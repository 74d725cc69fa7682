use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::budget_sync::error::SyncError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    UnprocessableEntity(String),
    PayloadTooLarge(String),
    InternalError(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn unprocessable(msg: impl Into<String>) -> Self {
        Self::UnprocessableEntity(msg.into())
    }

    pub fn payload_too_large(msg: impl Into<String>) -> Self {
        Self::PayloadTooLarge(msg.into())
    }

    pub fn internal_error(msg: impl Into<String>) -> Self {
        Self::InternalError(msg.into())
    }

    /// Upload failures: an unsupported extension or missing header columns
    /// is the caller's fault (400), everything else is a 500.
    pub fn from_upload_failure(err: anyhow::Error) -> Self {
        match err.downcast_ref::<SyncError>() {
            Some(sync_err)
                if matches!(
                    sync_err,
                    SyncError::UnsupportedFormat(_) | SyncError::MissingColumns { .. }
                ) =>
            {
                tracing::warn!(error = %sync_err, "rejected upload");
                Self::bad_request(sync_err.to_string())
            }
            _ => {
                log_failure(&err);
                Self::internal_error(format!("File processing failed: {}", err))
            }
        }
    }

    /// Manual sync failures always surface as a 500.
    pub fn from_manual_sync_failure(err: anyhow::Error) -> Self {
        log_failure(&err);
        Self::internal_error(format!("Manual data synchronization failed: {}", err))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::UnprocessableEntity(msg) => msg,
            ApiError::PayloadTooLarge(msg) => msg,
            ApiError::InternalError(msg) => msg,
        }
    }
}

fn log_failure(err: &anyhow::Error) {
    match err.downcast_ref::<SyncError>() {
        Some(sync_err) if sync_err.is_client_input() => {
            tracing::warn!(error = %sync_err, "rejected budget rows")
        }
        _ => tracing::error!(error = %err, "budget sync failed"),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = json!({ "detail": self.message() });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_upload_client_errors_are_bad_requests() {
        let err = ApiError::from_upload_failure(SyncError::UnsupportedFormat("a.txt".into()).into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = ApiError::from_upload_failure(
            SyncError::MissingColumns {
                required: vec!["Year".into()],
                missing: vec!["Year".into()],
            }
            .into(),
        );
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_upload_other_errors_are_internal() {
        let err = ApiError::from_upload_failure(SyncError::Transport("refused".into()).into());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.message(),
            "File processing failed: Failed to send data to Google App Script: refused"
        );

        let err = ApiError::from_upload_failure(anyhow!("boom"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_manual_sync_never_returns_bad_request() {
        let err = ApiError::from_manual_sync_failure(
            SyncError::Transport("connection refused".into()).into(),
        );
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message().starts_with("Manual data synchronization failed: "));
    }

    #[test]
    fn test_payload_too_large_status() {
        let err = ApiError::payload_too_large("Upload too large");
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
