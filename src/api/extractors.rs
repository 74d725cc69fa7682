use axum::{
    Json, async_trait,
    extract::{FromRequest, Multipart, Request, multipart::MultipartError},
    http::StatusCode,
};

use crate::api::error::ApiError;
use crate::budget_sync::processor_enums::UploadFileInputArgs;
use crate::budget_sync::records::ManualEntry;

/// Name of the multipart field carrying the uploaded file.
pub const FILE_FIELD: &str = "file";

/// Pulls the `file` part out of a multipart form.
pub struct UploadedFile(pub UploadFileInputArgs);

#[async_trait]
impl<S> FromRequest<S> for UploadedFile
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Expected a multipart form: {}", e)))?;

        while let Some(field) = multipart.next_field().await.map_err(upload_read_error)? {
            if field.name() != Some(FILE_FIELD) {
                continue;
            }

            let filename = field.file_name().unwrap_or_default().to_string();
            let contents = field.bytes().await.map_err(upload_read_error)?;

            return Ok(UploadedFile(UploadFileInputArgs {
                filename,
                contents: contents.to_vec(),
            }));
        }

        Err(ApiError::bad_request("Missing multipart field 'file'"))
    }
}

// Body-limit overruns come back from multer as read errors tagged 413.
fn upload_read_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        tracing::warn!(error = %err, "upload exceeds body limit");
        ApiError::payload_too_large(format!("Upload too large: {}", err))
    } else {
        ApiError::bad_request(format!("Failed to read upload: {}", err))
    }
}

/// JSON array of manually entered rows.
pub struct ManualEntriesExtractor(pub Vec<ManualEntry>);

#[async_trait]
impl<S> FromRequest<S> for ManualEntriesExtractor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(items) = Json::<Vec<ManualEntry>>::from_request(req, state)
            .await
            .map_err(|e| ApiError::unprocessable(format!("Failed to parse JSON: {}", e)))?;

        Ok(ManualEntriesExtractor(items))
    }
}
