use thiserror::Error;

/// Failures raised while turning an upload or manual entry into budget
/// records and forwarding them to the spreadsheet Web App.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The filename extension is not one of csv, xlsx or xls.
    #[error("Unsupported file type '{0}'. Please upload a .csv or .xlsx file.")]
    UnsupportedFormat(String),

    /// One or more of the required header columns is absent.
    #[error(
        "Missing required columns. Please check your file headers. Required: {}. Missing: {}",
        required.join(", "),
        missing.join(", ")
    )]
    MissingColumns {
        required: Vec<String>,
        missing: Vec<String>,
    },

    /// A cell could not be cast to the type of its column.
    #[error("row {row}: cannot convert {column} value '{value}' to {target}")]
    TypeCoercion {
        row: usize,
        column: String,
        value: String,
        target: &'static str,
    },

    /// The file content could not be read as the format its extension claims.
    #[error("could not read {format} content: {reason}")]
    MalformedFile { format: &'static str, reason: String },

    /// Network failure, timeout or a non-2xx status from the Web App.
    #[error("Failed to send data to Google App Script: {0}")]
    Transport(String),

    /// Anything else that went wrong around the outbound call.
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl SyncError {
    /// Whether the failure was caused by the caller's input rather than by
    /// the outbound call.
    pub fn is_client_input(&self) -> bool {
        matches!(
            self,
            SyncError::UnsupportedFormat(_)
                | SyncError::MissingColumns { .. }
                | SyncError::TypeCoercion { .. }
                | SyncError::MalformedFile { .. }
        )
    }
}
