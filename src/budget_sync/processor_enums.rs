use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::budget_sync::records::ManualEntry;

/// Raw upload as received from the multipart form.
#[derive(Debug, Clone)]
pub struct UploadFileInputArgs {
    pub filename: String,
    pub contents: Vec<u8>,
}

#[derive(Debug, Clone)]
pub enum BudgetSyncProcessorInput {
    UploadFile(UploadFileInputArgs),
    ManualSync(Vec<ManualEntry>),
}

#[derive(Deserialize, Serialize, Debug)]
pub enum BudgetSyncProcessorOutput {
    /// Parsed response body of the spreadsheet Web App.
    Synced(Value),
}
