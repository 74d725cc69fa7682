use crate::budget_sync::operations::{ingest_file, ingest_manual};
use crate::budget_sync::processor_enums::{
    BudgetSyncProcessorInput, BudgetSyncProcessorOutput,
};
use crate::utils::app_config::AppConfig;
use crate::utils::traits::ActionProcessor;

impl ActionProcessor<BudgetSyncProcessorOutput> for BudgetSyncProcessorInput {
    async fn process(&self, app_config: &AppConfig) -> anyhow::Result<BudgetSyncProcessorOutput> {
        let records = match self {
            BudgetSyncProcessorInput::UploadFile(upload) => {
                ingest_file(&upload.contents, &upload.filename)?
            }
            BudgetSyncProcessorInput::ManualSync(items) => ingest_manual(items),
        };

        tracing::info!(records = records.len(), "forwarding budget records");

        let response = app_config.sheets.sync(&records).await?;
        Ok(BudgetSyncProcessorOutput::Synced(response))
    }
}
