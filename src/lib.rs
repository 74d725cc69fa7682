// Public library interface for budget-sync-relay
pub mod api;
pub mod budget_sync;
pub mod sheets;
pub mod utils;
