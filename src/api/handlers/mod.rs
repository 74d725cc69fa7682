pub mod budget_sync;
pub mod health;
