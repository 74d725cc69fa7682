pub mod coerce;
pub mod error;
pub mod operations;
pub mod processor;
pub mod processor_enums;
pub mod records;
