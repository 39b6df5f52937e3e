pub mod batch_log;
pub mod driver;
pub mod error;
pub mod executor;
pub mod progress;
