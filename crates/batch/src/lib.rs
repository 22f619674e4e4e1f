pub mod checkpoint;
pub mod config;
pub mod driver;
pub mod error_log;

pub use checkpoint::CheckpointStore;
pub use config::{default_output_path, error_log_path, BatchConfig, DEFAULT_CHECKPOINT_INTERVAL};
pub use driver::{BatchDriver, RunSummary};
pub use error_log::{ErrorEntry, ErrorKind, ErrorLog};
