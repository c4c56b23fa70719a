pub mod app_config;
pub mod catalog;
pub mod ledger;
pub mod loader;
pub mod record;

pub use catalog::load_catalog;
pub use ledger::{load_ledger, ReservationFile};
pub use loader::{LoadReport, LoadWarning};
pub use record::{LedgerLayout, LedgerRecord, RecordError};

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type StoreResult<T> = Result<T, StoreError>;
