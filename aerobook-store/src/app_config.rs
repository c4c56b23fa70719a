use std::env;
use std::path::{Path, PathBuf};

use aerobook_core::MissingPolicy;
use serde::Deserialize;

use crate::record::LedgerLayout;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub files: FilesConfig,
    pub ledger: LedgerConfig,
    pub repository: RepositoryConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FilesConfig {
    pub catalog: PathBuf,
    pub reservations: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LedgerConfig {
    #[serde(default)]
    pub layout: LedgerLayout,
    /// Re-apply reservations already in the file on startup
    #[serde(default = "default_replay")]
    pub replay: bool,
}

fn default_replay() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
pub struct RepositoryConfig {
    #[serde(default)]
    pub missing_policy: MissingPolicy,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Config {
    /// Load configuration from `./config`, layered the same way as
    /// [`Config::load_from`].
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Path::new("config"))
    }

    pub fn load_from(dir: &Path) -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .set_default("files.catalog", "flights.txt")?
            .set_default("files.reservations", "passengers.txt")?
            .set_default("ledger.layout", "reservation")?
            .set_default("ledger.replay", true)?
            .set_default("repository.missing_policy", "strict")?
            .set_default("logging.filter", "aerobook=info")?
            // Every file layer is optional; the defaults above are enough to run
            .add_source(config::File::from(dir.join("default")).required(false))
            .add_source(config::File::from(dir.join(&run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::from(dir.join("local")).required(false))
            // Eg.. `AEROBOOK_FILES__CATALOG=data/flights.txt`
            .add_source(
                config::Environment::with_prefix("AEROBOOK")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(dir.path()).unwrap();

        assert_eq!(config.files.catalog, PathBuf::from("flights.txt"));
        assert_eq!(config.files.reservations, PathBuf::from("passengers.txt"));
        assert_eq!(config.ledger.layout, LedgerLayout::Reservation);
        assert!(config.ledger.replay);
        assert_eq!(config.repository.missing_policy, MissingPolicy::Strict);
        assert_eq!(config.logging.filter, "aerobook=info");
    }

    #[test]
    fn test_default_file_overrides() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("default.toml"),
            r#"
[files]
catalog = "data/catalog.csv"

[ledger]
layout = "passenger"
replay = false

[repository]
missing_policy = "lenient"
"#,
        )
        .unwrap();

        let config = Config::load_from(dir.path()).unwrap();
        assert_eq!(config.files.catalog, PathBuf::from("data/catalog.csv"));
        assert_eq!(config.files.reservations, PathBuf::from("passengers.txt"));
        assert_eq!(config.ledger.layout, LedgerLayout::Passenger);
        assert!(!config.ledger.replay);
        assert_eq!(config.repository.missing_policy, MissingPolicy::Lenient);
    }
}
