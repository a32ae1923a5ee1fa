//! Configuration types for skillmig.
//!
//! [`Config::load`] layers, lowest priority first: the embedded defaults, an
//! optional TOML file, and `SKILLMIG_*` environment variables (nested keys
//! joined with `__`, e.g. `SKILLMIG_STORE__URI`). [`Config::defaults`]
//! returns the embedded defaults alone (useful in tests).

use serde::Deserialize;
use std::path::Path;

use crate::runner::FailurePolicy;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[store]
uri        = "mongodb://localhost:27017/"
database   = "badminton-club-management"
collection = "players"

[migration]
on_record_error = "abort"
"#;

const ENV_PREFIX: &str = "SKILLMIG";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    pub store: StoreConfig,
    #[serde(default)]
    pub migration: MigrationConfig,
}

/// `[store]` section: where the players live.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StoreConfig {
    /// Connection string, e.g. `mongodb://localhost:27017/`.
    pub uri: String,
    pub database: String,
    pub collection: String,
}

/// `[migration]` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MigrationConfig {
    #[serde(default)]
    pub on_record_error: FailurePolicy,
}

impl Config {
    /// Load the defaults, then `path` (which must exist if given), then the
    /// environment.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        Self::build(path, config::Environment::with_prefix(ENV_PREFIX))
    }

    /// Return the built-in defaults without touching the filesystem or env.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    fn build(path: Option<&Path>, env: config::Environment) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));
        if let Some(path) = path {
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(true),
            );
        }
        builder
            .add_source(env.prefix_separator("_").separator("__"))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
