//! Mining configuration, optionally loaded from a TOML file.
//!
//! ```toml
//! max_chain_length = 40
//! max_prose_size_to_consider = 10
//!
//! [recommendation]
//! min_average_words = 2.0
//!
//! [logging]
//! level = "debug"
//! ```
//!
//! Every key is optional; missing keys take their defaults.

use crate::error::{Error, Result};
use crate::ledger::RecommendationPolicy;
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_MAX_CHAIN_LENGTH: usize = 20;
pub const DEFAULT_MAX_PROSE_SIZE: usize = crate::abstraction::DEFAULT_MAX_PROSE_SIZE;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MiningConfig {
    /// Most consecutive utterances folded into one window
    pub max_chain_length: usize,
    /// Exclusive bound on the phrase length tried during prose generalization
    pub max_prose_size_to_consider: usize,
    #[serde(rename = "recommendation")]
    pub policy: RecommendationPolicy,
    pub logging: LoggingConfig,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            max_chain_length: DEFAULT_MAX_CHAIN_LENGTH,
            max_prose_size_to_consider: DEFAULT_MAX_PROSE_SIZE,
            policy: RecommendationPolicy::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}

impl MiningConfig {
    pub fn with_max_chain_length(mut self, max_chain_length: usize) -> Self {
        self.max_chain_length = max_chain_length;
        self
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: MiningConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_chain_length == 0 {
            return Err(Error::Config("max_chain_length must be at least 1".into()));
        }
        if self.max_prose_size_to_consider == 0 {
            return Err(Error::Config("max_prose_size_to_consider must be at least 1".into()));
        }
        Ok(())
    }
}
