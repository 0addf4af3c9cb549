//! Session configuration.
//!
//! A [`Config`] is built in code with [`Config::builder`] or read from TOML;
//! missing keys take their defaults. Values are validated once, before an
//! [`Engine`](crate::Engine) is created from them.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::Error;

/// Upper limit on replications per run.
pub const MAX_REPLICATIONS: usize = 100_000_000;

/// Upper limit on chunks of a chunked run.
pub const MAX_CHUNKS: usize = 4_096;

/// Failure to load or validate a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read configuration: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid TOML for a [`Config`].
    #[error("cannot parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value violates its constraint.
    #[error("invalid configuration: {0}")]
    Invalid(#[from] Error),
}

/// Parameters of a simulation session.
///
/// ```toml
/// seed = 2024
/// replications = 100000
/// chunks = 8
/// categories = 365
/// tolerance = 0.01
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub(crate) seed: u64,
    pub(crate) replications: usize,
    pub(crate) chunks: usize,
    pub(crate) categories: usize,
    pub(crate) tolerance: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: 1,
            replications: 10_000,
            chunks: 1,
            categories: 365,
            tolerance: 0.02,
        }
    }
}

impl Config {
    /// Builder starting from the defaults.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Parses and validates TOML text.
    ///
    /// # Errors
    /// [`ConfigError::Parse`] for malformed TOML or unknown keys,
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    /// [`ConfigError::Io`] when the file cannot be read, otherwise as
    /// [`Config::from_toml_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Master seed of the session.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Default replication count `B`.
    #[inline]
    pub fn replications(&self) -> usize {
        self.replications
    }

    /// Chunks for chunked replication.
    #[inline]
    pub fn chunks(&self) -> usize {
        self.chunks
    }

    /// Category count for collision problems (days in a year).
    #[inline]
    pub fn categories(&self) -> usize {
        self.categories
    }

    /// Acceptable gap between simulated and exact values.
    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Checks every value against its range.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] naming the first offending key.
    pub fn validate(&self) -> Result<(), Error> {
        if self.replications == 0 || self.replications > MAX_REPLICATIONS {
            return Err(Error::invalid(format!(
                "replications must lie in [1, {MAX_REPLICATIONS}], got {}",
                self.replications
            )));
        }
        if self.chunks == 0 || self.chunks > MAX_CHUNKS {
            return Err(Error::invalid(format!(
                "chunks must lie in [1, {MAX_CHUNKS}], got {}",
                self.chunks
            )));
        }
        if self.categories == 0 {
            return Err(Error::invalid("categories must be positive, got 0"));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(Error::invalid(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

/// Fluent builder for [`Config`].
#[derive(Clone, Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Sets the master seed.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Sets the replication count.
    #[must_use]
    pub fn replications(mut self, replications: usize) -> Self {
        self.config.replications = replications;
        self
    }

    /// Sets the chunk count.
    #[must_use]
    pub fn chunks(mut self, chunks: usize) -> Self {
        self.config.chunks = chunks;
        self
    }

    /// Sets the category count.
    #[must_use]
    pub fn categories(mut self, categories: usize) -> Self {
        self.config.categories = categories;
        self
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.config.tolerance = tolerance;
        self
    }

    /// Validates and returns the configuration.
    ///
    /// # Errors
    /// See [`Config::validate`].
    pub fn build(self) -> Result<Config, Error> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.categories(), 365);
    }

    #[test]
    fn toml_overrides_some_keys() {
        let config = Config::from_toml_str("seed = 7\nchunks = 4\n").unwrap();
        assert_eq!(config.seed(), 7);
        assert_eq!(config.chunks(), 4);
        assert_eq!(config.replications(), 10_000);
    }

    #[test]
    fn unknown_key_and_bad_values() {
        assert!(matches!(Config::from_toml_str("sede = 1"), Err(ConfigError::Parse(_))));
        assert!(matches!(
            Config::from_toml_str("replications = 0"),
            Err(ConfigError::Invalid(Error::InvalidArgument(_)))
        ));
        assert!(Config::builder().tolerance(-1.0).build().is_err());
    }

    #[test]
    fn builder_and_round_trip() {
        let config = Config::builder().seed(99).replications(500).build().unwrap();
        let text = toml::to_string(&config).unwrap();
        assert_eq!(Config::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            Config::from_path("/nonexistent/urna.toml"),
            Err(ConfigError::Io(_))
        ));
    }
}
