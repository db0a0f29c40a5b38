//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::config::{DEFAULT_CURRENCY_SYMBOL, DEFAULT_PERIOD_COUNT};
use crate::Config;
use std::num::NonZeroU32;
use tempfile::TempDir;

/// Test environment with a freshly initialized roast home directory.
/// Holds TempDir to keep the directory alive for the duration of the test.
pub struct TestEnv {
    _temp_dir: TempDir,
    config: Config,
}

impl TestEnv {
    /// Creates a roast home with the default settings.
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("roast");
        let config = Config::create(
            &root,
            DEFAULT_CURRENCY_SYMBOL,
            NonZeroU32::new(DEFAULT_PERIOD_COUNT).unwrap(),
            None,
        )
        .await
        .unwrap();

        Self {
            _temp_dir: temp_dir,
            config,
        }
    }

    /// Returns a clone of the Config.
    pub fn config(&self) -> Config {
        self.config.clone()
    }
}
