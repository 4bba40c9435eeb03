//! Per-step tick budgets for confirmation waits.
//!
//! Every mutating step the orchestrator issues is confirmed by a bounded
//! polling wait; these budgets say how many condition samples each step is
//! allowed before the call fails with a timeout. Defaults mirror observed
//! world latencies: opening the stash is slow (pathing plus interface),
//! equipping is fast.

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Tick budgets for the fulfillment engine's confirmation waits.
///
/// All budgets count condition samples (one per external tick, plus the
/// immediate first sample). A budget of 1 means "check once, never wait".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FulfillConfig {
    /// Samples allowed for the stash interface to open.
    #[serde(default = "default_stash_open_ticks")]
    pub stash_open_ticks: u64,

    /// Samples allowed for a worn item to land in Carried after removal.
    #[serde(default = "default_remove_worn_ticks")]
    pub remove_worn_ticks: u64,

    /// Samples allowed for a marketplace order batch to settle.
    #[serde(default = "default_purchase_settle_ticks")]
    pub purchase_settle_ticks: u64,

    /// Samples allowed for deposit-all to empty the carried store.
    #[serde(default = "default_deposit_ticks")]
    pub deposit_ticks: u64,

    /// Samples allowed for a withdrawal to reach its carried target.
    #[serde(default = "default_withdraw_ticks")]
    pub withdraw_ticks: u64,

    /// Samples allowed for an equip interaction to report Worn.
    #[serde(default = "default_equip_ticks")]
    pub equip_ticks: u64,
}

impl Default for FulfillConfig {
    fn default() -> Self {
        Self {
            stash_open_ticks: default_stash_open_ticks(),
            remove_worn_ticks: default_remove_worn_ticks(),
            purchase_settle_ticks: default_purchase_settle_ticks(),
            deposit_ticks: default_deposit_ticks(),
            withdraw_ticks: default_withdraw_ticks(),
            equip_ticks: default_equip_ticks(),
        }
    }
}

impl FulfillConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yml::from_str(&contents)?)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_stash_open_ticks() -> u64 {
    10
}

const fn default_remove_worn_ticks() -> u64 {
    8
}

const fn default_purchase_settle_ticks() -> u64 {
    25
}

const fn default_deposit_ticks() -> u64 {
    10
}

const fn default_withdraw_ticks() -> u64 {
    10
}

const fn default_equip_ticks() -> u64 {
    6
}
