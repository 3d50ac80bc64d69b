//! Directory configuration.

use serde::Deserialize;

use usergroups_core::{DirectoryError, DirectoryResult};

/// Environment variable read by [`DirectoryConfig::from_env`].
pub const PURGE_INTERVAL_ENV: &str = "USERGROUPS_PURGE_INTERVAL";

/// Purge interval used when none is configured.
pub const DEFAULT_PURGE_INTERVAL: u64 = 1024;

/// Tuning knobs for the in-memory directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DirectoryConfig {
    /// Number of successful membership mutations between automatic purges of
    /// pairs tied to retired generations.
    ///
    /// Defaults to [`DEFAULT_PURGE_INTERVAL`]. An explicit `None` (`null` in
    /// JSON) or `Some(0)` opts out: orphaned pairs then stay in memory,
    /// unobservable, until `purge_retired` is called.
    pub purge_interval: Option<u64>,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            purge_interval: Some(DEFAULT_PURGE_INTERVAL),
        }
    }
}

impl DirectoryConfig {
    /// Parse a JSON document such as `{"purge_interval": 128}`.
    pub fn from_json(raw: &str) -> DirectoryResult<Self> {
        serde_json::from_str(raw)
            .map_err(|e| DirectoryError::validation(format!("invalid directory config: {e}")))
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> DirectoryResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> DirectoryResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let purge_interval = match lookup(PURGE_INTERVAL_ENV) {
            None => Some(DEFAULT_PURGE_INTERVAL),
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|e| {
                DirectoryError::validation(format!("{PURGE_INTERVAL_ENV}='{raw}': {e}"))
            })?),
        };

        Ok(Self { purge_interval })
    }

    /// Effective purge interval, with `0` treated as disabled.
    pub fn effective_purge_interval(&self) -> Option<u64> {
        self.purge_interval.filter(|n| *n > 0)
    }
}
