//! Configuration types and parsing for playlake.yml

use crate::dedup::ConflictPolicy;
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default glob for catalog files, relative to the input base
pub const DEFAULT_SONG_PATTERN: &str = "song_data/*/*/*/*.json";

/// Default glob for event log files, relative to the input base
pub const DEFAULT_LOG_PATTERN: &str = "log_data/*/*/*.json";

/// Pipeline configuration from playlake.yml
///
/// Every field has a default, so an absent config file and an empty one
/// behave the same.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Where the raw record files live under the input base
    #[serde(default)]
    pub layout: InputLayout,

    /// Key conflict resolution per dimension
    #[serde(default)]
    pub policies: DimensionPolicies,
}

/// Glob patterns locating raw record files under the input base
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputLayout {
    /// Pattern matching catalog (song metadata) files
    #[serde(default = "default_song_pattern")]
    pub song_pattern: String,

    /// Pattern matching listening-event log files
    #[serde(default = "default_log_pattern")]
    pub log_pattern: String,
}

impl Default for InputLayout {
    fn default() -> Self {
        Self {
            song_pattern: default_song_pattern(),
            log_pattern: default_log_pattern(),
        }
    }
}

fn default_song_pattern() -> String {
    DEFAULT_SONG_PATTERN.to_string()
}

fn default_log_pattern() -> String {
    DEFAULT_LOG_PATTERN.to_string()
}

/// Conflict policy applied when deduplicating each dimension by key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DimensionPolicies {
    #[serde(default)]
    pub songs: ConflictPolicy,

    #[serde(default)]
    pub artists: ConflictPolicy,

    /// Users default to `last` so that `level` reflects the latest event
    #[serde(default = "default_users_policy")]
    pub users: ConflictPolicy,

    #[serde(default)]
    pub time: ConflictPolicy,
}

impl Default for DimensionPolicies {
    fn default() -> Self {
        Self {
            songs: ConflictPolicy::First,
            artists: ConflictPolicy::First,
            users: default_users_policy(),
            time: ConflictPolicy::First,
        }
    }
}

fn default_users_policy() -> ConflictPolicy {
    ConflictPolicy::Last
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from a YAML string
    pub fn from_yaml(content: &str) -> CoreResult<Self> {
        // An empty document deserializes as YAML null, not as an empty mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config =
            serde_yaml::from_str(content).map_err(|e| CoreError::ConfigParseError {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        for (field, pattern) in [
            ("layout.song_pattern", &self.layout.song_pattern),
            ("layout.log_pattern", &self.layout.log_pattern),
        ] {
            if pattern.trim().is_empty() {
                return Err(CoreError::ConfigInvalid {
                    message: format!("{field} cannot be empty"),
                });
            }
            if Path::new(pattern).is_absolute() {
                return Err(CoreError::ConfigInvalid {
                    message: format!(
                        "{field} must be relative to the input location, got '{pattern}'"
                    ),
                });
            }
            glob::Pattern::new(pattern).map_err(|e| CoreError::ConfigInvalid {
                message: format!("{field} is not a valid glob: {e}"),
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
