// config.rs — Tracker configuration.
//
// TrackerConfig decides where state is stored and what the add form
// defaults to. `for_dir()` gives the built-in defaults for a data
// directory; `load()` overlays `<data_dir>/config.toml` when present.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::GoalError;
use crate::goal::DEFAULT_REWARD;

/// Name of the optional config file inside the data directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Resolved configuration for one tracker data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Directory holding the persisted keys.
    pub data_dir: PathBuf,

    /// Reward offered by the add form when none is given.
    pub default_reward: u32,

    /// JSONL activity log of goal events, if enabled.
    pub activity_log: Option<PathBuf>,
}

/// On-disk shape of `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default = "default_reward")]
    default_reward: u32,

    /// Relative paths are resolved against the data directory.
    #[serde(default)]
    activity_log: Option<PathBuf>,
}

fn default_reward() -> u32 {
    DEFAULT_REWARD
}

impl TrackerConfig {
    /// Built-in defaults for a data directory.
    pub fn for_dir(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            default_reward: DEFAULT_REWARD,
            activity_log: None,
        }
    }

    /// Defaults for `data_dir`, overridden by its `config.toml` if one exists.
    pub fn load(data_dir: impl AsRef<Path>) -> Result<Self, GoalError> {
        let mut config = Self::for_dir(data_dir);
        let path = config.config_path();
        if !path.exists() {
            return Ok(config);
        }

        let content = fs::read_to_string(&path).map_err(|source| GoalError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        let file: ConfigFile = toml::from_str(&content)
            .map_err(|e| GoalError::ConfigError(format!("{}: {}", path.display(), e)))?;

        if file.default_reward == 0 {
            return Err(GoalError::ConfigError(format!(
                "{}: default_reward must be at least 1",
                path.display()
            )));
        }

        config.default_reward = file.default_reward;
        config.activity_log = file.activity_log.map(|log| {
            if log.is_absolute() {
                log
            } else {
                config.data_dir.join(log)
            }
        });
        Ok(config)
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE)
    }
}
