//! Board configuration loaded with figment
//!
//! Sources, later overriding earlier:
//! 1. Built-in defaults
//! 2. `laneboard.toml` (an explicit path, or the working directory)
//! 3. `LANEBOARD_*` environment variables (e.g. `LANEBOARD_STORAGE_KEY`)

use crate::context::DEFAULT_MAX_ACTIVITY_ENTRIES;
use crate::error::{BoardError, Result};
use crate::persistence::{DEFAULT_COLUMNS, DEFAULT_STORAGE_KEY};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "laneboard.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "LANEBOARD_";

const DATA_DIR_NAME: &str = "laneboard";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BoardConfig {
    /// Directory holding the stored board documents
    pub storage_dir: PathBuf,
    /// Key the board document is stored under
    pub storage_key: String,
    /// Column titles for a fresh board
    pub default_columns: Vec<String>,
    /// Name recorded on activity entries
    pub actor: Option<String>,
    /// How many activity entries to keep, in memory and in `activity.jsonl`
    pub max_activity_entries: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            storage_dir: default_storage_dir(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            default_columns: DEFAULT_COLUMNS.iter().map(|s| s.to_string()).collect(),
            actor: None,
            max_activity_entries: DEFAULT_MAX_ACTIVITY_ENTRIES,
        }
    }
}

impl BoardConfig {
    /// Load from defaults, `./laneboard.toml` and the environment
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load using `file` instead of `./laneboard.toml` when given
    pub fn load_from(file: Option<&Path>) -> Result<Self> {
        let file = file
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
        debug!(file = %file.display(), "loading configuration");

        let config: Self = Self::figment(&file)
            .extract()
            .map_err(|e| BoardError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn figment(file: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    fn validate(&self) -> Result<()> {
        if self.storage_key.trim().is_empty() {
            return Err(BoardError::config("storage_key must not be empty"));
        }
        if self.default_columns.iter().any(|t| t.trim().is_empty()) {
            return Err(BoardError::config("default_columns must not contain blank titles"));
        }
        Ok(())
    }
}

fn default_storage_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_DIR_NAME)
}
