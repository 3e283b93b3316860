use crate::error::{CrmError, Result};
use crate::store::fs_backend::DEFAULT_STORE_FILE;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
pub const HOME_ENV: &str = "DENTCRM_HOME";

/// Configuration for dentcrm, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CrmConfig {
    /// Name of the persisted store file inside the data directory
    #[serde(default = "default_store_file")]
    pub store_file: String,

    /// Pretty-print the persisted JSON
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_store_file() -> String {
    DEFAULT_STORE_FILE.to_string()
}

fn default_pretty() -> bool {
    true
}

impl Default for CrmConfig {
    fn default() -> Self {
        Self {
            store_file: default_store_file(),
            pretty: default_pretty(),
        }
    }
}

impl CrmConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(CrmError::Io)?;
        serde_json::from_str(&content).map_err(|e| {
            CrmError::Config(format!("{} is invalid: {}", config_path.display(), e))
        })
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(CrmError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content).map_err(CrmError::Io)?;
        Ok(())
    }
}

/// Picks the data directory: explicit override, then `DENTCRM_HOME`, then the platform
/// data dir.
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "dentcrm", "dentcrm")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| CrmError::Config("Could not determine a data directory".to_string()))
}
