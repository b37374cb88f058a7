use crate::comments::Language;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read config '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

const LOCAL_CONFIG: &str = ".gitcontrib.json";
const APP_DIR: &str = "gitcontrib";
const USER_CONFIG: &str = "config.json";

pub const DEFAULT_OUTPUT_DIR: &str = "author_contributions";
pub const DEFAULT_EXTENSION: &str = "rb";
pub const DEFAULT_VCS: &str = "git";

/// Settings read from a JSON config file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Raw blame identity -> display name, on top of the built-in table
    pub aliases: HashMap<String, String>,
    pub comments: Option<Language>,
    pub output_dir: Option<PathBuf>,
    pub extension: Option<String>,
    pub vcs: Option<String>,
}

impl Config {
    /// Load the first config found
    ///
    /// An explicit path must exist. Otherwise `./.gitcontrib.json` is tried,
    /// then `<config dir>/gitcontrib/config.json`, then defaults are used.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::from_file(path);
        }

        let local = PathBuf::from(LOCAL_CONFIG);
        if local.is_file() {
            return Self::from_file(&local);
        }

        if let Some(user) = user_config_path() {
            if user.is_file() {
                return Self::from_file(&user);
            }
        }

        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(USER_CONFIG))
}
