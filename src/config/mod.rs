//! Configuration management module.
//!
//! This module handles loading the application configuration: the content
//! base URL, the emblem asset path, and the debug-console toggle. The core
//! persists nothing, so configuration is load-only.

mod error;

pub use error::ConfigError;

use crate::error::AppError;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/emblem-stage";

const DEFAULT_BASE_URL: &str = "https://yingxun.li/content";
const DEFAULT_EMBLEM_ASSET: &str = "models/emblem.glb";

/// Oversees the loaded configuration values.
///
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub emblem_asset: String,
    pub debug_console: bool,
}

/// Define specification for configuration file.
///
#[derive(Deserialize)]
struct FileSpec {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_emblem_asset")]
    pub emblem_asset: String,
    #[serde(default)]
    pub debug_console: bool,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_emblem_asset() -> String {
    DEFAULT_EMBLEM_ASSET.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: default_base_url(),
            emblem_asset: default_emblem_asset(),
            debug_console: false,
        }
    }
}

impl Config {
    /// Return a new instance with the built-in defaults.
    ///
    pub fn new() -> Config {
        Config::default()
    }

    /// Try to load an existing configuration from the disk using the custom
    /// path if provided. A missing file leaves the defaults in place; an
    /// unreadable or malformed file is an error.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        let dir_path = match custom_path {
            Some(path) => Path::new(&path).to_path_buf(),
            None => Config::default_path()?,
        };
        let file_path = dir_path.join(Path::new(FILE_NAME));

        if !file_path.exists() {
            return Ok(());
        }

        let contents = fs::read_to_string(&file_path).map_err(|e| ConfigError::LoadFailed {
            path: file_path.clone(),
            message: format!("IO error: {}", e),
        })?;
        let data: FileSpec = serde_yaml::from_str(&contents)
            .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;
        self.base_url = data.base_url;
        self.emblem_asset = data.emblem_asset;
        self.debug_console = data.debug_console;

        Ok(())
    }

    /// Returns the path buffer for the default path to the configuration
    /// directory or an error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, AppError> {
        match dirs::home_dir() {
            Some(home) => {
                let home_path = Path::new(&home);
                let default_config_path = Path::new(DEFAULT_DIRECTORY_PATH);
                Ok(home_path.join(default_config_path))
            }
            None => Err(ConfigError::HomeDirectoryNotFound.into()),
        }
    }
}
