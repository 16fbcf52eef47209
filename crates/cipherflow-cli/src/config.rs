//! Locating and reading the TOML config file.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use cipherflow::{CipherflowError, config::AppConfig};

/// Relative path checked before the per-user config directory.
const LOCAL_CONFIG: &str = "cipherflow/config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Invalid style: {0}")]
    Style(String),
}

impl From<ConfigError> for CipherflowError {
    fn from(err: ConfigError) -> Self {
        CipherflowError::Config(err.to_string())
    }
}

/// Resolves the effective [`AppConfig`].
///
/// An explicit path must exist. Otherwise `cipherflow/config.toml` in the
/// working directory wins over the per-user config directory, and with
/// neither present the built-in defaults apply.
///
/// # Errors
///
/// Fails on a missing explicit file, unparsable TOML or an invalid color.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, CipherflowError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path:% = path.display(); "Using configuration given on the command line");
        return read_config(path);
    }

    let user_config = ProjectDirs::from("com", "cipherflow", "cipherflow")
        .map(|dirs| dirs.config_dir().join("config.toml"));
    if user_config.is_none() {
        debug!("No per-user config directory on this platform");
    }

    let found = std::iter::once(PathBuf::from(LOCAL_CONFIG))
        .chain(user_config)
        .find(|candidate| {
            let exists = candidate.is_file();
            debug!(path:% = candidate.display(), exists; "Probing configuration path");
            exists
        });

    match found {
        Some(path) => {
            info!(path:% = path.display(); "Using discovered configuration");
            read_config(&path)
        }
        None => {
            debug!("No configuration file found, falling back to defaults");
            Ok(AppConfig::default())
        }
    }
}

/// Parses one file and checks its colors up front.
fn read_config(path: &Path) -> Result<AppConfig, CipherflowError> {
    if !path.is_file() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let raw = fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
    config.style().palette().map_err(ConfigError::Style)?;

    Ok(config)
}
