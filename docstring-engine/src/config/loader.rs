//! Locating and reading `.docsmith.yaml`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::{config::model::DocsmithConfig, errors::ConfigError};

pub const CONFIG_FILE_NAME: &str = ".docsmith.yaml";

/// A loaded config plus the directory relative paths resolve against.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: DocsmithConfig,
    /// File the values came from, if any.
    pub source: Option<PathBuf>,
    pub base_dir: PathBuf,
}

/// Nearest `.docsmith.yaml` in `start` or one of its ancestors.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|p| p.is_file())
}

/// Loads the explicit file, or the nearest one above `cwd`, or defaults.
///
/// A missing explicit file is an error; a missing implicit one is not.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<LoadedConfig, ConfigError> {
    let path = match explicit {
        Some(p) => {
            let p = if p.is_absolute() { p.to_path_buf() } else { cwd.join(p) };
            if !p.is_file() {
                return Err(ConfigError::NotFound(p));
            }
            Some(p)
        }
        None => find_config(cwd),
    };

    let Some(path) = path else {
        debug!(cwd = %cwd.display(), "no config file, using defaults");
        return Ok(LoadedConfig {
            config: DocsmithConfig::default(),
            source: None,
            base_dir: cwd.to_path_buf(),
        });
    };

    let raw = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let config: DocsmithConfig = if raw.trim().is_empty() {
        DocsmithConfig::default()
    } else {
        serde_yml::from_str(&raw).map_err(|source| ConfigError::Yaml {
            path: path.clone(),
            source,
        })?
    };

    let base_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| cwd.to_path_buf());
    info!(path = %path.display(), "config loaded");

    Ok(LoadedConfig {
        config,
        source: Some(path),
        base_dir,
    })
}
