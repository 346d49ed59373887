//! Configuration
//!
//! `termark.toml` holds render defaults. Command-line flags override them.

mod types;

pub use types::{Config, Images, TextSizingMode};

use crate::error::{Result, TermarkError};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory
pub const DEFAULT_PATH: &str = "termark.toml";

/// Load configuration from a TOML file
pub fn load(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| {
        TermarkError::Config(format!(
            "Cannot read config from '{}': {}. Run 'termark config init' to create one.",
            path.display(),
            e
        ))
    })?;

    let config: Config = toml::from_str(&content)?;
    validate(&config, path)?;
    Ok(config)
}

/// Load `path` if given, which must exist, else the default file if present.
///
/// Returns the config together with the path it belongs to, so commands that
/// update it write back to the same file.
pub fn load_or_default(path: Option<&Path>) -> Result<(Config, PathBuf)> {
    match path {
        Some(path) => Ok((load(path)?, path.to_path_buf())),
        None => {
            let default_path = PathBuf::from(DEFAULT_PATH);
            let config = if default_path.exists() {
                load(&default_path)?
            } else {
                Config::default()
            };
            Ok((config, default_path))
        }
    }
}

fn validate(config: &Config, path: &Path) -> Result<()> {
    if config.probe_timeout_ms == 0 {
        return Err(TermarkError::Config(format!(
            "Invalid config '{}': probe_timeout_ms must be greater than 0",
            path.display()
        )));
    }
    Ok(())
}

/// Save configuration to a TOML file, creating parent directories
pub fn save(config: &Config, path: &Path) -> Result<()> {
    let toml = toml::to_string_pretty(config)
        .map_err(|e| TermarkError::Config(format!("Failed to serialize config: {}", e)))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, toml)?;
    Ok(())
}
