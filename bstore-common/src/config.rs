//! Configuration loading and root folder resolution
//!
//! The root folder holds everything the service persists: the SQLite
//! database and the uploaded media files.

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Environment variable consulted when no CLI argument is given
pub const ROOT_ENV_VAR: &str = "BSTORE_ROOT";

/// Root folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable (`BSTORE_ROOT`)
/// 3. TOML config file (`root_folder` key)
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(cli_arg: Option<&str>) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ROOT_ENV_VAR) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = locate_config_file() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(root_folder) = config.get("root_folder").and_then(|v| v.as_str()) {
                    return PathBuf::from(root_folder);
                }
            }
        }
    }

    // Priority 4: OS-dependent compiled default
    default_root_folder()
}

/// Get default configuration file path for the platform
fn locate_config_file() -> Result<PathBuf> {
    if cfg!(target_os = "linux") {
        // Try ~/.config/bstore/config.toml first, then /etc/bstore/config.toml
        if let Some(path) = dirs::config_dir().map(|d| d.join("bstore").join("config.toml")) {
            if path.exists() {
                return Ok(path);
            }
        }
        let system_config = PathBuf::from("/etc/bstore/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
        Err(Error::Config("No config file found".to_string()))
    } else {
        let path = dirs::config_dir()
            .map(|d| d.join("bstore").join("config.toml"))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;
        if path.exists() {
            Ok(path)
        } else {
            Err(Error::Config(format!("Config file not found: {:?}", path)))
        }
    }
}

/// Get OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("bstore"))
        .unwrap_or_else(|| PathBuf::from("./bstore_data"))
}

/// Path of the SQLite database inside the root folder
pub fn database_path(root: &Path) -> PathBuf {
    root.join("bstore.db")
}

/// Directory for uploaded media files (`audio/` and `covers/` subfolders)
pub fn media_dir(root: &Path) -> PathBuf {
    root.join("media")
}

/// Create the root folder layout if missing (root, media/audio, media/covers)
pub fn ensure_root_layout(root: &Path) -> Result<()> {
    std::fs::create_dir_all(root)?;
    let media = media_dir(root);
    std::fs::create_dir_all(media.join("audio"))?;
    std::fs::create_dir_all(media.join("covers"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_argument_wins() {
        let root = resolve_root_folder(Some("/tmp/bstore-cli-root"));
        assert_eq!(root, PathBuf::from("/tmp/bstore-cli-root"));
    }

    #[test]
    fn derived_paths_live_under_root() {
        let root = PathBuf::from("/srv/bstore");
        assert_eq!(database_path(&root), PathBuf::from("/srv/bstore/bstore.db"));
        assert_eq!(media_dir(&root), PathBuf::from("/srv/bstore/media"));
    }
}
