use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Repository used when neither the config file nor `PORTDIR` names one
pub const DEFAULT_PORTDIR: &str = "/usr/portage";

/// Name of the directory holding the config file
const APP_DIR: &str = "portage-versions";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Repository configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Main repository
    pub portdir: PathBuf,
    /// Additional repositories searched after `portdir`
    pub overlays: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            portdir: PathBuf::from(DEFAULT_PORTDIR),
            overlays: Vec::new(),
        }
    }
}

impl Config {
    /// Load the config file (if any) and apply `PORTDIR`/`PORTDIR_OVERLAY`.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file(&config_path())?;
        config.apply_env(
            std::env::var("PORTDIR").ok(),
            std::env::var("PORTDIR_OVERLAY").ok(),
        );
        Ok(config)
    }

    /// Read a JSON config file. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Environment overrides the config file. An empty `PORTDIR` means the default.
    fn apply_env(&mut self, portdir: Option<String>, overlays: Option<String>) {
        if let Some(portdir) = portdir {
            self.portdir = if portdir.is_empty() {
                PathBuf::from(DEFAULT_PORTDIR)
            } else {
                PathBuf::from(portdir)
            };
        }
        if let Some(overlays) = overlays {
            self.overlays = overlays.split_whitespace().map(PathBuf::from).collect();
        }
    }

    /// `portdir` followed by the overlays
    pub fn repositories(&self) -> Vec<PathBuf> {
        std::iter::once(self.portdir.clone())
            .chain(self.overlays.iter().cloned())
            .collect()
    }
}

/// Returns the directory holding the config file.
/// Uses $XDG_CONFIG_HOME/portage-versions if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/portage-versions,
/// or ./portage-versions if neither is available.
pub fn config_dir() -> PathBuf {
    config_dir_with_env(std::env::var("XDG_CONFIG_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

fn config_dir_with_env(xdg_config_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let config_dir = xdg_config_home
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));

    config_dir.join(APP_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn config_from_partial_object_uses_defaults_for_missing_fields() {
        let result = serde_json::from_value::<Config>(json!({
            "overlays": ["/var/db/repos/local"]
        }))
        .unwrap();

        assert_eq!(result.portdir, PathBuf::from(DEFAULT_PORTDIR));
        assert_eq!(result.overlays, vec![PathBuf::from("/var/db/repos/local")]);
    }

    #[test]
    fn from_file_missing_returns_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::from_file(&temp_dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn from_file_parses_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(
            &path,
            r#"{ "portdir": "/var/db/repos/gentoo", "overlays": ["/srv/overlay"] }"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();

        assert_eq!(
            config.repositories(),
            vec![
                PathBuf::from("/var/db/repos/gentoo"),
                PathBuf::from("/srv/overlay")
            ]
        );
    }

    #[test]
    fn from_file_rejects_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "{ portdir = 1 }").unwrap();

        assert!(matches!(
            Config::from_file(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn apply_env_overrides_file_values() {
        let mut config = Config {
            portdir: PathBuf::from("/from/file"),
            overlays: vec![PathBuf::from("/file/overlay")],
        };

        config.apply_env(
            Some("/from/env".to_string()),
            Some(" /a  /b\n".to_string()),
        );

        assert_eq!(config.portdir, PathBuf::from("/from/env"));
        assert_eq!(config.overlays, vec![PathBuf::from("/a"), PathBuf::from("/b")]);
    }

    #[test]
    fn apply_env_empty_portdir_means_default() {
        let mut config = Config {
            portdir: PathBuf::from("/from/file"),
            overlays: vec![],
        };

        config.apply_env(Some(String::new()), None);

        assert_eq!(config.portdir, PathBuf::from(DEFAULT_PORTDIR));
    }

    #[test]
    fn config_dir_with_env_uses_xdg_config_home_when_set() {
        let path = config_dir_with_env(
            Some("/tmp/test-config".to_string()),
            Some(PathBuf::from("/home/user")),
        );

        assert_eq!(path, PathBuf::from("/tmp/test-config/portage-versions"));
    }

    #[test]
    fn config_dir_with_env_falls_back_to_home_config() {
        let path = config_dir_with_env(None, Some(PathBuf::from("/home/user")));

        assert_eq!(path, PathBuf::from("/home/user/.config/portage-versions"));
    }

    #[test]
    fn config_dir_with_env_falls_back_to_current_dir_when_no_dirs_available() {
        let path = config_dir_with_env(None, None);
        assert_eq!(path, PathBuf::from("./portage-versions"));
    }
}
