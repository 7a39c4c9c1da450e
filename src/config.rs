//! User configuration loaded from `config.toml`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Settings for the command-line front end.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// How many entries the history view lists, newest first.
    pub history_display_limit: usize,
    /// Copy each successful result to the clipboard.
    pub copy_on_equals: bool,
    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_display_limit: 10,
            copy_on_equals: false,
            log_level: "warn".to_string(),
        }
    }
}

/// `$XDG_CONFIG_HOME/zcalc/config.toml` or the platform equivalent.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("zcalc").join("config.toml"))
}

impl Config {
    /// Load from `path`, or from the default location when `path` is `None`.
    ///
    /// A missing file at the default location yields the defaults; an
    /// explicitly requested file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match default_config_path() {
                Some(path) => (path, false),
                None => return Ok(Self::default()),
            },
        };

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound && !required => {
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        Self::from_toml_str(&text).map_err(|source| ConfigError::Parse { path, source })
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_file() {
        let config = Config::from_toml_str("copy_on_equals = true\n").unwrap();
        assert!(config.copy_on_equals);
        assert_eq!(config.history_display_limit, 10);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_full_file() {
        let config = Config::from_toml_str(
            "history_display_limit = 3\ncopy_on_equals = false\nlog_level = \"debug\"\n",
        )
        .unwrap();
        assert_eq!(config.history_display_limit, 3);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::from_toml_str("theme = \"dark\"\n").is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let path = std::env::temp_dir().join("zcalc-missing-config-for-test.toml");
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("zcalc-config-{}.toml", std::process::id()));
        fs::write(&path, "history_display_limit = 5\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(config.history_display_limit, 5);
    }

    #[test]
    fn test_malformed_file_reports_path() {
        let path = std::env::temp_dir().join(format!("zcalc-bad-{}.toml", std::process::id()));
        fs::write(&path, "history_display_limit = \"many\"\n").unwrap();
        let err = Config::load(Some(&path)).unwrap_err();
        fs::remove_file(&path).unwrap();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("zcalc-bad-"));
    }
}
