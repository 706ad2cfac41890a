//! Parser configuration, optionally loaded from a TOML file.
//!
//! The file is optional: a missing or empty file yields `Config::default()`.
//! Unknown keys are accepted by serde but logged, since they are usually typos.
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;

/// How the document bytes are obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Acquisition {
    /// `parse()` blocks until the body is fetched and the document is read.
    #[default]
    Synchronous,
    /// `parse()` spawns the fetch; `resume().await` reads the document.
    Asynchronous,
}

/// Which records a parse reports.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ParseScope {
    /// Feed info and every item.
    #[default]
    Full,
    /// Items only; feed info is never reported.
    ItemsOnly,
    /// Feed info only; reading stops at the first item.
    InfoOnly,
}

/// Top-level parser configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub acquisition: Acquisition,

    pub scope: ParseScope,

    /// Sent as the `User-Agent` header of every request.
    pub user_agent: String,

    /// Transport deadline for one fetch, in seconds.
    pub timeout_secs: u64,

    /// Largest response body accepted by the HTTP transport.
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            acquisition: Acquisition::Synchronous,
            scope: ParseScope::Full,
            user_agent: "feedkit".to_string(),
            timeout_secs: 60,
            max_body_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: &'static [&'static str] = &[
        "acquisition",
        "scope",
        "user_agent",
        "timeout_secs",
        "max_body_bytes",
    ];

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            tracing::debug!("Config is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(content)?;
        tracing::info!(
            acquisition = ?config.acquisition,
            scope = ?config.scope,
            "Loaded configuration"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.acquisition, Acquisition::Synchronous);
        assert_eq!(config.scope, ParseScope::Full);
        assert_eq!(config.user_agent, "feedkit");
        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert_eq!(config.max_body_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn test_missing_file_returns_default() {
        let path = Path::new("/tmp/feedkit_test_nonexistent_config.toml");
        assert_eq!(Config::load(path).unwrap(), Config::default());
    }

    #[test]
    fn test_whitespace_only_returns_default() {
        assert_eq!(Config::from_toml("   \n  \n  ").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_config_uses_defaults_for_missing() {
        let config = Config::from_toml("scope = \"info-only\"\n").unwrap();
        assert_eq!(config.scope, ParseScope::InfoOnly);
        assert_eq!(config.acquisition, Acquisition::Synchronous);
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_full_config() {
        let content = r#"
acquisition = "asynchronous"
scope = "items-only"
user_agent = "reader/2.0"
timeout_secs = 5
max_body_bytes = 1024
"#;
        let config = Config::from_toml(content).unwrap();
        assert_eq!(
            config,
            Config {
                acquisition: Acquisition::Asynchronous,
                scope: ParseScope::ItemsOnly,
                user_agent: "reader/2.0".into(),
                timeout_secs: 5,
                max_body_bytes: 1024,
            }
        );
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let err = Config::from_toml("this is not [valid toml").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("Invalid TOML"));
    }

    #[test]
    fn test_unknown_scope_returns_error() {
        assert!(Config::from_toml("scope = \"everything\"\n").is_err());
    }

    #[test]
    fn test_unknown_keys_accepted() {
        let config = Config::from_toml("scope = \"full\"\ntotally_fake_key = 1\n").unwrap();
        assert_eq!(config.scope, ParseScope::Full);
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join("feedkit_config_test_load");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "acquisition = \"asynchronous\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.acquisition, Acquisition::Asynchronous);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_too_large_file_rejected() {
        let dir = std::env::temp_dir().join("feedkit_config_test_too_large");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "a".repeat(1_048_577)).unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TooLarge(_)));
        assert!(err.to_string().contains("too large"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
