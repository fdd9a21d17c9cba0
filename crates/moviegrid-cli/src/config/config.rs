//! `AppConfig` struct and TOML read/write.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use moviegrid_api::tmdb::Credential;
use serde::{Deserialize, Serialize};

/// Placeholder written in place of secrets by [`AppConfig::redacted`].
const REDACTED: &str = "***";

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB client settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
    /// Shareable link settings.
    #[serde(default)]
    pub share: ShareConfig,
}

/// TMDB client configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TmdbConfig {
    /// v3 API key. `TMDB_API_KEY` overrides it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// v4 read access token. `TMDB_API_TOKEN` overrides it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Response language (BCP 47), also used for date layout.
    #[serde(default = "default_language")]
    pub language: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// API base URL override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Shareable link configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShareConfig {
    /// Base URL of shareable links.
    #[serde(default = "default_share_base")]
    pub base_url: String,
}

fn default_language() -> String {
    String::from("en-US")
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_share_base() -> String {
    String::from(moviegrid_tui::share::DEFAULT_SHARE_BASE)
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            access_token: None,
            language: default_language(),
            timeout_secs: default_timeout_secs(),
            base_url: None,
        }
    }
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            base_url: default_share_base(),
        }
    }
}

/// Returns the value unless it is blank.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl TmdbConfig {
    /// Picks the credential: environment before file, access token before
    /// API key within each. Blank values are ignored.
    #[must_use]
    pub fn credential(
        &self,
        env_api_key: Option<String>,
        env_access_token: Option<String>,
    ) -> Option<Credential> {
        non_blank(env_access_token)
            .map(Credential::Bearer)
            .or_else(|| non_blank(env_api_key).map(Credential::ApiKey))
            .or_else(|| non_blank(self.access_token.clone()).map(Credential::Bearer))
            .or_else(|| non_blank(self.api_key.clone()).map(Credential::ApiKey))
    }

    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Copy with secrets masked, for display.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mask = |secret: Option<&String>| secret.map(|_| String::from(REDACTED));
        Self {
            tmdb: TmdbConfig {
                api_key: mask(self.tmdb.api_key.as_ref()),
                access_token: mask(self.tmdb.access_token.as_ref()),
                language: self.tmdb.language.clone(),
                timeout_secs: self.tmdb.timeout_secs,
                base_url: self.tmdb.base_url.clone(),
            },
            share: ShareConfig {
                base_url: self.share.base_url.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_default_config() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert_eq!(config.tmdb.language, "en-US");
        assert_eq!(config.tmdb.timeout(), Duration::from_secs(10));
        assert_eq!(config.share.base_url, "https://moviegrid.app/");
        assert!(config.tmdb.credential(None, None).is_none());
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = AppConfig {
            tmdb: TmdbConfig {
                api_key: Some(String::from("k3y")),
                language: String::from("ja-JP"),
                timeout_secs: 3,
                ..TmdbConfig::default()
            },
            share: ShareConfig {
                base_url: String::from("https://films.example/"),
            },
        };

        // Act
        config.save(&path).unwrap();
        let loaded = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_partial_config() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[tmdb]\napi_key = \"abc\"\n").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config.tmdb.api_key.as_deref(), Some("abc"));
        assert_eq!(config.tmdb.language, "en-US");
        assert_eq!(config.share, ShareConfig::default());
    }

    #[test]
    fn test_load_invalid_toml_fails() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[tmdb\n").unwrap();

        // Act
        let err = AppConfig::load(&path).unwrap_err();

        // Assert
        assert!(err.to_string().contains("failed to parse"));
    }

    #[test]
    fn test_credential_precedence() {
        // Arrange
        let tmdb = TmdbConfig {
            api_key: Some(String::from("file-key")),
            access_token: Some(String::from("file-token")),
            ..TmdbConfig::default()
        };

        // Act & Assert
        assert_eq!(
            tmdb.credential(Some(String::from("env-key")), Some(String::from("env-token"))),
            Some(Credential::Bearer(String::from("env-token")))
        );
        assert_eq!(
            tmdb.credential(Some(String::from("env-key")), None),
            Some(Credential::ApiKey(String::from("env-key")))
        );
        assert_eq!(
            tmdb.credential(Some(String::from("  ")), None),
            Some(Credential::Bearer(String::from("file-token")))
        );
    }

    #[test]
    fn test_redacted_masks_secrets() {
        // Arrange
        let config = AppConfig {
            tmdb: TmdbConfig {
                api_key: Some(String::from("secret")),
                ..TmdbConfig::default()
            },
            ..AppConfig::default()
        };

        // Act
        let shown = toml::to_string_pretty(&config.redacted()).unwrap();

        // Assert
        assert!(shown.contains("api_key = \"***\""));
        assert!(!shown.contains("secret"));
        assert!(!shown.contains("access_token"));
    }
}
