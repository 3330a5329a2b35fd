//! Application configuration
//!
//! Read from `config.toml` in the platform config directory; environment
//! variables (and a `.env` file) override it.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::Deserialize;
use vantage_core::DEFAULT_FAVICON_SIZE;
use vantage_net::gemini::{
    DEFAULT_API_BASE, DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL, DEFAULT_TIMEOUT_SECS,
};
use vantage_net::GeminiConfig;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DATA_DIR_ENV: &str = "VANTAGE_DATA_DIR";

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Could not determine {0} directory")]
    NoProjectDirs(&'static str),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Gemini API key; searching is disabled without one
    pub api_key: Option<String>,
    pub api_base: String,
    pub text_model: String,
    pub image_model: String,
    pub request_timeout_secs: u64,
    /// Pixel size requested from the favicon service
    pub favicon_size: u32,
    pub data_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            favicon_size: DEFAULT_FAVICON_SIZE,
            data_dir: None,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "vantage", "vantage")
}

impl AppConfig {
    /// Load `.env`, the config file (if any) and environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env");
        }

        let mut config = match project_dirs() {
            Some(dirs) => Self::load_file(&dirs.config_dir().join(CONFIG_FILE))?,
            None => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Load a config file, falling back to defaults when it does not exist
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        tracing::info!(path = %path.display(), "Reading config file");
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(dir) = lookup(DATA_DIR_ENV).filter(|d| !d.trim().is_empty()) {
            self.data_dir = Some(PathBuf::from(dir));
        }
    }

    /// Gemini settings, or `None` when no API key is configured
    pub fn gemini_config(&self) -> Option<GeminiConfig> {
        let key = self.api_key.as_deref()?.trim();
        if key.is_empty() {
            return None;
        }

        let mut gemini = GeminiConfig::new(key);
        gemini.api_base = self.api_base.clone();
        gemini.text_model = self.text_model.clone();
        gemini.image_model = self.image_model.clone();
        gemini.timeout = Duration::from_secs(self.request_timeout_secs.max(1));
        Some(gemini)
    }

    /// Directory holding the database
    pub fn data_dir(&self) -> Result<PathBuf, ConfigError> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or(ConfigError::NoProjectDirs("data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert!(config.api_key.is_none());
        assert_eq!(config.text_model, "gemini-2.5-flash");
        assert_eq!(config.image_model, "gemini-2.5-flash-image");
        assert_eq!(config.favicon_size, 128);
        assert!(config.gemini_config().is_none());
    }

    #[test]
    fn test_partial_file() {
        let config = AppConfig::from_toml(
            r#"
api_key = "file-key"
request_timeout_secs = 15
"#,
        )
        .unwrap();

        let gemini = config.gemini_config().unwrap();
        assert_eq!(gemini.api_key, "file-key");
        assert_eq!(gemini.timeout, Duration::from_secs(15));
        assert_eq!(gemini.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = AppConfig::from_toml(r#"api_key = "file-key""#).unwrap();
        config.apply_env(|name| match name {
            API_KEY_ENV => Some("env-key".to_string()),
            DATA_DIR_ENV => Some("/tmp/vantage-test".to_string()),
            _ => None,
        });

        assert_eq!(config.api_key.as_deref(), Some("env-key"));
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/tmp/vantage-test"));
    }

    #[test]
    fn test_blank_env_ignored() {
        let mut config = AppConfig::from_toml(r#"api_key = "file-key""#).unwrap();
        config.apply_env(|_| Some("  ".to_string()));
        assert_eq!(config.api_key.as_deref(), Some("file-key"));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = AppConfig::load_file(&temp.path().join("config.toml")).unwrap();
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_invalid_file_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "favicon_size = \"big\"").unwrap();
        assert!(matches!(
            AppConfig::load_file(&path),
            Err(ConfigError::Parse(_))
        ));
    }
}
