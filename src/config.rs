//! Configuration loading and management.
//!
//! Settings are layered, lowest priority first:
//! 1. Built-in defaults
//! 2. A YAML config file: `--config`, else `NOTION_DEV_LOGGER_CONFIG`, else
//!    `~/.notion-dev-logger/config.yaml` when it exists
//! 3. Environment variables
//!
//! ## Environment Variables
//! - `NOTION_API_KEY` - Notion integration token (required)
//! - `NOTION_DATABASE_ID` - Target database (required)
//! - `NOTION_API_BASE_URL` - API base URL (default: `https://api.notion.com`)
//! - `NOTION_VERSION` - `Notion-Version` header (default: `2022-06-28`)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const API_KEY_ENV: &str = "NOTION_API_KEY";
pub const DATABASE_ID_ENV: &str = "NOTION_DATABASE_ID";
pub const BASE_URL_ENV: &str = "NOTION_API_BASE_URL";
pub const API_VERSION_ENV: &str = "NOTION_VERSION";
pub const CONFIG_PATH_ENV: &str = "NOTION_DEV_LOGGER_CONFIG";

pub const DEFAULT_BASE_URL: &str = "https://api.notion.com";
pub const DEFAULT_API_VERSION: &str = "2022-06-28";

/// Errors raised while loading configuration. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required configuration: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("invalid configuration value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Server configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub notion: NotionConfig,

    #[serde(default)]
    pub properties: PropertyNames,
}

/// Notion connection settings, as loaded (possibly incomplete).
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotionConfig {
    pub api_key: Option<String>,
    pub database_id: Option<String>,
    pub base_url: String,
    pub api_version: String,
    /// Request timeout for the page creation call.
    pub timeout_secs: u64,
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            database_id: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout_secs: 30,
        }
    }
}

impl fmt::Debug for NotionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotionConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("database_id", &self.database_id)
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Complete Notion settings, produced by [`NotionConfig::resolve`].
#[derive(Clone)]
pub struct NotionSettings {
    pub api_key: String,
    pub database_id: String,
    pub base_url: String,
    pub api_version: String,
    pub timeout: Duration,
}

impl fmt::Debug for NotionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotionSettings")
            .field("api_key", &"<redacted>")
            .field("database_id", &self.database_id)
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl NotionConfig {
    /// Check that the required values are present and the timeout is usable.
    ///
    /// Every missing value is reported, not just the first.
    pub fn resolve(&self) -> Result<NotionSettings, ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "notion.timeout_secs",
                reason: "must be at least 1 second".to_string(),
            });
        }

        let api_key = non_blank(&self.api_key);
        let database_id = non_blank(&self.database_id);

        match (api_key, database_id) {
            (Some(api_key), Some(database_id)) => Ok(NotionSettings {
                api_key: api_key.to_string(),
                database_id: database_id.to_string(),
                base_url: self.base_url.clone(),
                api_version: self.api_version.clone(),
                timeout: Duration::from_secs(self.timeout_secs),
            }),
            (api_key, database_id) => {
                let mut missing = Vec::new();
                if api_key.is_none() {
                    missing.push(API_KEY_ENV);
                }
                if database_id.is_none() {
                    missing.push(DATABASE_ID_ENV);
                }
                Err(ConfigError::Missing(missing))
            }
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Names of the Notion database properties a session is written to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyNames {
    pub title: String,
    pub date: String,
    pub category: String,
    /// Select option written to the category property.
    pub category_value: String,
    pub purpose: String,
    pub changes: String,
    pub errors: String,
    pub learnings: String,
    pub next_actions: String,
    pub commentary: String,
    pub code_quality: String,
}

impl Default for PropertyNames {
    fn default() -> Self {
        Self {
            title: "Name".into(),
            date: "Date".into(),
            category: "Type".into(),
            category_value: "Session".into(),
            purpose: "Purpose".into(),
            changes: "Changes".into(),
            errors: "Errors".into(),
            learnings: "Learnings".into(),
            next_actions: "Next Actions".into(),
            commentary: "Commentary".into(),
            code_quality: "Code Quality".into(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration from the process environment and the config file layers.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(explicit, |key| std::env::var(key).ok())
    }

    /// Load configuration using `lookup` to read environment variables.
    pub fn load_with<F>(explicit: Option<&Path>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match Self::discover_path(explicit, &lookup)? {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(&lookup);
        Ok(config)
    }

    /// Pick the config file to read, if any.
    ///
    /// An explicitly requested file must exist; the user-level file is optional.
    fn discover_path<F>(explicit: Option<&Path>, lookup: &F) -> Result<Option<PathBuf>, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let requested = explicit
            .map(Path::to_path_buf)
            .or_else(|| lookup(CONFIG_PATH_ENV).map(PathBuf::from));
        if let Some(path) = requested {
            if !path.exists() {
                return Err(ConfigError::NotFound(path));
            }
            return Ok(Some(path));
        }

        Ok(dirs::home_dir()
            .map(|home| home.join(".notion-dev-logger").join("config.yaml"))
            .filter(|path| path.exists()))
    }

    /// Override file values with environment variables.
    pub fn apply_env<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_key) = lookup(API_KEY_ENV) {
            self.notion.api_key = Some(api_key);
        }
        if let Some(database_id) = lookup(DATABASE_ID_ENV) {
            self.notion.database_id = Some(database_id);
        }
        if let Some(base_url) = lookup(BASE_URL_ENV) {
            self.notion.base_url = base_url;
        }
        if let Some(version) = lookup(API_VERSION_ENV) {
            self.notion.api_version = version;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.notion.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.notion.api_version, DEFAULT_API_VERSION);
        assert_eq!(config.notion.timeout_secs, 30);
        assert_eq!(config.properties.title, "Name");
        assert_eq!(config.properties.category_value, "Session");
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_env(&env(&[
            (API_KEY_ENV, "secret_abc"),
            (DATABASE_ID_ENV, "db-123"),
            (BASE_URL_ENV, "http://localhost:9999"),
        ]));
        let settings = config.notion.resolve().expect("config should resolve");
        assert_eq!(settings.api_key, "secret_abc");
        assert_eq!(settings.database_id, "db-123");
        assert_eq!(settings.base_url, "http://localhost:9999");
        assert_eq!(settings.api_version, DEFAULT_API_VERSION);
    }

    #[test]
    fn test_missing_values_are_all_reported() {
        let err = NotionConfig::default().resolve().unwrap_err();
        match err {
            ConfigError::Missing(ref names) => {
                assert_eq!(names, &vec![API_KEY_ENV, DATABASE_ID_ENV]);
            }
            ref other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("NOTION_API_KEY"));
        assert!(err.to_string().contains("NOTION_DATABASE_ID"));
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let notion = NotionConfig {
            api_key: Some("   ".into()),
            database_id: Some("db".into()),
            ..Default::default()
        };
        match notion.resolve() {
            Err(ConfigError::Missing(names)) => assert_eq!(names, vec![API_KEY_ENV]),
            other => panic!("expected missing api key, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let notion = NotionConfig {
            api_key: Some("secret".into()),
            database_id: Some("db".into()),
            timeout_secs: 0,
            ..Default::default()
        };
        match notion.resolve() {
            Err(ConfigError::Invalid { key, .. }) => assert_eq!(key, "notion.timeout_secs"),
            other => panic!("expected invalid timeout, got {other:?}"),
        }

        let notion = NotionConfig {
            timeout_secs: 1,
            ..notion
        };
        let settings = notion.resolve().unwrap();
        assert_eq!(settings.timeout, Duration::from_secs(1));
    }

    #[test]
    fn test_yaml_file_with_env_on_top() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "notion:\n  api_key: from-file\n  database_id: db-file\n  timeout_secs: 5\n\
             properties:\n  title: Title\n  commentary: Claude Comment\n",
        )
        .unwrap();

        let config = Config::load_with(Some(path.as_path()), env(&[(API_KEY_ENV, "from-env")])).unwrap();
        assert_eq!(config.notion.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.notion.database_id.as_deref(), Some("db-file"));
        assert_eq!(config.notion.timeout_secs, 5);
        assert_eq!(config.properties.title, "Title");
        assert_eq!(config.properties.commentary, "Claude Comment");
        // Unspecified names keep their defaults
        assert_eq!(config.properties.purpose, "Purpose");
    }

    #[test]
    fn test_config_path_from_env() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logger.yaml");
        std::fs::write(&path, "notion:\n  database_id: db-env-path\n").unwrap();

        let lookup = env(&[(CONFIG_PATH_ENV, path.to_str().unwrap())]);
        let config = Config::load_with(None, lookup).unwrap();
        assert_eq!(config.notion.database_id.as_deref(), Some("db-env-path"));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.yaml");
        let err = Config::load_with(Some(path.as_path()), env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "notion: [unclosed").unwrap();
        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let notion = NotionConfig {
            api_key: Some("secret_token".into()),
            ..Default::default()
        };
        let printed = format!("{:?}", notion);
        assert!(!printed.contains("secret_token"));
        assert!(printed.contains("<redacted>"));
    }
}
