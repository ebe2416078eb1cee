use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

use crate::github::client::DEFAULT_API_BASE_URL;

/// Configuration keys enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    IssueUrl,
    ApiBaseUrl,
}

impl ConfigKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::IssueUrl => "issue_url",
            ConfigKey::ApiBaseUrl => "api_base_url",
        }
    }

    /// Get all config keys
    pub fn all() -> &'static [ConfigKey] {
        &[ConfigKey::IssueUrl, ConfigKey::ApiBaseUrl]
    }
}

/// Filename for the project-specific configuration within the config directory.
pub const PROJECT_CONFIG_FILENAME: &str = "config.json";
/// Directory name for project-specific configuration.
pub const PROJECT_CONFIG_DIR: &str = ".dump-issue-thread";
/// Environment variable overriding the API base URL.
pub const API_URL_ENV_VAR: &str = "GITHUB_API_URL";
/// Issue dumped when neither the command line nor the config names one.
pub const DEFAULT_ISSUE_URL: &str = "https://github.com/Expensify/App/issues/29886";

/// Parses a JSON configuration file content into a map of configuration values.
///
/// - Returns an empty HashMap if `content` is empty or contains only whitespace.
/// - Unknown keys are skipped.
/// - Returns an `Err` if the JSON is invalid or is not an object.
pub fn parse_config(content: &[u8]) -> Result<HashMap<ConfigKey, Value>> {
    if content.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(HashMap::new());
    }

    let value: Value = serde_json::from_slice(content).context("Failed to parse config JSON")?;

    if let Value::Object(map) = &value {
        let mut config_map = HashMap::new();
        for key in ConfigKey::all() {
            if let Some(val) = map.get(key.as_str()) {
                config_map.insert(*key, val.clone());
            }
        }
        return Ok(config_map);
    }

    Err(anyhow::anyhow!("Config must be a JSON object"))
}

/// Reads `<dir>/.dump-issue-thread/config.json`. A missing file is an empty config.
pub fn load_project_config(dir: &Path) -> Result<HashMap<ConfigKey, Value>> {
    let path = dir.join(PROJECT_CONFIG_DIR).join(PROJECT_CONFIG_FILENAME);
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let content = std::fs::read(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Invalid config file {}", path.display()))
}

/// Returns the string stored under `key`, or `None` if absent.
pub fn get_string(config: &HashMap<ConfigKey, Value>, key: ConfigKey) -> Result<Option<String>> {
    match config.get(&key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(anyhow::anyhow!(
            "Config key \"{}\" must be a string, got {}",
            key.as_str(),
            other
        )),
    }
}

/// Effective settings after applying command line, environment and config.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub issue_url: String,
    pub api_base_url: String,
}

/// Resolves settings.
///
/// The issue URL comes from `cli_issue_url`, then the config, then
/// [`DEFAULT_ISSUE_URL`]. The API base URL comes from `env_api_url`, then the
/// config, then [`DEFAULT_API_BASE_URL`].
pub fn resolve_settings(
    config: &HashMap<ConfigKey, Value>,
    cli_issue_url: Option<String>,
    env_api_url: Option<String>,
) -> Result<Settings> {
    let issue_url = match cli_issue_url {
        Some(url) => url,
        None => get_string(config, ConfigKey::IssueUrl)?
            .unwrap_or_else(|| DEFAULT_ISSUE_URL.to_string()),
    };
    let api_base_url = match env_api_url {
        Some(url) => url,
        None => get_string(config, ConfigKey::ApiBaseUrl)?
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
    };
    Ok(Settings {
        issue_url,
        api_base_url,
    })
}
