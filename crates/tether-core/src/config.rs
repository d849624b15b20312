//! Shell configuration
//!
//! Passed explicitly at session construction. Defaults match the bundled
//! destination; a JSON file named by `TETHER_CONFIG` replaces them and
//! `TETHER_DESTINATION` overrides just the destination.

use serde::{Deserialize, Serialize};
use std::path::Path;

use tether_navigation::Destination;

use crate::error::CoreError;
use crate::Result;

pub const CONFIG_PATH_ENV: &str = "TETHER_CONFIG";
pub const DESTINATION_ENV: &str = "TETHER_DESTINATION";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The one site the shell presents
    pub destination: String,
    /// Window title and user-facing name
    pub app_name: String,
    pub webview: WebviewSettings,
    pub storage: StorageSettings,
    pub probe: ProbeSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CacheMode {
    /// Engine default cache policy
    #[default]
    LoadDefault,
    /// Prefer cached content, fall back to network
    LoadCacheElseNetwork,
    /// Always go to the network
    LoadNoCache,
    /// Never go to the network
    LoadCacheOnly,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebviewSettings {
    pub javascript_enabled: bool,
    pub dom_storage_enabled: bool,
    pub cache_enabled: bool,
    pub cache_mode: CacheMode,
    pub allows_inline_media_playback: bool,
    pub media_playback_requires_user_action: bool,
    pub allows_fullscreen_video: bool,
    pub user_agent: Option<String>,
}

impl Default for WebviewSettings {
    fn default() -> Self {
        Self {
            javascript_enabled: true,
            dom_storage_enabled: true,
            cache_enabled: true,
            cache_mode: CacheMode::LoadDefault,
            allows_inline_media_playback: true,
            media_playback_requires_user_action: false,
            allows_fullscreen_video: true,
            user_agent: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub shared_cookies_enabled: bool,
    pub third_party_cookies_enabled: bool,
    /// Private browsing: nothing persists between launches
    pub incognito: bool,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            shared_cookies_enabled: true,
            third_party_cookies_enabled: true,
            incognito: false,
        }
    }
}

/// Reachability check used where the engine does not report HTTP status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    pub enabled: bool,
    pub timeout_secs: u64,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_secs: 10,
        }
    }
}

impl Config {
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Defaults, replaced by the file in `TETHER_CONFIG` and then patched
    /// with `TETHER_DESTINATION`.
    pub fn load() -> Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    fn load_with(env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = match env(CONFIG_PATH_ENV) {
            Some(path) => {
                tracing::info!(path = %path, "Loading config file");
                Self::from_file(Path::new(&path))?
            }
            None => Self::default(),
        };

        if let Some(destination) = env(DESTINATION_ENV).filter(|d| !d.trim().is_empty()) {
            config.destination = destination;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.destination()?;

        if self.app_name.trim().is_empty() {
            return Err(CoreError::Config("app_name cannot be empty".to_string()));
        }

        if self.probe.enabled && self.probe.timeout_secs == 0 {
            return Err(CoreError::Config(
                "probe.timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Parsed destination. Fails for non-web or host-less URLs.
    pub fn destination(&self) -> Result<Destination> {
        Ok(Destination::parse(&self.destination)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            destination: "https://myprojectplatform.com/".to_string(),
            app_name: "MyProjectPlatform".to_string(),
            webview: WebviewSettings::default(),
            storage: StorageSettings::default(),
            probe: ProbeSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.destination().unwrap().host(), "myprojectplatform.com");
        assert_eq!(config.webview.cache_mode, CacheMode::LoadDefault);
        assert!(!config.storage.incognito);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = Config::from_json(
            r#"{
                "destination": "https://example.org/app",
                "webview": { "cache_mode": "LOAD_CACHE_ELSE_NETWORK" },
                "probe": { "enabled": false }
            }"#,
        )
        .unwrap();

        assert_eq!(config.destination, "https://example.org/app");
        assert_eq!(config.app_name, "MyProjectPlatform");
        assert_eq!(config.webview.cache_mode, CacheMode::LoadCacheElseNetwork);
        assert!(config.webview.javascript_enabled);
        assert!(!config.probe.enabled);
        assert_eq!(config.probe.timeout_secs, 10);
    }

    #[test]
    fn test_invalid_destination_rejected() {
        let config = Config::new("mailto:owner@example.org");
        assert!(matches!(config.validate(), Err(CoreError::Navigation(_))));
    }

    #[test]
    fn test_zero_probe_timeout_rejected() {
        let mut config = Config::default();
        config.probe.timeout_secs = 0;
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));

        config.probe.enabled = false;
        config.validate().unwrap();
    }

    #[test]
    fn test_destination_env_override() {
        let config = Config::load_with(|key| match key {
            DESTINATION_ENV => Some("https://staging.example.org/".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.destination().unwrap().host(), "staging.example.org");
    }

    #[test]
    fn test_missing_config_file() {
        let result = Config::load_with(|key| match key {
            CONFIG_PATH_ENV => Some("/nonexistent/tether.json".to_string()),
            _ => None,
        });
        assert!(matches!(result, Err(CoreError::Io(_))));
    }
}
