use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;

/// Top-level configuration for the Rapport assistant.
///
/// Loaded from `~/.rapport/config.toml` by default. Each provider
/// section carries its credential; credentials are not validated at
/// load time — a missing key surfaces as a call failure on first use.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RapportConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub tasks: TasksConfig,
    #[serde(default)]
    pub llm: LlmConfig,
}

impl RapportConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: RapportConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Overlay provider credentials from the environment.
    ///
    /// Reads `WEATHER_API_KEY`, `TODOIST_API_KEY`, and `GEMINI_API_KEY`;
    /// a set variable takes priority over the config file value.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("WEATHER_API_KEY") {
            self.weather.api_key = key;
        }
        if let Ok(key) = std::env::var("TODOIST_API_KEY") {
            self.tasks.api_key = key;
        }
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            self.llm.api_key = key;
        }
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
    /// Location used by the weather quick action before one is stored.
    pub default_location: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            default_location: "Colombo".to_string(),
        }
    }
}

/// Weather provider (WeatherAPI) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// WeatherAPI key.
    pub api_key: String,
    /// Current-conditions endpoint.
    pub base_url: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "http://api.weatherapi.com/v1/current.json".to_string(),
        }
    }
}

/// Task provider (Todoist) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TasksConfig {
    /// Todoist API token, sent as a bearer credential.
    pub api_key: String,
    /// Active-tasks endpoint.
    pub base_url: String,
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.todoist.com/rest/v2/tasks".to_string(),
        }
    }
}

/// Generative-model (Gemini) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Gemini API key.
    pub api_key: String,
    /// Model name used for fallback completions.
    pub model: String,
    /// API base URL (without the model path).
    pub base_url: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1".to_string(),
        }
    }
}
