use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use todo_client::ReminderSettings;

/// Overrides `api_url` when set.
pub const API_URL_ENV: &str = "TODO_API_BASE_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoConfig {
    /// Base URL of the todo backend, e.g. "http://localhost:3001"
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub reminders: ReminderConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderConfig {
    /// When false, requesting notification permission is always denied.
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    #[serde(default = "default_lead_minutes")]
    pub lead_minutes: i64,
}

fn default_api_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_true() -> bool {
    true
}

fn default_interval_secs() -> u64 {
    60
}

fn default_lead_minutes() -> i64 {
    10
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            reminders: ReminderConfig::default(),
        }
    }
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: default_interval_secs(),
            lead_minutes: default_lead_minutes(),
        }
    }
}

impl ReminderConfig {
    pub fn settings(&self, local: time::UtcOffset) -> ReminderSettings {
        ReminderSettings {
            period: Duration::from_secs(self.interval_secs.max(1)),
            lead: time::Duration::minutes(self.lead_minutes.max(0)),
            local,
        }
    }
}

impl TodoConfig {
    fn root_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join("todo-tui"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::root_path()?.join("config.toml"))
    }

    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::root_path()?.join("todo-tui.log"))
    }

    /// Load config from disk, then apply the environment override.
    /// Returns the default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let config = if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config at {}", path.display()))?;
            Self::from_toml(&raw)
                .with_context(|| format!("Failed to parse config at {}", path.display()))?
        } else {
            Self::default()
        };
        Ok(config.with_api_url_override(std::env::var(API_URL_ENV).ok()))
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn with_api_url_override(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url.filter(|url| !url.trim().is_empty()) {
            self.api_url = url;
        }
        self
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(&path, raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = TodoConfig::from_toml("").unwrap();
        assert_eq!(config, TodoConfig::default());
        assert_eq!(config.api_url, "http://localhost:3001");
    }

    #[test]
    fn partial_reminder_section_keeps_other_defaults() {
        let config = TodoConfig::from_toml(
            r#"
api_url = "http://todo.internal/api"

[reminders]
lead_minutes = 30
"#,
        )
        .unwrap();
        assert_eq!(config.api_url, "http://todo.internal/api");
        assert!(config.reminders.enabled);
        assert_eq!(config.reminders.interval_secs, 60);
        assert_eq!(config.reminders.lead_minutes, 30);
    }

    #[test]
    fn env_override_wins_unless_blank() {
        let config = TodoConfig::default()
            .with_api_url_override(Some("http://example.test:9000".to_string()));
        assert_eq!(config.api_url, "http://example.test:9000");

        let config = TodoConfig::default().with_api_url_override(Some("  ".to_string()));
        assert_eq!(config.api_url, "http://localhost:3001");
    }

    #[test]
    fn reminder_settings_are_clamped() {
        let reminders = ReminderConfig {
            enabled: true,
            interval_secs: 0,
            lead_minutes: -5,
        };
        let settings = reminders.settings(time::UtcOffset::UTC);
        assert_eq!(settings.period, Duration::from_secs(1));
        assert_eq!(settings.lead, time::Duration::ZERO);
    }

    #[test]
    fn round_trips_through_toml() {
        let raw = toml::to_string_pretty(&TodoConfig::default()).unwrap();
        assert_eq!(TodoConfig::from_toml(&raw).unwrap(), TodoConfig::default());
    }
}
