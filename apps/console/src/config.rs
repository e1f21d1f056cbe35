use std::{fs, path::Path, time::Duration};

use serde::Deserialize;
use tracing::warn;

pub const CONFIG_FILE: &str = "client.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub request_timeout_secs: Option<u64>,
    pub progress_tick_ms: u64,
    pub synthetic_progress: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".into(),
            request_timeout_secs: None,
            progress_tick_ms: 200,
            synthetic_progress: true,
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    pub fn progress_tick(&self) -> Duration {
        Duration::from_millis(self.progress_tick_ms.max(1))
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_url: Option<String>,
    request_timeout_secs: Option<u64>,
    progress_tick_ms: Option<u64>,
    synthetic_progress: Option<bool>,
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(CONFIG_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the config file, then environment variables.
pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.api_url {
                    settings.api_url = v;
                }
                if let Some(v) = file_cfg.request_timeout_secs {
                    settings.request_timeout_secs = Some(v);
                }
                if let Some(v) = file_cfg.progress_tick_ms {
                    settings.progress_tick_ms = v;
                }
                if let Some(v) = file_cfg.synthetic_progress {
                    settings.synthetic_progress = v;
                }
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "ignoring unreadable config file");
            }
        }
    }

    if let Some(v) = env("SENTIMENT_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = env("APP__API_URL") {
        settings.api_url = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.trim().parse::<u64>() {
            settings.request_timeout_secs = Some(parsed);
        }
    }

    if let Some(v) = env("APP__PROGRESS_TICK_MS") {
        if let Ok(parsed) = v.trim().parse::<u64>() {
            settings.progress_tick_ms = parsed;
        }
    }

    if let Some(v) = env("APP__SYNTHETIC_PROGRESS") {
        if let Ok(parsed) = v.trim().parse::<bool>() {
            settings.synthetic_progress = parsed;
        }
    }

    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
