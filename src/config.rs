//! Configuration handling for the form

use crate::state::Timings;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// User configuration, every field optional
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FormConfig {
    /// Directory holding saved progress and preferences
    pub storage_dir: Option<PathBuf>,
    /// Quiet period before saving typed input (ms)
    pub autosave_delay_ms: Option<u64>,
    /// Delay of an explicit save (ms)
    pub manual_save_delay_ms: Option<u64>,
    /// How long a submission is shown as in progress (ms)
    pub submit_delay_ms: Option<u64>,
    /// How long announcements stay in the live region (ms)
    pub announcement_ms: Option<u64>,
    /// How long toasts stay visible (ms)
    pub toast_ms: Option<u64>,
}

impl FormConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "accessible-form", "accessible-form")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: FormConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Resolve delays, falling back to the defaults
    pub fn timings(&self) -> Timings {
        let defaults = Timings::default();
        let ms = |value: Option<u64>, fallback: Duration| {
            value.map(Duration::from_millis).unwrap_or(fallback)
        };

        Timings {
            autosave_delay: ms(self.autosave_delay_ms, defaults.autosave_delay),
            manual_save_delay: ms(self.manual_save_delay_ms, defaults.manual_save_delay),
            submit_delay: ms(self.submit_delay_ms, defaults.submit_delay),
            announcement_duration: ms(self.announcement_ms, defaults.announcement_duration),
            toast_duration: ms(self.toast_ms, defaults.toast_duration),
            scroll_duration: defaults.scroll_duration,
        }
    }
}
