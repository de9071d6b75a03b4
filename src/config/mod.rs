use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::board::TimeScale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ViewMode {
    #[default]
    Day,         // Timeline of one date across companies
    Week,        // Mon-Sun grid of day x company cells
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub use_sample_data: bool,
    #[serde(default = "default_font_scale")]
    pub font_scale: f32,
    #[serde(default)]
    pub view_mode: ViewMode,
    #[serde(default = "default_start_hour")]
    pub start_hour: u8,
    #[serde(default = "default_end_hour")]
    pub end_hour: u8,
    #[serde(default = "default_hour_width")]
    pub hour_width: f32,
    #[serde(default = "default_snap_minutes")]
    pub snap_minutes: u32,
    #[serde(default = "default_min_duration")]
    pub min_duration_minutes: u32,
    #[serde(default = "default_now_poll_secs")]
    pub now_poll_secs: u64,
}

fn default_start_hour() -> u8 {
    6  // 6am
}

fn default_end_hour() -> u8 {
    20  // 8pm
}

fn default_hour_width() -> f32 {
    64.0
}

fn default_snap_minutes() -> u32 {
    15
}

fn default_min_duration() -> u32 {
    30
}

fn default_now_poll_secs() -> u64 {
    60
}

fn default_font_scale() -> f32 {
    1.0
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_url: String::new(),
            api_key: None,
            use_sample_data: false,
            font_scale: default_font_scale(),
            view_mode: ViewMode::Day,
            start_hour: default_start_hour(),
            end_hour: default_end_hour(),
            hour_width: default_hour_width(),
            snap_minutes: default_snap_minutes(),
            min_duration_minutes: default_min_duration(),
            now_poll_secs: default_now_poll_secs(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path)
                .context("Failed to read config file")?;
            serde_json::from_str(&contents)
                .context("Failed to parse config file")
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    pub fn is_configured(&self) -> bool {
        self.use_sample_data
            || (!self.store_url.trim().is_empty() && self.api_key.is_some())
    }

    fn config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "siteboard", "siteboard")
            .context("Could not determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }

    pub fn rest_url(&self) -> String {
        let trimmed = self.store_url.trim();
        // Keep an explicit http:// for local stacks, everything else goes over https
        let scheme = if trimmed.starts_with("http://") { "http" } else { "https" };
        let host = trimmed
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/')
            .split('/')
            .next()
            .unwrap_or(trimmed);

        format!("{}://{}/rest/v1", scheme, host)
    }

    pub fn time_scale(&self) -> TimeScale {
        let start_hour = self.start_hour.min(23);
        let end_hour = self.end_hour.clamp(start_hour, 23);
        TimeScale {
            start_hour: start_hour as i32,
            end_hour: end_hour as i32,
            hour_width: if self.hour_width > 0.0 { self.hour_width } else { default_hour_width() },
            snap_minutes: self.snap_minutes.max(1) as i32,
            min_duration: self.min_duration_minutes as i32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn old_files_fill_defaults() {
        let config: Config = serde_json::from_str(r#"{"store_url":"x.supabase.co"}"#).unwrap();
        assert_eq!(config.snap_minutes, 15);
        assert_eq!(config.min_duration_minutes, 30);
        assert_eq!(config.now_poll_secs, 60);
        assert_eq!(config.view_mode, ViewMode::Day);
        assert!(!config.is_configured());
    }

    #[test]
    fn configured_with_key_or_sample_data() {
        let mut config = Config {
            store_url: "x.supabase.co".into(),
            api_key: Some("anon".into()),
            ..Config::default()
        };
        assert!(config.is_configured());
        config.api_key = None;
        config.use_sample_data = true;
        assert!(config.is_configured());
    }

    #[test]
    fn rest_url_normalises_host() {
        let mut config = Config::default();
        config.store_url = "https://abc.supabase.co/project/settings/".into();
        assert_eq!(config.rest_url(), "https://abc.supabase.co/rest/v1");
        config.store_url = " abc.supabase.co ".into();
        assert_eq!(config.rest_url(), "https://abc.supabase.co/rest/v1");
        config.store_url = "http://localhost:54321".into();
        assert_eq!(config.rest_url(), "http://localhost:54321/rest/v1");
    }

    #[test]
    fn time_scale_is_sanitised() {
        let config = Config {
            start_hour: 10,
            end_hour: 8,
            hour_width: 0.0,
            snap_minutes: 0,
            ..Config::default()
        };
        let scale = config.time_scale();
        assert_eq!(scale.end_hour, 10);
        assert_eq!(scale.hour_width, 64.0);
        assert_eq!(scale.snap_minutes, 1);

        let config = Config { start_hour: 6, end_hour: 24, ..Config::default() };
        let scale = config.time_scale();
        assert_eq!(scale.end_hour, 23);
        assert_eq!(scale.minutes_to_clock(scale.max_minutes()), "24:00");
    }
}
