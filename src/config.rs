use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{FixtureError, Result};

pub const DEFAULT_BASE_URL: &str = "https://www.skysports.com";

/// Longest accepted fixture window. Pages only cover two months, so anything beyond is moot.
pub const MAX_WINDOW_DAYS: i64 = 3660;

/// Runtime settings. Every field has a default; environment variables override them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Length of the upcoming-fixtures window.
    pub window_days: i64,
    /// Maximum number of teams fetched at once.
    pub max_concurrency: usize,
    pub fetch_timeout_secs: u64,
    pub base_url: String,
    /// Civil timezone the source site publishes kickoff times in.
    pub source_timezone: String,
    /// Timezone the reminder rules and display records are expressed in.
    pub display_timezone: String,
    pub catalog_path: Option<PathBuf>,
    pub holidays_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_days: 7,
            max_concurrency: 5,
            fetch_timeout_secs: 10,
            base_url: DEFAULT_BASE_URL.to_string(),
            source_timezone: "Europe/London".to_string(),
            display_timezone: "Asia/Shanghai".to_string(),
            catalog_path: None,
            holidays_path: None,
        }
    }
}

impl Settings {
    /// Defaults overlaid with any `FIXTURES_*` environment variables that are set.
    pub fn from_env() -> Result<Self> {
        let mut settings = Self::default();
        if let Some(v) = read_var("FIXTURES_WINDOW_DAYS")? {
            settings.window_days = v;
        }
        if let Some(v) = read_var("FIXTURES_MAX_CONCURRENCY")? {
            settings.max_concurrency = v;
        }
        if let Some(v) = read_var("FIXTURES_FETCH_TIMEOUT_SECS")? {
            settings.fetch_timeout_secs = v;
        }
        if let Ok(v) = env::var("FIXTURES_BASE_URL") {
            settings.base_url = v.trim_end_matches('/').to_string();
        }
        if let Ok(v) = env::var("FIXTURES_SOURCE_TZ") {
            settings.source_timezone = v;
        }
        if let Ok(v) = env::var("FIXTURES_DISPLAY_TZ") {
            settings.display_timezone = v;
        }
        settings.catalog_path = env::var_os("FIXTURES_CATALOG_PATH").map(PathBuf::from);
        settings.holidays_path = env::var_os("FIXTURES_HOLIDAYS_PATH").map(PathBuf::from);
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0..=MAX_WINDOW_DAYS).contains(&self.window_days) {
            return Err(FixtureError::Config(format!(
                "window_days must be between 0 and {}, got {}",
                MAX_WINDOW_DAYS, self.window_days
            )));
        }
        if self.max_concurrency == 0 {
            return Err(FixtureError::Config("max_concurrency must be at least 1".to_string()));
        }
        self.source_tz()?;
        self.display_tz()?;
        Ok(())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn window(&self) -> chrono::Duration {
        chrono::Duration::days(self.window_days.clamp(0, MAX_WINDOW_DAYS))
    }

    pub fn source_tz(&self) -> Result<Tz> {
        parse_tz(&self.source_timezone)
    }

    pub fn display_tz(&self) -> Result<Tz> {
        parse_tz(&self.display_timezone)
    }
}

fn parse_tz(name: &str) -> Result<Tz> {
    Tz::from_str(name).map_err(|e| FixtureError::Config(format!("invalid timezone {:?}: {}", name, e)))
}

fn read_var<T: FromStr>(key: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| FixtureError::Config(format!("{} = {:?}: {}", key, raw, e))),
        Err(_) => Ok(None),
    }
}
