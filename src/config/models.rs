use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::TaskFilter;

use super::constants::{DEFAULT_ENDPOINT, GREETING, LOG_FILE_PATH, NOTICE_DISPLAY_MS, RELOAD_DELAY_MS};
use super::defaults::*;

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Configuration {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub notice: NoticeConfig,

    #[serde(default)]
    pub reload: ReloadConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GeneralConfig {
    /// Logged once when the first frame has been drawn.
    #[serde(default = "greeting")]
    pub greeting: String,

    #[serde(default)]
    pub verbose: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LogConfig {
    #[serde(default = "log_level")]
    pub level: Option<String>,

    #[serde(default)]
    pub filters: Option<Vec<LogFilter>>,

    #[serde(default)]
    pub file: LogFile,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LogFilter {
    #[serde(default)]
    pub module: Option<String>,

    #[serde(default)]
    pub level: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LogFile {
    #[serde(default = "log_file_path")]
    pub path: String,

    #[serde(default)]
    pub append: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ServerConfig {
    #[serde(default = "endpoint")]
    pub endpoint: String,

    #[serde(default)]
    pub timeout_secs: Option<u16>,

    #[serde(default)]
    pub filter: TaskFilter,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct NoticeConfig {
    /// When disabled the notice slot is not mounted and every notice is dropped.
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "notice_display_ms")]
    pub display_ms: u64,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ReloadConfig {
    #[serde(default = "reload_delay_ms")]
    pub delay_ms: u64,
}

impl ServerConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(|secs| Duration::from_secs(secs as u64))
    }
}

impl NoticeConfig {
    pub fn display_duration(&self) -> Duration {
        Duration::from_millis(self.display_ms)
    }
}

impl ReloadConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            greeting: GREETING.to_string(),
            verbose: false,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Some("info".to_string()),
            file: LogFile::default(),
            filters: None,
        }
    }
}

impl Default for LogFile {
    fn default() -> Self {
        Self {
            path: LOG_FILE_PATH.to_string(),
            append: false,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: None,
            filter: TaskFilter::default(),
        }
    }
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            display_ms: NOTICE_DISPLAY_MS,
        }
    }
}

impl Default for ReloadConfig {
    fn default() -> Self {
        Self {
            delay_ms: RELOAD_DELAY_MS,
        }
    }
}
