use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from config.toml in the data directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Show the key hint line when no notification is visible
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// How long a notification stays in the status row
    #[serde(default = "default_toast_ms")]
    pub toast_ms: u64,
    /// Two clicks on the same field within this window open an edit
    #[serde(default = "default_double_click_ms")]
    pub double_click_ms: u64,
    /// Color overrides by theme slot name ("highlight" = "#FB4196")
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            toast_ms: default_toast_ms(),
            double_click_ms: default_double_click_ms(),
            colors: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            enabled: true,
            level: default_log_level(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_toast_ms() -> u64 {
    2600
}

fn default_double_click_ms() -> u64 {
    400
}

fn default_log_level() -> String {
    "info".to_string()
}
