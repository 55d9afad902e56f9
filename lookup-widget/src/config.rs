use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::state::Font;

fn default_api_base() -> String {
    dictionary::DEFAULT_API_BASE.to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("./logs")
}

fn default_file_logging() -> bool {
    true
}

/// Runtime settings: environment first, then command line flags.
#[derive(Debug, Clone)]
pub struct Config {
    /// Entries endpoint, the word is appended as the last path segment.
    pub api_base: String,
    pub request_timeout_secs: u64,
    pub log_level: String,
    pub log_dir: PathBuf,
    pub file_logging: bool,
    pub dark_theme: bool,
    pub font: Font,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            request_timeout_secs: default_request_timeout_secs(),
            log_level: default_log_level(),
            log_dir: default_log_dir(),
            file_logging: default_file_logging(),
            dark_theme: false,
            font: Font::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any variable source; unset or unparsable
    /// values keep their defaults.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Config::default();
        if let Some(api_base) = var("DICTIONARY_API_BASE") {
            config.api_base = api_base;
        }
        if let Some(secs) = var("REQUEST_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            config.request_timeout_secs = secs;
        }
        if let Some(level) = var("LOG_LEVEL") {
            config.log_level = level;
        }
        if let Some(dir) = var("LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }
        if let Some(enabled) = var("ENABLE_FILE_LOGS").and_then(|v| parse_flag(&v)) {
            config.file_logging = enabled;
        }
        if let Some(dark) = var("DARK_THEME").and_then(|v| parse_flag(&v)) {
            config.dark_theme = dark;
        }
        if let Some(font) = var("FONT_FAMILY").and_then(|v| v.parse().ok()) {
            config.font = font;
        }
        config
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
