//! Configuration file support

use folio_chat::ReplyPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming an alternative config file
pub const CONFIG_PATH_ENV: &str = "FOLIO_CONFIG_PATH";

/// Configuration for folio
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the chat service
    pub api_url: Option<String>,
    /// What to do with answers that carry no reply
    pub reply_policy: Option<ReplyPolicy>,
    /// Color theme (paper, dark)
    pub theme: Option<String>,
    /// Whether to use TUI mode by default
    pub tui: Option<bool>,
    /// Give up on a chat request after this many seconds
    pub request_timeout_secs: Option<u64>,
    /// Replaces the assistant's opening message
    pub greeting: Option<String>,
}

impl Config {
    /// Get the config directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("folio")
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return PathBuf::from(path);
        }
        Self::config_dir().join("config.toml")
    }

    /// Load config from the default location
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load config from a file, falling back to defaults when it is
    /// missing or unreadable
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Failed to parse config file: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Warning: Failed to read config file: {}", e);
                Self::default()
            }
        }
    }

    /// Save config to a file
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let content = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        fs::write(path, content)
    }

    /// Create a default config file if it doesn't exist
    pub fn init() -> std::io::Result<PathBuf> {
        let path = Self::config_path();
        if path.exists() {
            return Ok(path);
        }

        let default_config = Config {
            api_url: Some(folio_client::DEFAULT_BASE_URL.to_string()),
            reply_policy: Some(ReplyPolicy::Surface),
            theme: Some("paper".to_string()),
            tui: Some(true),
            request_timeout_secs: Some(30),
            greeting: None,
        };

        default_config.save_to(&path)?;
        Ok(path)
    }
}

/// Generate example config content
pub fn example_config() -> &'static str {
    r#"# folio configuration file
# Place at ~/.config/folio/config.toml (Linux/Mac) or %APPDATA%\folio\config.toml (Windows)

# Base URL of the chat service (FOLIO_API_URL and --api-url take precedence)
api_url = "http://localhost:5000"

# What to do when the service answers without a reply (surface, ignore)
reply_policy = "surface"

# Color theme (paper, dark)
theme = "paper"

# Whether to use TUI mode by default (true by default)
# Set to false for simple stdin/stdout mode
tui = true

# Give up on a chat request after this many seconds (optional)
request_timeout_secs = 30

# Replace the assistant's opening message (optional)
# greeting = "SYSTEM ONLINE."
"#
}
