//! Configuration management for ChatClone
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{ChatCloneError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fallback text shown in place of an assistant reply when a send fails
pub const DEFAULT_FALLBACK_MESSAGE: &str = "Sorry, I encountered an error. Please try again.";

/// Main configuration structure for ChatClone
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Chat server connection settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Chat behaviour settings
    #[serde(default)]
    pub chat: ChatConfig,

    /// Presentation settings
    #[serde(default)]
    pub ui: UiConfig,
}

/// Chat server connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL the `/api/...` endpoints are resolved against
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Optional request timeout in seconds. `None` waits indefinitely.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_user_agent() -> String {
    format!("chatclone/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: None,
            user_agent: default_user_agent(),
        }
    }
}

/// Chat behaviour configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Initial value of the research-mode toggle
    #[serde(default)]
    pub use_research: bool,

    /// Text appended as the assistant reply when a send fails
    #[serde(default = "default_fallback_message")]
    pub fallback_message: String,

    /// Title of the welcome placeholder shown on an empty transcript
    #[serde(default = "default_welcome_title")]
    pub welcome_title: String,
}

fn default_fallback_message() -> String {
    DEFAULT_FALLBACK_MESSAGE.to_string()
}

fn default_welcome_title() -> String {
    "Welcome to Enkay LLM ChatClone".to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            use_research: false,
            fallback_message: default_fallback_message(),
            welcome_title: default_welcome_title(),
        }
    }
}

/// Presentation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Viewport width (px) at or below which the sidebar behaves as an overlay
    #[serde(default = "default_sidebar_breakpoint")]
    pub sidebar_breakpoint: u32,

    /// Colorize terminal output
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_sidebar_breakpoint() -> u32 {
    768
}

fn default_color() -> bool {
    true
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            sidebar_breakpoint: default_sidebar_breakpoint(),
            color: default_color(),
        }
    }
}

impl Config {
    /// Load configuration from file, environment, and CLI
    ///
    /// A missing file is not an error: defaults are used and a warning is logged.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the YAML configuration file
    /// * `cli` - Parsed command line, for overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(ChatCloneError::from)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ChatCloneError::from)?;
        tracing::debug!("Loaded configuration from {}", path);
        Ok(config)
    }

    fn apply_env_vars(&mut self) {
        if let Ok(base_url) = std::env::var("CHATCLONE_SERVER_URL") {
            tracing::debug!(base_url = %base_url, "Env override: CHATCLONE_SERVER_URL");
            self.server.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("CHATCLONE_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.server.timeout_seconds = Some(value);
            } else {
                tracing::warn!("Invalid CHATCLONE_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if let Ok(research) = std::env::var("CHATCLONE_USE_RESEARCH") {
            match research.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.chat.use_research = true,
                "0" | "false" | "no" | "off" => self.chat.use_research = false,
                _ => tracing::warn!("Invalid CHATCLONE_USE_RESEARCH: {}", research),
            }
        }

        if let Ok(breakpoint) = std::env::var("CHATCLONE_SIDEBAR_BREAKPOINT") {
            if let Ok(value) = breakpoint.parse() {
                self.ui.sidebar_breakpoint = value;
            } else {
                tracing::warn!("Invalid CHATCLONE_SIDEBAR_BREAKPOINT: {}", breakpoint);
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(server) = &cli.server {
            tracing::debug!("Using server override from CLI: {}", server);
            self.server.base_url = server.clone();
        }
        if cli.no_color {
            self.ui.color = false;
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.server.base_url.trim().is_empty() {
            return Err(
                ChatCloneError::Config("server.base_url cannot be empty".to_string()).into(),
            );
        }

        let parsed = url::Url::parse(&self.server.base_url).map_err(|e| {
            ChatCloneError::Config(format!(
                "Invalid server.base_url {}: {}",
                self.server.base_url, e
            ))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ChatCloneError::Config(format!(
                "server.base_url must use http or https, got {}",
                parsed.scheme()
            ))
            .into());
        }

        if self.server.timeout_seconds == Some(0) {
            return Err(ChatCloneError::Config(
                "server.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.chat.fallback_message.trim().is_empty() {
            return Err(ChatCloneError::Config(
                "chat.fallback_message cannot be empty".to_string(),
            )
            .into());
        }

        if self.ui.sidebar_breakpoint == 0 {
            return Err(ChatCloneError::Config(
                "ui.sidebar_breakpoint must be greater than 0".to_string(),
            )
            .into());
        }

        Ok(())
    }
}
