//! Configuration for the relay server and the game client.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Environment variable holding the chat bot token.
pub const BOT_TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";
/// Environment variable holding the destination chat id.
pub const CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";
/// Environment variable overriding the chat API base URL.
pub const API_BASE_VAR: &str = "TELEGRAM_API_BASE";

fn default_api_base() -> String {
    "https://api.telegram.org".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

/// Settings for the notification relay.
#[derive(Clone, Getters, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Bot credential for the chat API.
    bot_token: String,

    /// Chat that receives every message.
    chat_id: String,

    /// Base URL of the chat API.
    #[serde(default = "default_api_base")]
    api_base: String,

    /// Address to bind.
    #[serde(default = "default_host")]
    host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    #[getter(skip)]
    port: u16,
}

impl std::fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayConfig")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("api_base", &self.api_base)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

impl RelayConfig {
    /// Creates a configuration with default endpoint and bind address.
    #[instrument(skip_all)]
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            api_base: default_api_base(),
            host: default_host(),
            port: default_port(),
        }
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading relay config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(chat_id = %config.chat_id, "Relay config loaded");
        Ok(config)
    }

    /// Reads the configuration from environment variables.
    ///
    /// Requires `TELEGRAM_BOT_TOKEN` and `TELEGRAM_CHAT_ID`;
    /// `TELEGRAM_API_BASE` is optional.
    #[instrument]
    pub fn from_env() -> Result<Self, ConfigError> {
        let bot_token = std::env::var(BOT_TOKEN_VAR).map_err(|_| {
            ConfigError::new(format!("{} environment variable not set", BOT_TOKEN_VAR))
        })?;
        let chat_id = std::env::var(CHAT_ID_VAR).map_err(|_| {
            ConfigError::new(format!("{} environment variable not set", CHAT_ID_VAR))
        })?;

        let mut config = Self::new(bot_token, chat_id);
        if let Ok(api_base) = std::env::var(API_BASE_VAR) {
            config.api_base = api_base;
        }
        Ok(config)
    }

    /// Port to bind.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Points the relay at a different chat API.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Overrides the bind address where given.
    pub fn with_bind(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    /// URL of the chat API's send-message method.
    pub fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_base.trim_end_matches('/'),
            self.bot_token
        )
    }
}

/// Settings for a game client.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct GameConfig {
    /// Pause before the computer replies, in milliseconds.
    #[getter(skip)]
    computer_delay_ms: u64,

    /// Number of digits in a promo code.
    #[getter(skip)]
    promo_code_len: usize,

    /// Base URL of the notification relay.
    #[setters(into)]
    relay_url: String,
}

impl GameConfig {
    /// Number of digits in a promo code.
    pub fn promo_code_len(&self) -> usize {
        self.promo_code_len
    }

    /// Pause before the computer replies.
    pub fn computer_delay(&self) -> Duration {
        Duration::from_millis(self.computer_delay_ms)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            computer_delay_ms: 300,
            promo_code_len: 5,
            relay_url: format!("http://localhost:{}", default_port()),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_file_applies_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bot_token = \"123:abc\"\nchat_id = \"42\"\nport = 8080").unwrap();

        let config = RelayConfig::from_file(file.path()).unwrap();
        assert_eq!(config.chat_id(), "42");
        assert_eq!(config.port(), 8080);
        assert_eq!(config.host(), "127.0.0.1");
        assert_eq!(
            config.send_message_url(),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn test_from_file_missing_token() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "chat_id = \"42\"").unwrap();
        let err = RelayConfig::from_file(file.path()).unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
    }

    #[test]
    fn test_debug_hides_token() {
        let config = RelayConfig::new("secret-token", "42");
        assert!(!format!("{:?}", config).contains("secret-token"));
    }

    #[test]
    fn test_game_config_setters() {
        let config = GameConfig::default()
            .with_computer_delay_ms(0)
            .with_relay_url("http://relay.test");
        assert_eq!(config.computer_delay(), Duration::ZERO);
        assert_eq!(config.promo_code_len(), 5);
        assert_eq!(config.relay_url(), "http://relay.test");
    }
}
