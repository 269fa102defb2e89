use log::info;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::path::Path;
use url::Url;

use crate::localization::Messages;

pub const TOKEN_PLACEHOLDER: &str = "YOUR_BOT_TOKEN_HERE";

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config file: {}", e),
            ConfigError::Invalid(reason) => write!(f, "Invalid configuration: {}", reason),
        }
    }
}

impl Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

/// a channel the user has to join before the reward is revealed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub name: String,
    /// handle used for membership lookups, normalized to `@username`
    pub identifier: String,
    pub join_url: String,
}

impl Channel {
    pub fn new(name: &str, identifier: &str, join_url: &str) -> Self {
        Self {
            name: name.to_string(),
            identifier: normalize_channel_identifier(identifier)
                .unwrap_or_else(|| identifier.to_string()),
            join_url: join_url.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusiveReward {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    pub channels: Vec<Channel>,
    pub reward: ExclusiveReward,
    pub messages: Messages,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            channels: vec![
                Channel::new(
                    "Nill Earning Zone",
                    "@nillearningzone",
                    "https://t.me/nillearningzone",
                ),
                Channel::new(
                    "Abu Saeid Nill",
                    "@abusaeidnill1",
                    "https://t.me/abusaeidnill1",
                ),
                Channel::new("Nill TG Teach", "@nilltgtach", "https://t.me/nilltgtach"),
            ],
            reward: ExclusiveReward {
                name: "Join Whatsapp/Telegram OTP Grup".to_string(),
                url: "https://t.me/+LW7G5kBBJWNkMDZl".to_string(),
            },
            messages: Messages::default(),
        }
    }
}

/// accepts `name`, `@name` and `t.me/name` links, returns `@name`
pub fn normalize_channel_identifier(text: &str) -> Option<String> {
    // telegram usernames are 5-32 chars, alphanumeric and underscore
    let username_regex = Regex::new(r"^@?([a-zA-Z0-9_]{5,32})$").ok()?;
    let tme_regex = Regex::new(r"^(?:https?://)?t\.me/([a-zA-Z0-9_]{5,32})/?$").ok()?;

    let text = text.trim();
    let captures = username_regex
        .captures(text)
        .or_else(|| tme_regex.captures(text))?;

    Some(format!("@{}", &captures[1]))
}

impl GateConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: GateConfig = serde_json::from_str(json)?;
        config.normalize()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json(&contents)?;
        info!(
            "Loaded gate configuration from {:?} ({} required channels)",
            path,
            config.channels.len()
        );
        Ok(config)
    }

    /// loads from `path` when given, otherwise falls back to the built-in defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                info!("No gate config file given, using built-in channel list");
                Ok(Self::default())
            }
        }
    }

    fn normalize(&mut self) -> Result<(), ConfigError> {
        if self.channels.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one required channel must be configured".to_string(),
            ));
        }

        for channel in &mut self.channels {
            if channel.name.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "channel {} has an empty name",
                    channel.identifier
                )));
            }
            channel.identifier = normalize_channel_identifier(&channel.identifier).ok_or_else(
                || {
                    ConfigError::Invalid(format!(
                        "channel {} has an invalid identifier: {}",
                        channel.name, channel.identifier
                    ))
                },
            )?;
            if !is_http_url(&channel.join_url) {
                return Err(ConfigError::Invalid(format!(
                    "channel {} has an invalid join url: {}",
                    channel.name, channel.join_url
                )));
            }
        }

        for (i, channel) in self.channels.iter().enumerate() {
            if self.channels[..i]
                .iter()
                .any(|other| other.identifier.eq_ignore_ascii_case(&channel.identifier))
            {
                return Err(ConfigError::Invalid(format!(
                    "channel {} is listed more than once",
                    channel.identifier
                )));
            }
        }

        if !is_http_url(&self.reward.url) {
            return Err(ConfigError::Invalid(format!(
                "reward has an invalid url: {}",
                self.reward.url
            )));
        }

        Ok(())
    }
}

/// must parse the same way the inline keyboard url buttons do
fn is_http_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some(),
        Err(_) => false,
    }
}

/// true when the token is missing or still the placeholder value
pub fn is_token_unset(token: Option<&str>) -> bool {
    match token {
        Some(token) => token.trim().is_empty() || token == TOKEN_PLACEHOLDER,
        None => true,
    }
}
