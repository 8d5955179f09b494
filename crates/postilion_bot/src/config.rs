//! Bot configuration, loaded from a TOML file or from the environment.

use postilion_core::Account;
use postilion_error::{ConfigError, PostilionResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the post bot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Chat transport and broadcast channel
    pub telegram: TelegramConfig,
    /// Text and image generation
    pub openai: OpenAiConfig,
    /// Media relay
    pub imgbb: ImgbbConfig,
    /// Graph API publishing
    pub meta: MetaConfig,
    /// Session lifecycle
    #[serde(default)]
    pub session: SessionConfig,
    /// Accounts to seed the in-memory store with
    #[serde(default)]
    pub accounts: Vec<AccountEntry>,
}

/// Telegram bot token and publish channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot API token
    pub bot_token: String,
    /// Channel username to publish to, including the leading `@`
    pub channel: String,
}

/// OpenAI credentials and model selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// API key
    pub api_key: String,
    /// Chat model for caption generation and editing
    #[serde(default = "default_chat_model")]
    pub chat_model: String,
    /// Image generation model
    #[serde(default = "default_image_model")]
    pub image_model: String,
}

/// imgbb media relay credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImgbbConfig {
    /// API key
    pub api_key: String,
}

/// Meta Graph API credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaConfig {
    /// Page/user access token
    pub access_token: String,
    /// Facebook page id
    pub fb_page_id: String,
    /// Instagram business user id
    pub ig_user_id: String,
}

/// Session lifecycle settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Sessions idle longer than this are discarded (seconds)
    #[serde(default = "default_idle_ttl_secs")]
    pub idle_ttl_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_ttl_secs: default_idle_ttl_secs(),
        }
    }
}

/// One seeded account: the id and token issued by the web application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountEntry {
    /// Account id
    pub id: i64,
    /// Secret access token
    pub token: String,
}

impl From<AccountEntry> for Account {
    fn from(entry: AccountEntry) -> Self {
        Account {
            id: entry.id,
            token: entry.token,
            channel: None,
        }
    }
}

fn default_chat_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_image_model() -> String {
    "dall-e-3".to_string()
}

fn default_idle_ttl_secs() -> u64 {
    1800
}

impl BotConfig {
    /// Load bot configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> PostilionResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)).into())
    }

    /// Build configuration from the environment, using the deployment's
    /// historical variable names. Accounts can only be seeded from a file.
    pub fn from_env() -> PostilionResult<Self> {
        Ok(Self {
            telegram: TelegramConfig {
                bot_token: require_env("BOT_TOKEN")?,
                channel: require_env("CHANNEL")?,
            },
            openai: OpenAiConfig {
                api_key: require_env("OPENAI_KEY")?,
                chat_model: optional_env("OPENAI_CHAT_MODEL").unwrap_or_else(default_chat_model),
                image_model: optional_env("OPENAI_IMAGE_MODEL")
                    .unwrap_or_else(default_image_model),
            },
            imgbb: ImgbbConfig {
                api_key: require_env("IMGBB_API_KEY")?,
            },
            meta: MetaConfig {
                access_token: require_env("META_TOKEN")?,
                fb_page_id: require_env("FB_PAGE_ID")?,
                ig_user_id: require_env("IG_USER_ID")?,
            },
            session: SessionConfig::default(),
            accounts: Vec::new(),
        })
    }
}

fn require_env(name: &str) -> PostilionResult<String> {
    std::env::var(name)
        .map_err(|_| ConfigError::missing_var(name).into())
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}
