//! Telegram Bot API HTTP client.

use super::json_models::{
    ApiResponse, InlineKeyboardButton, InlineKeyboardMarkup, TelegramFile, Update,
};
use postilion_core::{ChannelId, Choice};
use postilion_error::{HttpError, JsonError, PostilionResult};
use reqwest::Client;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, error, instrument};

const API_BASE: &str = "https://api.telegram.org";

/// Addressee of an outbound Bot API call: a private chat by numeric id or
/// a broadcast channel by `@username`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ChatTarget {
    /// Numeric chat id
    Id(i64),
    /// Channel username, including the leading `@`
    Username(String),
}

impl From<ChannelId> for ChatTarget {
    fn from(channel: ChannelId) -> Self {
        ChatTarget::Id(channel.0)
    }
}

/// Thin client over the Bot API methods the bot needs.
#[derive(Debug, Clone)]
pub struct TelegramClient {
    client: Client,
    token: String,
}

impl TelegramClient {
    /// Creates a new client for the given bot token.
    pub fn new(token: impl Into<String>) -> Self {
        debug!("Creating new Telegram client");
        Self {
            client: Client::new(),
            token: token.into(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", API_BASE, self.token, method)
    }

    async fn call<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        body: serde_json::Value,
    ) -> PostilionResult<T> {
        let response = self
            .client
            .post(self.method_url(method))
            .json(&body)
            .send()
            .await
            .map_err(|e| HttpError::new(format!("{} request failed: {}", method, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            error!(method, status = %status, body = %text, "Bot API returned error");
            return Err(HttpError::bad_status(method, status).into());
        }

        let parsed: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| JsonError::bad_shape(method, e))?;

        if !parsed.ok {
            let description = parsed.description.unwrap_or_default();
            error!(method, description, "Bot API rejected the call");
            return Err(HttpError::new(format!("{} rejected: {}", method, description)).into());
        }

        parsed
            .result
            .ok_or_else(|| JsonError::new(format!("{} response had no result", method)).into())
    }

    fn keyboard(choices: &[Choice]) -> Option<InlineKeyboardMarkup> {
        if choices.is_empty() {
            return None;
        }
        // One button per row, matching the original keyboards
        Some(InlineKeyboardMarkup {
            inline_keyboard: choices
                .iter()
                .map(|choice| {
                    vec![InlineKeyboardButton {
                        text: choice.label.clone(),
                        callback_data: choice.data.clone(),
                    }]
                })
                .collect(),
        })
    }

    /// Long-poll for updates past `offset`.
    #[instrument(skip(self))]
    pub async fn get_updates(
        &self,
        offset: i64,
        timeout_secs: u64,
    ) -> PostilionResult<Vec<Update>> {
        self.call(
            "getUpdates",
            json!({
                "offset": offset,
                "timeout": timeout_secs,
                "allowed_updates": ["message", "callback_query"],
            }),
        )
        .await
    }

    /// Send a text message, optionally with an inline keyboard.
    #[instrument(skip(self, text, choices))]
    pub async fn send_message(
        &self,
        chat: &ChatTarget,
        text: &str,
        choices: &[Choice],
    ) -> PostilionResult<()> {
        let mut body = json!({ "chat_id": chat, "text": text });
        if let Some(markup) = Self::keyboard(choices) {
            body["reply_markup"] = serde_json::to_value(markup)
                .map_err(|e| JsonError::new(format!("Failed to encode keyboard: {}", e)))?;
        }
        self.call::<serde_json::Value>("sendMessage", body).await?;
        Ok(())
    }

    /// Send a photo by URL with a caption, optionally with an inline keyboard.
    #[instrument(skip(self, photo_url, caption, choices))]
    pub async fn send_photo(
        &self,
        chat: &ChatTarget,
        photo_url: &str,
        caption: &str,
        choices: &[Choice],
    ) -> PostilionResult<()> {
        let mut body = json!({
            "chat_id": chat,
            "photo": photo_url,
            "caption": caption,
        });
        if let Some(markup) = Self::keyboard(choices) {
            body["reply_markup"] = serde_json::to_value(markup)
                .map_err(|e| JsonError::new(format!("Failed to encode keyboard: {}", e)))?;
        }
        self.call::<serde_json::Value>("sendPhoto", body).await?;
        Ok(())
    }

    /// Acknowledge an inline-keyboard button press.
    #[instrument(skip(self))]
    pub async fn answer_callback(&self, callback_id: &str) -> PostilionResult<()> {
        self.call::<bool>("answerCallbackQuery", json!({ "callback_query_id": callback_id }))
            .await?;
        Ok(())
    }

    /// Resolve a file id to its download URL.
    ///
    /// The returned URL embeds the bot token, as the Bot API requires;
    /// it is only ever handed to the media relay.
    #[instrument(skip(self))]
    pub async fn file_url(&self, file_id: &str) -> PostilionResult<String> {
        let file: TelegramFile = self.call("getFile", json!({ "file_id": file_id })).await?;
        let path = file
            .file_path
            .ok_or_else(|| JsonError::new("getFile response had no file_path"))?;
        Ok(format!("{}/file/bot{}/{}", API_BASE, self.token, path))
    }
}
