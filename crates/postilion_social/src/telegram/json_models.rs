//! Serde models for the subset of the Telegram Bot API the bot uses.

use serde::{Deserialize, Serialize};

/// Envelope every Bot API response arrives in.
#[derive(Debug, Deserialize)]
pub(super) struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
}

/// One long-polling update.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    /// Monotonic update identifier, used as the next poll offset
    pub update_id: i64,
    /// Present for text and photo messages
    pub message: Option<IncomingMessage>,
    /// Present for inline-keyboard button presses
    pub callback_query: Option<CallbackQuery>,
}

/// An inbound message.
#[derive(Debug, Clone, Deserialize)]
pub struct IncomingMessage {
    /// Chat the message was sent in
    pub chat: Chat,
    /// Message text, if any
    pub text: Option<String>,
    /// Photo attachment as size variants, smallest first
    pub photo: Option<Vec<PhotoSize>>,
}

/// Chat descriptor.
#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    /// Numeric chat id
    pub id: i64,
}

/// An inline-keyboard button press.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    /// Query id, to be acknowledged with answerCallbackQuery
    pub id: String,
    /// Callback data of the pressed button
    pub data: Option<String>,
    /// Message the keyboard was attached to
    pub message: Option<IncomingMessage>,
}

/// One size variant of a photo attachment.
#[derive(Debug, Clone, Deserialize)]
pub struct PhotoSize {
    /// File identifier for getFile
    pub file_id: String,
}

/// getFile result.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct TelegramFile {
    pub file_path: Option<String>,
}

/// Inline keyboard markup for outbound messages.
#[derive(Debug, Clone, Serialize)]
pub(super) struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

/// One inline keyboard button.
#[derive(Debug, Clone, Serialize)]
pub(super) struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}
