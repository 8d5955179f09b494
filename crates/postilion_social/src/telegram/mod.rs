//! Telegram Bot API integration: wire models, the HTTP client, the
//! broadcast-channel publisher, and the long-polling chat transport.

mod client;
mod json_models;
mod publisher;
mod transport;

pub use client::{ChatTarget, TelegramClient};
pub use json_models::{
    CallbackQuery, Chat, IncomingMessage, PhotoSize, Update,
};
pub use publisher::TelegramChannelPublisher;
pub use transport::TelegramTransport;
