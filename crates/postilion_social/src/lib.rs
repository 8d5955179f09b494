//! Platform publishers and chat transport for the Postilion post bot.
//!
//! This crate owns everything that crosses the network on the publishing
//! side: the [`PlatformPublisher`] trait with Telegram, Facebook, and
//! Instagram implementations, the [`FanOut`] aggregator that dispatches a
//! finished draft to a platform selection, and the [`ChatTransport`] trait
//! with the Telegram Bot API long-polling implementation the dispatcher
//! reads events from.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod meta;
mod publish;
mod telegram;
mod transport;

pub use meta::{FacebookPublisher, InstagramPublisher};
pub use publish::{FanOut, PlatformPublisher, PublishReport};
pub use telegram::{
    CallbackQuery, Chat, ChatTarget, IncomingMessage, PhotoSize, TelegramChannelPublisher,
    TelegramClient, TelegramTransport, Update,
};
pub use transport::ChatTransport;
