//! Inbound chat event shapes.

use crate::ChannelId;
use serde::{Deserialize, Serialize};

/// Slash commands understood by the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BotCommand {
    /// `/start` — prompts for the site-issued access token
    Start,
    /// `/menu` — starts (or restarts) a post workflow
    Menu,
}

impl BotCommand {
    /// Parse a message text as a command, tolerating a `@botname` suffix.
    pub fn parse(text: &str) -> Option<Self> {
        let command = text.trim().strip_prefix('/')?;
        let command = command.split('@').next().unwrap_or(command);
        match command {
            "start" => Some(BotCommand::Start),
            "menu" => Some(BotCommand::Menu),
            _ => None,
        }
    }
}

/// One event delivered by the chat transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChatEvent {
    /// A recognized slash command
    Command(BotCommand),
    /// Free text (topic, link, prompt, edit instruction, or access token)
    Text(String),
    /// A photo attachment, already resolved to a fetchable URL
    Image {
        /// Download URL of the attached photo
        url: String,
    },
    /// An inline-keyboard button press, carrying its callback data
    Choice(String),
}

/// A chat event tagged with the channel identity it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundEvent {
    /// Chat endpoint the event originated from
    pub channel: ChannelId,
    /// The event payload
    pub event: ChatEvent,
}
