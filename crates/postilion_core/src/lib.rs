//! Core data types for the Postilion post bot.
//!
//! This crate provides the shared vocabulary of the workspace: the account
//! and draft records, the chat event and reply shapes, and the platform
//! selection types used by the publish fan-out.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod account;
mod draft;
mod event;
mod platform;
mod reply;

pub use account::{Account, ChannelId};
pub use draft::{Draft, ImageSourceKind, Language};
pub use event::{BotCommand, ChatEvent, InboundEvent};
pub use platform::{Platform, PublishTarget};
pub use reply::{Choice, Reply};
