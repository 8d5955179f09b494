//! Conversational workflow engine for the Postilion post bot.
//!
//! This crate is the orchestrator: a per-user finite-state machine that
//! collects a topic, an image, and a language, drives caption generation
//! and the edit loop, and finally fans publication out to the selected
//! platforms. It consumes the gateways and publishers from the sibling
//! crates through their traits and owns no network code of its own.
//!
//! The machine itself is the pure [`transition`] function over
//! [`WorkflowState`], [`postilion_core::Draft`], and
//! [`postilion_core::ChatEvent`]; external calls are described as
//! [`Effect`] values and executed separately by the [`WorkflowEngine`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod account;
mod config;
mod engine;
mod identity;
mod server;
mod session;
mod workflow;

pub use account::{AccountStore, MemoryAccountStore};
pub use config::{
    AccountEntry, BotConfig, ImgbbConfig, MetaConfig, OpenAiConfig, SessionConfig, TelegramConfig,
};
pub use engine::WorkflowEngine;
pub use identity::{BindOutcome, IdentityResolver};
pub use server::BotServer;
pub use session::{Session, SessionStore};
pub use workflow::{Effect, Step, WorkflowState, transition};
