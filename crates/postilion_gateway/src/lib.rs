//! Generation and relay gateways for the Postilion post bot.
//!
//! The workflow engine talks to three external services through the traits
//! defined here: a text-generation service for captions, an
//! image-generation service, and a media relay that turns any image source
//! into a stable public URL. The OpenAI- and imgbb-backed implementations
//! live alongside the traits; tests substitute their own impls.
//!
//! Failure policy: caption generation degrades to a sentinel caption at
//! this boundary and never raises; image generation and relay failures are
//! raised so the workflow can hold the session in its image-selection
//! state for a retry.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod imgbb;
mod openai;
mod prompts;
mod traits;

pub use imgbb::ImgbbRelay;
pub use openai::{OpenAiGateway, GENERATION_FAILED_CAPTION};
pub use prompts::{caption_prompt, edit_prompt, image_prompt};
pub use traits::{CaptionGateway, ImageGateway, MediaRelay};
