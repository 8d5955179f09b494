//! Error types for the Postilion post bot.
//!
//! All errors follow the wrapper-struct pattern: a small `*Error` struct
//! per failure domain, carrying the message and the source location where
//! it was raised (`#[track_caller]`), plus a top-level `PostilionError`
//! that the rest of the workspace converts into with `?`.
//!
//! # Examples
//!
//! ```
//! use postilion_error::{PostilionResult, HttpError};
//!
//! fn fetch_data() -> PostilionResult<String> {
//!     Err(HttpError::new("Connection refused"))?
//! }
//!
//! match fetch_data() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod generation;
mod publish;
mod relay;
mod store;
mod wire;

pub use config::ConfigError;
pub use error::{PostilionError, PostilionErrorKind, PostilionResult};
pub use generation::GenerationError;
pub use publish::PublishError;
pub use relay::RelayError;
pub use store::StoreError;
pub use wire::{HttpError, JsonError};
