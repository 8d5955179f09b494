//! Outbound reply shapes.

use serde::{Deserialize, Serialize};

/// One inline-keyboard button: a visible label plus the callback data the
/// transport sends back as a [`crate::ChatEvent::Choice`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    /// Button label shown to the user
    pub label: String,
    /// Callback data returned on press
    pub data: String,
}

impl Choice {
    /// Create a new choice button.
    pub fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }
}

/// An outbound message for the chat transport to deliver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Reply {
    /// Plain text message
    Text(String),
    /// Text message with an inline choice keyboard
    Prompt {
        /// Message text
        text: String,
        /// Keyboard buttons, one per row
        choices: Vec<Choice>,
    },
    /// Photo with caption, optionally with a choice keyboard
    Photo {
        /// Public URL of the photo
        url: String,
        /// Caption text
        caption: String,
        /// Keyboard buttons, one per row
        choices: Vec<Choice>,
    },
}
