//! Generation service error types.

/// Error from a text- or image-generation service call.
///
/// Caption generation never surfaces this to the workflow (the gateway
/// degrades to a sentinel caption); image generation does, and the
/// session stays in its image-selection state so the user can retry.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", message, line, file)]
pub struct GenerationError {
    /// The underlying error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with the given message at the current location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
