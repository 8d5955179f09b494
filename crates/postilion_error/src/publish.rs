//! Platform publish error types.

/// Error from a single platform publish call.
///
/// Per-target and independent: one target failing never aborts the
/// sibling targets in a fan-out.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Publish Error ({}): {} at line {} in {}", platform, message, line, file)]
pub struct PublishError {
    /// Platform the publish was addressed to
    pub platform: String,
    /// The underlying error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl PublishError {
    /// Create a new PublishError for the given platform at the current location.
    #[track_caller]
    pub fn new(platform: impl Into<String>, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            platform: platform.into(),
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
