//! Media relay error types.

/// Error from the external image-hosting relay.
///
/// Fatal to the current image step: the workflow reports it to the user
/// and leaves the session where it was so the image can be re-submitted.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Relay Error: {} at line {} in {}", message, line, file)]
pub struct RelayError {
    /// The underlying error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl RelayError {
    /// Create a new RelayError with the given message at the current location.
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
