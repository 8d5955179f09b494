//! Wire-level failures: the HTTP exchange itself, and payloads that do
//! not match the shape the caller expected.

/// A failed HTTP exchange with an external service.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("HTTP Error: {} at line {} in {}", message, line, file)]
pub struct HttpError {
    /// The underlying error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl HttpError {
    /// Create a new HttpError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use postilion_error::HttpError;
    ///
    /// let err = HttpError::new("sendPhoto request failed");
    /// assert!(err.message.contains("sendPhoto"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// An exchange that completed but came back with a non-success status.
    #[track_caller]
    pub fn bad_status(what: impl std::fmt::Display, status: impl std::fmt::Display) -> Self {
        Self::new(format!("{} failed with {}", what, status))
    }
}

/// A payload that parsed as JSON but not into the expected shape, or a
/// response missing a field the caller cannot proceed without.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error: {} at line {} in {}", message, line, file)]
pub struct JsonError {
    /// The underlying error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl JsonError {
    /// Create a new JsonError with the given message at the current location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// A response body that did not decode into the expected shape.
    #[track_caller]
    pub fn bad_shape(what: impl std::fmt::Display, detail: impl std::fmt::Display) -> Self {
        Self::new(format!("Failed to parse {} response: {}", what, detail))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_status_names_call_and_status() {
        let err = HttpError::bad_status("getUpdates", "502 Bad Gateway");
        assert_eq!(err.message, "getUpdates failed with 502 Bad Gateway");
        assert!(err.file.ends_with("wire.rs"));
    }

    #[test]
    fn test_bad_shape_names_the_payload() {
        let err = JsonError::bad_shape("upload", "missing field `display_url`");
        assert!(err.message.contains("upload"));
        assert!(err.message.contains("display_url"));
    }

    #[test]
    fn test_location_is_the_call_site() {
        let a = HttpError::new("first");
        let b = HttpError::new("second");
        assert_eq!(a.line + 1, b.line);
    }
}
