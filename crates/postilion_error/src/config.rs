//! Configuration failures raised while loading bot settings from a TOML
//! file or from the environment.

/// A configuration value that could not be loaded or parsed.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Config Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// The underlying error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with the given message at the current location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// A required environment variable that is not set.
    ///
    /// # Examples
    ///
    /// ```
    /// use postilion_error::ConfigError;
    ///
    /// let err = ConfigError::missing_var("BOT_TOKEN");
    /// assert!(err.message.contains("BOT_TOKEN"));
    /// ```
    #[track_caller]
    pub fn missing_var(name: impl std::fmt::Display) -> Self {
        Self::new(format!("Missing environment variable: {}", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_var_names_the_variable() {
        let err = ConfigError::missing_var("IMGBB_API_KEY");
        assert_eq!(err.message, "Missing environment variable: IMGBB_API_KEY");
    }
}
