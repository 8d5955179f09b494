//! Top-level error wrapper types.

use crate::{
    ConfigError, GenerationError, HttpError, JsonError, PublishError, RelayError, StoreError,
};

/// Discriminated union over every failure domain in the workspace.
///
/// # Examples
///
/// ```
/// use postilion_error::{PostilionError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: PostilionError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum PostilionErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Account store error
    #[from(StoreError)]
    Store(StoreError),
    /// Text/image generation service error
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Media relay error
    #[from(RelayError)]
    Relay(RelayError),
    /// Platform publish error
    #[from(PublishError)]
    Publish(PublishError),
}

/// Postilion error with kind discrimination.
///
/// # Examples
///
/// ```
/// use postilion_error::{PostilionResult, ConfigError};
///
/// fn might_fail() -> PostilionResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Postilion Error: {}", _0)]
pub struct PostilionError(Box<PostilionErrorKind>);

impl PostilionError {
    /// Create a new error from a kind.
    pub fn new(kind: PostilionErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PostilionErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to PostilionErrorKind
impl<T> From<T> for PostilionError
where
    T: Into<PostilionErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Postilion operations.
///
/// # Examples
///
/// ```
/// use postilion_error::{PostilionResult, HttpError};
///
/// fn fetch_data() -> PostilionResult<String> {
///     Err(HttpError::new("404 Not Found"))?
/// }
/// ```
pub type PostilionResult<T> = std::result::Result<T, PostilionError>;
