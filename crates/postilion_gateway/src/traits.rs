//! Gateway trait definitions.

use async_trait::async_trait;
use postilion_core::Language;
use postilion_error::PostilionResult;

/// Caption writing and editing via the text-generation service.
///
/// Both methods are infallible by contract: implementations convert
/// service failures into a sentinel caption so the workflow can still
/// advance to the preview and let the user retry through the edit loop.
#[async_trait]
pub trait CaptionGateway: Send + Sync {
    /// Generate a caption for the given topic in the given language.
    async fn generate_caption(&self, topic: &str, language: Language) -> String;

    /// Rewrite `old_caption` according to the user's instruction.
    ///
    /// Language preservation is best-effort: the editing prompt asks the
    /// model to keep the language, nothing verifies it.
    async fn edit_caption(&self, old_caption: &str, instruction: &str) -> String;
}

/// Image creation via the image-generation service.
#[async_trait]
pub trait ImageGateway: Send + Sync {
    /// Generate an image for the prompt, returning a temporary URL on the
    /// generation service's side. Callers relay it to stable hosting.
    async fn generate_image(&self, prompt: &str) -> PostilionResult<String>;
}

/// Relay of an image to the external hosting service.
///
/// The host accepts either a fetchable URL or raw bytes and returns a
/// stable, publicly fetchable URL suitable for the platform publish APIs.
#[async_trait]
pub trait MediaRelay: Send + Sync {
    /// Relay an image that is already reachable by URL.
    async fn relay_url(&self, url: &str) -> PostilionResult<String>;

    /// Relay raw image bytes.
    ///
    /// The chat transport resolves photo attachments to file URLs and
    /// takes the [`MediaRelay::relay_url`] route, so this path is for
    /// callers that hold the bytes themselves rather than a URL.
    async fn relay_bytes(&self, bytes: &[u8]) -> PostilionResult<String>;
}
