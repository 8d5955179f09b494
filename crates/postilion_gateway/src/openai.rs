//! OpenAI-backed caption and image gateways.

use crate::{CaptionGateway, ImageGateway, caption_prompt, edit_prompt, image_prompt};
use async_trait::async_trait;
use postilion_core::Language;
use postilion_error::{GenerationError, JsonError, PostilionResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument, warn};

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const IMAGE_GENERATIONS_URL: &str = "https://api.openai.com/v1/images/generations";

/// Sentinel caption returned when the text-generation service fails.
///
/// The workflow still advances to the preview with this caption so the
/// user can retry through the edit loop.
pub const GENERATION_FAILED_CAPTION: &str =
    "⚠️ Caption generation failed. Use the edit buttons to try again.";

/// OpenAI API client implementing both text gateways and the image gateway.
#[derive(Debug, Clone)]
pub struct OpenAiGateway {
    client: Client,
    api_key: String,
    chat_model: String,
    image_model: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[derive(Debug, Serialize)]
struct ImageRequest {
    model: String,
    prompt: String,
    size: &'static str,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    data: Vec<ImageDatum>,
}

#[derive(Debug, Deserialize)]
struct ImageDatum {
    url: String,
}

impl OpenAiGateway {
    /// Creates a new OpenAI gateway.
    ///
    /// # Arguments
    ///
    /// * `api_key` - OpenAI API key
    /// * `chat_model` - Chat model identifier (e.g., "gpt-4o-mini")
    /// * `image_model` - Image model identifier (e.g., "dall-e-3")
    pub fn new(
        api_key: impl Into<String>,
        chat_model: impl Into<String>,
        image_model: impl Into<String>,
    ) -> Self {
        debug!("Creating new OpenAI gateway");
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            chat_model: chat_model.into(),
            image_model: image_model.into(),
        }
    }

    /// Sends a single-message chat completion and returns the reply text.
    #[instrument(skip(self, prompt), fields(model = %self.chat_model, prompt_len = prompt.len()))]
    async fn chat(&self, prompt: String) -> PostilionResult<String> {
        let request = ChatRequest {
            model: self.chat_model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: 900,
        };

        let response = self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::new(format!("Chat request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Chat completion returned error");
            return Err(
                GenerationError::new(format!("Chat completion failed with {}", status)).into(),
            );
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| JsonError::bad_shape("chat", e))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| JsonError::new("Chat response contained no choices").into())
    }
}

#[async_trait]
impl CaptionGateway for OpenAiGateway {
    #[instrument(skip(self, topic))]
    async fn generate_caption(&self, topic: &str, language: Language) -> String {
        match self.chat(caption_prompt(topic, language)).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Caption generation failed, degrading to sentinel");
                GENERATION_FAILED_CAPTION.to_string()
            }
        }
    }

    #[instrument(skip(self, old_caption, instruction))]
    async fn edit_caption(&self, old_caption: &str, instruction: &str) -> String {
        match self.chat(edit_prompt(old_caption, instruction)).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Caption edit failed, degrading to sentinel");
                GENERATION_FAILED_CAPTION.to_string()
            }
        }
    }
}

#[async_trait]
impl ImageGateway for OpenAiGateway {
    #[instrument(skip(self, prompt), fields(model = %self.image_model))]
    async fn generate_image(&self, prompt: &str) -> PostilionResult<String> {
        let request = ImageRequest {
            model: self.image_model.clone(),
            prompt: image_prompt(prompt),
            size: "1024x1792",
        };

        let response = self
            .client
            .post(IMAGE_GENERATIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::new(format!("Image request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Image generation returned error");
            return Err(
                GenerationError::new(format!("Image generation failed with {}", status)).into(),
            );
        }

        let parsed: ImageResponse = response
            .json()
            .await
            .map_err(|e| JsonError::bad_shape("image", e))?;

        parsed
            .data
            .into_iter()
            .next()
            .map(|datum| datum.url)
            .ok_or_else(|| JsonError::new("Image response contained no data").into())
    }
}
