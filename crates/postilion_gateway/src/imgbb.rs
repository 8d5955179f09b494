//! imgbb-backed media relay.

use crate::MediaRelay;
use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use postilion_error::{JsonError, PostilionResult, RelayError};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, instrument};

const UPLOAD_URL: &str = "https://api.imgbb.com/1/upload";

/// Media relay backed by the imgbb hosting service.
///
/// imgbb accepts a fetchable URL or base64-encoded bytes in the same
/// `image` form field and answers with a stable display URL.
#[derive(Debug, Clone)]
pub struct ImgbbRelay {
    client: Client,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    data: UploadData,
}

#[derive(Debug, Deserialize)]
struct UploadData {
    display_url: String,
}

impl ImgbbRelay {
    /// Creates a new imgbb relay.
    pub fn new(api_key: impl Into<String>) -> Self {
        debug!("Creating new imgbb relay");
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }

    #[instrument(skip(self, image))]
    async fn upload(&self, image: String) -> PostilionResult<String> {
        let response = self
            .client
            .post(UPLOAD_URL)
            .form(&[("key", self.api_key.as_str()), ("image", image.as_str())])
            .send()
            .await
            .map_err(|e| RelayError::new(format!("Upload request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            error!(status = %status, "imgbb upload returned error");
            return Err(RelayError::new(format!("Upload failed with {}", status)).into());
        }

        let parsed: UploadResponse = response
            .json()
            .await
            .map_err(|e| JsonError::bad_shape("upload", e))?;

        debug!(url = %parsed.data.display_url, "Image relayed to stable hosting");
        Ok(parsed.data.display_url)
    }
}

#[async_trait]
impl MediaRelay for ImgbbRelay {
    async fn relay_url(&self, url: &str) -> PostilionResult<String> {
        self.upload(url.to_string()).await
    }

    async fn relay_bytes(&self, bytes: &[u8]) -> PostilionResult<String> {
        self.upload(BASE64.encode(bytes)).await
    }
}
