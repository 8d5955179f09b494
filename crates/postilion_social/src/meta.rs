//! Facebook and Instagram publishers over the Meta Graph API.

use crate::PlatformPublisher;
use async_trait::async_trait;
use postilion_core::Platform;
use postilion_error::{JsonError, PostilionResult, PublishError};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, instrument};

const GRAPH_BASE: &str = "https://graph.facebook.com/v19.0";

/// Publishes a photo with caption to a Facebook page in a single call.
#[derive(Debug, Clone)]
pub struct FacebookPublisher {
    client: Client,
    access_token: String,
    page_id: String,
}

impl FacebookPublisher {
    /// Creates a new Facebook page publisher.
    pub fn new(access_token: impl Into<String>, page_id: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            access_token: access_token.into(),
            page_id: page_id.into(),
        }
    }
}

#[async_trait]
impl PlatformPublisher for FacebookPublisher {
    fn platform(&self) -> Platform {
        Platform::Facebook
    }

    #[instrument(skip(self, image_url, caption))]
    async fn publish(&self, image_url: &str, caption: &str) -> PostilionResult<()> {
        let response = self
            .client
            .post(format!("{}/{}/photos", GRAPH_BASE, self.page_id))
            .form(&[
                ("url", image_url),
                ("caption", caption),
                ("access_token", self.access_token.as_str()),
            ])
            .send()
            .await
            .map_err(|e| PublishError::new("facebook", format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            error!(status = %status, "Facebook photo post returned error");
            return Err(
                PublishError::new("facebook", format!("Photo post failed with {}", status)).into(),
            );
        }

        debug!("Facebook photo posted");
        Ok(())
    }
}

/// Publishes to an Instagram business account via the two-step container
/// flow: create a media container, then publish it.
///
/// If container creation yields no id, the publish step is skipped and the
/// target is reported failed.
#[derive(Debug, Clone)]
pub struct InstagramPublisher {
    client: Client,
    access_token: String,
    user_id: String,
}

#[derive(Debug, Deserialize)]
struct ContainerResponse {
    id: Option<String>,
}

impl InstagramPublisher {
    /// Creates a new Instagram publisher.
    pub fn new(access_token: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            access_token: access_token.into(),
            user_id: user_id.into(),
        }
    }

    #[instrument(skip(self, image_url, caption))]
    async fn create_container(&self, image_url: &str, caption: &str) -> PostilionResult<String> {
        let response = self
            .client
            .post(format!("{}/{}/media", GRAPH_BASE, self.user_id))
            .form(&[
                ("image_url", image_url),
                ("caption", caption),
                ("access_token", self.access_token.as_str()),
            ])
            .send()
            .await
            .map_err(|e| PublishError::new("instagram", format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            error!(status = %status, "Instagram container creation returned error");
            return Err(PublishError::new(
                "instagram",
                format!("Container creation failed with {}", status),
            )
            .into());
        }

        let parsed: ContainerResponse = response
            .json()
            .await
            .map_err(|e| JsonError::bad_shape("container", e))?;

        parsed
            .id
            .ok_or_else(|| PublishError::new("instagram", "No container id returned").into())
    }

    #[instrument(skip(self))]
    async fn publish_container(&self, container_id: &str) -> PostilionResult<()> {
        let response = self
            .client
            .post(format!("{}/{}/media_publish", GRAPH_BASE, self.user_id))
            .form(&[
                ("creation_id", container_id),
                ("access_token", self.access_token.as_str()),
            ])
            .send()
            .await
            .map_err(|e| PublishError::new("instagram", format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            error!(status = %status, "Instagram container publish returned error");
            return Err(PublishError::new(
                "instagram",
                format!("Container publish failed with {}", status),
            )
            .into());
        }

        debug!(container_id, "Instagram container published");
        Ok(())
    }
}

#[async_trait]
impl PlatformPublisher for InstagramPublisher {
    fn platform(&self) -> Platform {
        Platform::Instagram
    }

    async fn publish(&self, image_url: &str, caption: &str) -> PostilionResult<()> {
        let container_id = self.create_container(image_url, caption).await?;
        self.publish_container(&container_id).await
    }
}
