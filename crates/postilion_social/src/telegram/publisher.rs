//! Telegram broadcast-channel publisher.

use super::{ChatTarget, TelegramClient};
use crate::PlatformPublisher;
use async_trait::async_trait;
use postilion_core::Platform;
use postilion_error::PostilionResult;
use tracing::instrument;

/// Publishes finished posts to a Telegram channel as photo messages.
#[derive(Debug, Clone)]
pub struct TelegramChannelPublisher {
    client: TelegramClient,
    channel: ChatTarget,
}

impl TelegramChannelPublisher {
    /// Creates a publisher for the given channel username (with `@`).
    pub fn new(client: TelegramClient, channel: impl Into<String>) -> Self {
        Self {
            client,
            channel: ChatTarget::Username(channel.into()),
        }
    }
}

#[async_trait]
impl PlatformPublisher for TelegramChannelPublisher {
    fn platform(&self) -> Platform {
        Platform::Telegram
    }

    #[instrument(skip(self, image_url, caption))]
    async fn publish(&self, image_url: &str, caption: &str) -> PostilionResult<()> {
        self.client
            .send_photo(&self.channel, image_url, caption, &[])
            .await
    }
}
