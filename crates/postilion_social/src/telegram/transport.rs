//! Telegram long-polling chat transport.

use super::json_models::Update;
use super::{ChatTarget, TelegramClient};
use crate::ChatTransport;
use async_trait::async_trait;
use postilion_core::{BotCommand, ChannelId, ChatEvent, InboundEvent, Reply};
use postilion_error::PostilionResult;
use std::sync::atomic::{AtomicI64, Ordering};
use tracing::{debug, instrument, warn};

const POLL_TIMEOUT_SECS: u64 = 30;

/// Chat transport over the Telegram Bot API's getUpdates long polling.
pub struct TelegramTransport {
    client: TelegramClient,
    offset: AtomicI64,
}

impl TelegramTransport {
    /// Creates a transport over an existing client.
    pub fn new(client: TelegramClient) -> Self {
        Self {
            client,
            offset: AtomicI64::new(0),
        }
    }

    /// Convert one update into an inbound event, if it carries one.
    ///
    /// Unknown slash commands are dropped here; the workflow never sees
    /// them. Photo messages are resolved to a download URL so the rest of
    /// the system stays transport-agnostic.
    async fn convert(&self, update: Update) -> Option<InboundEvent> {
        if let Some(query) = update.callback_query {
            if let Err(e) = self.client.answer_callback(&query.id).await {
                debug!(error = %e, "Failed to acknowledge callback query");
            }
            let channel = ChannelId(query.message?.chat.id);
            let data = query.data?;
            return Some(InboundEvent {
                channel,
                event: ChatEvent::Choice(data),
            });
        }

        let message = update.message?;
        let channel = ChannelId(message.chat.id);

        if let Some(text) = message.text {
            let event = if text.trim_start().starts_with('/') {
                ChatEvent::Command(BotCommand::parse(&text)?)
            } else {
                ChatEvent::Text(text)
            };
            return Some(InboundEvent { channel, event });
        }

        if let Some(sizes) = message.photo {
            // Size variants are ordered smallest first; take the largest
            let file_id = sizes.last().map(|size| size.file_id.clone())?;
            match self.client.file_url(&file_id).await {
                Ok(url) => {
                    return Some(InboundEvent {
                        channel,
                        event: ChatEvent::Image { url },
                    });
                }
                Err(e) => {
                    warn!(error = %e, "Failed to resolve photo file, dropping update");
                    return None;
                }
            }
        }

        None
    }
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    #[instrument(skip(self))]
    async fn next_events(&self) -> PostilionResult<Vec<InboundEvent>> {
        let offset = self.offset.load(Ordering::SeqCst);
        let updates = self.client.get_updates(offset, POLL_TIMEOUT_SECS).await?;

        let mut events = Vec::with_capacity(updates.len());
        for update in updates {
            self.offset
                .fetch_max(update.update_id + 1, Ordering::SeqCst);
            if let Some(event) = self.convert(update).await {
                events.push(event);
            }
        }
        Ok(events)
    }

    async fn send(&self, channel: ChannelId, reply: &Reply) -> PostilionResult<()> {
        let chat = ChatTarget::from(channel);
        match reply {
            Reply::Text(text) => self.client.send_message(&chat, text, &[]).await,
            Reply::Prompt { text, choices } => {
                self.client.send_message(&chat, text, choices).await
            }
            Reply::Photo {
                url,
                caption,
                choices,
            } => self.client.send_photo(&chat, url, caption, choices).await,
        }
    }
}
