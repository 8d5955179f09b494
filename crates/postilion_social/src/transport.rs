//! Chat transport trait.

use async_trait::async_trait;
use postilion_core::{ChannelId, InboundEvent, Reply};
use postilion_error::PostilionResult;

/// Delivery of inbound chat events and outbound replies.
///
/// The dispatcher is the only consumer: it polls `next_events` in a loop
/// and sends each handler's replies back through `send`.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Wait for and return the next batch of inbound events.
    async fn next_events(&self) -> PostilionResult<Vec<InboundEvent>>;

    /// Deliver one reply to the given channel.
    async fn send(&self, channel: ChannelId, reply: &Reply) -> PostilionResult<()>;
}
