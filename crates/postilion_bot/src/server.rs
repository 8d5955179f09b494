//! Dispatcher loop: polls the chat transport and hands events to the engine.

use crate::WorkflowEngine;
use postilion_error::PostilionResult;
use postilion_social::ChatTransport;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, sleep};
use tracing::{debug, error, info, instrument};

const POLL_BACKOFF: Duration = Duration::from_secs(3);
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Single dispatcher loop over the chat transport.
///
/// Each inbound event is handled on its own task so a session suspended
/// on an external call never blocks events from other sessions; the
/// per-session lock inside the engine keeps one session's events serial.
pub struct BotServer {
    transport: Arc<dyn ChatTransport>,
    engine: Arc<WorkflowEngine>,
}

impl BotServer {
    /// Create a server over a transport and an engine.
    pub fn new(transport: Arc<dyn ChatTransport>, engine: Arc<WorkflowEngine>) -> Self {
        Self { transport, engine }
    }

    /// Run the dispatcher until the process exits.
    #[instrument(skip(self))]
    pub async fn run(self) -> PostilionResult<()> {
        info!("Post bot server started");

        let sweeper = self.engine.clone();
        tokio::spawn(async move {
            let mut ticker = interval(SWEEP_INTERVAL);
            loop {
                ticker.tick().await;
                let removed = sweeper.expire_idle_sessions();
                if removed > 0 {
                    debug!(removed, "Session sweep");
                }
            }
        });

        loop {
            match self.transport.next_events().await {
                Ok(events) => {
                    for event in events {
                        let engine = self.engine.clone();
                        let transport = self.transport.clone();
                        tokio::spawn(async move {
                            let channel = event.channel;
                            for reply in engine.handle(event).await {
                                if let Err(e) = transport.send(channel, &reply).await {
                                    error!(%channel, error = %e, "Failed to send reply");
                                }
                            }
                        });
                    }
                }
                Err(e) => {
                    error!(error = %e, "Polling failed, backing off");
                    sleep(POLL_BACKOFF).await;
                }
            }
        }
    }
}
