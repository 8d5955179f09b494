//! Workflow engine: resolves identity, runs transitions, executes effects.

use crate::workflow::{
    self, Effect, Step, TOKEN_PROMPT, WorkflowState, language_choices, preview_reply,
    restart_choices,
};
use crate::{AccountStore, BindOutcome, IdentityResolver, Session, SessionStore};
use postilion_core::{BotCommand, ChannelId, ChatEvent, Draft, InboundEvent, Reply};
use postilion_error::{GenerationError, PostilionResult, PublishError};
use postilion_gateway::{CaptionGateway, ImageGateway, MediaRelay};
use postilion_social::{FanOut, PublishReport};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, instrument, warn};

const NOT_AUTHORIZED_NOTICE: &str = "🔐 Enter your access token via /start first";
const BOUND_NOTICE: &str = "✅ Account linked! Send /menu";
const INVALID_TOKEN_NOTICE: &str = "❌ Invalid token";
const TOKEN_IN_USE_NOTICE: &str = "❌ This token is already in use";
const STEP_FAILED_NOTICE: &str = "⚠️ That didn't work, please try again.";
const LANGUAGE_PROMPT: &str = "🌍 Choose a language:";

/// The orchestrator: owns the sessions, the identity resolver, and the
/// gateway/publisher handles, and turns each inbound event into replies.
///
/// One event is handled to completion under its session's lock, so events
/// for the same channel identity are strictly serialized while other
/// sessions proceed concurrently.
pub struct WorkflowEngine {
    resolver: IdentityResolver,
    sessions: SessionStore,
    captions: Arc<dyn CaptionGateway>,
    images: Arc<dyn ImageGateway>,
    relay: Arc<dyn MediaRelay>,
    fanout: Arc<FanOut>,
}

impl WorkflowEngine {
    /// Create an engine over its collaborators.
    pub fn new(
        store: Arc<dyn AccountStore>,
        captions: Arc<dyn CaptionGateway>,
        images: Arc<dyn ImageGateway>,
        relay: Arc<dyn MediaRelay>,
        fanout: Arc<FanOut>,
        session_idle_ttl: Duration,
    ) -> Self {
        Self {
            resolver: IdentityResolver::new(store),
            sessions: SessionStore::new(session_idle_ttl),
            captions,
            images,
            relay,
            fanout,
        }
    }

    /// Sweep sessions idle past the TTL, returning how many were removed.
    pub fn expire_idle_sessions(&self) -> usize {
        self.sessions.expire_idle()
    }

    /// Snapshot a session's state and draft, for inspection and tests.
    pub async fn snapshot(&self, channel: ChannelId) -> (WorkflowState, Draft) {
        let session = self.sessions.get_or_create(channel);
        let session = session.lock().await;
        (session.state, session.draft.clone())
    }

    /// Handle one inbound event and return the replies to send.
    #[instrument(skip(self, inbound), fields(channel = %inbound.channel))]
    pub async fn handle(&self, inbound: InboundEvent) -> Vec<Reply> {
        let channel = inbound.channel;
        let session = self.sessions.get_or_create(channel);
        let mut session = session.lock().await;
        session.touch();

        match &inbound.event {
            ChatEvent::Command(BotCommand::Start) => {
                vec![Reply::Text(TOKEN_PROMPT.to_string())]
            }
            ChatEvent::Command(BotCommand::Menu) => {
                match self.resolver.resolve(channel).await {
                    Ok(Some(_)) => {
                        let step =
                            workflow::transition(session.state, &session.draft, &inbound.event);
                        self.apply(&mut session, step).await
                    }
                    Ok(None) => vec![Reply::Text(NOT_AUTHORIZED_NOTICE.to_string())],
                    Err(e) => {
                        error!(error = %e, "Account lookup failed");
                        vec![Reply::Text(STEP_FAILED_NOTICE.to_string())]
                    }
                }
            }
            // Free text while idle is a binding-handshake token.
            ChatEvent::Text(text) if session.state == WorkflowState::Idle => {
                self.bind(channel, text.trim()).await
            }
            event => {
                let step = workflow::transition(session.state, &session.draft, event);
                self.apply(&mut session, step).await
            }
        }
    }

    async fn bind(&self, channel: ChannelId, token: &str) -> Vec<Reply> {
        match self.resolver.bind(channel, token).await {
            Ok(BindOutcome::Bound) => vec![Reply::Text(BOUND_NOTICE.to_string())],
            Ok(BindOutcome::InvalidToken) => vec![Reply::Text(INVALID_TOKEN_NOTICE.to_string())],
            Ok(BindOutcome::TokenConflict) => vec![Reply::Text(TOKEN_IN_USE_NOTICE.to_string())],
            Err(e) => {
                error!(error = %e, "Binding handshake failed");
                vec![Reply::Text(STEP_FAILED_NOTICE.to_string())]
            }
        }
    }

    /// Execute a step's effects, then commit its state and draft.
    ///
    /// A failed effect leaves the session exactly where it was (the image
    /// steps rely on this so the user can retry) and reports the failure.
    async fn apply(&self, session: &mut Session, step: Step) -> Vec<Reply> {
        let Step {
            next,
            mut draft,
            mut replies,
            effects,
        } = step;

        for effect in effects {
            let is_publish = matches!(effect, Effect::Publish { .. });
            match self.run_effect(&mut draft, effect).await {
                Ok(mut effect_replies) => {
                    replies.append(&mut effect_replies);
                    if is_publish {
                        // Completion: the run is over, reset for the next one
                        draft = Draft::default();
                    }
                }
                Err(e) => {
                    warn!(error = %e, state = %session.state, "Effect failed, holding session");
                    replies.push(Reply::Text(STEP_FAILED_NOTICE.to_string()));
                    return replies;
                }
            }
        }

        session.state = next;
        session.draft = draft;
        replies
    }

    async fn run_effect(&self, draft: &mut Draft, effect: Effect) -> PostilionResult<Vec<Reply>> {
        match effect {
            Effect::RelayImage { source_url, kind } => {
                let url = self.relay.relay_url(&source_url).await?;
                draft.image_source = Some(kind);
                draft.image_url = Some(url);
                Ok(vec![Reply::Prompt {
                    text: LANGUAGE_PROMPT.to_string(),
                    choices: language_choices(),
                }])
            }
            Effect::GenerateImage { prompt } => {
                let temporary_url = self.images.generate_image(&prompt).await?;
                let url = self.relay.relay_url(&temporary_url).await?;
                draft.image_source = Some(postilion_core::ImageSourceKind::Generated);
                draft.image_url = Some(url);
                Ok(vec![Reply::Prompt {
                    text: LANGUAGE_PROMPT.to_string(),
                    choices: language_choices(),
                }])
            }
            Effect::GenerateCaption => {
                let topic = draft
                    .topic
                    .clone()
                    .ok_or_else(|| GenerationError::new("Draft has no topic"))?;
                let language = draft
                    .language
                    .ok_or_else(|| GenerationError::new("Draft has no language"))?;
                let caption = self.captions.generate_caption(&topic, language).await;
                draft.caption = Some(caption);
                Ok(preview_reply(draft).into_iter().collect())
            }
            Effect::EditCaption { instruction } => {
                let old = draft.caption.clone().unwrap_or_default();
                let caption = self.captions.edit_caption(&old, &instruction).await;
                draft.caption = Some(caption);
                Ok(preview_reply(draft).into_iter().collect())
            }
            Effect::Publish { targets } => {
                let image_url = draft
                    .image_url
                    .as_deref()
                    .ok_or_else(|| PublishError::new("fanout", "Draft has no image"))?;
                let caption = draft
                    .caption
                    .as_deref()
                    .ok_or_else(|| PublishError::new("fanout", "Draft has no caption"))?;
                let report = self.fanout.publish(image_url, caption, &targets).await;
                Ok(vec![Reply::Prompt {
                    text: report_notice(&report),
                    choices: restart_choices(),
                }])
            }
        }
    }
}

/// Completion notice summarizing the per-target outcomes.
fn report_notice(report: &PublishReport) -> String {
    let failed = report.failed();
    if failed.is_empty() {
        return "✅ Post published!".to_string();
    }

    let succeeded = report.succeeded();
    let failed_names: Vec<String> = failed.iter().map(|p| p.to_string()).collect();
    if succeeded.is_empty() {
        format!("⚠️ Publishing failed: {}", failed_names.join(", "))
    } else {
        let ok_names: Vec<String> = succeeded.iter().map(|p| p.to_string()).collect();
        format!(
            "✅ Published to: {}\n⚠️ Failed: {}",
            ok_names.join(", "),
            failed_names.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postilion_core::Platform;

    #[test]
    fn test_report_notice_full_success() {
        let mut report = PublishReport::default();
        report.record(Platform::Telegram, Ok(()));
        assert_eq!(report_notice(&report), "✅ Post published!");
    }

    #[test]
    fn test_report_notice_partial_failure_names_both_sides() {
        let mut report = PublishReport::default();
        report.record(Platform::Telegram, Ok(()));
        report.record(Platform::Instagram, Err("no container id".to_string()));
        let notice = report_notice(&report);
        assert!(notice.contains("telegram"));
        assert!(notice.contains("instagram"));
    }
}
