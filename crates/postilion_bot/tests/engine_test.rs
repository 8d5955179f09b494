//! End-to-end workflow scenarios over mock gateways and publishers.

use async_trait::async_trait;
use postilion_bot::{MemoryAccountStore, WorkflowEngine, WorkflowState};
use postilion_core::{
    Account, BotCommand, ChannelId, ChatEvent, ImageSourceKind, InboundEvent, Language, Platform,
    Reply,
};
use postilion_error::{GenerationError, PostilionResult, PublishError, RelayError};
use postilion_gateway::{CaptionGateway, ImageGateway, MediaRelay};
use postilion_social::{FanOut, PlatformPublisher};
use std::sync::Arc;
use std::time::Duration;

struct StubCaptions;

#[async_trait]
impl CaptionGateway for StubCaptions {
    async fn generate_caption(&self, topic: &str, language: Language) -> String {
        format!("[{}] {} — generated caption #post", language, topic)
    }

    async fn edit_caption(&self, old_caption: &str, instruction: &str) -> String {
        format!("{} (edited: {})", old_caption, instruction)
    }
}

struct StubImages {
    fail: bool,
}

#[async_trait]
impl ImageGateway for StubImages {
    async fn generate_image(&self, _prompt: &str) -> PostilionResult<String> {
        if self.fail {
            Err(GenerationError::new("image service down"))?
        }
        Ok("https://tmp.example/generated.png".to_string())
    }
}

struct StubRelay {
    fail: bool,
}

#[async_trait]
impl MediaRelay for StubRelay {
    async fn relay_url(&self, _url: &str) -> PostilionResult<String> {
        if self.fail {
            Err(RelayError::new("host unreachable"))?
        }
        Ok("https://cdn.example/stable.jpg".to_string())
    }

    async fn relay_bytes(&self, _bytes: &[u8]) -> PostilionResult<String> {
        self.relay_url("").await
    }
}

struct StubPublisher {
    platform: Platform,
    fail: bool,
}

#[async_trait]
impl PlatformPublisher for StubPublisher {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn publish(&self, _image_url: &str, _caption: &str) -> PostilionResult<()> {
        if self.fail {
            Err(PublishError::new(
                self.platform.to_string(),
                "no container id",
            ))?
        }
        Ok(())
    }
}

struct EngineOptions {
    relay_fail: bool,
    image_fail: bool,
    instagram_fail: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            relay_fail: false,
            image_fail: false,
            instagram_fail: false,
        }
    }
}

fn engine(options: EngineOptions) -> WorkflowEngine {
    let store = Arc::new(MemoryAccountStore::new(vec![Account {
        id: 1,
        token: "tok-1".to_string(),
        channel: None,
    }]));
    let fanout = FanOut::new()
        .register(Arc::new(StubPublisher {
            platform: Platform::Telegram,
            fail: false,
        }))
        .register(Arc::new(StubPublisher {
            platform: Platform::Instagram,
            fail: options.instagram_fail,
        }))
        .register(Arc::new(StubPublisher {
            platform: Platform::Facebook,
            fail: false,
        }));
    WorkflowEngine::new(
        store,
        Arc::new(StubCaptions),
        Arc::new(StubImages {
            fail: options.image_fail,
        }),
        Arc::new(StubRelay {
            fail: options.relay_fail,
        }),
        Arc::new(fanout),
        Duration::from_secs(1800),
    )
}

const USER: ChannelId = ChannelId(10);

async fn send(engine: &WorkflowEngine, event: ChatEvent) -> Vec<Reply> {
    engine
        .handle(InboundEvent {
            channel: USER,
            event,
        })
        .await
}

fn text(s: &str) -> ChatEvent {
    ChatEvent::Text(s.to_string())
}

fn choice(s: &str) -> ChatEvent {
    ChatEvent::Choice(s.to_string())
}

/// Bind the user and walk to the preview via the link path.
async fn walk_to_preview(engine: &WorkflowEngine) {
    send(engine, text("tok-1")).await;
    send(engine, ChatEvent::Command(BotCommand::Menu)).await;
    send(engine, text("coffee shop opening")).await;
    send(engine, choice("link")).await;
    send(engine, text("https://img.example/shop.jpg")).await;
    send(engine, choice("ru")).await;
}

#[tokio::test]
async fn test_menu_without_binding_is_refused() {
    let engine = engine(EngineOptions::default());
    let replies = send(&engine, ChatEvent::Command(BotCommand::Menu)).await;
    assert!(matches!(&replies[0], Reply::Text(t) if t.contains("/start")));
    let (state, _) = engine.snapshot(USER).await;
    assert_eq!(state, WorkflowState::Idle);
}

#[tokio::test]
async fn test_binding_conflict_reported_to_second_identity() {
    let engine = engine(EngineOptions::default());
    send(&engine, text("tok-1")).await;

    let replies = engine
        .handle(InboundEvent {
            channel: ChannelId(11),
            event: text("tok-1"),
        })
        .await;
    assert!(matches!(&replies[0], Reply::Text(t) if t.contains("already in use")));
}

#[tokio::test]
async fn test_link_path_reaches_preview_with_full_draft() {
    let engine = engine(EngineOptions::default());
    walk_to_preview(&engine).await;

    let (state, draft) = engine.snapshot(USER).await;
    assert_eq!(state, WorkflowState::Preview);
    assert_eq!(draft.topic.as_deref(), Some("coffee shop opening"));
    assert_eq!(draft.image_source, Some(ImageSourceKind::Link));
    assert_eq!(draft.language, Some(Language::Ru));
    assert!(!draft.caption.clone().unwrap().is_empty());
    assert!(draft.is_ready());
}

#[tokio::test]
async fn test_preview_is_shown_as_photo_with_caption() {
    let engine = engine(EngineOptions::default());
    send(&engine, text("tok-1")).await;
    send(&engine, ChatEvent::Command(BotCommand::Menu)).await;
    send(&engine, text("topic")).await;
    send(&engine, choice("link")).await;
    send(&engine, text("https://img.example/a.jpg")).await;
    let replies = send(&engine, choice("en")).await;

    assert!(replies.iter().any(|r| matches!(
        r,
        Reply::Photo { url, caption, choices }
            if url == "https://cdn.example/stable.jpg"
                && !caption.is_empty()
                && !choices.is_empty()
    )));
}

#[tokio::test]
async fn test_ai_edit_replaces_caption_and_returns_to_preview() {
    let engine = engine(EngineOptions::default());
    walk_to_preview(&engine).await;
    let (_, before) = engine.snapshot(USER).await;

    send(&engine, choice("edit_ai")).await;
    let (state, _) = engine.snapshot(USER).await;
    assert_eq!(state, WorkflowState::EditAi);

    send(&engine, text("make it shorter")).await;
    let (state, after) = engine.snapshot(USER).await;
    assert_eq!(state, WorkflowState::Preview);
    assert_ne!(after.caption, before.caption);
    assert!(after.caption.unwrap().contains("make it shorter"));
}

#[tokio::test]
async fn test_manual_edit_is_verbatim() {
    let engine = engine(EngineOptions::default());
    walk_to_preview(&engine).await;

    send(&engine, choice("edit_manual")).await;
    send(&engine, text("my own caption")).await;

    let (state, draft) = engine.snapshot(USER).await;
    assert_eq!(state, WorkflowState::Preview);
    assert_eq!(draft.caption.as_deref(), Some("my own caption"));
}

#[tokio::test]
async fn test_publish_all_with_instagram_failure_is_partial_success() {
    let engine = engine(EngineOptions {
        instagram_fail: true,
        ..EngineOptions::default()
    });
    walk_to_preview(&engine).await;

    send(&engine, choice("publish")).await;
    let (state, _) = engine.snapshot(USER).await;
    assert_eq!(state, WorkflowState::ChoosePlatform);

    let replies = send(&engine, choice("all")).await;
    let Reply::Prompt { text, choices } = &replies[0] else {
        panic!("expected the completion prompt");
    };
    assert!(text.contains("telegram"));
    assert!(text.contains("facebook"));
    assert!(text.contains("instagram"));
    assert!(choices.iter().any(|c| c.data == "restart"));

    let (state, draft) = engine.snapshot(USER).await;
    assert_eq!(state, WorkflowState::Idle);
    assert_eq!(draft, Default::default());
}

#[tokio::test]
async fn test_publish_full_success_notice() {
    let engine = engine(EngineOptions::default());
    walk_to_preview(&engine).await;
    send(&engine, choice("publish")).await;
    let replies = send(&engine, choice("all")).await;
    assert!(matches!(&replies[0], Reply::Prompt { text, .. } if text.contains("published")));
}

#[tokio::test]
async fn test_restart_while_awaiting_link_clears_draft() {
    let engine = engine(EngineOptions::default());
    send(&engine, text("tok-1")).await;
    send(&engine, ChatEvent::Command(BotCommand::Menu)).await;
    send(&engine, text("a topic")).await;
    send(&engine, choice("link")).await;

    let (state, _) = engine.snapshot(USER).await;
    assert_eq!(state, WorkflowState::AwaitLink);

    send(&engine, choice("restart")).await;
    let (state, draft) = engine.snapshot(USER).await;
    assert_eq!(state, WorkflowState::Topic);
    assert_eq!(draft, Default::default());
}

#[tokio::test]
async fn test_relay_failure_holds_image_selection_state() {
    let engine = engine(EngineOptions {
        relay_fail: true,
        ..EngineOptions::default()
    });
    send(&engine, text("tok-1")).await;
    send(&engine, ChatEvent::Command(BotCommand::Menu)).await;
    send(&engine, text("a topic")).await;
    send(&engine, choice("link")).await;

    let replies = send(&engine, text("https://img.example/a.jpg")).await;
    assert!(matches!(&replies[0], Reply::Text(t) if t.contains("try again")));

    let (state, draft) = engine.snapshot(USER).await;
    assert_eq!(state, WorkflowState::AwaitLink);
    assert!(draft.image_url.is_none());
}

#[tokio::test]
async fn test_image_generation_failure_holds_prompt_state() {
    let engine = engine(EngineOptions {
        image_fail: true,
        ..EngineOptions::default()
    });
    send(&engine, text("tok-1")).await;
    send(&engine, ChatEvent::Command(BotCommand::Menu)).await;
    send(&engine, text("a topic")).await;
    send(&engine, choice("gen")).await;

    send(&engine, text("a latte on a table")).await;
    let (state, draft) = engine.snapshot(USER).await;
    assert_eq!(state, WorkflowState::AwaitGeneratePrompt);
    assert!(draft.image_url.is_none());
}

#[tokio::test]
async fn test_generation_notice_precedes_the_language_prompt() {
    let engine = engine(EngineOptions::default());
    send(&engine, text("tok-1")).await;
    send(&engine, ChatEvent::Command(BotCommand::Menu)).await;
    send(&engine, text("a topic")).await;
    send(&engine, choice("gen")).await;

    let replies = send(&engine, text("a latte on a table")).await;
    assert!(matches!(&replies[0], Reply::Text(t) if t.contains("Generating")));
    assert!(matches!(&replies[1], Reply::Prompt { choices, .. } if choices.len() == 3));
}

#[tokio::test]
async fn test_upload_path_relays_the_photo() {
    let engine = engine(EngineOptions::default());
    send(&engine, text("tok-1")).await;
    send(&engine, ChatEvent::Command(BotCommand::Menu)).await;
    send(&engine, text("a topic")).await;
    send(&engine, choice("upload")).await;
    send(
        &engine,
        ChatEvent::Image {
            url: "https://files.example/photo.jpg".to_string(),
        },
    )
    .await;

    let (state, draft) = engine.snapshot(USER).await;
    assert_eq!(state, WorkflowState::Language);
    assert_eq!(draft.image_source, Some(ImageSourceKind::Upload));
    assert_eq!(
        draft.image_url.as_deref(),
        Some("https://cdn.example/stable.jpg")
    );
}

#[tokio::test]
async fn test_stray_input_never_moves_the_machine() {
    let engine = engine(EngineOptions::default());
    walk_to_preview(&engine).await;

    // Free text and unknown choices are no-ops in Preview
    send(&engine, text("stray text")).await;
    send(&engine, choice("nonsense")).await;

    let (state, draft) = engine.snapshot(USER).await;
    assert_eq!(state, WorkflowState::Preview);
    assert!(draft.is_ready());
}
