//! The workflow state machine as a pure transition function.
//!
//! [`transition`] maps (state, draft, event) to a [`Step`]: the next
//! state, the updated draft, immediate replies, and the external calls to
//! make, described as [`Effect`] values. Unrecognized input for the
//! current state produces a no-op step, never an error. The engine
//! executes the effects and commits the step only if they succeed.

use postilion_core::{
    BotCommand, ChatEvent, Choice, Draft, ImageSourceKind, Language, Platform, PublishTarget,
    Reply,
};
use std::collections::BTreeSet;
use std::str::FromStr;

/// States of the conversational workflow, linear with the preview/edit
/// loop in the middle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum WorkflowState {
    /// No workflow running; free text here is a binding-handshake token
    Idle,
    /// Waiting for the post topic
    Topic,
    /// Waiting for the image-source choice
    ChooseImageSource,
    /// Waiting for a photo attachment
    AwaitUpload,
    /// Waiting for an image URL
    AwaitLink,
    /// Waiting for an image-generation prompt
    AwaitGeneratePrompt,
    /// Waiting for the language choice
    Language,
    /// Showing the draft, waiting for edit/publish choice
    Preview,
    /// Waiting for replacement caption text
    EditManual,
    /// Waiting for an AI edit instruction
    EditAi,
    /// Waiting for the platform choice
    ChoosePlatform,
}

/// An external call requested by a transition, executed by the engine
/// after the pure step is computed.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Relay an existing image (upload or link) to stable hosting
    RelayImage {
        /// Fetchable source URL of the image
        source_url: String,
        /// How the user provided the image
        kind: ImageSourceKind,
    },
    /// Generate an image from a prompt, then relay it
    GenerateImage {
        /// The user's description
        prompt: String,
    },
    /// Generate the caption from the draft's topic and language
    GenerateCaption,
    /// Rewrite the draft's caption per the user's instruction
    EditCaption {
        /// The user's edit instruction
        instruction: String,
    },
    /// Fan publication out to the selected platforms
    Publish {
        /// Non-empty platform selection
        targets: BTreeSet<Platform>,
    },
}

/// Outcome of one transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// State to commit after the effects succeed
    pub next: WorkflowState,
    /// Draft to commit, possibly further mutated by effects
    pub draft: Draft,
    /// Replies computed by the transition itself. The engine appends any
    /// effect-produced replies after these and sends the whole batch once
    /// the effects have finished.
    pub replies: Vec<Reply>,
    /// External calls to execute, in order
    pub effects: Vec<Effect>,
}

impl Step {
    fn stay(state: WorkflowState, draft: &Draft) -> Self {
        Self {
            next: state,
            draft: draft.clone(),
            replies: Vec::new(),
            effects: Vec::new(),
        }
    }

    fn to(state: WorkflowState, draft: Draft, reply: Reply) -> Self {
        Self {
            next: state,
            draft,
            replies: vec![reply],
            effects: Vec::new(),
        }
    }
}

// Callback data for the inline keyboards.
pub(crate) const CHOICE_UPLOAD: &str = "upload";
pub(crate) const CHOICE_LINK: &str = "link";
pub(crate) const CHOICE_GENERATE: &str = "gen";
pub(crate) const CHOICE_EDIT_MANUAL: &str = "edit_manual";
pub(crate) const CHOICE_EDIT_AI: &str = "edit_ai";
pub(crate) const CHOICE_PUBLISH: &str = "publish";
pub(crate) const CHOICE_RESTART: &str = "restart";

pub(crate) const TOPIC_PROMPT: &str = "✍️ Write the post topic:";
const IMAGE_SOURCE_PROMPT: &str = "🖼 How should we add an image?";
const UPLOAD_PROMPT: &str = "📸 Send a photo:";
const LINK_PROMPT: &str = "🔗 Paste the image link:";
const GENERATE_PROMPT: &str = "🎨 Describe the image:";
const GENERATING_NOTICE: &str = "🎨 Generating the image...";
const EDIT_MANUAL_PROMPT: &str = "✏️ Send the new text:";
const EDIT_AI_PROMPT: &str = "🤖 What should change?";
const PLATFORM_PROMPT: &str = "🚀 Where should it go?";
pub(crate) const TOKEN_PROMPT: &str = "Enter the access token from the site:";

fn image_source_choices() -> Vec<Choice> {
    vec![
        Choice::new("📸 Upload a photo", CHOICE_UPLOAD),
        Choice::new("🔗 Paste a link", CHOICE_LINK),
        Choice::new("🎨 Generate an image", CHOICE_GENERATE),
    ]
}

pub(crate) fn language_choices() -> Vec<Choice> {
    vec![
        Choice::new("🇷🇺 Русский", "ru"),
        Choice::new("🇰🇿 Қазақша", "kz"),
        Choice::new("🇬🇧 English", "en"),
    ]
}

fn preview_choices() -> Vec<Choice> {
    vec![
        Choice::new("✏️ Edit manually", CHOICE_EDIT_MANUAL),
        Choice::new("🤖 Edit with AI", CHOICE_EDIT_AI),
        Choice::new("🚀 Publish", CHOICE_PUBLISH),
    ]
}

fn platform_choices() -> Vec<Choice> {
    vec![
        Choice::new("📢 Telegram", "tg"),
        Choice::new("📸 Instagram", "ig"),
        Choice::new("📘 Facebook", "fb"),
        Choice::new("🌍 Everywhere", "all"),
    ]
}

pub(crate) fn restart_choices() -> Vec<Choice> {
    vec![Choice::new("🔄 Start over", CHOICE_RESTART)]
}

/// The preview message for a draft: its photo, caption, and the
/// edit/publish keyboard. `None` until the draft has both.
pub(crate) fn preview_reply(draft: &Draft) -> Option<Reply> {
    let url = draft.image_url.clone()?;
    let caption = draft.caption.clone()?;
    Some(Reply::Photo {
        url,
        caption,
        choices: preview_choices(),
    })
}

fn topic_step() -> Step {
    Step::to(
        WorkflowState::Topic,
        Draft::default(),
        Reply::Text(TOPIC_PROMPT.to_string()),
    )
}

/// Compute the step for one inbound event.
///
/// Pure: no I/O, no clock. The caller has already authorized
/// start-workflow commands and handled the Idle binding handshake, which
/// needs the account store.
pub fn transition(state: WorkflowState, draft: &Draft, event: &ChatEvent) -> Step {
    match (state, event) {
        // Restart affordances work from any state and discard the draft.
        (_, ChatEvent::Choice(choice)) if choice == CHOICE_RESTART => topic_step(),
        (_, ChatEvent::Command(BotCommand::Menu)) => topic_step(),

        (WorkflowState::Topic, ChatEvent::Text(text)) => {
            let mut draft = draft.clone();
            draft.topic = Some(text.clone());
            Step::to(
                WorkflowState::ChooseImageSource,
                draft,
                Reply::Prompt {
                    text: IMAGE_SOURCE_PROMPT.to_string(),
                    choices: image_source_choices(),
                },
            )
        }

        (WorkflowState::ChooseImageSource, ChatEvent::Choice(choice)) => match choice.as_str() {
            CHOICE_UPLOAD => Step::to(
                WorkflowState::AwaitUpload,
                draft.clone(),
                Reply::Text(UPLOAD_PROMPT.to_string()),
            ),
            CHOICE_LINK => Step::to(
                WorkflowState::AwaitLink,
                draft.clone(),
                Reply::Text(LINK_PROMPT.to_string()),
            ),
            CHOICE_GENERATE => Step::to(
                WorkflowState::AwaitGeneratePrompt,
                draft.clone(),
                Reply::Text(GENERATE_PROMPT.to_string()),
            ),
            _ => Step::stay(state, draft),
        },

        (WorkflowState::AwaitUpload, ChatEvent::Image { url }) => Step {
            next: WorkflowState::Language,
            draft: draft.clone(),
            replies: Vec::new(),
            effects: vec![Effect::RelayImage {
                source_url: url.clone(),
                kind: ImageSourceKind::Upload,
            }],
        },

        (WorkflowState::AwaitLink, ChatEvent::Text(url)) => Step {
            next: WorkflowState::Language,
            draft: draft.clone(),
            replies: Vec::new(),
            effects: vec![Effect::RelayImage {
                source_url: url.clone(),
                kind: ImageSourceKind::Link,
            }],
        },

        (WorkflowState::AwaitGeneratePrompt, ChatEvent::Text(prompt)) => Step {
            next: WorkflowState::Language,
            draft: draft.clone(),
            replies: vec![Reply::Text(GENERATING_NOTICE.to_string())],
            effects: vec![Effect::GenerateImage {
                prompt: prompt.clone(),
            }],
        },

        (WorkflowState::Language, ChatEvent::Choice(choice)) => {
            match Language::from_str(choice) {
                Ok(language) => {
                    let mut draft = draft.clone();
                    draft.language = Some(language);
                    Step {
                        next: WorkflowState::Preview,
                        draft,
                        replies: Vec::new(),
                        effects: vec![Effect::GenerateCaption],
                    }
                }
                Err(_) => Step::stay(state, draft),
            }
        }

        (WorkflowState::Preview, ChatEvent::Choice(choice)) => match choice.as_str() {
            CHOICE_EDIT_MANUAL => Step::to(
                WorkflowState::EditManual,
                draft.clone(),
                Reply::Text(EDIT_MANUAL_PROMPT.to_string()),
            ),
            CHOICE_EDIT_AI => Step::to(
                WorkflowState::EditAi,
                draft.clone(),
                Reply::Text(EDIT_AI_PROMPT.to_string()),
            ),
            CHOICE_PUBLISH => Step::to(
                WorkflowState::ChoosePlatform,
                draft.clone(),
                Reply::Prompt {
                    text: PLATFORM_PROMPT.to_string(),
                    choices: platform_choices(),
                },
            ),
            _ => Step::stay(state, draft),
        },

        (WorkflowState::EditManual, ChatEvent::Text(text)) => {
            let mut draft = draft.clone();
            draft.caption = Some(text.clone());
            let replies = preview_reply(&draft).into_iter().collect();
            Step {
                next: WorkflowState::Preview,
                draft,
                replies,
                effects: Vec::new(),
            }
        }

        (WorkflowState::EditAi, ChatEvent::Text(instruction)) => Step {
            next: WorkflowState::Preview,
            draft: draft.clone(),
            replies: Vec::new(),
            effects: vec![Effect::EditCaption {
                instruction: instruction.clone(),
            }],
        },

        (WorkflowState::ChoosePlatform, ChatEvent::Choice(choice)) => {
            match PublishTarget::from_str(choice) {
                Ok(target) => Step {
                    next: WorkflowState::Idle,
                    draft: draft.clone(),
                    replies: Vec::new(),
                    effects: vec![Effect::Publish {
                        targets: target.platforms(),
                    }],
                },
                Err(_) => Step::stay(state, draft),
            }
        }

        // Anything else is unrecognized input for the current state.
        _ => Step::stay(state, draft),
    }
}
