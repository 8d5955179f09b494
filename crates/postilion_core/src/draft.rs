//! The in-progress post draft and its field enums.

use serde::{Deserialize, Serialize};

/// Caption language offered to the user.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Russian
    Ru,
    /// Kazakh
    Kz,
    /// English
    En,
}

/// How the draft image was obtained.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ImageSourceKind {
    /// Photo uploaded through the chat
    Upload,
    /// Image URL pasted by the user
    Link,
    /// Image produced by the generation service
    Generated,
}

/// The in-progress content for one workflow run.
///
/// Fields are populated incrementally as the workflow advances. Everything
/// except `image_url` and `caption` is set at most once per run; the
/// caption is overwritten freely during the edit loop.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    /// Post topic supplied by the user
    pub topic: Option<String>,
    /// How the image was obtained
    pub image_source: Option<ImageSourceKind>,
    /// Stable public URL of the image, after relay to the hosting service
    pub image_url: Option<String>,
    /// Caption language
    pub language: Option<Language>,
    /// Generated or edited caption text
    pub caption: Option<String>,
}

impl Draft {
    /// Whether every field required for publication is present.
    ///
    /// A session must never reach the publish transition while this
    /// returns `false`.
    pub fn is_ready(&self) -> bool {
        self.topic.is_some()
            && self.image_url.is_some()
            && self.language.is_some()
            && self.caption.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_language_wire_spellings() {
        assert_eq!(Language::from_str("ru").unwrap(), Language::Ru);
        assert_eq!(Language::from_str("kz").unwrap(), Language::Kz);
        assert_eq!(Language::from_str("en").unwrap(), Language::En);
        assert!(Language::from_str("de").is_err());
        assert_eq!(Language::En.to_string(), "en");
    }

    #[test]
    fn test_empty_draft_is_not_ready() {
        assert!(!Draft::default().is_ready());
    }

    #[test]
    fn test_complete_draft_is_ready() {
        let draft = Draft {
            topic: Some("coffee shop opening".to_string()),
            image_source: Some(ImageSourceKind::Link),
            image_url: Some("https://img.example/1.jpg".to_string()),
            language: Some(Language::Ru),
            caption: Some("text".to_string()),
        };
        assert!(draft.is_ready());
    }

    #[test]
    fn test_draft_without_caption_is_not_ready() {
        let draft = Draft {
            topic: Some("topic".to_string()),
            image_source: Some(ImageSourceKind::Upload),
            image_url: Some("https://img.example/1.jpg".to_string()),
            language: Some(Language::En),
            caption: None,
        };
        assert!(!draft.is_ready());
    }
}
