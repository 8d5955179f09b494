//! Publish platform and target-selection types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An external platform the bot can publish to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Broadcast-channel post via the chat transport
    Telegram,
    /// Two-step media container flow on the Graph API
    Instagram,
    /// Single photo-with-caption post on the Graph API
    Facebook,
}

/// One of the four selections offered on the platform keyboard.
///
/// The wire spellings match the callback data sent by the chat client.
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
pub enum PublishTarget {
    /// Telegram only
    #[strum(serialize = "tg")]
    #[serde(rename = "tg")]
    Telegram,
    /// Instagram only
    #[strum(serialize = "ig")]
    #[serde(rename = "ig")]
    Instagram,
    /// Facebook only
    #[strum(serialize = "fb")]
    #[serde(rename = "fb")]
    Facebook,
    /// Every configured platform
    #[strum(serialize = "all")]
    #[serde(rename = "all")]
    All,
}

impl PublishTarget {
    /// The non-empty set of platforms this selection maps to.
    pub fn platforms(&self) -> BTreeSet<Platform> {
        match self {
            PublishTarget::Telegram => BTreeSet::from([Platform::Telegram]),
            PublishTarget::Instagram => BTreeSet::from([Platform::Instagram]),
            PublishTarget::Facebook => BTreeSet::from([Platform::Facebook]),
            PublishTarget::All => BTreeSet::from([
                Platform::Telegram,
                Platform::Instagram,
                Platform::Facebook,
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_target_wire_spellings() {
        assert_eq!(
            PublishTarget::from_str("tg").unwrap(),
            PublishTarget::Telegram
        );
        assert_eq!(
            PublishTarget::from_str("ig").unwrap(),
            PublishTarget::Instagram
        );
        assert_eq!(
            PublishTarget::from_str("fb").unwrap(),
            PublishTarget::Facebook
        );
        assert_eq!(PublishTarget::from_str("all").unwrap(), PublishTarget::All);
        assert!(PublishTarget::from_str("vk").is_err());
    }

    #[test]
    fn test_every_selection_is_non_empty() {
        for target in [
            PublishTarget::Telegram,
            PublishTarget::Instagram,
            PublishTarget::Facebook,
            PublishTarget::All,
        ] {
            assert!(!target.platforms().is_empty());
        }
    }

    #[test]
    fn test_all_covers_every_platform() {
        let all = PublishTarget::All.platforms();
        assert_eq!(all.len(), 3);
        assert!(all.contains(&Platform::Telegram));
        assert!(all.contains(&Platform::Instagram));
        assert!(all.contains(&Platform::Facebook));
    }
}
