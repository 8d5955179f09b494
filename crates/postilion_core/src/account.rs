//! Account and channel identity types.

use serde::{Deserialize, Serialize};

/// Opaque identifier of the chat endpoint a user interacts from.
///
/// For the Telegram transport this is the numeric chat id, but nothing in
/// the workflow engine depends on that.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct ChannelId(pub i64);

/// A registered account, created by the web application at registration.
///
/// The channel identity is bound at most once through the token handshake;
/// only the admin panel (out of scope here) ever clears it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Database identifier
    pub id: i64,
    /// Secret access token issued by the web application. Never logged.
    pub token: String,
    /// Chat endpoint bound to this account, if the handshake has happened
    pub channel: Option<ChannelId>,
}

impl Account {
    /// Whether this account is bound to the given channel identity.
    pub fn is_bound_to(&self, channel: ChannelId) -> bool {
        self.channel == Some(channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_account_matches_its_channel() {
        let account = Account {
            id: 1,
            token: "secret".to_string(),
            channel: Some(ChannelId(42)),
        };
        assert!(account.is_bound_to(ChannelId(42)));
        assert!(!account.is_bound_to(ChannelId(7)));
    }

    #[test]
    fn test_unbound_account_matches_nothing() {
        let account = Account {
            id: 1,
            token: "secret".to_string(),
            channel: None,
        };
        assert!(!account.is_bound_to(ChannelId(42)));
    }
}
