//! Identity resolver: the gate between chat sessions and accounts.

use crate::AccountStore;
use postilion_core::{Account, ChannelId};
use postilion_error::PostilionResult;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Outcome of the token-binding handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindOutcome {
    /// The channel identity is now bound to the token's account.
    /// Re-binding from the same identity is idempotent and lands here too.
    Bound,
    /// No account holds that token.
    InvalidToken,
    /// The token's account is already bound to a different identity.
    /// The original binding is left unchanged.
    TokenConflict,
}

/// Maps channel identities to authorized accounts and performs the
/// one-time binding handshake.
#[derive(Clone)]
pub struct IdentityResolver {
    store: Arc<dyn AccountStore>,
}

impl IdentityResolver {
    /// Create a resolver over an account store.
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// The account bound to this channel identity, if any.
    pub async fn resolve(&self, channel: ChannelId) -> PostilionResult<Option<Account>> {
        self.store.find_by_channel(channel).await
    }

    /// Bind a channel identity to the account holding `token`.
    #[instrument(skip(self, token), fields(%channel))]
    pub async fn bind(&self, channel: ChannelId, token: &str) -> PostilionResult<BindOutcome> {
        let Some(account) = self.store.find_by_token(token).await? else {
            debug!("Bind attempt with unknown token");
            return Ok(BindOutcome::InvalidToken);
        };

        match account.channel {
            Some(existing) if existing != channel => {
                debug!(account_id = account.id, "Token already bound elsewhere");
                Ok(BindOutcome::TokenConflict)
            }
            _ => {
                self.store.set_channel(account.id, channel).await?;
                info!(account_id = account.id, "Channel identity bound");
                Ok(BindOutcome::Bound)
            }
        }
    }
}
