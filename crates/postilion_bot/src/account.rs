//! Account store trait and in-memory implementation.

use async_trait::async_trait;
use postilion_core::{Account, ChannelId};
use postilion_error::{PostilionResult, StoreError};
use tokio::sync::RwLock;
use tracing::debug;

/// Read/write access to the account table owned by the web application.
///
/// The token is unique; the channel identity is unique once bound.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Look up an account by its secret access token.
    async fn find_by_token(&self, token: &str) -> PostilionResult<Option<Account>>;

    /// Look up the account bound to a channel identity.
    async fn find_by_channel(&self, channel: ChannelId) -> PostilionResult<Option<Account>>;

    /// Persist a channel binding on an account.
    async fn set_channel(&self, account_id: i64, channel: ChannelId) -> PostilionResult<()>;
}

/// In-memory account store, seeded at startup.
///
/// Sufficient here because the bot is the only process touching the
/// bindings; a SQL-backed implementation would slot in behind the same
/// trait.
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    accounts: RwLock<Vec<Account>>,
}

impl MemoryAccountStore {
    /// Create a store holding the given accounts.
    pub fn new(accounts: Vec<Account>) -> Self {
        debug!(count = accounts.len(), "Seeding in-memory account store");
        Self {
            accounts: RwLock::new(accounts),
        }
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_token(&self, token: &str) -> PostilionResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.iter().find(|a| a.token == token).cloned())
    }

    async fn find_by_channel(&self, channel: ChannelId) -> PostilionResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.iter().find(|a| a.channel == Some(channel)).cloned())
    }

    async fn set_channel(&self, account_id: i64, channel: ChannelId) -> PostilionResult<()> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .iter_mut()
            .find(|a| a.id == account_id)
            .ok_or_else(|| StoreError::new(format!("No account with id {}", account_id)))?;
        account.channel = Some(channel);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_store() -> MemoryAccountStore {
        MemoryAccountStore::new(vec![Account {
            id: 1,
            token: "tok-1".to_string(),
            channel: None,
        }])
    }

    #[tokio::test]
    async fn test_find_by_token() {
        let store = seeded_store();
        let found = store.find_by_token("tok-1").await.unwrap();
        assert_eq!(found.unwrap().id, 1);
        assert!(store.find_by_token("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_channel_persists() {
        let store = seeded_store();
        store.set_channel(1, ChannelId(42)).await.unwrap();
        let found = store.find_by_channel(ChannelId(42)).await.unwrap();
        assert_eq!(found.unwrap().id, 1);
    }

    #[tokio::test]
    async fn test_set_channel_unknown_account_errors() {
        let store = seeded_store();
        assert!(store.set_channel(99, ChannelId(42)).await.is_err());
    }
}
