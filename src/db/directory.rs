use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::db::models::UserRecord;
use crate::error::StoreError;
use crate::Result;

/// Storage seam for user records. Implementations must make `create`
/// atomic per username: of two concurrent creates for the same key, exactly
/// one succeeds.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, record: UserRecord) -> Result<()>;

    async fn get(&self, username: &str) -> Result<Option<UserRecord>>;
}

/// Process-lifetime user table.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the user does not exist.
    pub async fn set_disabled(&self, username: &str, disabled: bool) -> bool {
        let mut users = self.users.write().await;
        match users.get_mut(username) {
            Some(user) => {
                user.disabled = disabled;
                true
            }
            None => false,
        }
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserDirectory {
    async fn create(&self, record: UserRecord) -> Result<()> {
        let mut users = self.users.write().await;
        if users.contains_key(&record.username) {
            return Err(StoreError::DuplicateUser(record.username).into());
        }
        users.insert(record.username.clone(), record);
        Ok(())
    }

    async fn get(&self, username: &str) -> Result<Option<UserRecord>> {
        Ok(self.users.read().await.get(username).cloned())
    }
}
