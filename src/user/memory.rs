use crate::user::{User, UserStore, error::UserError, patch::Patch};

use async_trait::async_trait;
use aws_sdk_dynamodb::types;
use serde_dynamo::{from_item, from_items, to_attribute_value, to_item};
use std::collections;
use tokio::sync::RwLock;

type Item = collections::HashMap<String, types::AttributeValue>;

/// User store kept in process memory.
///
/// Items are encoded exactly as they would be in DynamoDB, so decode
/// failures and patch semantics match [`super::dynamo::DynamoUserStore`].
///
/// ```rust
/// use dynamodb_user_api::user::{User, UserStore, memory::MemoryUserStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MemoryUserStore::default();
/// store
///     .create_user(User {
///         email: "jane@example.com".to_string(),
///         ..Default::default()
///     })
///     .await?;
/// assert!(store.fetch_user("jane@example.com").await?.is_some());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    allow_overwrite: bool,
    items: RwLock<collections::BTreeMap<String, Item>>,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new(allow_overwrite: bool) -> Self {
        Self {
            allow_overwrite,
            ..Default::default()
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn fetch_user(&self, email: &str) -> Result<Option<User>, UserError> {
        let items = self.items.read().await;
        items
            .get(email)
            .cloned()
            .map(from_item)
            .transpose()
            .map_err(|err| UserError::UnmarshalRecord(Box::new(err)))
    }

    async fn fetch_users(&self) -> Result<Vec<User>, UserError> {
        let items: Vec<Item> = self.items.read().await.values().cloned().collect();
        from_items(items).map_err(|err| UserError::UnmarshalRecords(Box::new(err)))
    }

    async fn create_user(&self, user: User) -> Result<User, UserError> {
        let item: Item = to_item(&user).map_err(|err| UserError::MarshalItem(Box::new(err)))?;
        let mut items = self.items.write().await;
        if !self.allow_overwrite && items.contains_key(&user.email) {
            return Err(UserError::AlreadyExists);
        }
        items.insert(user.email.clone(), item);
        Ok(user)
    }

    async fn apply_patch(&self, email: &str, patch: Patch) -> Result<(), UserError> {
        let mut values = Vec::with_capacity(patch.len());
        for (key, value) in patch.into_inner() {
            let value =
                to_attribute_value(value).map_err(|err| UserError::UpdateItem(Box::new(err)))?;
            values.push((key, value));
        }
        let mut items = self.items.write().await;
        let item = items.get_mut(email).ok_or(UserError::NotFound)?;
        item.extend(values);
        Ok(())
    }

    async fn delete_user(&self, email: &str) -> Result<(), UserError> {
        self.items.write().await.remove(email);
        Ok(())
    }
}
