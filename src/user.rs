//! User records and the store they live in.
//!
//! A user is addressed by its email, which is the partition key of the
//! table. [`UserStore`] is the seam between the request handlers and the
//! storage: [`dynamo::DynamoUserStore`] talks to DynamoDB,
//! [`memory::MemoryUserStore`] keeps items in process.

/// DynamoDB-backed store.
pub mod dynamo;

/// Store failures.
pub mod error;

/// In-process store.
pub mod memory;

/// Partial updates.
pub mod patch;

use crate::user::{error::UserError, patch::Patch};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name of the partition key attribute.
pub const EMAIL_KEY: &str = "email";

/// A user record.
///
/// Missing names decode as empty strings.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    /// Unique email address, used as the partition key.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

/// Domain operations over the user table.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch the user with the given email, `None` if there is none.
    async fn fetch_user(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Fetch every user in the table.
    async fn fetch_users(&self) -> Result<Vec<User>, UserError>;

    /// Store a new user and return it.
    async fn create_user(&self, user: User) -> Result<User, UserError>;

    /// Set the given attributes on an existing user.
    async fn apply_patch(&self, email: &str, patch: Patch) -> Result<(), UserError>;

    /// Delete the user with the given email. Deleting a missing user succeeds.
    async fn delete_user(&self, email: &str) -> Result<(), UserError>;

    /// Validate a property-bag and apply it to an existing user.
    ///
    /// Nothing is written when any value is rejected. Values are not checked
    /// against the [`User`] fields: setting `firstName` or `lastName` to an
    /// integer or a boolean is stored as is, after which that record no longer
    /// decodes and both [`UserStore::fetch_user`] for it and
    /// [`UserStore::fetch_users`] fail.
    async fn update_user(&self, email: &str, updates: Map<String, Value>) -> Result<(), UserError> {
        let patch = Patch::try_from(updates)?;
        self.apply_patch(email, patch).await
    }
}
