use crate::{
    common, config, read,
    user::{EMAIL_KEY, User, UserStore, error::UserError, patch::Patch},
    write,
};

use async_trait::async_trait;
use aws_sdk_dynamodb::{
    Client, error,
    operation::{put_item::PutItemError, update_item::UpdateItemError},
};
use serde_dynamo::{from_item, from_items};
use std::fmt::Debug;

/// Map a PutItem failure; a failed `attribute_not_exists` guard means the
/// email is taken.
fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: error::SdkError<PutItemError, R>,
) -> UserError {
    match err {
        err @ error::SdkError::ConstructionFailure(_) => UserError::MarshalItem(Box::new(err)),
        err if err
            .as_service_error()
            .is_some_and(PutItemError::is_conditional_check_failed_exception) =>
        {
            UserError::AlreadyExists
        }
        err => UserError::PutItem(Box::new(err)),
    }
}

/// Map an UpdateItem failure; a failed `attribute_exists` guard means there
/// is no such user.
fn map_update_item_error<R: Debug + Send + Sync + 'static>(
    err: error::SdkError<UpdateItemError, R>,
) -> UserError {
    match err {
        err if err
            .as_service_error()
            .is_some_and(UpdateItemError::is_conditional_check_failed_exception) =>
        {
            UserError::NotFound
        }
        err => UserError::UpdateItem(Box::new(err)),
    }
}

/// User store backed by a DynamoDB table whose partition key is `email`.
#[derive(Clone, Debug)]
pub struct DynamoUserStore {
    allow_overwrite: bool,
    client: Client,
    table_name: String,
}

impl DynamoUserStore {
    /// Create a store over the given table.
    ///
    /// Creating a user whose email is already taken fails unless
    /// `allow_overwrite` is set.
    pub fn new(client: Client, table_name: impl Into<String>, allow_overwrite: bool) -> Self {
        Self {
            allow_overwrite,
            client,
            table_name: table_name.into(),
        }
    }

    /// Create a store from the loaded configuration.
    pub fn from_config(client: Client, config: &config::Config) -> Self {
        Self::new(client, config.table_name.clone(), config.allow_overwrite)
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    fn key(email: &str) -> common::key::Key<&str> {
        common::key::Key {
            name: EMAIL_KEY.to_string(),
            value: email,
        }
    }

    fn get_item<'a>(&self, email: &'a str) -> read::get_item::GetItem<&'a str> {
        read::get_item::GetItem {
            consistent_read: Some(true),
            key: Self::key(email),
            table_name: self.table_name.clone(),
        }
    }

    fn scan(&self) -> read::scan::Scan {
        read::scan::Scan {
            consistent_read: Some(true),
            table_name: self.table_name.clone(),
        }
    }

    fn write_args(&self, condition: Option<common::condition::Condition>) -> write::common::WriteArgs {
        write::common::WriteArgs {
            condition: condition.map(|condition| common::condition::KeyCondition {
                condition,
                name: EMAIL_KEY.to_string(),
            }),
            table_name: self.table_name.clone(),
        }
    }
}

#[async_trait]
impl UserStore for DynamoUserStore {
    #[tracing::instrument(name = "user_api.fetch_user", skip(self))]
    async fn fetch_user(&self, email: &str) -> Result<Option<User>, UserError> {
        let output = self
            .get_item(email)
            .send(&self.client)
            .await
            .map_err(|err| UserError::FetchRecord(Box::new(err)))?;
        output
            .item
            .map(from_item)
            .transpose()
            .map_err(|err| UserError::UnmarshalRecord(Box::new(err)))
    }

    #[tracing::instrument(name = "user_api.fetch_users", skip(self))]
    async fn fetch_users(&self) -> Result<Vec<User>, UserError> {
        let output = self
            .scan()
            .send(&self.client)
            .await
            .map_err(|err| UserError::FetchRecords(Box::new(err)))?;
        let users = from_items(output.items.unwrap_or_default())
            .map_err(|err| UserError::UnmarshalRecords(Box::new(err)))?;
        tracing::debug!(count = output.count, "scanned users");
        Ok(users)
    }

    #[tracing::instrument(name = "user_api.create_user", skip(self, user), fields(email = %user.email))]
    async fn create_user(&self, user: User) -> Result<User, UserError> {
        let condition =
            (!self.allow_overwrite).then_some(common::condition::Condition::AttributeNotExists);
        let put_item = write::put_item::PutItem {
            item: &user,
            write_args: self.write_args(condition),
        };
        put_item
            .send(&self.client)
            .await
            .map_err(map_put_item_error)?;
        Ok(user)
    }

    #[tracing::instrument(name = "user_api.apply_patch", skip(self, patch), fields(attributes = patch.len()))]
    async fn apply_patch(&self, email: &str, patch: Patch) -> Result<(), UserError> {
        let update_item = write::update_item::UpdateItem {
            key: Self::key(email),
            assignments: patch.into_inner(),
            write_args: self.write_args(Some(common::condition::Condition::AttributeExists)),
        };
        update_item
            .send(&self.client)
            .await
            .map_err(map_update_item_error)?;
        Ok(())
    }

    #[tracing::instrument(name = "user_api.delete_user", skip(self))]
    async fn delete_user(&self, email: &str) -> Result<(), UserError> {
        let delete_item = write::delete_item::DeleteItem {
            key: Self::key(email),
            write_args: self.write_args(None),
        };
        delete_item
            .send(&self.client)
            .await
            .map_err(|err| UserError::DeleteItem(Box::new(err)))?;
        Ok(())
    }
}
