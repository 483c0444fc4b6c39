use crate::common;

use aws_sdk_dynamodb::{Client, error, operation, types};
use serde::Serialize;
use serde_dynamo::{Error, Result};
use std::collections;

/// get item operation
#[derive(Clone, Debug, Default, PartialEq)]
struct GetItemInput {
    consistent_read: Option<bool>,
    key: collections::HashMap<String, types::AttributeValue>,
    table_name: String,
}

/// Get item operation.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_user_api::{common, read};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let get_item = read::get_item::GetItem {
///     key: common::key::Key {
///         name: "email".to_string(),
///         value: "jane@example.com".to_string(),
///     },
///     table_name: "users".to_string(),
///     ..Default::default()
/// };
/// get_item.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GetItem<T> {
    /// Whether to use a strongly consistent read.
    pub consistent_read: Option<bool>,
    /// The primary key of the item to retrieve.
    pub key: common::key::Key<T>,
    /// The name of the table to read from.
    pub table_name: String,
}

impl<T: Serialize> TryFrom<GetItem<T>> for GetItemInput {
    type Error = Error;

    fn try_from(get_item: GetItem<T>) -> Result<Self> {
        let key = get_item.key.try_into()?;
        let operation = Self {
            consistent_read: get_item.consistent_read,
            key,
            table_name: get_item.table_name,
        };
        Ok(operation)
    }
}

impl<T: Serialize> GetItem<T> {
    /// Execute the get item operation.
    ///
    /// The output's `item` is `None` when no item has the given key.
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::get_item::GetItemOutput,
        error::SdkError<operation::get_item::GetItemError>,
    > {
        let get_item: GetItemInput = self.try_into().map_err(error::BuildError::other)?;
        client
            .get_item()
            .set_key(Some(get_item.key))
            .set_consistent_read(get_item.consistent_read)
            .table_name(get_item.table_name)
            .send()
            .await
    }
}
