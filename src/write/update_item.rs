use crate::{common, write};

use aws_sdk_dynamodb::{Client, error, operation, types};
use indexmap::IndexMap;
use serde::{Serialize, ser};
use serde_dynamo::{Error, Result, to_attribute_value};
use std::collections;

/// Prefix of the placeholders generated for SET assignments.
const SET_PREFIX: &str = "set";

/// Build a `SET` expression assigning every value to its attribute.
///
/// Names and values are aliased in insertion order: the first assignment
/// becomes `#set0 = :set0`, the second `#set1 = :set1` and so on.
fn get_set_expression<T: Serialize>(
    assignments: IndexMap<String, T>,
) -> Result<common::ExpressionInput> {
    if assignments.is_empty() {
        return Err(ser::Error::custom("update requires at least one assignment"));
    }
    let mut index = 0;
    let mut operations = Vec::with_capacity(assignments.len());
    for (name, value) in assignments {
        let (name_placeholder, value_placeholder) =
            common::add_placeholders(SET_PREFIX, &mut index);
        let value = to_attribute_value(value)?;
        let operation = common::ExpressionInput {
            expression: format!("{name_placeholder} = {value_placeholder}"),
            expression_attribute_names: collections::HashMap::from([(name_placeholder, name)]),
            expression_attribute_values: collections::HashMap::from([(value_placeholder, value)]),
        };
        operations.push(operation);
    }
    let mut operation = common::ExpressionInput::merge(", ", operations);
    operation.expression = format!("SET {}", operation.expression);
    Ok(operation)
}

/// update item operation
#[derive(Clone, Debug, Default, PartialEq)]
struct UpdateItemInput {
    key: collections::HashMap<String, types::AttributeValue>,
    update_expression: String,
    write_operation: write::common::WriteInput,
}

/// Update item operation.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_user_api::{common, write};
/// use indexmap::IndexMap;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let update_item = write::update_item::UpdateItem {
///     key: common::key::Key {
///         name: "email".to_string(),
///         value: "jane@example.com".to_string(),
///     },
///     assignments: IndexMap::from([("firstName".to_string(), "Janet".to_string())]),
///     write_args: write::common::WriteArgs {
///         table_name: "users".to_string(),
///         ..Default::default()
///     },
/// };
/// // The crate builds: "SET #set0 = :set0"
/// update_item.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateItem<K, V> {
    /// The primary key of the item to update.
    pub key: common::key::Key<K>,
    /// Attribute values to set, in expression order. Must not be empty.
    pub assignments: IndexMap<String, V>,
    /// Additional write operation arguments (table name, condition).
    pub write_args: write::common::WriteArgs,
}

impl<K: Serialize, V: Serialize> TryFrom<UpdateItem<K, V>> for UpdateItemInput {
    type Error = Error;

    fn try_from(update_item: UpdateItem<K, V>) -> Result<Self> {
        let key = update_item.key.try_into()?;
        let operation = get_set_expression(update_item.assignments)?;
        let mut write_operation: write::common::WriteInput = update_item.write_args.into();
        let update_expression = write_operation.merge_expression(operation);
        let operation = Self {
            key,
            update_expression,
            write_operation,
        };
        Ok(operation)
    }
}

impl<K: Serialize, V: Serialize> UpdateItem<K, V> {
    /// Execute the update item operation.
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::update_item::UpdateItemOutput,
        error::SdkError<operation::update_item::UpdateItemError>,
    > {
        let update_item: UpdateItemInput = self.try_into().map_err(error::BuildError::other)?;
        let builder = client
            .update_item()
            .set_key(Some(update_item.key))
            .update_expression(update_item.update_expression);
        crate::apply_write_operation!(builder, update_item.write_operation)
            .send()
            .await
    }
}
