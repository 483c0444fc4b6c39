use crate::write;

use aws_sdk_dynamodb::{Client, error, operation, types};
use serde::Serialize;
use serde_dynamo::{Error, Result, to_item};
use std::collections;

/// put item operation
#[derive(Debug, PartialEq)]
struct PutItemInput {
    item: collections::HashMap<String, types::AttributeValue>,
    write_operation: write::common::WriteInput,
}

/// Put item operation.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_user_api::write;
/// use serde_json::json;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let put_item = write::put_item::PutItem {
///     item: json!({"email": "jane@example.com", "firstName": "Jane"}),
///     write_args: write::common::WriteArgs {
///         table_name: "users".to_string(),
///         ..Default::default()
///     },
/// };
/// put_item.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, PartialEq)]
pub struct PutItem<T> {
    /// The item to put into the table.
    pub item: T,
    /// Additional write operation arguments (table name, condition).
    pub write_args: write::common::WriteArgs,
}

impl<T: Serialize> TryFrom<PutItem<T>> for PutItemInput {
    type Error = Error;

    fn try_from(put_item: PutItem<T>) -> Result<Self> {
        let item = to_item(put_item.item)?;
        let operation = Self {
            item,
            write_operation: put_item.write_args.into(),
        };
        Ok(operation)
    }
}

impl<T: Serialize> PutItem<T> {
    /// Execute the put item operation.
    ///
    /// A serialization failure is reported as
    /// [`error::SdkError::ConstructionFailure`] before any request is sent.
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::put_item::PutItemOutput,
        error::SdkError<operation::put_item::PutItemError>,
    > {
        let put_item: PutItemInput = self.try_into().map_err(error::BuildError::other)?;
        let builder = client.put_item().set_item(Some(put_item.item));
        crate::apply_write_operation!(builder, put_item.write_operation)
            .send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common;

    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[case::unguarded(
        PutItem {
            item: json!(
                {
                    "email": "jane@example.com",
                    "firstName": "Jane"
                }
            ),
            write_args: write::common::WriteArgs {
                table_name: "users".to_string(),
                ..Default::default()
            },
        },
        PutItemInput {
            item: collections::HashMap::from(
                [
                    (
                        "email".to_string(),
                        types::AttributeValue::S(
                            "jane@example.com".to_string()
                        ),
                    ),
                    (
                        "firstName".to_string(),
                        types::AttributeValue::S(
                            "Jane".to_string()
                        ),
                    ),
                ]
            ),
            write_operation: write::common::WriteInput {
                table_name: "users".to_string(),
                ..Default::default()
            },
        }
    )]
    #[case::guarded(
        PutItem {
            item: json!(
                {
                    "email": "jane@example.com"
                }
            ),
            write_args: write::common::WriteArgs {
                condition: Some(
                    common::condition::KeyCondition {
                        name: "email".to_string(),
                        condition: common::condition::Condition::AttributeNotExists,
                    }
                ),
                table_name: "users".to_string(),
            },
        },
        PutItemInput {
            item: collections::HashMap::from(
                [(
                    "email".to_string(),
                    types::AttributeValue::S(
                        "jane@example.com".to_string()
                    ),
                )]
            ),
            write_operation: write::common::WriteInput {
                condition_expression: Some(
                    "attribute_not_exists(#cond0)".to_string()
                ),
                expression_attribute_names: Some(
                    collections::HashMap::from(
                        [
                            ("#cond0".to_string(), "email".to_string()),
                        ]
                    )
                ),
                expression_attribute_values: None,
                table_name: "users".to_string(),
            },
        }
    )]
    fn test_put_item(#[case] args: PutItem<Value>, #[case] expected: PutItemInput) {
        let actual: PutItemInput = args.try_into().unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_put_item_rejects_non_map_item() {
        let put_item = PutItem {
            item: json!("not a map"),
            write_args: write::common::WriteArgs {
                table_name: "users".to_string(),
                ..Default::default()
            },
        };
        let actual: Result<PutItemInput> = put_item.try_into();
        assert!(actual.is_err());
    }
}
