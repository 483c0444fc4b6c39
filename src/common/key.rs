use aws_sdk_dynamodb::types;
use serde::Serialize;
use serde_dynamo::{Error, Result, to_attribute_value};
use std::collections;

/// Partition key of an item.
///
/// ```rust
/// use dynamodb_user_api::common::key;
///
/// let key = key::Key {
///     name: "email".to_string(),
///     value: "jane@example.com".to_string(),
/// };
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Key<T> {
    /// The attribute name of the key.
    pub name: String,
    /// The value of the key.
    pub value: T,
}

impl<T: Serialize> TryFrom<Key<T>> for collections::HashMap<String, types::AttributeValue> {
    type Error = Error;

    fn try_from(key: Key<T>) -> Result<Self> {
        let value = to_attribute_value(key.value)?;
        Ok(Self::from([(key.name, value)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    #[case::string(
        Key {
            name: "email".to_string(),
            value: Value::String(
                "jane@example.com".to_string()
            ),
        },
        collections::HashMap::from(
            [(
                "email".to_string(),
                types::AttributeValue::S(
                    "jane@example.com".to_string()
                ),
            )]
        )
    )]
    #[case::number(
        Key {
            name: "id".to_string(),
            value: Value::Number(
                42.into()
            ),
        },
        collections::HashMap::from(
            [(
                "id".to_string(),
                types::AttributeValue::N(
                    "42".to_string()
                ),
            )]
        )
    )]
    fn test_key_to_hash_map(
        #[case] key: Key<Value>,
        #[case] expected: collections::HashMap<String, types::AttributeValue>,
    ) {
        let actual: collections::HashMap<String, types::AttributeValue> = key.try_into().unwrap();
        assert_eq!(actual, expected);
    }
}
