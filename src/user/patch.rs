use crate::user::{EMAIL_KEY, error::UserError};

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

/// A value that can be written by a partial update.
///
/// ```rust
/// use dynamodb_user_api::user::patch::PatchValue;
///
/// let value = PatchValue::try_from(serde_json::json!(42)).unwrap();
/// assert_eq!(value, PatchValue::Integer(42));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PatchValue {
    /// Stored as a DynamoDB string (`S`).
    String(String),
    /// Stored as a DynamoDB number (`N`).
    Integer(i64),
    /// Stored as a DynamoDB boolean (`BOOL`).
    Boolean(bool),
}

impl TryFrom<Value> for PatchValue {
    type Error = Value;

    /// Floats, nulls, arrays and objects are handed back unchanged.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(value) => Ok(Self::String(value)),
            Value::Bool(value) => Ok(Self::Boolean(value)),
            Value::Number(number) => match number.as_i64() {
                Some(value) => Ok(Self::Integer(value)),
                None => Err(Value::Number(number)),
            },
            other => Err(other),
        }
    }
}

/// Attribute values to set on an existing user, in request order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Patch(IndexMap<String, PatchValue>);

impl Patch {
    /// Number of attributes set by the patch.
    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    /// Consume the patch, returning the ordered assignments.
    pub fn into_inner(self) -> IndexMap<String, PatchValue> {
        self.0
    }
}

impl TryFrom<Map<String, Value>> for Patch {
    type Error = UserError;

    /// Every value is checked before the patch is returned, so a rejected
    /// property-bag never reaches the store.
    fn try_from(updates: Map<String, Value>) -> Result<Self, Self::Error> {
        if updates.is_empty() {
            return Err(UserError::EmptyPatch);
        }
        let mut assignments = IndexMap::with_capacity(updates.len());
        for (key, value) in updates {
            if key.is_empty() {
                return Err(UserError::EmptyAttributeName);
            }
            if key == EMAIL_KEY {
                return Err(UserError::KeyUpdate);
            }
            match PatchValue::try_from(value) {
                Ok(value) => {
                    assignments.insert(key, value);
                }
                Err(_) => return Err(UserError::UnsupportedType { key }),
            }
        }
        Ok(Self(assignments))
    }
}
