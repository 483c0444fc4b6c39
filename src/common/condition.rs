use crate::common;

use std::collections;

/// Existence checks usable as write guards.
///
/// ```rust
/// use dynamodb_user_api::common::condition;
///
/// let guard = condition::KeyCondition {
///     name: "email".to_string(),
///     condition: condition::Condition::AttributeNotExists,
/// };
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Condition {
    /// The attribute must exist on the stored item.
    AttributeExists,
    /// The attribute must not exist on the stored item.
    AttributeNotExists,
}

/// Condition applied to an attribute.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyCondition {
    /// The condition to apply to the attribute.
    pub condition: Condition,
    /// The name of the attribute to apply the condition to.
    pub name: String,
}

impl From<KeyCondition> for common::ExpressionInput {
    fn from(key_condition: KeyCondition) -> Self {
        let mut index = 0;
        let (placeholder, _) = common::add_placeholders("cond", &mut index);
        let expression = match key_condition.condition {
            Condition::AttributeExists => format!("attribute_exists({placeholder})"),
            Condition::AttributeNotExists => format!("attribute_not_exists({placeholder})"),
        };
        Self {
            expression,
            expression_attribute_names: collections::HashMap::from([(
                placeholder,
                key_condition.name,
            )]),
            ..Default::default()
        }
    }
}
