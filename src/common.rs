//! Common utilities for DynamoDB expressions.
//!
//! This module provides the shared pieces used by read and write operations:
//! key conversion, condition expressions and the placeholder bookkeeping that
//! keeps user-supplied attribute names out of the expression text.

/// Condition expressions for guarded writes.
pub mod condition;

/// Key types for identifying items in DynamoDB tables.
pub mod key;

use aws_sdk_dynamodb::types;
use std::collections;

/// Build the name and value placeholders for the `index`-th attribute of an expression.
///
/// Attribute names are never written into the expression verbatim, so reserved
/// words (`name`, `status`, ...) and names with punctuation are always safe.
pub(crate) fn add_placeholders(prefix: &str, index: &mut usize) -> (String, String) {
    let name_placeholder = format!("#{prefix}{index}");
    let value_placeholder = format!(":{prefix}{index}");
    *index += 1;
    (name_placeholder, value_placeholder)
}

pub(crate) fn non_empty<K, V>(map: collections::HashMap<K, V>) -> Option<collections::HashMap<K, V>> {
    if map.is_empty() { None } else { Some(map) }
}

/// expression operation
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ExpressionInput {
    pub(crate) expression: String,
    pub(crate) expression_attribute_names: collections::HashMap<String, String>,
    pub(crate) expression_attribute_values: collections::HashMap<String, types::AttributeValue>,
}

impl ExpressionInput {
    pub(crate) fn merge(separator: &str, items: Vec<Self>) -> Self {
        let mut operation = Self::default();
        let mut expressions = Vec::with_capacity(items.len());
        for item in items {
            operation
                .expression_attribute_names
                .extend(item.expression_attribute_names);
            operation
                .expression_attribute_values
                .extend(item.expression_attribute_values);
            expressions.push(item.expression);
        }
        operation.expression = expressions.join(separator);
        operation
    }

    /// Move the attribute maps into an operation's optional maps and return the expression.
    ///
    /// Empty maps stay `None`: DynamoDB rejects empty `ExpressionAttributeNames`
    /// and `ExpressionAttributeValues`.
    pub(crate) fn merge_into(
        self,
        names: &mut Option<collections::HashMap<String, String>>,
        values: &mut Option<collections::HashMap<String, types::AttributeValue>>,
    ) -> String {
        let mut merged_names = names.take().unwrap_or_default();
        merged_names.extend(self.expression_attribute_names);
        *names = non_empty(merged_names);
        let mut merged_values = values.take().unwrap_or_default();
        merged_values.extend(self.expression_attribute_values);
        *values = non_empty(merged_values);
        self.expression
    }
}
