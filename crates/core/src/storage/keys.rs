//! Key schema and key-only projection helpers.
//!
//! Pure functions for describing a table's primary key and building the scan
//! projection that fetches nothing but key attributes.

use std::collections::HashMap;

/// Maximum number of write requests DynamoDB accepts in one `BatchWriteItem`.
pub const MAX_BATCH_WRITE_ITEMS: usize = 25;

/// Placeholder prefix for key attribute names in projection expressions.
const NAME_PLACEHOLDER_PREFIX: &str = "#k";

/// Primary key of a table: a partition key plus an optional sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySchema {
    pub partition_key: String,
    pub sort_key: Option<String>,
}

impl KeySchema {
    /// Creates a key schema with only a partition key.
    pub fn simple(partition_key: impl Into<String>) -> Self {
        Self {
            partition_key: partition_key.into(),
            sort_key: None,
        }
    }

    /// Creates a key schema with a partition key and a sort key.
    pub fn composite(partition_key: impl Into<String>, sort_key: impl Into<String>) -> Self {
        Self {
            partition_key: partition_key.into(),
            sort_key: Some(sort_key.into()),
        }
    }

    /// Key attribute names, partition key first.
    pub fn attribute_names(&self) -> Vec<&str> {
        let mut names = vec![self.partition_key.as_str()];
        if let Some(sk) = &self.sort_key {
            names.push(sk.as_str());
        }
        names
    }

    /// Builds the projection that returns only this schema's key attributes.
    pub fn projection(&self) -> KeyProjection {
        KeyProjection::new(&self.attribute_names())
    }
}

/// A projection expression plus the attribute-name placeholders it uses.
///
/// Key names go through placeholders (`#k0`, `#k1`) so reserved words such
/// as `name` or `date` are accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyProjection {
    pub expression: String,
    pub attribute_names: HashMap<String, String>,
}

impl KeyProjection {
    /// Builds a projection over the given attribute names.
    pub fn new(names: &[&str]) -> Self {
        let mut attribute_names = HashMap::with_capacity(names.len());
        let placeholders: Vec<String> = names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let placeholder = format!("{NAME_PLACEHOLDER_PREFIX}{i}");
                attribute_names.insert(placeholder.clone(), (*name).to_string());
                placeholder
            })
            .collect();

        Self {
            expression: placeholders.join(", "),
            attribute_names,
        }
    }

    /// Attribute names this projection resolves to, in expression order.
    pub fn resolved_names(&self) -> Vec<&str> {
        self.expression
            .split(", ")
            .filter_map(|placeholder| self.attribute_names.get(placeholder))
            .map(String::as_str)
            .collect()
    }
}
