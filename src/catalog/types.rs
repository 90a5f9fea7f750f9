//! Catalog identifiers and table metadata.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// A possibly multi-level namespace, e.g. `accounting.tax`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Namespace(Vec<String>);

impl Namespace {
    /// The root namespace (no levels).
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn of<I, S>(levels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(levels.into_iter().map(Into::into).collect())
    }

    pub fn levels(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if `self` is the direct parent of `other`.
    pub fn is_parent_of(&self, other: &Namespace) -> bool {
        other.len() == self.len() + 1 && other.0.starts_with(&self.0)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

/// A table name qualified by its namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TableIdentifier {
    pub namespace: Namespace,
    pub name: String,
}

impl TableIdentifier {
    pub fn new(namespace: Namespace, name: impl Into<String>) -> Self {
        Self {
            namespace,
            name: name.into(),
        }
    }
}

impl fmt::Display for TableIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.namespace, self.name)
        }
    }
}

/// A single column in a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NestedField {
    pub id: i32,
    pub name: String,
    /// Primitive type name, e.g. `long` or `string`.
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub required: bool,
}

impl NestedField {
    pub fn required(id: i32, name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            field_type: field_type.into(),
            required: true,
        }
    }

    pub fn optional(id: i32, name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            field_type: field_type.into(),
            required: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Schema {
    #[serde(default)]
    pub schema_id: i32,
    pub fields: Vec<NestedField>,
}

impl Schema {
    pub fn new(schema_id: i32, fields: Vec<NestedField>) -> Self {
        Self { schema_id, fields }
    }

    /// Highest field id in the schema, 0 when it has no fields.
    pub fn highest_field_id(&self) -> i32 {
        self.fields.iter().map(|f| f.id).max().unwrap_or(0)
    }

    pub fn field_by_id(&self, id: i32) -> Option<&NestedField> {
        self.fields.iter().find(|f| f.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PartitionField {
    pub source_id: i32,
    pub field_id: i32,
    pub name: String,
    pub transform: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PartitionSpec {
    #[serde(default)]
    pub spec_id: i32,
    #[serde(default)]
    pub fields: Vec<PartitionField>,
}

impl PartitionSpec {
    pub fn unpartitioned() -> Self {
        Self::default()
    }
}

/// Everything the catalog knows about one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TableMetadata {
    pub format_version: u8,
    pub table_uuid: Uuid,
    pub location: String,
    pub last_updated_ms: u64,
    pub last_column_id: i32,
    pub schemas: Vec<Schema>,
    pub current_schema_id: i32,
    pub partition_specs: Vec<PartitionSpec>,
    pub default_spec_id: i32,
    #[serde(default)]
    pub properties: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_display() {
        assert_eq!(Namespace::of(["a", "b"]).to_string(), "a.b");
        assert_eq!(Namespace::empty().to_string(), "");
    }

    #[test]
    fn test_parent_of() {
        let parent = Namespace::of(["a"]);
        assert!(parent.is_parent_of(&Namespace::of(["a", "b"])));
        assert!(!parent.is_parent_of(&Namespace::of(["a", "b", "c"])));
        assert!(!parent.is_parent_of(&Namespace::of(["x", "b"])));
        assert!(Namespace::empty().is_parent_of(&parent));
    }

    #[test]
    fn test_table_identifier_display() {
        let ident = TableIdentifier::new(Namespace::of(["db"]), "orders");
        assert_eq!(ident.to_string(), "db.orders");
    }

    #[test]
    fn test_schema_highest_field_id() {
        let schema = Schema::new(
            0,
            vec![
                NestedField::required(1, "id", "long"),
                NestedField::optional(4, "data", "string"),
            ],
        );
        assert_eq!(schema.highest_field_id(), 4);
        assert_eq!(Schema::new(0, vec![]).highest_field_id(), 0);
    }
}
