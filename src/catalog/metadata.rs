//! Table metadata construction and commit changes.
//!
//! # Commit Flow
//! ```text
//! base metadata (read from catalog)
//!     → UpdateRequirement::validate (each must hold, else CommitFailed)
//!     → MetadataBuilder::apply (each MetadataUpdate in order)
//!     → MetadataBuilder::build (bumps last-updated-ms if anything changed)
//!     → Catalog::commit_table(base, new)
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::catalog::error::{CatalogError, CatalogResult};
use crate::catalog::types::{PartitionSpec, Schema, TableMetadata};

const FORMAT_VERSION: u8 = 2;

/// `SetCurrentSchema` id meaning "the schema added earlier in this commit".
pub const LAST_ADDED: i32 = -1;

pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

impl TableMetadata {
    /// Build metadata for a table that does not exist yet.
    ///
    /// The schema id and the spec id are reset to 0. Every partition field
    /// must reference a column of the schema.
    pub fn new_table(
        schema: Schema,
        spec: PartitionSpec,
        location: String,
        properties: HashMap<String, String>,
    ) -> CatalogResult<Self> {
        for field in &spec.fields {
            if schema.field_by_id(field.source_id).is_none() {
                return Err(CatalogError::Validation(format!(
                    "Cannot find source column for partition field: {}",
                    field.name
                )));
            }
        }

        let schema = Schema {
            schema_id: 0,
            ..schema
        };
        let spec = PartitionSpec { spec_id: 0, ..spec };

        Ok(Self {
            format_version: FORMAT_VERSION,
            table_uuid: Uuid::new_v4(),
            location,
            last_updated_ms: now_millis(),
            last_column_id: schema.highest_field_id(),
            schemas: vec![schema],
            current_schema_id: 0,
            partition_specs: vec![spec],
            default_spec_id: 0,
            properties,
        })
    }
}

/// A precondition a commit asserts against the current table state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "kebab-case")]
pub enum UpdateRequirement {
    /// The table must not exist yet.
    AssertCreate,
    AssertTableUuid { uuid: Uuid },
    AssertCurrentSchemaId { current_schema_id: i32 },
    AssertDefaultSpecId { default_spec_id: i32 },
}

impl UpdateRequirement {
    pub fn validate(&self, base: Option<&TableMetadata>) -> CatalogResult<()> {
        let base = match (self, base) {
            (Self::AssertCreate, Some(_)) => {
                return Err(failed("table already exists".to_string()));
            }
            (Self::AssertCreate, None) => return Ok(()),
            (_, None) => return Err(failed("current table metadata is missing".to_string())),
            (_, Some(base)) => base,
        };

        match self {
            Self::AssertCreate => Ok(()),
            Self::AssertTableUuid { uuid } if *uuid != base.table_uuid => Err(failed(format!(
                "UUID does not match: expected {} != {}",
                base.table_uuid, uuid
            ))),
            Self::AssertCurrentSchemaId { current_schema_id }
                if *current_schema_id != base.current_schema_id =>
            {
                Err(failed(format!(
                    "current schema changed: expected id {} != {}",
                    current_schema_id, base.current_schema_id
                )))
            }
            Self::AssertDefaultSpecId { default_spec_id }
                if *default_spec_id != base.default_spec_id =>
            {
                Err(failed(format!(
                    "default partition spec changed: expected id {} != {}",
                    default_spec_id, base.default_spec_id
                )))
            }
            _ => Ok(()),
        }
    }
}

fn failed(detail: String) -> CatalogError {
    CatalogError::CommitFailed(format!("Requirement failed: {}", detail))
}

/// A single change to table metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case", rename_all_fields = "kebab-case")]
pub enum MetadataUpdate {
    SetProperties { updates: HashMap<String, String> },
    RemoveProperties { removals: Vec<String> },
    SetLocation { location: String },
    AddSchema { schema: Schema },
    /// Use [`LAST_ADDED`] to select the schema added in the same commit.
    SetCurrentSchema { schema_id: i32 },
}

/// Applies [`MetadataUpdate`]s on top of a base version.
#[derive(Debug)]
pub struct MetadataBuilder {
    metadata: TableMetadata,
    last_added_schema_id: Option<i32>,
    changed: bool,
}

impl MetadataBuilder {
    pub fn from(base: &TableMetadata) -> Self {
        Self {
            metadata: base.clone(),
            last_added_schema_id: None,
            changed: false,
        }
    }

    pub fn apply(&mut self, update: &MetadataUpdate) -> CatalogResult<()> {
        match update {
            MetadataUpdate::SetProperties { updates } => {
                self.metadata
                    .properties
                    .extend(updates.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
            MetadataUpdate::RemoveProperties { removals } => {
                for key in removals {
                    self.metadata.properties.remove(key);
                }
            }
            MetadataUpdate::SetLocation { location } => {
                if location.trim().is_empty() {
                    return Err(CatalogError::IllegalArgument(
                        "Invalid table location: empty".to_string(),
                    ));
                }
                self.metadata.location = location.clone();
            }
            MetadataUpdate::AddSchema { schema } => {
                let id = self.add_schema(schema);
                self.last_added_schema_id = Some(id);
            }
            MetadataUpdate::SetCurrentSchema { schema_id } => {
                let id = if *schema_id == LAST_ADDED {
                    self.last_added_schema_id.ok_or_else(|| {
                        CatalogError::IllegalArgument(
                            "Cannot set last added schema: no schema has been added".to_string(),
                        )
                    })?
                } else {
                    *schema_id
                };
                if !self.metadata.schemas.iter().any(|s| s.schema_id == id) {
                    return Err(CatalogError::IllegalArgument(format!(
                        "Cannot set current schema to unknown schema: {}",
                        id
                    )));
                }
                self.metadata.current_schema_id = id;
            }
        }
        self.changed = true;
        Ok(())
    }

    /// Returns the id of an identical existing schema, or registers a new one.
    fn add_schema(&mut self, schema: &Schema) -> i32 {
        if let Some(existing) = self
            .metadata
            .schemas
            .iter()
            .find(|s| s.fields == schema.fields)
        {
            return existing.schema_id;
        }

        let id = self
            .metadata
            .schemas
            .iter()
            .map(|s| s.schema_id)
            .max()
            .map_or(0, |max| max + 1);
        self.metadata.last_column_id = self.metadata.last_column_id.max(schema.highest_field_id());
        self.metadata.schemas.push(Schema {
            schema_id: id,
            fields: schema.fields.clone(),
        });
        id
    }

    pub fn build(mut self) -> TableMetadata {
        if self.changed {
            self.metadata.last_updated_ms = now_millis().max(self.metadata.last_updated_ms + 1);
        }
        self.metadata
    }
}
