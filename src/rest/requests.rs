//! Request bodies accepted by the body-carrying routes.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

use crate::catalog::error::{CatalogError, CatalogResult};
use crate::catalog::metadata::{MetadataUpdate, UpdateRequirement};
use crate::catalog::types::{Namespace, PartitionSpec, Schema};
use crate::routing::Route;

/// Any request body, tagged by shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestRequest {
    CreateNamespace(CreateNamespaceRequest),
    UpdateNamespaceProperties(UpdateNamespacePropertiesRequest),
    CreateTable(CreateTableRequest),
    UpdateTable(UpdateTableRequest),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CreateNamespaceRequest {
    pub namespace: Namespace,
    #[serde(default)]
    pub properties: HashMap<String, String>,
}

impl CreateNamespaceRequest {
    pub fn validate(&self) -> CatalogResult<()> {
        if self.namespace.is_empty() {
            return Err(CatalogError::IllegalArgument(
                "Invalid namespace: empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UpdateNamespacePropertiesRequest {
    #[serde(default)]
    pub removals: Vec<String>,
    #[serde(default)]
    pub updates: HashMap<String, String>,
}

impl UpdateNamespacePropertiesRequest {
    /// A key may not be both set and removed.
    pub fn validate(&self) -> CatalogResult<()> {
        let both: BTreeSet<&String> = self
            .removals
            .iter()
            .filter(|key| self.updates.contains_key(*key))
            .collect();
        if !both.is_empty() {
            return Err(CatalogError::IllegalArgument(format!(
                "Invalid namespace properties update: cannot simultaneously set and remove keys: {:?}",
                both
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CreateTableRequest {
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    pub schema: Schema,
    #[serde(default)]
    pub partition_spec: Option<PartitionSpec>,
    /// Build the metadata without committing it.
    #[serde(default)]
    pub stage_create: bool,
    #[serde(default)]
    pub properties: HashMap<String, String>,
}

impl CreateTableRequest {
    pub fn validate(&self) -> CatalogResult<()> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::IllegalArgument(
                "Invalid table name: empty".to_string(),
            ));
        }

        let mut ids = HashSet::new();
        let mut names = HashSet::new();
        for field in &self.schema.fields {
            if !ids.insert(field.id) {
                return Err(CatalogError::IllegalArgument(format!(
                    "Invalid schema: duplicate field id {}",
                    field.id
                )));
            }
            if !names.insert(field.name.as_str()) {
                return Err(CatalogError::IllegalArgument(format!(
                    "Invalid schema: duplicate field name {}",
                    field.name
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UpdateTableRequest {
    #[serde(default)]
    pub requirements: Vec<UpdateRequirement>,
    #[serde(default)]
    pub updates: Vec<MetadataUpdate>,
}

impl RestRequest {
    /// Parse a JSON body into the shape `route` accepts.
    ///
    /// Routes without a body yield `None` and ignore `json`.
    pub fn from_json(route: Route, json: &str) -> serde_json::Result<Option<Self>> {
        let request = match route {
            Route::CreateNamespace => serde_json::from_str::<CreateNamespaceRequest>(json)?.into(),
            Route::UpdateNamespace => {
                serde_json::from_str::<UpdateNamespacePropertiesRequest>(json)?.into()
            }
            Route::CreateTable => serde_json::from_str::<CreateTableRequest>(json)?.into(),
            Route::UpdateTable => serde_json::from_str::<UpdateTableRequest>(json)?.into(),
            _ => return Ok(None),
        };
        Ok(Some(request))
    }
}

impl From<CreateNamespaceRequest> for RestRequest {
    fn from(request: CreateNamespaceRequest) -> Self {
        Self::CreateNamespace(request)
    }
}

impl From<UpdateNamespacePropertiesRequest> for RestRequest {
    fn from(request: UpdateNamespacePropertiesRequest) -> Self {
        Self::UpdateNamespaceProperties(request)
    }
}

impl From<CreateTableRequest> for RestRequest {
    fn from(request: CreateTableRequest) -> Self {
        Self::CreateTable(request)
    }
}

impl From<UpdateTableRequest> for RestRequest {
    fn from(request: UpdateTableRequest) -> Self {
        Self::UpdateTable(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::NestedField;

    #[test]
    fn test_update_properties_conflict() {
        let request = UpdateNamespacePropertiesRequest {
            removals: vec!["a".into(), "b".into()],
            updates: HashMap::from([("b".into(), "1".into())]),
        };
        let err = request.validate().unwrap_err();
        assert_eq!(err.kind(), "IllegalArgumentException");
        assert!(err.to_string().contains("\"b\""));
    }

    #[test]
    fn test_create_table_validation() {
        let mut request = CreateTableRequest {
            name: "orders".into(),
            location: None,
            schema: Schema::new(
                0,
                vec![
                    NestedField::required(1, "id", "long"),
                    NestedField::optional(2, "id", "string"),
                ],
            ),
            partition_spec: None,
            stage_create: false,
            properties: HashMap::new(),
        };
        assert!(request.validate().is_err());

        request.schema.fields[1].name = "data".into();
        assert!(request.validate().is_ok());

        request.name = " ".into();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_table_json() {
        let json = r#"{
            "name": "orders",
            "schema": {"fields": [{"id": 1, "name": "id", "type": "long", "required": true}]},
            "stage-create": true
        }"#;
        let request: CreateTableRequest = serde_json::from_str(json).unwrap();
        assert!(request.stage_create);
        assert_eq!(request.schema.fields[0].field_type, "long");
        assert!(request.partition_spec.is_none());
    }

    #[test]
    fn test_update_table_json() {
        let json = r#"{
            "requirements": [{"type": "assert-current-schema-id", "current-schema-id": 0}],
            "updates": [{"action": "set-properties", "updates": {"owner": "ops"}}]
        }"#;
        let request: UpdateTableRequest = serde_json::from_str(json).unwrap();
        assert_eq!(
            request.requirements,
            vec![UpdateRequirement::AssertCurrentSchemaId { current_schema_id: 0 }]
        );
        assert_eq!(request.updates.len(), 1);
    }

    #[test]
    fn test_from_json_by_route() {
        let parsed =
            RestRequest::from_json(Route::CreateNamespace, r#"{"namespace":["a","b"]}"#).unwrap();
        assert!(matches!(
            parsed,
            Some(RestRequest::CreateNamespace(ref r)) if r.namespace.len() == 2
        ));

        assert_eq!(RestRequest::from_json(Route::LoadTable, "ignored").unwrap(), None);
        assert!(RestRequest::from_json(Route::UpdateTable, "not json").is_err());
    }
}
