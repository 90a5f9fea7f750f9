//! Response bodies produced by the non-void routes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::catalog::types::{Namespace, TableIdentifier, TableMetadata};

/// Any response body, tagged by shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RestResponse {
    Config(ConfigResponse),
    ListNamespaces(ListNamespacesResponse),
    CreateNamespace(CreateNamespaceResponse),
    GetNamespace(GetNamespaceResponse),
    UpdateNamespaceProperties(UpdateNamespacePropertiesResponse),
    ListTables(ListTablesResponse),
    LoadTable(LoadTableResponse),
}

/// Client configuration served by `GET v1/config`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigResponse {
    /// Applied before client-side properties.
    #[serde(default)]
    pub defaults: HashMap<String, String>,
    /// Applied after client-side properties.
    #[serde(default)]
    pub overrides: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListNamespacesResponse {
    pub namespaces: Vec<Namespace>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateNamespaceResponse {
    pub namespace: Namespace,
    #[serde(default)]
    pub properties: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetNamespaceResponse {
    pub namespace: Namespace,
    #[serde(default)]
    pub properties: HashMap<String, String>,
}

/// Outcome of a property update. Each list is sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateNamespacePropertiesResponse {
    pub updated: Vec<String>,
    pub removed: Vec<String>,
    /// Removals that named keys the namespace did not have.
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListTablesResponse {
    pub identifiers: Vec<TableIdentifier>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LoadTableResponse {
    /// Unset for staged tables, which have no committed metadata yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_location: Option<String>,
    pub metadata: TableMetadata,
    #[serde(default)]
    pub config: HashMap<String, String>,
}

macro_rules! impl_from_response {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for RestResponse {
                fn from(response: $ty) -> Self {
                    Self::$variant(response)
                }
            }
        )*
    };
}

impl_from_response! {
    ConfigResponse => Config,
    ListNamespacesResponse => ListNamespaces,
    CreateNamespaceResponse => CreateNamespace,
    GetNamespaceResponse => GetNamespace,
    UpdateNamespacePropertiesResponse => UpdateNamespaceProperties,
    ListTablesResponse => ListTables,
    LoadTableResponse => LoadTable,
}
