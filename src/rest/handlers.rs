//! One function per catalog route, turning typed requests into catalog calls.

use std::collections::{BTreeSet, HashSet};

use crate::catalog::error::{CatalogError, CatalogResult};
use crate::catalog::metadata::MetadataBuilder;
use crate::catalog::types::{Namespace, TableIdentifier, TableMetadata};
use crate::catalog::{Catalog, SupportsNamespaces, TableCreation};
use crate::rest::requests::{
    CreateNamespaceRequest, CreateTableRequest, UpdateNamespacePropertiesRequest,
    UpdateTableRequest,
};
use crate::rest::responses::{
    CreateNamespaceResponse, GetNamespaceResponse, ListNamespacesResponse, ListTablesResponse,
    LoadTableResponse, UpdateNamespacePropertiesResponse,
};

pub fn list_namespaces(
    catalog: &dyn SupportsNamespaces,
    parent: &Namespace,
) -> CatalogResult<ListNamespacesResponse> {
    Ok(ListNamespacesResponse {
        namespaces: catalog.list_namespaces(parent)?,
    })
}

pub fn create_namespace(
    catalog: &dyn SupportsNamespaces,
    request: CreateNamespaceRequest,
) -> CatalogResult<CreateNamespaceResponse> {
    request.validate()?;
    catalog.create_namespace(&request.namespace, request.properties.clone())?;
    Ok(CreateNamespaceResponse {
        namespace: request.namespace,
        properties: request.properties,
    })
}

pub fn load_namespace(
    catalog: &dyn SupportsNamespaces,
    namespace: Namespace,
) -> CatalogResult<GetNamespaceResponse> {
    let properties = catalog.load_namespace_metadata(&namespace)?;
    Ok(GetNamespaceResponse {
        namespace,
        properties,
    })
}

pub fn drop_namespace(
    catalog: &dyn SupportsNamespaces,
    namespace: &Namespace,
) -> CatalogResult<()> {
    if !catalog.drop_namespace(namespace)? {
        return Err(CatalogError::NoSuchNamespace(format!(
            "Namespace does not exist: {}",
            namespace
        )));
    }
    Ok(())
}

pub fn update_namespace_properties(
    catalog: &dyn SupportsNamespaces,
    namespace: &Namespace,
    request: UpdateNamespacePropertiesRequest,
) -> CatalogResult<UpdateNamespacePropertiesResponse> {
    request.validate()?;

    let start = catalog.load_namespace_metadata(namespace)?;
    let removals: HashSet<String> = request.removals.into_iter().collect();
    let (removed, missing): (BTreeSet<String>, BTreeSet<String>) = removals
        .iter()
        .cloned()
        .partition(|key| start.contains_key(key));
    let updated: BTreeSet<String> = request.updates.keys().cloned().collect();

    if !request.updates.is_empty() {
        catalog.set_properties(namespace, request.updates)?;
    }
    if !removals.is_empty() {
        catalog.remove_properties(namespace, &removals)?;
    }

    Ok(UpdateNamespacePropertiesResponse {
        updated: updated.into_iter().collect(),
        removed: removed.into_iter().collect(),
        missing: missing.into_iter().collect(),
    })
}

pub fn list_tables(
    catalog: &dyn Catalog,
    namespace: &Namespace,
) -> CatalogResult<ListTablesResponse> {
    Ok(ListTablesResponse {
        identifiers: catalog.list_tables(namespace)?,
    })
}

/// Build table metadata without committing it.
pub fn stage_table_create(
    catalog: &dyn Catalog,
    namespace: Namespace,
    request: CreateTableRequest,
) -> CatalogResult<LoadTableResponse> {
    let ident = TableIdentifier::new(namespace, request.name.clone());
    if catalog.table_exists(&ident) {
        return Err(CatalogError::AlreadyExists(format!(
            "Table already exists: {}",
            ident
        )));
    }

    let location = request
        .location
        .unwrap_or_else(|| catalog.default_table_location(&ident));
    let metadata = TableMetadata::new_table(
        request.schema,
        request.partition_spec.unwrap_or_default(),
        location,
        request.properties,
    )?;

    Ok(LoadTableResponse {
        metadata_location: None,
        metadata,
        config: Default::default(),
    })
}

pub fn create_table(
    catalog: &dyn Catalog,
    namespace: Namespace,
    request: CreateTableRequest,
) -> CatalogResult<LoadTableResponse> {
    let ident = TableIdentifier::new(namespace, request.name);
    let metadata = catalog.create_table(
        &ident,
        TableCreation {
            schema: request.schema,
            spec: request.partition_spec.unwrap_or_default(),
            location: request.location,
            properties: request.properties,
        },
    )?;
    Ok(load_response(metadata))
}

pub fn drop_table(catalog: &dyn Catalog, ident: &TableIdentifier) -> CatalogResult<()> {
    if !catalog.drop_table(ident)? {
        return Err(CatalogError::NoSuchTable(format!(
            "Table does not exist: {}",
            ident
        )));
    }
    Ok(())
}

pub fn load_table(
    catalog: &dyn Catalog,
    ident: &TableIdentifier,
) -> CatalogResult<LoadTableResponse> {
    Ok(load_response(catalog.load_table(ident)?))
}

/// Check the requirements against the current metadata, apply the updates
/// and commit against the metadata that was read.
pub fn update_table(
    catalog: &dyn Catalog,
    ident: &TableIdentifier,
    request: UpdateTableRequest,
) -> CatalogResult<LoadTableResponse> {
    let base = catalog.load_table(ident)?;
    for requirement in &request.requirements {
        requirement.validate(Some(&base))?;
    }

    let mut builder = MetadataBuilder::from(&base);
    for update in &request.updates {
        builder.apply(update)?;
    }
    let updated = builder.build();
    if updated == base {
        return Ok(load_response(base));
    }

    Ok(load_response(catalog.commit_table(ident, &base, updated)?))
}

fn load_response(metadata: TableMetadata) -> LoadTableResponse {
    LoadTableResponse {
        metadata_location: Some(format!(
            "{}/metadata/{}.metadata.json",
            metadata.location, metadata.last_updated_ms
        )),
        metadata,
        config: Default::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::metadata::{MetadataUpdate, UpdateRequirement};
    use crate::catalog::memory::InMemoryCatalog;
    use crate::catalog::types::{NestedField, Schema};
    use std::collections::HashMap;

    fn catalog() -> InMemoryCatalog {
        let catalog = InMemoryCatalog::new("test", "file:/warehouse");
        catalog
            .create_namespace(
                &Namespace::of(["db"]),
                HashMap::from([("owner".into(), "ops".into())]),
            )
            .unwrap();
        catalog
    }

    fn create_request(name: &str, stage_create: bool) -> CreateTableRequest {
        CreateTableRequest {
            name: name.into(),
            location: None,
            schema: Schema::new(0, vec![NestedField::required(1, "id", "long")]),
            partition_spec: None,
            stage_create,
            properties: HashMap::new(),
        }
    }

    #[test]
    fn test_update_namespace_properties_reports_missing() {
        let catalog = catalog();
        let ns = Namespace::of(["db"]);
        let response = update_namespace_properties(
            &catalog,
            &ns,
            UpdateNamespacePropertiesRequest {
                removals: vec!["owner".into(), "ghost".into()],
                updates: HashMap::from([("team".into(), "finance".into())]),
            },
        )
        .unwrap();

        assert_eq!(response.updated, vec!["team".to_string()]);
        assert_eq!(response.removed, vec!["owner".to_string()]);
        assert_eq!(response.missing, vec!["ghost".to_string()]);
        assert_eq!(
            catalog.load_namespace_metadata(&ns).unwrap(),
            HashMap::from([("team".to_string(), "finance".to_string())])
        );
    }

    #[test]
    fn test_drop_missing_namespace() {
        let err = drop_namespace(&catalog(), &Namespace::of(["nope"])).unwrap_err();
        assert_eq!(err.kind(), "NoSuchNamespaceException");
    }

    #[test]
    fn test_stage_create_does_not_commit() {
        let catalog = catalog();
        let ns = Namespace::of(["db"]);
        let response = stage_table_create(&catalog, ns.clone(), create_request("t", true)).unwrap();

        assert!(response.metadata_location.is_none());
        assert_eq!(response.metadata.location, "file:/warehouse/db/t");
        assert!(!catalog.table_exists(&TableIdentifier::new(ns, "t")));
    }

    #[test]
    fn test_stage_create_existing_table() {
        let catalog = catalog();
        let ns = Namespace::of(["db"]);
        create_table(&catalog, ns.clone(), create_request("t", false)).unwrap();
        let err = stage_table_create(&catalog, ns, create_request("t", true)).unwrap_err();
        assert_eq!(err.kind(), "AlreadyExistsException");
    }

    #[test]
    fn test_update_table_commits() {
        let catalog = catalog();
        let ns = Namespace::of(["db"]);
        let created = create_table(&catalog, ns.clone(), create_request("t", false)).unwrap();
        let ident = TableIdentifier::new(ns, "t");

        let response = update_table(
            &catalog,
            &ident,
            UpdateTableRequest {
                requirements: vec![UpdateRequirement::AssertTableUuid {
                    uuid: created.metadata.table_uuid,
                }],
                updates: vec![MetadataUpdate::SetLocation {
                    location: "file:/moved".into(),
                }],
            },
        )
        .unwrap();

        assert_eq!(response.metadata.location, "file:/moved");
        assert_eq!(catalog.load_table(&ident).unwrap().location, "file:/moved");
    }

    #[test]
    fn test_update_table_failed_requirement() {
        let catalog = catalog();
        let ns = Namespace::of(["db"]);
        create_table(&catalog, ns.clone(), create_request("t", false)).unwrap();

        let err = update_table(
            &catalog,
            &TableIdentifier::new(ns, "t"),
            UpdateTableRequest {
                requirements: vec![UpdateRequirement::AssertCreate],
                updates: vec![],
            },
        )
        .unwrap_err();
        assert_eq!(err.kind(), "CommitFailedException");
    }

    #[test]
    fn test_drop_missing_table() {
        let err = drop_table(
            &catalog(),
            &TableIdentifier::new(Namespace::of(["db"]), "missing"),
        )
        .unwrap_err();
        assert_eq!(err.kind(), "NoSuchTableException");
        assert_eq!(err.to_string(), "Table does not exist: db.missing");
    }
}
