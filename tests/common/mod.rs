//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use rest_catalog::catalog::types::{Namespace, NestedField, Schema, TableIdentifier, TableMetadata};
use rest_catalog::catalog::{
    Catalog, CatalogError, CatalogResult, InMemoryCatalog, SupportsNamespaces, TableCreation,
};
use rest_catalog::rest::{CreateTableRequest, ErrorResponse, ErrorTranslator, RestCatalogAdapter};

/// A catalog whose every operation raises the failure built by `raise`.
pub struct FailingCatalog {
    raise: Box<dyn Fn() -> CatalogError + Send + Sync>,
}

impl FailingCatalog {
    pub fn new(raise: impl Fn() -> CatalogError + Send + Sync + 'static) -> Self {
        Self {
            raise: Box::new(raise),
        }
    }

    fn fail<T>(&self) -> CatalogResult<T> {
        Err((self.raise)())
    }
}

impl Catalog for FailingCatalog {
    fn name(&self) -> &str {
        "failing"
    }

    fn list_tables(&self, _: &Namespace) -> CatalogResult<Vec<TableIdentifier>> {
        self.fail()
    }

    fn create_table(&self, _: &TableIdentifier, _: TableCreation) -> CatalogResult<TableMetadata> {
        self.fail()
    }

    fn load_table(&self, _: &TableIdentifier) -> CatalogResult<TableMetadata> {
        self.fail()
    }

    fn drop_table(&self, _: &TableIdentifier) -> CatalogResult<bool> {
        self.fail()
    }

    fn commit_table(
        &self,
        _: &TableIdentifier,
        _: &TableMetadata,
        _: TableMetadata,
    ) -> CatalogResult<TableMetadata> {
        self.fail()
    }

    fn default_table_location(&self, ident: &TableIdentifier) -> String {
        format!("file:/failing/{}", ident)
    }

    fn as_namespace_catalog(self: Arc<Self>) -> Option<Arc<dyn SupportsNamespaces>> {
        Some(self)
    }
}

impl SupportsNamespaces for FailingCatalog {
    fn create_namespace(&self, _: &Namespace, _: HashMap<String, String>) -> CatalogResult<()> {
        self.fail()
    }

    fn list_namespaces(&self, _: &Namespace) -> CatalogResult<Vec<Namespace>> {
        self.fail()
    }

    fn load_namespace_metadata(&self, _: &Namespace) -> CatalogResult<HashMap<String, String>> {
        self.fail()
    }

    fn drop_namespace(&self, _: &Namespace) -> CatalogResult<bool> {
        self.fail()
    }

    fn set_properties(&self, _: &Namespace, _: HashMap<String, String>) -> CatalogResult<bool> {
        self.fail()
    }

    fn remove_properties(&self, _: &Namespace, _: &HashSet<String>) -> CatalogResult<bool> {
        self.fail()
    }
}

/// An adapter over an in-memory catalog holding the given namespaces.
pub fn memory_adapter(namespaces: &[&[&str]]) -> RestCatalogAdapter {
    let catalog = Arc::new(InMemoryCatalog::new("test", "file:/warehouse"));
    for levels in namespaces {
        catalog
            .create_namespace(&Namespace::of(levels.iter().copied()), HashMap::new())
            .unwrap();
    }
    RestCatalogAdapter::new(catalog).with_translator(ErrorTranslator::new(false))
}

pub fn failing_adapter(
    raise: impl Fn() -> CatalogError + Send + Sync + 'static,
) -> RestCatalogAdapter {
    RestCatalogAdapter::new(Arc::new(FailingCatalog::new(raise)))
}

pub fn create_table_request(name: &str) -> CreateTableRequest {
    CreateTableRequest {
        name: name.to_string(),
        location: None,
        schema: Schema::new(
            0,
            vec![
                NestedField::required(1, "id", "long"),
                NestedField::optional(2, "amount", "decimal(10,2)"),
            ],
        ),
        partition_spec: None,
        stage_create: false,
        properties: HashMap::new(),
    }
}

/// Error callback that lets `execute` return the payload.
pub fn keep_payload(_: &ErrorResponse) -> CatalogResult<()> {
    Ok(())
}

pub fn payload(err: CatalogError) -> ErrorResponse {
    match err {
        CatalogError::Rest(payload) => *payload,
        other => panic!("expected an error payload, got {:?}", other),
    }
}
