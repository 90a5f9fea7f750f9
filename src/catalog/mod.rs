//! Catalog subsystem: the business operations the REST layer dispatches to.
//!
//! # Data Flow
//! ```text
//! RestCatalogAdapter (route matched, identifiers decoded)
//!     → rest::handlers (one function per route)
//!     → Catalog / SupportsNamespaces (trait objects)
//!     → InMemoryCatalog or any other implementation
//!     → typed result or CatalogError
//! ```
//!
//! # Design Decisions
//! - Namespace management is an optional capability, probed once through
//!   [`Catalog::as_namespace_catalog`] when the adapter is built
//! - Implementations own their concurrency; the REST layer neither locks
//!   nor serializes calls into them
//! - Commits compare against the base the caller read, so a lost race
//!   surfaces as `CommitFailed` instead of a silent overwrite

pub mod error;
pub mod memory;
pub mod metadata;
pub mod types;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

pub use error::{CatalogError, CatalogResult};
pub use memory::{InMemoryCatalog, TablesOnly};
pub use metadata::{MetadataBuilder, MetadataUpdate, UpdateRequirement};
pub use types::{Namespace, NestedField, PartitionSpec, Schema, TableIdentifier, TableMetadata};

/// Inputs for creating a table.
#[derive(Debug, Clone)]
pub struct TableCreation {
    pub schema: Schema,
    pub spec: PartitionSpec,
    /// Falls back to [`Catalog::default_table_location`] when unset.
    pub location: Option<String>,
    pub properties: HashMap<String, String>,
}

/// Table operations every catalog supports.
pub trait Catalog: Send + Sync {
    fn name(&self) -> &str;

    fn list_tables(&self, namespace: &Namespace) -> CatalogResult<Vec<TableIdentifier>>;

    fn create_table(
        &self,
        ident: &TableIdentifier,
        creation: TableCreation,
    ) -> CatalogResult<TableMetadata>;

    fn load_table(&self, ident: &TableIdentifier) -> CatalogResult<TableMetadata>;

    /// Returns false if the table did not exist.
    fn drop_table(&self, ident: &TableIdentifier) -> CatalogResult<bool>;

    /// Replace `base` with `updated`. Fails with `CommitFailed` when the
    /// stored metadata is no longer `base`.
    fn commit_table(
        &self,
        ident: &TableIdentifier,
        base: &TableMetadata,
        updated: TableMetadata,
    ) -> CatalogResult<TableMetadata>;

    fn table_exists(&self, ident: &TableIdentifier) -> bool {
        self.load_table(ident).is_ok()
    }

    fn default_table_location(&self, ident: &TableIdentifier) -> String;

    /// Namespace capability probe.
    fn as_namespace_catalog(self: Arc<Self>) -> Option<Arc<dyn SupportsNamespaces>> {
        None
    }
}

/// Optional namespace management capability.
pub trait SupportsNamespaces: Send + Sync {
    fn create_namespace(
        &self,
        namespace: &Namespace,
        properties: HashMap<String, String>,
    ) -> CatalogResult<()>;

    /// Direct children of `parent`; the empty namespace lists top-level ones.
    fn list_namespaces(&self, parent: &Namespace) -> CatalogResult<Vec<Namespace>>;

    fn load_namespace_metadata(&self, namespace: &Namespace)
        -> CatalogResult<HashMap<String, String>>;

    /// Returns false if the namespace did not exist.
    fn drop_namespace(&self, namespace: &Namespace) -> CatalogResult<bool>;

    fn set_properties(
        &self,
        namespace: &Namespace,
        properties: HashMap<String, String>,
    ) -> CatalogResult<bool>;

    fn remove_properties(&self, namespace: &Namespace, keys: &HashSet<String>)
        -> CatalogResult<bool>;

    fn namespace_exists(&self, namespace: &Namespace) -> bool {
        self.load_namespace_metadata(namespace).is_ok()
    }
}
