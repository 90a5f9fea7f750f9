//! In-memory catalog backed by concurrent maps.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use crate::catalog::error::{CatalogError, CatalogResult};
use crate::catalog::types::{Namespace, TableIdentifier, TableMetadata};
use crate::catalog::{Catalog, SupportsNamespaces, TableCreation};

/// A catalog that keeps namespaces and tables in process memory.
///
/// Each map entry is updated under its shard lock, so commits to one table
/// are atomic with respect to each other. Creating a table holds its
/// namespace entry, so it cannot interleave with dropping that namespace.
#[derive(Debug)]
pub struct InMemoryCatalog {
    name: String,
    warehouse: String,
    namespaces: DashMap<Namespace, HashMap<String, String>>,
    tables: DashMap<TableIdentifier, TableMetadata>,
}

impl InMemoryCatalog {
    pub fn new(name: impl Into<String>, warehouse: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            warehouse: warehouse.into().trim_end_matches('/').to_string(),
            namespaces: DashMap::new(),
            tables: DashMap::new(),
        }
    }

    fn ensure_namespace(&self, namespace: &Namespace) -> CatalogResult<()> {
        if self.namespaces.contains_key(namespace) {
            Ok(())
        } else {
            Err(no_such_namespace(namespace))
        }
    }
}

fn no_such_namespace(namespace: &Namespace) -> CatalogError {
    CatalogError::NoSuchNamespace(format!("Namespace does not exist: {}", namespace))
}

fn no_such_table(ident: &TableIdentifier) -> CatalogError {
    CatalogError::NoSuchTable(format!("Table does not exist: {}", ident))
}

impl Catalog for InMemoryCatalog {
    fn name(&self) -> &str {
        &self.name
    }

    fn list_tables(&self, namespace: &Namespace) -> CatalogResult<Vec<TableIdentifier>> {
        self.ensure_namespace(namespace)?;
        let mut idents: Vec<_> = self
            .tables
            .iter()
            .filter(|t| t.key().namespace == *namespace)
            .map(|t| t.key().clone())
            .collect();
        idents.sort();
        Ok(idents)
    }

    fn create_table(
        &self,
        ident: &TableIdentifier,
        creation: TableCreation,
    ) -> CatalogResult<TableMetadata> {
        // Held until the table is inserted so a concurrent drop of the
        // namespace waits for it.
        let _namespace = self
            .namespaces
            .get(&ident.namespace)
            .ok_or_else(|| no_such_namespace(&ident.namespace))?;
        match self.tables.entry(ident.clone()) {
            Entry::Occupied(_) => Err(CatalogError::AlreadyExists(format!(
                "Table already exists: {}",
                ident
            ))),
            Entry::Vacant(slot) => {
                let location = creation
                    .location
                    .unwrap_or_else(|| self.default_table_location(ident));
                let metadata = TableMetadata::new_table(
                    creation.schema,
                    creation.spec,
                    location,
                    creation.properties,
                )?;
                slot.insert(metadata.clone());
                tracing::debug!(table = %ident, "Created table");
                Ok(metadata)
            }
        }
    }

    fn load_table(&self, ident: &TableIdentifier) -> CatalogResult<TableMetadata> {
        self.tables
            .get(ident)
            .map(|t| t.value().clone())
            .ok_or_else(|| no_such_table(ident))
    }

    fn drop_table(&self, ident: &TableIdentifier) -> CatalogResult<bool> {
        Ok(self.tables.remove(ident).is_some())
    }

    fn commit_table(
        &self,
        ident: &TableIdentifier,
        base: &TableMetadata,
        updated: TableMetadata,
    ) -> CatalogResult<TableMetadata> {
        let mut current = self.tables.get_mut(ident).ok_or_else(|| no_such_table(ident))?;
        if *current != *base {
            return Err(CatalogError::CommitFailed(format!(
                "Cannot commit {}: metadata changed since it was loaded",
                ident
            )));
        }
        *current = updated.clone();
        Ok(updated)
    }

    fn table_exists(&self, ident: &TableIdentifier) -> bool {
        self.tables.contains_key(ident)
    }

    fn default_table_location(&self, ident: &TableIdentifier) -> String {
        let mut location = self.warehouse.clone();
        for level in ident.namespace.levels() {
            location.push('/');
            location.push_str(level);
        }
        location.push('/');
        location.push_str(&ident.name);
        location
    }

    fn as_namespace_catalog(self: Arc<Self>) -> Option<Arc<dyn SupportsNamespaces>> {
        Some(self)
    }
}

impl SupportsNamespaces for InMemoryCatalog {
    fn create_namespace(
        &self,
        namespace: &Namespace,
        properties: HashMap<String, String>,
    ) -> CatalogResult<()> {
        if namespace.is_empty() {
            return Err(CatalogError::IllegalArgument(
                "Invalid namespace: empty".to_string(),
            ));
        }
        match self.namespaces.entry(namespace.clone()) {
            Entry::Occupied(_) => Err(CatalogError::AlreadyExists(format!(
                "Namespace already exists: {}",
                namespace
            ))),
            Entry::Vacant(slot) => {
                slot.insert(properties);
                tracing::debug!(namespace = %namespace, "Created namespace");
                Ok(())
            }
        }
    }

    fn list_namespaces(&self, parent: &Namespace) -> CatalogResult<Vec<Namespace>> {
        if !parent.is_empty() {
            self.ensure_namespace(parent)?;
        }
        // Intermediate levels are listed even if only a deeper namespace exists.
        let children: BTreeSet<Namespace> = self
            .namespaces
            .iter()
            .filter_map(|ns| {
                let levels = ns.key().levels();
                (levels.len() > parent.len())
                    .then(|| Namespace::of(levels[..=parent.len()].iter().cloned()))
            })
            .filter(|child| parent.is_parent_of(child))
            .collect();
        Ok(children.into_iter().collect())
    }

    fn load_namespace_metadata(
        &self,
        namespace: &Namespace,
    ) -> CatalogResult<HashMap<String, String>> {
        self.namespaces
            .get(namespace)
            .map(|ns| ns.value().clone())
            .ok_or_else(|| no_such_namespace(namespace))
    }

    fn drop_namespace(&self, namespace: &Namespace) -> CatalogResult<bool> {
        // The entry lock excludes `create_table` in this namespace until the
        // emptiness check and the removal are both done.
        let Entry::Occupied(entry) = self.namespaces.entry(namespace.clone()) else {
            return Ok(false);
        };
        let tables = self
            .tables
            .iter()
            .filter(|t| t.key().namespace == *namespace)
            .count();
        if tables > 0 {
            return Err(CatalogError::NamespaceNotEmpty(format!(
                "Namespace {} is not empty. {} tables exist.",
                namespace, tables
            )));
        }
        entry.remove();
        tracing::debug!(namespace = %namespace, "Dropped namespace");
        Ok(true)
    }

    fn set_properties(
        &self,
        namespace: &Namespace,
        properties: HashMap<String, String>,
    ) -> CatalogResult<bool> {
        let mut current = self
            .namespaces
            .get_mut(namespace)
            .ok_or_else(|| no_such_namespace(namespace))?;
        current.extend(properties);
        Ok(true)
    }

    fn remove_properties(
        &self,
        namespace: &Namespace,
        keys: &HashSet<String>,
    ) -> CatalogResult<bool> {
        let mut current = self
            .namespaces
            .get_mut(namespace)
            .ok_or_else(|| no_such_namespace(namespace))?;
        let before = current.len();
        current.retain(|k, _| !keys.contains(k));
        Ok(current.len() != before)
    }
}

/// Exposes only the table operations of a catalog, hiding any namespace
/// capability it has.
#[derive(Debug)]
pub struct TablesOnly<C>(pub Arc<C>);

impl<C: Catalog> Catalog for TablesOnly<C> {
    fn name(&self) -> &str {
        self.0.name()
    }

    fn list_tables(&self, namespace: &Namespace) -> CatalogResult<Vec<TableIdentifier>> {
        self.0.list_tables(namespace)
    }

    fn create_table(
        &self,
        ident: &TableIdentifier,
        creation: TableCreation,
    ) -> CatalogResult<TableMetadata> {
        self.0.create_table(ident, creation)
    }

    fn load_table(&self, ident: &TableIdentifier) -> CatalogResult<TableMetadata> {
        self.0.load_table(ident)
    }

    fn drop_table(&self, ident: &TableIdentifier) -> CatalogResult<bool> {
        self.0.drop_table(ident)
    }

    fn commit_table(
        &self,
        ident: &TableIdentifier,
        base: &TableMetadata,
        updated: TableMetadata,
    ) -> CatalogResult<TableMetadata> {
        self.0.commit_table(ident, base, updated)
    }

    fn default_table_location(&self, ident: &TableIdentifier) -> String {
        self.0.default_table_location(ident)
    }
}
