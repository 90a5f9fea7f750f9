//! REST catalog request router and dispatcher.
//!
//! Maps `(verb, path, body)` onto the declared `v1/` catalog routes, invokes
//! the matching catalog operation and turns failures into status-coded
//! error payloads.

pub mod catalog;
pub mod config;
pub mod observability;
pub mod rest;
pub mod routing;

pub use catalog::{Catalog, CatalogError, CatalogResult, InMemoryCatalog, SupportsNamespaces};
pub use config::AdapterConfig;
pub use rest::{ErrorResponse, RestCatalogAdapter};
pub use routing::{HttpMethod, Route};
