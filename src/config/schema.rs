//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the adapter.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct AdapterConfig {
    /// Logging and error diagnostics.
    pub observability: ObservabilityConfig,

    /// Backing catalog and the client config it advertises.
    pub catalog: CatalogConfig,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error), used when `RUST_LOG`
    /// is unset.
    pub log_level: String,

    /// Attach a captured backtrace to every error payload's stack.
    pub capture_backtrace: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            capture_backtrace: true,
        }
    }
}

/// Catalog configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Catalog name for logging.
    pub name: String,

    /// Root location new tables are placed under.
    pub warehouse: String,

    /// Namespaces created at startup, dotted (e.g. "accounting.tax").
    pub namespaces: Vec<String>,

    /// Served by `GET v1/config`; applied before client properties.
    pub defaults: HashMap<String, String>,

    /// Served by `GET v1/config`; applied after client properties.
    pub overrides: HashMap<String, String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            name: "in-memory".to_string(),
            warehouse: "file:/tmp/warehouse".to_string(),
            namespaces: Vec::new(),
            defaults: HashMap::new(),
            overrides: HashMap::new(),
        }
    }
}
