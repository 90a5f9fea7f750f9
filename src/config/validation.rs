//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (known log level, non-empty warehouse)
//! - Reject blank keys and namespace levels
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AdapterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::AdapterConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a config file.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("observability.log_level: unknown level {0:?}")]
    UnknownLogLevel(String),

    #[error("catalog.warehouse: must not be empty")]
    EmptyWarehouse,

    #[error("catalog.{section}: blank property key")]
    BlankKey { section: &'static str },

    #[error("catalog.namespaces: invalid namespace {0:?}")]
    InvalidNamespace(String),
}

pub fn validate_config(config: &AdapterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if config.catalog.warehouse.trim().is_empty() {
        errors.push(ValidationError::EmptyWarehouse);
    }

    for (section, properties) in [
        ("defaults", &config.catalog.defaults),
        ("overrides", &config.catalog.overrides),
    ] {
        if properties.keys().any(|k| k.trim().is_empty()) {
            errors.push(ValidationError::BlankKey { section });
        }
    }

    for namespace in &config.catalog.namespaces {
        if namespace.split('.').any(|level| level.trim().is_empty()) {
            errors.push(ValidationError::InvalidNamespace(namespace.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
