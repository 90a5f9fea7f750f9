//! REST catalog request runner.
//!
//! Serves an in-memory catalog through the REST adapter and replays
//! requests read from a script or stdin, one per line:
//!
//! ```text
//! POST v1/namespaces {"namespace": ["accounting"]}
//! GET v1/namespaces/accounting
//! DELETE v1/namespaces/accounting/tables/t
//! ```
//!
//! Each result is printed to stdout as JSON. Failures print the error
//! payload envelope instead. Blank lines and lines starting with `#` are
//! skipped.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use rest_catalog::catalog::memory::{InMemoryCatalog, TablesOnly};
use rest_catalog::catalog::types::Namespace;
use rest_catalog::catalog::{Catalog, SupportsNamespaces};
use rest_catalog::config::{load_config, AdapterConfig};
use rest_catalog::observability::init_logging;
use rest_catalog::rest::{ErrorResponse, RestCatalogAdapter, RestRequest, RestResponse};
use rest_catalog::routing::{HttpMethod, Route};

#[derive(Parser)]
#[command(name = "rest-catalog")]
#[command(about = "Replay REST catalog requests against an in-memory catalog", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Requests to replay; reads stdin when omitted
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Serve only table routes, as a catalog without namespace support would
    #[arg(long)]
    tables_only: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AdapterConfig::default(),
    };
    init_logging(&config.observability)?;

    tracing::info!(
        catalog = %config.catalog.name,
        warehouse = %config.catalog.warehouse,
        tables_only = cli.tables_only,
        "Configuration loaded"
    );

    let memory = Arc::new(InMemoryCatalog::new(
        config.catalog.name.clone(),
        config.catalog.warehouse.clone(),
    ));
    for dotted in &config.catalog.namespaces {
        let namespace = Namespace::of(dotted.split('.'));
        if !memory.namespace_exists(&namespace) {
            memory.create_namespace(&namespace, Default::default())?;
        }
    }

    let catalog: Arc<dyn Catalog> = if cli.tables_only {
        Arc::new(TablesOnly(memory))
    } else {
        memory
    };
    let adapter = RestCatalogAdapter::from_config(catalog, &config);

    let input: Box<dyn BufRead> = match &cli.script {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (number, line) in input.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let printed = match run_line(&adapter, line) {
            Ok(Some(response)) => serde_json::to_string_pretty(&response)?,
            Ok(None) => "null".to_string(),
            Err(LineError::Rejected(error)) => error.to_json()?,
            Err(LineError::Malformed(reason)) => {
                tracing::warn!(line = number + 1, reason = %reason, "Skipping malformed request");
                continue;
            }
        };
        writeln!(out, "{}", printed)?;
    }

    Ok(())
}

enum LineError {
    Rejected(ErrorResponse),
    Malformed(String),
}

fn run_line(adapter: &RestCatalogAdapter, line: &str) -> Result<Option<RestResponse>, LineError> {
    let mut parts = line.splitn(3, char::is_whitespace);
    let method: HttpMethod = parts
        .next()
        .unwrap_or_default()
        .parse()
        .map_err(|e: rest_catalog::routing::RouteError| LineError::Malformed(e.to_string()))?;
    let path = parts
        .next()
        .ok_or_else(|| LineError::Malformed("missing path".to_string()))?;
    let json = parts.next().map(str::trim).filter(|json| !json.is_empty());

    // The body shape depends on the route, so match once here to pick it.
    let body = match (Route::from_request(method, path), json) {
        (Some(found), Some(json)) => RestRequest::from_json(found.route, json)
            .map_err(|e| LineError::Malformed(format!("invalid body: {}", e)))?,
        _ => None,
    };

    let mut rejected = None;
    let result = adapter.execute::<Option<RestResponse>, _>(method, path, body, |error| {
        rejected = Some(error.clone());
        Ok(())
    });
    match (result, rejected) {
        (Ok(response), _) => Ok(response),
        (Err(_), Some(error)) => Err(LineError::Rejected(error)),
        (Err(err), None) => Err(LineError::Malformed(err.to_string())),
    }
}

