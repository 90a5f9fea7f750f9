//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! RestCatalogAdapter::execute produces:
//!     → tracing events (route matched, no route, translated failures)
//!     → metrics.rs (request counter and latency histogram)
//!
//! Consumers:
//!     → logging.rs installs the fmt subscriber (stderr)
//!     → any `metrics` recorder the embedding process installs
//! ```
//!
//! # Design Decisions
//! - Structured fields (route, code, error_type) rather than formatted text
//! - Metrics go through the `metrics` facade; without a recorder they are no-ops
//! - Logging setup is explicit; the library never installs a subscriber itself

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
