//! Metrics collection.
//!
//! # Metrics
//! - `catalog_requests_total` (counter): requests by route, method, status
//! - `catalog_request_duration_seconds` (histogram): dispatch latency by route
//!
//! # Design Decisions
//! - Unmatched requests use the route label `none`
//! - Labels are static strings plus the numeric status

use std::time::Instant;

use crate::routing::HttpMethod;

/// Record one completed request.
pub fn record_request(route: &'static str, method: HttpMethod, status: u16, start: Instant) {
    ::metrics::counter!(
        "catalog_requests_total",
        "route" => route,
        "method" => method.as_str(),
        "status" => status.to_string()
    )
    .increment(1);

    ::metrics::histogram!("catalog_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}
