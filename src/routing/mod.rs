//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (verb, path)
//!     → router.rs (declared catalog routes, in order)
//!     → matcher.rs (verb, segment count, literal segments)
//!     → Return: MatchResult { route, variables } or None
//!
//! Route compilation (first lookup):
//!     Route::ALL (verb + pattern)
//!     → split patterns into literal / variable segments
//!     → freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled once, immutable at runtime
//! - No regex; positional segment comparison only
//! - Deterministic: same input always matches same route
//! - First match wins (declaration order)

pub mod matcher;
pub mod router;

pub use matcher::{HttpMethod, MatchResult, RouteDefinition, RouteError, RouteTable, Segment};
pub use router::Route;
