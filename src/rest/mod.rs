//! REST protocol layer.
//!
//! # Data Flow
//! ```text
//! (verb, path, body?, expected shape, error handler)
//!     → adapter.rs: routing::Route::from_request
//!         → no match: ErrorResponse 400 BadRequestException
//!     → adapter.rs: handle_request
//!         → util.rs (decode namespace / table segments)
//!         → shapes.rs (assert request shape)
//!         → handlers.rs → catalog
//!         → shapes.rs (assert response shape)
//!     → failure: error.rs (ErrorTranslator) → ErrorResponse
//!     → error handler (error_handlers.rs or caller-supplied)
//! ```
//!
//! # Design Decisions
//! - Bodies and results are tagged enums; shape guards reassert the static
//!   type each route needs
//! - The status mapping is global, not per route
//! - Translated failures carry a stack; the no-route payload does not

pub mod adapter;
pub mod error;
pub mod error_handlers;
pub mod handlers;
pub mod requests;
pub mod responses;
pub mod shapes;
pub mod util;

pub use adapter::RestCatalogAdapter;
pub use error::{status_code, ErrorResponse, ErrorTranslator};
pub use error_handlers::default_error_handler;
pub use requests::{
    CreateNamespaceRequest, CreateTableRequest, RestRequest, UpdateNamespacePropertiesRequest,
    UpdateTableRequest,
};
pub use responses::{
    ConfigResponse, CreateNamespaceResponse, GetNamespaceResponse, ListNamespacesResponse,
    ListTablesResponse, LoadTableResponse, RestResponse, UpdateNamespacePropertiesResponse,
};
pub use shapes::{cast_request, cast_response, RequestShape, ResponseShape};
