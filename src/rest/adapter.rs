//! Translates REST-style requests into catalog calls.
//!
//! # Responsibilities
//! - Match the verb and path against the declared routes
//! - Decode path variables and assert body shapes
//! - Dispatch to the route's handler and assert the result shape
//! - Translate any failure into an [`ErrorResponse`] for the error handler
//!
//! # Design Decisions
//! - A namespace route on a catalog without namespace support is reported
//!   exactly like an unknown route
//! - Failures are caught once, in `execute`; nothing below it retries
//! - `execute` never returns success after an error payload was built

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use crate::catalog::error::{CatalogError, CatalogResult};
use crate::catalog::types::{Namespace, TableIdentifier};
use crate::catalog::{Catalog, SupportsNamespaces};
use crate::config::AdapterConfig;
use crate::observability::metrics;
use crate::rest::error::{ErrorResponse, ErrorTranslator};
use crate::rest::handlers;
use crate::rest::requests::{
    CreateNamespaceRequest, CreateTableRequest, RestRequest, UpdateNamespacePropertiesRequest,
    UpdateTableRequest,
};
use crate::rest::responses::{ConfigResponse, RestResponse};
use crate::rest::shapes::{cast_request, cast_response, ResponseShape};
use crate::rest::util::{decode_namespace, decode_string};
use crate::routing::{HttpMethod, Route};

/// Serves the catalog routes on top of a [`Catalog`].
#[derive(Clone)]
pub struct RestCatalogAdapter {
    catalog: Arc<dyn Catalog>,
    namespaces: Option<Arc<dyn SupportsNamespaces>>,
    client_config: ConfigResponse,
    translator: ErrorTranslator,
}

impl std::fmt::Debug for RestCatalogAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestCatalogAdapter")
            .field("catalog", &self.catalog.name())
            .field("supports_namespaces", &self.namespaces.is_some())
            .finish()
    }
}

impl RestCatalogAdapter {
    /// Create an adapter, probing the catalog for namespace support.
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        // Build the route table before the first request.
        let routes = Route::table().routes().len();
        let namespaces = catalog.clone().as_namespace_catalog();
        tracing::info!(
            catalog = %catalog.name(),
            routes,
            supports_namespaces = namespaces.is_some(),
            "REST catalog adapter ready"
        );
        Self {
            catalog,
            namespaces,
            client_config: ConfigResponse::default(),
            translator: ErrorTranslator::default(),
        }
    }

    /// Create an adapter with the client config and error settings of `config`.
    pub fn from_config(catalog: Arc<dyn Catalog>, config: &AdapterConfig) -> Self {
        Self::new(catalog)
            .with_client_config(ConfigResponse {
                defaults: config.catalog.defaults.clone(),
                overrides: config.catalog.overrides.clone(),
            })
            .with_translator(ErrorTranslator::new(config.observability.capture_backtrace))
    }

    /// Config served by `GET v1/config`.
    pub fn with_client_config(mut self, config: ConfigResponse) -> Self {
        self.client_config = config;
        self
    }

    pub fn with_translator(mut self, translator: ErrorTranslator) -> Self {
        self.translator = translator;
        self
    }

    pub fn supports_namespaces(&self) -> bool {
        self.namespaces.is_some()
    }

    /// Invoke the handler for a matched route.
    ///
    /// Returns `Ok(None)` when the route needs namespace support the catalog
    /// does not have.
    pub fn handle_request<T: ResponseShape>(
        &self,
        route: Route,
        vars: &HashMap<String, String>,
        body: Option<RestRequest>,
    ) -> CatalogResult<Option<T>> {
        let catalog = self.catalog.as_ref();
        let response: Option<RestResponse> = match (route, self.namespaces.as_deref()) {
            (Route::Config, _) => Some(self.client_config.clone().into()),

            (Route::ListNamespaces, Some(ns_catalog)) => {
                Some(handlers::list_namespaces(ns_catalog, &Namespace::empty())?.into())
            }

            (Route::CreateNamespace, Some(ns_catalog)) => {
                let request: CreateNamespaceRequest = cast_request(body)?;
                Some(handlers::create_namespace(ns_catalog, request)?.into())
            }

            (Route::LoadNamespace, Some(ns_catalog)) => {
                let namespace = namespace_from_vars(vars)?;
                Some(handlers::load_namespace(ns_catalog, namespace)?.into())
            }

            (Route::DropNamespace, Some(ns_catalog)) => {
                let namespace = namespace_from_vars(vars)?;
                expect_void::<T>()?;
                handlers::drop_namespace(ns_catalog, &namespace)?;
                None
            }

            (Route::UpdateNamespace, Some(ns_catalog)) => {
                let namespace = namespace_from_vars(vars)?;
                let request: UpdateNamespacePropertiesRequest = cast_request(body)?;
                Some(handlers::update_namespace_properties(ns_catalog, &namespace, request)?.into())
            }

            (
                Route::ListNamespaces
                | Route::CreateNamespace
                | Route::LoadNamespace
                | Route::DropNamespace
                | Route::UpdateNamespace,
                None,
            ) => return Ok(None),

            (Route::ListTables, _) => {
                let namespace = namespace_from_vars(vars)?;
                Some(handlers::list_tables(catalog, &namespace)?.into())
            }

            (Route::CreateTable, _) => {
                let namespace = namespace_from_vars(vars)?;
                let request: CreateTableRequest = cast_request(body)?;
                request.validate()?;
                if request.stage_create {
                    Some(handlers::stage_table_create(catalog, namespace, request)?.into())
                } else {
                    Some(handlers::create_table(catalog, namespace, request)?.into())
                }
            }

            (Route::LoadTable, _) => {
                let ident = ident_from_vars(vars)?;
                Some(handlers::load_table(catalog, &ident)?.into())
            }

            (Route::UpdateTable, _) => {
                let ident = ident_from_vars(vars)?;
                let request: UpdateTableRequest = cast_request(body)?;
                Some(handlers::update_table(catalog, &ident, request)?.into())
            }

            (Route::DropTable, _) => {
                let ident = ident_from_vars(vars)?;
                expect_void::<T>()?;
                handlers::drop_table(catalog, &ident)?;
                None
            }
        };

        cast_response(response).map(Some)
    }

    /// Route and dispatch one request.
    ///
    /// On failure `error_handler` receives the error payload. If it returns
    /// an error, that error is returned; otherwise the payload is returned
    /// wrapped in [`CatalogError::Rest`].
    pub fn execute<T, F>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<RestRequest>,
        error_handler: F,
    ) -> CatalogResult<T>
    where
        T: ResponseShape,
        F: FnOnce(&ErrorResponse) -> CatalogResult<()>,
    {
        let start = Instant::now();
        let matched = Route::from_request(method, path);

        let (route_label, outcome) = match matched {
            Some(found) => {
                tracing::debug!(
                    method = %method,
                    path = %path,
                    route = %found.route,
                    "Dispatching request"
                );
                (
                    found.route.name(),
                    self.handle_request::<T>(found.route, &found.variables, body),
                )
            }
            None => ("none", Ok(None)),
        };

        let error = match outcome {
            Ok(Some(response)) => {
                metrics::record_request(route_label, method, 200, start);
                return Ok(response);
            }
            Ok(None) => {
                tracing::warn!(method = %method, path = %path, "No route matched");
                ErrorResponse::new(
                    400,
                    "BadRequestException",
                    format!("No route for request: {} {}", method, path),
                )
            }
            Err(err) => {
                let error = self.translator.translate(&err);
                if error.code >= 500 {
                    tracing::error!(
                        route = route_label,
                        code = error.code,
                        error_type = %error.error_type,
                        error = %err,
                        "Request failed"
                    );
                } else {
                    tracing::warn!(
                        route = route_label,
                        code = error.code,
                        error_type = %error.error_type,
                        error = %err,
                        "Request rejected"
                    );
                }
                error
            }
        };

        metrics::record_request(route_label, method, error.code, start);
        error_handler(&error)?;

        Err(CatalogError::Rest(Box::new(error)))
    }

    pub fn get<T, F>(&self, path: &str, error_handler: F) -> CatalogResult<T>
    where
        T: ResponseShape,
        F: FnOnce(&ErrorResponse) -> CatalogResult<()>,
    {
        self.execute(HttpMethod::Get, path, None, error_handler)
    }

    pub fn head<F>(&self, path: &str, error_handler: F) -> CatalogResult<()>
    where
        F: FnOnce(&ErrorResponse) -> CatalogResult<()>,
    {
        self.execute(HttpMethod::Head, path, None, error_handler)
    }

    pub fn post<T, F>(
        &self,
        path: &str,
        body: impl Into<RestRequest>,
        error_handler: F,
    ) -> CatalogResult<T>
    where
        T: ResponseShape,
        F: FnOnce(&ErrorResponse) -> CatalogResult<()>,
    {
        self.execute(HttpMethod::Post, path, Some(body.into()), error_handler)
    }

    /// Every DELETE route is void.
    pub fn delete<F>(&self, path: &str, error_handler: F) -> CatalogResult<()>
    where
        F: FnOnce(&ErrorResponse) -> CatalogResult<()>,
    {
        self.execute(HttpMethod::Delete, path, None, error_handler)
    }
}

/// Reject a caller that expects a body from a void route before the route
/// mutates anything.
fn expect_void<T: ResponseShape>() -> CatalogResult<()> {
    cast_response::<T>(None).map(drop)
}

fn path_var<'a>(vars: &'a HashMap<String, String>, name: &str) -> CatalogResult<&'a str> {
    vars.get(name)
        .map(String::as_str)
        .ok_or_else(|| CatalogError::IllegalArgument(format!("Missing path variable: {}", name)))
}

fn namespace_from_vars(vars: &HashMap<String, String>) -> CatalogResult<Namespace> {
    path_var(vars, "namespace").map(decode_namespace)
}

fn ident_from_vars(vars: &HashMap<String, String>) -> CatalogResult<TableIdentifier> {
    Ok(TableIdentifier::new(
        namespace_from_vars(vars)?,
        decode_string(path_var(vars, "table")?),
    ))
}
