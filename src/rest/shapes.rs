//! Shape guards between the uniform dispatch path and typed handlers.
//!
//! Bodies and results travel through the adapter as the tagged
//! [`RestRequest`] / [`RestResponse`] enums. Each concrete shape knows its
//! own name and how to pull itself out of the enum; a mismatch becomes a
//! `BadRequestType` / `BadResponseType` failure instead of a coercion.

use crate::catalog::error::{CatalogError, CatalogResult};
use crate::rest::requests::{
    CreateNamespaceRequest, CreateTableRequest, RestRequest, UpdateNamespacePropertiesRequest,
    UpdateTableRequest,
};
use crate::rest::responses::{
    ConfigResponse, CreateNamespaceResponse, GetNamespaceResponse, ListNamespacesResponse,
    ListTablesResponse, LoadTableResponse, RestResponse, UpdateNamespacePropertiesResponse,
};

/// A request body type a route can require.
pub trait RequestShape: Sized {
    const NAME: &'static str;

    /// Returns the request back on mismatch.
    fn from_request(request: RestRequest) -> Result<Self, RestRequest>;
}

/// A result type a caller can ask for. `None` is the result of void routes.
pub trait ResponseShape: Sized {
    const NAME: &'static str;

    /// Returns the response back on mismatch.
    fn from_response(response: Option<RestResponse>) -> Result<Self, Option<RestResponse>>;
}

/// Assert that `body` is a `T`.
pub fn cast_request<T: RequestShape>(body: Option<RestRequest>) -> CatalogResult<T> {
    let mismatch = |actual: String| CatalogError::BadRequestType {
        expected: T::NAME,
        actual,
    };
    match body {
        Some(request) => T::from_request(request).map_err(|other| mismatch(format!("{:?}", other))),
        None => Err(mismatch("None".to_string())),
    }
}

/// Assert that `response` is a `T`.
pub fn cast_response<T: ResponseShape>(response: Option<RestResponse>) -> CatalogResult<T> {
    T::from_response(response).map_err(|other| CatalogError::BadResponseType {
        expected: T::NAME,
        actual: match other {
            Some(response) => format!("{:?}", response),
            None => "None".to_string(),
        },
    })
}

macro_rules! request_shape {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl RequestShape for $ty {
                const NAME: &'static str = stringify!($ty);

                fn from_request(request: RestRequest) -> Result<Self, RestRequest> {
                    match request {
                        RestRequest::$variant(inner) => Ok(inner),
                        other => Err(other),
                    }
                }
            }
        )*
    };
}

macro_rules! response_shape {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl ResponseShape for $ty {
                const NAME: &'static str = stringify!($ty);

                fn from_response(
                    response: Option<RestResponse>,
                ) -> Result<Self, Option<RestResponse>> {
                    match response {
                        Some(RestResponse::$variant(inner)) => Ok(inner),
                        other => Err(other),
                    }
                }
            }
        )*
    };
}

request_shape! {
    CreateNamespaceRequest => CreateNamespace,
    UpdateNamespacePropertiesRequest => UpdateNamespaceProperties,
    CreateTableRequest => CreateTable,
    UpdateTableRequest => UpdateTable,
}

response_shape! {
    ConfigResponse => Config,
    ListNamespacesResponse => ListNamespaces,
    CreateNamespaceResponse => CreateNamespace,
    GetNamespaceResponse => GetNamespace,
    UpdateNamespacePropertiesResponse => UpdateNamespaceProperties,
    ListTablesResponse => ListTables,
    LoadTableResponse => LoadTable,
}

/// Void results.
impl ResponseShape for () {
    const NAME: &'static str = "()";

    fn from_response(response: Option<RestResponse>) -> Result<Self, Option<RestResponse>> {
        match response {
            None => Ok(()),
            other => Err(other),
        }
    }
}

/// Any non-void result.
impl ResponseShape for RestResponse {
    const NAME: &'static str = "RestResponse";

    fn from_response(response: Option<RestResponse>) -> Result<Self, Option<RestResponse>> {
        response.ok_or(None)
    }
}

/// Any result, void or not.
impl ResponseShape for Option<RestResponse> {
    const NAME: &'static str = "Option<RestResponse>";

    fn from_response(response: Option<RestResponse>) -> Result<Self, Option<RestResponse>> {
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::Namespace;

    fn create_namespace() -> RestRequest {
        CreateNamespaceRequest {
            namespace: Namespace::of(["db"]),
            properties: Default::default(),
        }
        .into()
    }

    #[test]
    fn test_cast_request_match() {
        let request: CreateNamespaceRequest = cast_request(Some(create_namespace())).unwrap();
        assert_eq!(request.namespace, Namespace::of(["db"]));
    }

    #[test]
    fn test_cast_request_mismatch_names_both_sides() {
        let err = cast_request::<CreateTableRequest>(Some(create_namespace())).unwrap_err();
        assert_eq!(err.kind(), "BadRequestType");
        let message = err.to_string();
        assert!(message.starts_with("Invalid request object, not a CreateTableRequest: "));
        assert!(message.contains("CreateNamespace"));
    }

    #[test]
    fn test_cast_request_missing_body() {
        let err = cast_request::<UpdateTableRequest>(None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid request object, not a UpdateTableRequest: None"
        );
    }

    #[test]
    fn test_cast_response() {
        let config: ConfigResponse =
            cast_response(Some(ConfigResponse::default().into())).unwrap();
        assert!(config.defaults.is_empty());

        let err = cast_response::<LoadTableResponse>(Some(ConfigResponse::default().into()))
            .unwrap_err();
        assert_eq!(err.kind(), "BadResponseType");
        assert!(err
            .to_string()
            .starts_with("Invalid response object, not a LoadTableResponse: Config("));
    }

    #[test]
    fn test_void_shapes() {
        assert!(cast_response::<()>(None).is_ok());
        assert!(cast_response::<()>(Some(ConfigResponse::default().into())).is_err());
        assert!(cast_response::<RestResponse>(None).is_err());
        assert_eq!(cast_response::<Option<RestResponse>>(None).unwrap(), None);
    }
}
