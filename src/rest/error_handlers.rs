//! Error handlers for the adapter's error callback.
//!
//! The translator turns a failure into an [`ErrorResponse`]; these handlers
//! go the other way so callers get a typed [`CatalogError`] back.

use crate::catalog::error::{CatalogError, CatalogResult};
use crate::rest::error::ErrorResponse;

/// Rebuild the failure an error payload describes.
///
/// Known type names map to their variant. Unknown names keep their name as
/// an `Other` kind, except for status codes that have exactly one kind.
pub fn to_catalog_error(error: &ErrorResponse) -> CatalogError {
    let message = error.message.clone();
    match error.error_type.as_str() {
        "IllegalArgumentException" => CatalogError::IllegalArgument(message),
        "ValidationException" => CatalogError::Validation(message),
        "NamespaceNotEmptyException" => CatalogError::NamespaceNotEmpty(message),
        "NotAuthorizedException" => CatalogError::NotAuthorized(message),
        "ForbiddenException" => CatalogError::Forbidden(message),
        "NoSuchNamespaceException" => CatalogError::NoSuchNamespace(message),
        "NoSuchTableException" => CatalogError::NoSuchTable(message),
        "NoSuchIcebergTableException" => CatalogError::NoSuchIcebergTable(message),
        "UnsupportedOperationException" => CatalogError::UnsupportedOperation(message),
        "AlreadyExistsException" => CatalogError::AlreadyExists(message),
        "CommitFailedException" => CatalogError::CommitFailed(message),
        "UnprocessableEntityException" => CatalogError::UnprocessableEntity(message),
        "CommitStateUnknownException" => CatalogError::CommitStateUnknown {
            message,
            source: None,
        },
        other => match error.code {
            401 => CatalogError::NotAuthorized(message),
            403 => CatalogError::Forbidden(message),
            406 => CatalogError::UnsupportedOperation(message),
            422 => CatalogError::UnprocessableEntity(message),
            _ => CatalogError::other(other, message),
        },
    }
}

/// Error callback that always aborts with the rebuilt failure.
pub fn default_error_handler(error: &ErrorResponse) -> CatalogResult<()> {
    tracing::debug!(code = error.code, error_type = %error.error_type, "Handling error response");
    Err(to_catalog_error(error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::error::ErrorTranslator;

    #[test]
    fn test_inverse_of_translator() {
        let translator = ErrorTranslator::new(false);
        let errors = [
            CatalogError::IllegalArgument("a".into()),
            CatalogError::NamespaceNotEmpty("b".into()),
            CatalogError::NoSuchTable("c".into()),
            CatalogError::CommitFailed("d".into()),
            CatalogError::UnprocessableEntity("e".into()),
            CatalogError::other("StorageOfflineException", "f"),
        ];
        for err in errors {
            let rebuilt = to_catalog_error(&translator.translate(&err));
            assert_eq!(rebuilt.kind(), err.kind());
            assert_eq!(rebuilt.to_string(), err.to_string());
        }
    }

    #[test]
    fn test_unknown_type_falls_back_to_status() {
        let rebuilt = to_catalog_error(&ErrorResponse::new(403, "AccessDenied", "nope"));
        assert_eq!(rebuilt.kind(), "ForbiddenException");

        let rebuilt = to_catalog_error(&ErrorResponse::new(400, "BadRequestException", "x"));
        assert_eq!(rebuilt.kind(), "BadRequestException");
    }

    #[test]
    fn test_default_handler_aborts() {
        let error = ErrorResponse::new(404, "NoSuchNamespaceException", "gone");
        let err = default_error_handler(&error).unwrap_err();
        assert!(matches!(err, CatalogError::NoSuchNamespace(_)));
    }
}
