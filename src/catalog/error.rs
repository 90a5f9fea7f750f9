//! Failure taxonomy for catalog operations.
//!
//! Every failure raised below the adapter is a [`CatalogError`]. Each variant
//! has a stable symbolic name (see [`CatalogError::kind`]) that clients use
//! for programmatic handling, so renaming one is a wire change.

use thiserror::Error;

use crate::rest::error::ErrorResponse;

/// Boxed error usable as a failure cause.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised by catalog operations and by the dispatch path.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Caller passed an argument that can never be valid.
    #[error("{0}")]
    IllegalArgument(String),

    /// A request or metadata change failed validation.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NamespaceNotEmpty(String),

    #[error("{0}")]
    NotAuthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NoSuchNamespace(String),

    #[error("{0}")]
    NoSuchTable(String),

    /// The identifier names something that exists but is not a table.
    #[error("{0}")]
    NoSuchIcebergTable(String),

    #[error("{0}")]
    UnsupportedOperation(String),

    #[error("{0}")]
    AlreadyExists(String),

    /// A commit lost a race or a commit requirement did not hold.
    #[error("{0}")]
    CommitFailed(String),

    #[error("{0}")]
    UnprocessableEntity(String),

    /// The commit may or may not have been applied.
    #[error("{message}")]
    CommitStateUnknown {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// A request body did not have the shape its route requires.
    #[error("Invalid request object, not a {expected}: {actual}")]
    BadRequestType {
        expected: &'static str,
        actual: String,
    },

    /// A result did not have the shape the caller asked for.
    #[error("Invalid response object, not a {expected}: {actual}")]
    BadResponseType {
        expected: &'static str,
        actual: String,
    },

    /// An error payload that the caller's error handler did not turn into
    /// a more specific failure.
    #[error("Unhandled error: {0}")]
    Rest(Box<ErrorResponse>),

    /// Any failure kind outside the closed set above.
    #[error("{message}")]
    Other {
        kind: String,
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    /// A failure of an arbitrary, caller-named kind.
    pub fn other(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Other {
            kind: kind.into(),
            message: message.into(),
            source: None,
        }
    }

    pub fn commit_state_unknown(message: impl Into<String>, source: BoxError) -> Self {
        Self::CommitStateUnknown {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Stable symbolic name of this failure kind.
    pub fn kind(&self) -> &str {
        match self {
            Self::IllegalArgument(_) => "IllegalArgumentException",
            Self::Validation(_) => "ValidationException",
            Self::NamespaceNotEmpty(_) => "NamespaceNotEmptyException",
            Self::NotAuthorized(_) => "NotAuthorizedException",
            Self::Forbidden(_) => "ForbiddenException",
            Self::NoSuchNamespace(_) => "NoSuchNamespaceException",
            Self::NoSuchTable(_) => "NoSuchTableException",
            Self::NoSuchIcebergTable(_) => "NoSuchIcebergTableException",
            Self::UnsupportedOperation(_) => "UnsupportedOperationException",
            Self::AlreadyExists(_) => "AlreadyExistsException",
            Self::CommitFailed(_) => "CommitFailedException",
            Self::UnprocessableEntity(_) => "UnprocessableEntityException",
            Self::CommitStateUnknown { .. } => "CommitStateUnknownException",
            Self::BadRequestType { .. } => "BadRequestType",
            Self::BadResponseType { .. } => "BadResponseType",
            Self::Rest(_) => "RESTException",
            Self::Other { kind, .. } => kind,
        }
    }
}
