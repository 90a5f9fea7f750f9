//! Structured error payload and the failure-to-status translator.

use serde::{Deserialize, Serialize};
use std::backtrace::Backtrace;
use std::error::Error as _;
use std::fmt;

use crate::catalog::error::CatalogError;

/// Error payload handed to the caller's error handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    /// Symbolic failure kind, e.g. `NoSuchTableException`.
    #[serde(rename = "type")]
    pub error_type: String,
    pub code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<Vec<String>>,
}

#[derive(Serialize, Deserialize)]
struct ErrorEnvelope {
    error: ErrorResponse,
}

impl ErrorResponse {
    pub fn new(code: u16, error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error_type: error_type.into(),
            code,
            stack: None,
        }
    }

    pub fn with_stack(mut self, stack: Vec<String>) -> Self {
        self.stack = Some(stack);
        self
    }

    /// Serialize as `{"error": {...}}`.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&ErrorEnvelope {
            error: self.clone(),
        })
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<ErrorEnvelope>(json).map(|envelope| envelope.error)
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ErrorResponse(code={}, type={}, message={})",
            self.code, self.error_type, self.message
        )
    }
}

/// Wire status for a failure kind. Kinds outside the table are 500.
pub fn status_code(err: &CatalogError) -> u16 {
    match err {
        CatalogError::IllegalArgument(_)
        | CatalogError::Validation(_)
        | CatalogError::NamespaceNotEmpty(_) => 400,
        CatalogError::NotAuthorized(_) => 401,
        CatalogError::Forbidden(_) => 403,
        CatalogError::NoSuchNamespace(_)
        | CatalogError::NoSuchTable(_)
        | CatalogError::NoSuchIcebergTable(_) => 404,
        CatalogError::UnsupportedOperation(_) => 406,
        CatalogError::AlreadyExists(_) | CatalogError::CommitFailed(_) => 409,
        CatalogError::UnprocessableEntity(_) => 422,
        CatalogError::CommitStateUnknown { .. }
        | CatalogError::BadRequestType { .. }
        | CatalogError::BadResponseType { .. }
        | CatalogError::Rest(_)
        | CatalogError::Other { .. } => 500,
    }
}

/// Translates raised failures into [`ErrorResponse`]s.
#[derive(Debug, Clone, Copy)]
pub struct ErrorTranslator {
    capture_backtrace: bool,
}

impl Default for ErrorTranslator {
    fn default() -> Self {
        Self {
            capture_backtrace: true,
        }
    }
}

impl ErrorTranslator {
    pub fn new(capture_backtrace: bool) -> Self {
        Self { capture_backtrace }
    }

    /// Build the payload for `err`. The stack is always present: the first
    /// frame is `"{type}: {message}"`, followed by the error's causes and,
    /// when enabled, the backtrace of the translation site.
    pub fn translate(&self, err: &CatalogError) -> ErrorResponse {
        let error_type = err.kind().to_string();
        let message = err.to_string();

        let mut stack = vec![format!("{}: {}", error_type, message)];
        let mut cause = err.source();
        while let Some(source) = cause {
            stack.push(format!("Caused by: {}", source));
            cause = source.source();
        }
        if self.capture_backtrace {
            let backtrace = Backtrace::force_capture().to_string();
            stack.extend(
                backtrace
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(|line| format!("\tat {}", line)),
            );
        }

        ErrorResponse::new(status_code(err), error_type, message).with_stack(stack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_table() {
        let cases = [
            (CatalogError::IllegalArgument("x".into()), 400),
            (CatalogError::Validation("x".into()), 400),
            (CatalogError::NamespaceNotEmpty("x".into()), 400),
            (CatalogError::NotAuthorized("x".into()), 401),
            (CatalogError::Forbidden("x".into()), 403),
            (CatalogError::NoSuchNamespace("x".into()), 404),
            (CatalogError::NoSuchTable("x".into()), 404),
            (CatalogError::NoSuchIcebergTable("x".into()), 404),
            (CatalogError::UnsupportedOperation("x".into()), 406),
            (CatalogError::AlreadyExists("x".into()), 409),
            (CatalogError::CommitFailed("x".into()), 409),
            (CatalogError::UnprocessableEntity("x".into()), 422),
            (
                CatalogError::CommitStateUnknown {
                    message: "x".into(),
                    source: None,
                },
                500,
            ),
            (CatalogError::other("SomethingElse", "x"), 500),
        ];
        for (err, code) in cases {
            assert_eq!(status_code(&err), code, "{}", err.kind());
        }
    }

    #[test]
    fn test_translate_without_backtrace() {
        let translator = ErrorTranslator::new(false);
        let err = CatalogError::NoSuchTable("Table does not exist: db.t".into());
        let response = translator.translate(&err);

        assert_eq!(response.code, 404);
        assert_eq!(response.error_type, "NoSuchTableException");
        assert_eq!(response.message, "Table does not exist: db.t");
        assert_eq!(
            response.stack,
            Some(vec!["NoSuchTableException: Table does not exist: db.t".to_string()])
        );
    }

    #[test]
    fn test_translate_includes_causes() {
        let translator = ErrorTranslator::new(false);
        let cause = std::io::Error::new(std::io::ErrorKind::Other, "connection reset");
        let err = CatalogError::commit_state_unknown("unknown outcome", Box::new(cause));
        let stack = translator.translate(&err).stack.unwrap();
        assert_eq!(stack[1], "Caused by: connection reset");
    }

    #[test]
    fn test_translate_with_backtrace_has_frames() {
        let response = ErrorTranslator::default().translate(&CatalogError::Forbidden("no".into()));
        assert_eq!(response.code, 403);
        assert!(response.stack.unwrap().len() > 1);
    }

    #[test]
    fn test_json_envelope() {
        let response = ErrorResponse::new(404, "NoSuchTableException", "gone");
        let json = response.to_json().unwrap();
        assert_eq!(
            json,
            r#"{"error":{"message":"gone","type":"NoSuchTableException","code":404}}"#
        );
        assert_eq!(ErrorResponse::from_json(&json).unwrap(), response);
    }
}
