//! Application error taxonomy.
//!
//! Every failure that reaches a handler boundary is an [`AppError`] carrying an
//! [`ErrorKind`]. The kind decides the HTTP status; the wrapped [`anyhow::Error`]
//! carries the message. `Internal` errors are logged here and replaced with a
//! generic message before they leave the process.
//!
//! # Response body
//!
//! ```json
//! { "success": false, "message": "Student not found" }
//! ```
//!
//! Validation failures also list the offending fields:
//!
//! ```json
//! {
//!   "success": false,
//!   "message": "Validation failed",
//!   "errors": [{ "field": "year", "message": "Year must be between 1 and 4" }]
//! }
//! ```

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Message returned to callers in place of internal error details.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Message shared by every credential failure so callers cannot tell
/// an unknown email apart from a wrong password.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input shape or out-of-range value.
    ValidationFailed,
    /// Uniqueness violation.
    Conflict,
    /// Unknown email or wrong password.
    InvalidCredentials,
    /// Missing, malformed or expired token.
    Unauthorized,
    /// Valid token, insufficient role.
    Forbidden,
    NotFound,
    Internal,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::ValidationFailed | ErrorKind::Conflict | ErrorKind::InvalidCredentials => {
                StatusCode::BAD_REQUEST
            }
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// A single field-level validation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Error response body, used for API documentation.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
    pub error: Error,
    pub field_errors: Vec<FieldError>,
}

impl AppError {
    pub fn new<E>(kind: ErrorKind, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            kind,
            error: err.into(),
            field_errors: Vec::new(),
        }
    }

    fn with_message(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::new(kind, Error::msg(message.into()))
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Internal, err)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::with_message(ErrorKind::Internal, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_message(ErrorKind::NotFound, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::with_message(ErrorKind::Conflict, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::with_message(ErrorKind::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::with_message(ErrorKind::Forbidden, message)
    }

    pub fn invalid_credentials() -> Self {
        Self::with_message(ErrorKind::InvalidCredentials, INVALID_CREDENTIALS_MESSAGE)
    }

    /// A validation failure with a single message and no field breakdown.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_message(ErrorKind::ValidationFailed, message)
    }

    pub fn validation(field_errors: Vec<FieldError>) -> Self {
        Self {
            kind: ErrorKind::ValidationFailed,
            error: Error::msg("Validation failed"),
            field_errors,
        }
    }

    /// Flattens `validator` output into per-field messages, sorted by field
    /// name so the response is stable.
    pub fn from_validation(errors: &ValidationErrors) -> Self {
        let mut field_errors: Vec<FieldError> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                let field = camel_case(field);
                errors.iter().map(move |error| {
                    let message = error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field));
                    FieldError::new(field.clone(), message)
                })
            })
            .collect();
        field_errors.sort_by(|a, b| a.field.cmp(&b.field));

        Self::validation(field_errors)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn status(&self) -> StatusCode {
        self.kind.status()
    }

    /// The message a caller would see.
    pub fn public_message(&self) -> String {
        match self.kind {
            ErrorKind::Internal => INTERNAL_ERROR_MESSAGE.to_string(),
            _ => self.error.to_string(),
        }
    }
}

/// `student_id` -> `studentId`, matching the JSON field names.
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.kind == ErrorKind::Internal {
            tracing::error!(error = ?self.error, "Internal error");
        }

        let status = self.status();
        let message = self.public_message();
        let body = if self.field_errors.is_empty() {
            json!({
                "success": false,
                "message": message,
            })
        } else {
            json!({
                "success": false,
                "message": message,
                "errors": self.field_errors,
            })
        };

        (status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
