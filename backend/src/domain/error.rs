//! Domain-level error types.
//!
//! These errors are transport agnostic. Each one carries two strings: a
//! client-facing `message` (empty means "respond without a body") and an
//! internal `detail` meant only for logs. Inbound adapters pick the HTTP
//! status from [`ErrorCode`] and decide what reaches the wire.

use std::fmt;

/// Closed set of failure categories raised by the domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Malformed input: unparsable JSON, non-positive or non-numeric ids.
    BadRequest,
    /// A referenced product or order does not exist.
    NotFound,
    /// Storage or serialisation failure inside the service.
    Internal,
}

/// Domain error payload.
///
/// # Examples
/// ```
/// use delivery::domain::{Error, ErrorCode};
///
/// let err = Error::incorrect_id(-4);
/// assert_eq!(err.code(), ErrorCode::BadRequest);
/// assert_eq!(err.message(), "incorrect id: -4");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    detail: String,
}

impl Error {
    /// Build an error from its raw parts.
    pub fn new(code: ErrorCode, message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            detail: detail.into(),
        }
    }

    /// Identifier that is zero or negative.
    pub fn incorrect_id(id: i64) -> Self {
        let message = format!("incorrect id: {id}");
        Self::new(ErrorCode::BadRequest, message.clone(), message)
    }

    /// Identifier path segment that is not an integer at all.
    ///
    /// Reported as a client error, a bare 400, even though a segment that
    /// fails integer parsing was historically answered with a 500. The raw
    /// segment only goes to the logs.
    pub fn malformed_id(raw: &str, cause: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::BadRequest,
            String::new(),
            format!("can't parse id {raw:?} from path: {cause}"),
        )
    }

    /// Request body that could not be decoded.
    pub fn json_unmarshal(cause: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::BadRequest,
            String::new(),
            format!("can't unmarshal input json: {cause}"),
        )
    }

    /// Infrastructure failure. Nothing but the status reaches the client.
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, String::new(), detail)
    }

    /// Missing resource with a message that is safe to show.
    pub fn not_found(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message, detail)
    }

    /// Failure category.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Client-facing message; empty when the response carries no body.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Internal detail for logs. Never serialised into a response.
    pub fn detail(&self) -> &str {
        self.detail.as_str()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.detail.is_empty() {
            f.write_str(&self.message)
        } else {
            f.write_str(&self.detail)
        }
    }
}

impl std::error::Error for Error {}
