//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while every handler
//! failure still turns into one response: the status from the error kind, the
//! internal detail logged, and at most the `{"error": ...}` envelope on the
//! wire.

use actix_web::{HttpResponse, ResponseError, http::StatusCode, web};
use serde::Serialize;
use tracing::error;

use crate::domain::{Error, ErrorCode};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    error: &'a str,
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if !self.detail().is_empty() {
            error!(
                status = self.status_code().as_u16(),
                detail = %self.detail(),
                "request failed"
            );
        }

        let mut builder = HttpResponse::build(self.status_code());
        if self.message().is_empty() {
            builder.finish()
        } else {
            builder.json(ErrorEnvelope {
                error: self.message(),
            })
        }
    }
}

/// JSON extractor configuration that reports undecodable bodies as a bare 400.
///
/// Bodies are decoded whatever their declared content type.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(|err, _req| Error::json_unmarshal(err).into())
}
