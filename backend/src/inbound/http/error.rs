//! HTTP presentation of domain errors.
//!
//! Keeps [`Error`] transport-agnostic while giving Actix handlers one place
//! that decides status codes, redirects and redaction.

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, ResponseError};
use tracing::error;

use crate::domain::ports::RepositoryError;
use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

use super::cache_control::no_store_header;
use super::routes::LOGIN_PATH;

/// Result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const REDACTED: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::SEE_OTHER,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal(REDACTED);
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        if matches!(self.code(), ErrorCode::Unauthorized) {
            return builder
                .insert_header((header::LOCATION, LOGIN_PATH))
                .insert_header(no_store_header())
                .finish();
        }

        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(REDACTED)
    }
}

/// Collapse a repository failure into what the client may see.
///
/// `NotFound` stays a 404. Everything else is logged with the record kind
/// and operation, then reported as a generic 500.
pub fn storage_failure(kind: &'static str, operation: &'static str, err: RepositoryError) -> Error {
    match err {
        RepositoryError::NotFound => Error::not_found(format!("{kind} not found")),
        other => {
            error!(entity = kind, operation, error = %other, "storage operation failed");
            Error::internal(format!("{operation} {kind} failed: {other}"))
        }
    }
}

#[cfg(test)]
mod tests;
