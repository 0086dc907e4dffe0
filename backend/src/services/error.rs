use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use decree_common::responses::ErrorBody;
use thiserror::Error;

use crate::document::AssemblyError;

const INTERNAL: &str = "Internal server error";

impl ResponseError for AssemblyError {
    fn status_code(&self) -> StatusCode {
        if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    /// Template and serialization failures are reported without detail.
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AssemblyError::InvalidInput { field, .. } => {
                ErrorBody::for_field(field.clone(), self.to_string())
            }
            _ => ErrorBody::new(INTERNAL),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Failures of the API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Document type not supported yet")]
    UnsupportedType(String),
    #[error("Format `{0}` not supported yet")]
    UnsupportedFormat(String),
    #[error("Template not found")]
    TemplateNotFound(String),
    #[error(transparent)]
    Assembly(#[from] AssemblyError),
    #[error("worker pool unavailable")]
    Blocking(#[from] BlockingError),
}

impl ApiError {
    /// Whether the failure is on our side and worth an `error!` line.
    pub fn is_internal(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::UnsupportedType(_) | ApiError::UnsupportedFormat(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::TemplateNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Assembly(e) => e.status_code(),
            ApiError::Blocking(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::UnsupportedType(_) => ErrorBody::for_field("type", self.to_string()),
            ApiError::UnsupportedFormat(_) => ErrorBody::for_field("format", self.to_string()),
            ApiError::TemplateNotFound(_) => ErrorBody::new(self.to_string()),
            ApiError::Assembly(e) => return e.error_response(),
            ApiError::Blocking(_) => ErrorBody::new(INTERNAL),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
