//! HTTP endpoints.
//!
//! - `export`: `POST /api/export/generate`, admin only.
//! - `templates`: `GET /api/templates/{template_id}`, any authenticated role.

pub mod error;
pub mod export;
pub mod templates;

use actix_web::error::InternalError;
use actix_web::{web, HttpResponse};
use decree_common::responses::ErrorBody;

/// Registers every API scope on an app or test service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(export::configure_routes())
        .service(templates::configure_routes());
}

/// JSON extractor settings: `limit` bytes at most, and malformed bodies
/// answered with an [`ErrorBody`] instead of plain text.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            let response = HttpResponse::BadRequest().json(ErrorBody::new(err.to_string()));
            InternalError::from_response(err, response).into()
        })
}
