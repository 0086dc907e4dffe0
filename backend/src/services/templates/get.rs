//! Handler for `GET /api/templates/{template_id}`.
//!
//! Only the template preloaded at startup is served; templates are never
//! read from disk per request.

use actix_web::{web, HttpResponse};
use log::debug;

use crate::rbac::AuthenticatedRole;
use crate::services::error::ApiError;
use crate::state::AppState;

pub async fn process(
    AuthenticatedRole(role): AuthenticatedRole,
    state: web::Data<AppState>,
    template_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let template_id = template_id.into_inner();
    let template = state.assembler.template();
    if template.id() != template_id {
        return Err(ApiError::TemplateNotFound(template_id));
    }

    debug!("Template {} described for {}", template_id, role.as_str());
    Ok(HttpResponse::Ok().json(template.info()))
}
