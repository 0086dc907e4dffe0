//! Role-based access control extractors.
//!
//! Authentication happens upstream; the gateway forwards the caller's role
//! in the `X-User-Role` header. Each extractor rejects requests whose role
//! does not meet the route's requirement.

use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::http::StatusCode;
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError};
use decree_common::model::role::Role;
use decree_common::responses::ErrorBody;
use log::warn;
use thiserror::Error;

pub const ROLE_HEADER: &str = "X-User-Role";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Unauthorized")]
    Unauthenticated,
    #[error("Forbidden")]
    Forbidden(Role),
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody::new(self.to_string()))
    }
}

fn role_of(req: &HttpRequest) -> Result<Role, AuthError> {
    req.headers()
        .get(ROLE_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(Role::parse)
        .ok_or(AuthError::Unauthenticated)
}

/// Any authenticated caller.
pub struct AuthenticatedRole(pub Role);

impl FromRequest for AuthenticatedRole {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(role_of(req).map(AuthenticatedRole))
    }
}

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
pub struct RequireAdmin(pub Role);

impl FromRequest for RequireAdmin {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = role_of(req).and_then(|role| match role {
            Role::Admin => Ok(RequireAdmin(role)),
            other => {
                warn!("{} {} refused for role {}", req.method(), req.path(), other.as_str());
                Err(AuthError::Forbidden(other))
            }
        });
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn extract_admin(req: &HttpRequest) -> Result<RequireAdmin, AuthError> {
        RequireAdmin::from_request(req, &mut Payload::None).into_inner()
    }

    #[test]
    fn missing_or_unknown_role_is_unauthenticated() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(role_of(&req), Err(AuthError::Unauthenticated));

        let req = TestRequest::default()
            .insert_header((ROLE_HEADER, "mitra"))
            .to_http_request();
        assert_eq!(role_of(&req), Err(AuthError::Unauthenticated));
    }

    #[test]
    fn admin_gate_accepts_only_admins() {
        let req = TestRequest::default()
            .insert_header((ROLE_HEADER, "Admin"))
            .to_http_request();
        assert!(matches!(extract_admin(&req), Ok(RequireAdmin(Role::Admin))));

        let req = TestRequest::default()
            .insert_header((ROLE_HEADER, "ketua_tim"))
            .to_http_request();
        assert!(matches!(
            extract_admin(&req),
            Err(AuthError::Forbidden(Role::KetuaTim))
        ));
    }

    #[test]
    fn rejections_map_to_status_codes() {
        assert_eq!(AuthError::Unauthenticated.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AuthError::Forbidden(Role::Pegawai).status_code(),
            StatusCode::FORBIDDEN
        );
    }
}
