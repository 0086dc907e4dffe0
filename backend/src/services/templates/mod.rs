//! # Template Service Module
//!
//! Routes under `/api/templates`.
//!
//! *   **`GET /{template_id}`**:
//!     - **Handler**: `get::process`
//!     - **Description**: Describes the loaded template: its part names in
//!       write order and the letterhead logo size. Any authenticated role.

mod get;

use actix_web::web::{get, scope};
use actix_web::Scope;

/// The base path for all template-related API endpoints.
const API_PATH: &str = "/api/templates";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/{template_id}", get().to(get::process))
}
