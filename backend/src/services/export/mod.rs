//! # Export Service Module
//!
//! Routes under `/api/export`.
//!
//! *   **`POST /generate`**:
//!     - **Handler**: `generate::process`
//!     - **Description**: Validates a decree request and returns the rendered
//!       DOCX as an attachment. Admins only.

mod generate;

use actix_web::web::{post, scope};
use actix_web::Scope;

/// The base path for all export endpoints.
const API_PATH: &str = "/api/export";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/generate", post().to(generate::process))
}
