//! # Decree Export Service
//!
//! Handler for `POST /api/export/generate`.
//!
//! ## Workflow
//!
//! 1.  **Role gate**: `RequireAdmin` rejects callers without the `admin` role
//!     before the body is read.
//! 2.  **Request checks**: only `type = "sk-tim"` and `format = "docx"` are
//!     accepted.
//! 3.  **Assembly**: the CPU-bound work runs on the blocking pool via
//!     `web::block`, so the async workers stay free.
//! 4.  **Response**: the document is sent as an attachment together with an
//!     `ETag` and `Content-MD5` of its bytes. Equal requests yield equal bytes
//!     and therefore equal tags.

use actix_web::http::header::{CONTENT_DISPOSITION, ETAG};
use actix_web::{web, HttpResponse};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use decree_common::requests::ExportRequest;
use log::{error, info, warn};
use md5::Context;
use uuid::Uuid;

use crate::document::SK_TIM_TEMPLATE;
use crate::rbac::RequireAdmin;
use crate::services::error::ApiError;
use crate::state::AppState;

pub const SUPPORTED_FORMAT: &str = "docx";

/// Actix web handler for `POST /api/export/generate`.
///
/// # Returns
/// - `200 OK` with the DOCX bytes.
/// - `400 Bad Request` for unsupported `type`/`format` or invalid decree data.
/// - `500 Internal Server Error` when the template or packaging fails.
pub async fn process(
    RequireAdmin(_role): RequireAdmin,
    state: web::Data<AppState>,
    body: web::Json<ExportRequest>,
) -> Result<HttpResponse, ApiError> {
    let request_id = Uuid::new_v4();

    match generate(&state, body.into_inner(), request_id).await {
        Ok(export) => Ok(export.into_response()),
        Err(e) => {
            if e.is_internal() {
                error!("[{}] export failed: {}", request_id, e);
            } else {
                warn!("[{}] export rejected: {}", request_id, e);
            }
            Err(e)
        }
    }
}

struct Export {
    filename: String,
    bytes: Vec<u8>,
}

async fn generate(
    state: &AppState,
    request: ExportRequest,
    request_id: Uuid,
) -> Result<Export, ApiError> {
    if request.doc_type != SK_TIM_TEMPLATE {
        return Err(ApiError::UnsupportedType(request.doc_type));
    }
    if !request.format.eq_ignore_ascii_case(SUPPORTED_FORMAT) {
        return Err(ApiError::UnsupportedFormat(request.format));
    }

    let filename = attachment_filename(&request.data.decree_number);
    let strategy = request.strategy;
    let members = request.data.members.len();
    let assembler = state.assembler.clone();
    let data = request.data;
    let bytes = web::block(move || assembler.assemble_with(&data, strategy)).await??;

    info!(
        "[{}] exported {} ({} members, {}, {} bytes)",
        request_id,
        filename,
        members,
        strategy.as_str(),
        bytes.len()
    );
    Ok(Export { filename, bytes })
}

impl Export {
    fn into_response(self) -> HttpResponse {
        let mime = mime_guess::from_path(&self.filename).first_or_octet_stream();

        let mut hasher = Context::new();
        hasher.consume(&self.bytes);
        let digest = hasher.finalize();

        HttpResponse::Ok()
            .content_type(mime.as_ref())
            .insert_header((
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", self.filename),
            ))
            .insert_header((ETAG, format!("\"{:x}\"", digest)))
            .insert_header(("Content-MD5", BASE64.encode(digest.0)))
            .body(self.bytes)
    }
}

/// `SK-Tim-<decree number>.docx`, with characters that are unsafe in file
/// names or header values replaced by `-`.
pub fn attachment_filename(decree_number: &str) -> String {
    let safe: String = decree_number
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | '"' | ':' | '*' | '?' | '<' | '>' | '|' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect();
    format!("SK-Tim-{}.{}", safe, SUPPORTED_FORMAT)
}
