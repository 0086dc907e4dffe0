use crate::model::decree::DecreeRequest;
use crate::model::strategy::RenderStrategy;
use serde::{Deserialize, Serialize};

/// Request payload for `POST /api/export/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequest {
    /// Document kind; only `sk-tim` is supported.
    #[serde(rename = "type")]
    pub doc_type: String,
    /// Output format; only `docx` is supported.
    pub format: String,
    #[serde(default)]
    pub strategy: RenderStrategy,
    pub data: DecreeRequest,
}
