use serde::{Deserialize, Serialize};

/// Summary of a loaded document template, as returned by
/// `GET /api/templates/{template_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateInfo {
    pub id: String,
    /// Package part names in the order they are written to the document.
    pub parts: Vec<String>,
    pub logo: Option<LogoInfo>,
}

/// Pixel size of the letterhead logo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoInfo {
    pub part: String,
    pub width: u32,
    pub height: u32,
}
