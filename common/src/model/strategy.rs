use serde::{Deserialize, Serialize};

/// How a decree is rendered. Chosen by the caller; the backend never
/// switches strategy on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderStrategy {
    /// Letter with the agency logo above the heading.
    #[default]
    Letterhead,
    /// Same letter without the logo image.
    Plain,
}

impl RenderStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderStrategy::Letterhead => "letterhead",
            RenderStrategy::Plain => "plain",
        }
    }
}
