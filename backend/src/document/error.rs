use thiserror::Error;
use zip::result::ZipError;

/// Why a decree document could not be produced.
#[derive(Debug, Error)]
pub enum AssemblyError {
    /// The request is structurally incomplete. `field` is the JSON path of
    /// the offending value, e.g. `members` or `members[1].taskTitle`.
    #[error("invalid `{field}`: {reason}")]
    InvalidInput { field: String, reason: String },

    /// The named template or one of its assets could not be loaded or parsed.
    #[error("template `{template}` unavailable: {reason}")]
    TemplateUnavailable { template: String, reason: String },

    /// Packing the rendered parts into the document container failed.
    #[error("document serialization failed: {0}")]
    SerializationFailure(#[from] ZipError),
}

impl AssemblyError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AssemblyError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn template(template: impl Into<String>, reason: impl Into<String>) -> Self {
        AssemblyError::TemplateUnavailable {
            template: template.into(),
            reason: reason.into(),
        }
    }

    /// Whether the caller can fix the problem by changing the request.
    pub fn is_client_error(&self) -> bool {
        matches!(self, AssemblyError::InvalidInput { .. })
    }
}
