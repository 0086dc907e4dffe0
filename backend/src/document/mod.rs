//! Turns a decree request into a DOCX document.

pub mod assets;
pub mod error;
pub mod fields;
pub mod locale;
pub mod markup;
pub mod package;
pub mod template;
pub mod validate;

use std::sync::Arc;

use decree_common::model::decree::DecreeRequest;
use decree_common::model::strategy::RenderStrategy;
use log::debug;

pub use assets::{DirectoryTemplates, EmbeddedTemplates, TemplateSource};
pub use error::AssemblyError;
pub use template::{DecreeTemplate, SK_TIM_TEMPLATE};
pub use validate::ValidDecree;

/// Assembles decree documents from a preloaded template.
///
/// Cloning is cheap; clones share the template. Assembly keeps no state
/// between calls, so one assembler serves any number of concurrent requests.
#[derive(Debug, Clone)]
pub struct DocumentAssembler {
    template: Arc<DecreeTemplate>,
}

impl DocumentAssembler {
    pub fn new(template: Arc<DecreeTemplate>) -> Self {
        DocumentAssembler { template }
    }

    pub fn template(&self) -> &DecreeTemplate {
        &self.template
    }

    /// Assembles one decree with the letterhead logo.
    ///
    /// Equivalent to [`assemble_with`](Self::assemble_with) using
    /// [`RenderStrategy::Letterhead`].
    pub fn assemble(&self, request: &DecreeRequest) -> Result<Vec<u8>, AssemblyError> {
        self.assemble_with(request, RenderStrategy::Letterhead)
    }

    /// Validates `request`, renders every template part and packs them into a
    /// DOCX container.
    ///
    /// No I/O happens here; the template was loaded at startup. Equal
    /// requests produce byte-equal documents.
    ///
    /// # Arguments
    /// * `request` - The decree as submitted by the export form.
    /// * `strategy` - Whether the letterhead logo is drawn.
    ///
    /// # Returns
    /// - `Ok(Vec<u8>)` with the DOCX bytes.
    /// - `Err(AssemblyError::InvalidInput)` naming the first offending field.
    /// - `Err(AssemblyError::TemplateUnavailable)` when `Letterhead` is asked
    ///   of a template without a logo.
    /// - `Err(AssemblyError::SerializationFailure)` if packing fails.
    pub fn assemble_with(
        &self,
        request: &DecreeRequest,
        strategy: RenderStrategy,
    ) -> Result<Vec<u8>, AssemblyError> {
        let decree = ValidDecree::from_request(request)?;

        let logo = match strategy {
            RenderStrategy::Letterhead => Some(self.template.logo().ok_or_else(|| {
                AssemblyError::template(self.template.id(), "letterhead requested but no logo")
            })?),
            RenderStrategy::Plain => None,
        };

        let data = fields::render_data(&decree, logo);
        let parts = self.template.render(&data, strategy)?;
        let bytes = package::pack(&parts)?;
        debug!(
            "Assembled {} ({} members, {}): {} bytes",
            decree.decree_number,
            decree.members.len(),
            strategy.as_str(),
            bytes.len()
        );
        Ok(bytes)
    }
}
