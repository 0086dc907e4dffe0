use crate::document::DocumentAssembler;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub assembler: DocumentAssembler,
}
