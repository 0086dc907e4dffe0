//! Parsed, validated template packages.
//!
//! A [`DecreeTemplate`] is built once at startup from a [`TemplateSource`]
//! and shared read-only between requests.

use std::borrow::Cow;
use std::sync::Arc;

use decree_common::model::strategy::RenderStrategy;
use decree_common::model::template::{LogoInfo, TemplateInfo};
use image::GenericImageView;
use log::info;
use mime_guess::mime;

use super::assets::{RawPart, TemplateSource};
use super::error::AssemblyError;
use super::fields::{self, LETTERHEAD, MEMBERS};
use super::markup::{self, Node, RenderData};
use super::package::PackagePart;

/// Identifier of the team assignment decree template.
pub const SK_TIM_TEMPLATE: &str = "sk-tim";

const CONTENT_TYPES_PART: &str = "[Content_Types].xml";
const DOCUMENT_PART: &str = "word/document.xml";
const LOGO_PREFIX: &str = "word/media/logo.";

#[derive(Debug)]
enum PartBody {
    Markup(Vec<Node>),
    Binary(Vec<u8>),
}

#[derive(Debug)]
struct TemplatePart {
    name: String,
    body: PartBody,
}

/// The letterhead image of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logo {
    /// Part name, e.g. `word/media/logo.png`.
    pub part: String,
    /// File name relative to `word/media/`, as referenced by the document
    /// relationships.
    pub file_name: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug)]
pub struct DecreeTemplate {
    id: String,
    parts: Vec<TemplatePart>,
    logo: Option<Logo>,
}

impl DecreeTemplate {
    /// Loads `template_id` from `source`, parses every XML part and checks
    /// the placeholders against the decree schema.
    pub fn preload(
        source: &dyn TemplateSource,
        template_id: &str,
    ) -> Result<Arc<DecreeTemplate>, AssemblyError> {
        let template = Self::from_parts(template_id, source.load(template_id)?)?;
        info!(
            "Loaded template `{}` ({} parts, logo: {})",
            template.id,
            template.parts.len(),
            template
                .logo
                .as_ref()
                .map(|logo| format!("{}x{}", logo.width, logo.height))
                .unwrap_or_else(|| "none".to_string())
        );
        Ok(Arc::new(template))
    }

    /// Builds a template from its raw parts.
    ///
    /// `.xml` and `.rels` parts are parsed into markup and checked against
    /// the decree field schema; everything else is kept as bytes. A part named
    /// `word/media/logo.*` becomes the letterhead logo and must decode as an
    /// image.
    ///
    /// # Arguments
    /// * `template_id` - Identifier used in error messages, e.g. `sk-tim`.
    /// * `raw` - The parts as returned by a [`TemplateSource`].
    ///
    /// # Returns
    /// - `Ok(DecreeTemplate)` with parts in write order.
    /// - `Err(AssemblyError::TemplateUnavailable)` if a part is not UTF-8,
    ///   has malformed or unknown placeholders, the content types or document
    ///   part is missing, the document has no `members` section, or a
    ///   `letterhead` section exists without a logo.
    pub fn from_parts(template_id: &str, raw: Vec<RawPart>) -> Result<Self, AssemblyError> {
        let unavailable = |reason: String| AssemblyError::template(template_id, reason);

        let mut parts = Vec::with_capacity(raw.len());
        let mut logo = None;
        for RawPart { name, bytes } in raw {
            let body = if is_markup(&name) {
                let source = String::from_utf8(bytes)
                    .map_err(|_| unavailable(format!("{} is not valid UTF-8", name)))?;
                let nodes = markup::parse(&source)
                    .and_then(|nodes| markup::check(&nodes, &fields::SCHEMA).map(|_| nodes))
                    .map_err(|e| unavailable(format!("{}: {}", name, e)))?;
                PartBody::Markup(nodes)
            } else {
                if name.starts_with(LOGO_PREFIX) {
                    logo = Some(read_logo(&name, &bytes).map_err(unavailable)?);
                }
                PartBody::Binary(bytes)
            };
            parts.push(TemplatePart { name, body });
        }

        // The content types part goes first; the rest in name order.
        parts.sort_by(|a, b| {
            (a.name != CONTENT_TYPES_PART, &a.name).cmp(&(b.name != CONTENT_TYPES_PART, &b.name))
        });

        if !parts.iter().any(|part| part.name == CONTENT_TYPES_PART) {
            return Err(unavailable(format!("missing {}", CONTENT_TYPES_PART)));
        }
        let document = parts
            .iter()
            .find_map(|part| match &part.body {
                PartBody::Markup(nodes) if part.name == DOCUMENT_PART => Some(nodes),
                _ => None,
            })
            .ok_or_else(|| unavailable(format!("missing {}", DOCUMENT_PART)))?;
        if !markup::has_section(document, MEMBERS) {
            return Err(unavailable(format!(
                "{} has no {{{{#{}}}}} section",
                DOCUMENT_PART, MEMBERS
            )));
        }
        let wants_logo = parts.iter().any(|part| match &part.body {
            PartBody::Markup(nodes) => markup::has_section(nodes, LETTERHEAD),
            PartBody::Binary(_) => false,
        });
        if wants_logo && logo.is_none() {
            return Err(unavailable(
                "letterhead section present but no word/media/logo.* asset".to_string(),
            ));
        }

        Ok(DecreeTemplate {
            id: template_id.to_string(),
            parts,
            logo,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn logo(&self) -> Option<&Logo> {
        self.logo.as_ref()
    }

    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|part| part.name.as_str())
    }

    pub fn info(&self) -> TemplateInfo {
        TemplateInfo {
            id: self.id.clone(),
            parts: self.part_names().map(str::to_string).collect(),
            logo: self.logo.as_ref().map(|logo| LogoInfo {
                part: logo.part.clone(),
                width: logo.width,
                height: logo.height,
            }),
        }
    }

    /// Renders every part. The logo image is left out under
    /// [`RenderStrategy::Plain`].
    pub(crate) fn render<'a>(
        &'a self,
        data: &RenderData,
        strategy: RenderStrategy,
    ) -> Result<Vec<PackagePart<'a>>, AssemblyError> {
        let mut rendered = Vec::with_capacity(self.parts.len());
        for part in &self.parts {
            let bytes = match &part.body {
                PartBody::Markup(nodes) => {
                    let mut text = String::new();
                    markup::render(nodes, data, &mut text).map_err(|e| {
                        AssemblyError::template(&self.id, format!("{}: {}", part.name, e))
                    })?;
                    Cow::Owned(text.into_bytes())
                }
                PartBody::Binary(_) if strategy == RenderStrategy::Plain && self.is_logo(&part.name) => {
                    continue;
                }
                PartBody::Binary(bytes) => Cow::Borrowed(bytes.as_slice()),
            };
            rendered.push(PackagePart {
                name: &part.name,
                bytes,
            });
        }
        Ok(rendered)
    }

    fn is_logo(&self, name: &str) -> bool {
        self.logo.as_ref().is_some_and(|logo| logo.part == name)
    }
}

fn is_markup(name: &str) -> bool {
    name.ends_with(".xml") || name.ends_with(".rels")
}

fn read_logo(name: &str, bytes: &[u8]) -> Result<Logo, String> {
    let is_image = mime_guess::from_path(name)
        .first()
        .is_some_and(|guess| guess.type_() == mime::IMAGE);
    if !is_image {
        return Err(format!("{} is not an image", name));
    }

    let image = image::load_from_memory(bytes).map_err(|e| format!("{}: {}", name, e))?;
    let (width, height) = image.dimensions();
    Ok(Logo {
        part: name.to_string(),
        file_name: name.trim_start_matches("word/media/").to_string(),
        width,
        height,
    })
}
