//! Where template packages come from.
//!
//! A template is a directory holding the parts of a document skeleton,
//! e.g. `sk-tim/[Content_Types].xml`, `sk-tim/word/document.xml` and
//! `sk-tim/word/media/logo.png`. The default templates are compiled into the
//! binary; operators can point the server at a directory on disk instead.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use include_dir::{include_dir, Dir, DirEntry};

use super::error::AssemblyError;

static TEMPLATES_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/assets/templates");

/// One file of a template package, named by its path inside the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPart {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Resolves a template identifier to its raw parts.
pub trait TemplateSource: Send + Sync {
    fn load(&self, template_id: &str) -> Result<Vec<RawPart>, AssemblyError>;
}

/// Templates embedded at compile time from `backend/assets/templates`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplates;

impl EmbeddedTemplates {
    /// Identifiers of all embedded templates.
    pub fn ids(&self) -> Vec<String> {
        TEMPLATES_DIR
            .dirs()
            .map(|dir| part_name(dir.path()))
            .collect()
    }
}

impl TemplateSource for EmbeddedTemplates {
    fn load(&self, template_id: &str) -> Result<Vec<RawPart>, AssemblyError> {
        check_id(template_id)?;
        let dir = TEMPLATES_DIR
            .get_dir(template_id)
            .ok_or_else(|| AssemblyError::template(template_id, "not embedded in this build"))?;

        let mut parts = Vec::new();
        collect_embedded(dir, Path::new(template_id), &mut parts);
        if parts.is_empty() {
            return Err(AssemblyError::template(template_id, "template directory is empty"));
        }
        Ok(parts)
    }
}

fn collect_embedded(dir: &Dir, root: &Path, parts: &mut Vec<RawPart>) {
    for entry in dir.entries() {
        match entry {
            DirEntry::Dir(sub) => collect_embedded(sub, root, parts),
            DirEntry::File(file) => {
                if let Ok(relative) = file.path().strip_prefix(root) {
                    parts.push(RawPart {
                        name: part_name(relative),
                        bytes: file.contents().to_vec(),
                    });
                }
            }
        }
    }
}

/// Templates read from `<root>/<template_id>/` on disk.
#[derive(Debug, Clone)]
pub struct DirectoryTemplates {
    root: PathBuf,
}

impl DirectoryTemplates {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TemplateSource for DirectoryTemplates {
    fn load(&self, template_id: &str) -> Result<Vec<RawPart>, AssemblyError> {
        check_id(template_id)?;
        let base = self.root.join(template_id);
        if !base.is_dir() {
            return Err(AssemblyError::template(
                template_id,
                format!("{} is not a directory", base.display()),
            ));
        }

        let mut parts = Vec::new();
        collect_directory(&base, &base, &mut parts).map_err(|e| {
            AssemblyError::template(template_id, format!("reading {}: {}", base.display(), e))
        })?;
        if parts.is_empty() {
            return Err(AssemblyError::template(template_id, "template directory is empty"));
        }
        Ok(parts)
    }
}

fn collect_directory(base: &Path, dir: &Path, parts: &mut Vec<RawPart>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_directory(base, &path, parts)?;
        } else if let Ok(relative) = path.strip_prefix(base) {
            parts.push(RawPart {
                name: part_name(relative),
                bytes: fs::read(&path)?,
            });
        }
    }
    Ok(())
}

/// Template identifiers are plain directory names; anything that could
/// escape the template root is refused.
fn check_id(template_id: &str) -> Result<(), AssemblyError> {
    let valid = !template_id.is_empty()
        && template_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(AssemblyError::template(template_id, "invalid template identifier"));
    }
    Ok(())
}

/// Package part names always use `/`, whatever the host separator.
fn part_name(path: &Path) -> String {
    path.components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
