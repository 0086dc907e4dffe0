//! Placeholder markup used inside template XML parts.
//!
//! - `{{name}}` is replaced by the XML-escaped value of `name`.
//! - `{{#name}} ... {{/name}}` repeats its body once per scope supplied for
//!   `name`; zero scopes drop the body entirely.
//!
//! A part is tokenized once when the template is loaded. Rendering is a
//! single walk over the parsed nodes.

use std::collections::HashMap;

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MarkupError {
    #[error("closing {{{{/{0}}}}} without a matching opening tag")]
    UnexpectedClose(String),
    #[error("section {{{{#{open}}}}} closed by {{{{/{close}}}}}")]
    MismatchedClose { open: String, close: String },
    #[error("section {{{{#{0}}}}} is never closed")]
    Unclosed(String),
    #[error("sections cannot be nested ({{{{#{inner}}}}} inside {{{{#{outer}}}}})")]
    Nested { outer: String, inner: String },
    #[error("unknown field {{{{{0}}}}}")]
    UnknownField(String),
    #[error("unknown section {{{{#{0}}}}}")]
    UnknownSection(String),
    #[error("invalid token pattern: {0}")]
    Pattern(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Field(String),
    Section { name: String, body: Vec<Node> },
}

/// Field names a template may reference: the global set, plus per-section
/// names that are only visible inside that section.
pub struct Schema<'a> {
    pub fields: &'a [&'a str],
    pub sections: &'a [(&'a str, &'a [&'a str])],
}

pub type Fields = HashMap<&'static str, String>;

/// Values for one render: global fields and the scopes of each section.
#[derive(Debug, Default)]
pub struct RenderData {
    pub fields: Fields,
    pub sections: HashMap<&'static str, Vec<Fields>>,
}

/// Splits `source` into text, field and section nodes.
///
/// # Returns
/// - `Ok(Vec<Node>)` on success.
/// - `Err(MarkupError)` for unmatched, unclosed or nested sections.
pub fn parse(source: &str) -> Result<Vec<Node>, MarkupError> {
    let token = Regex::new(r"\{\{([#/]?)([a-z_]+)\}\}")
        .map_err(|e| MarkupError::Pattern(e.to_string()))?;

    let mut open: Vec<(String, Vec<Node>)> = Vec::new();
    let mut current: Vec<Node> = Vec::new();
    let mut last = 0;

    for caps in token.captures_iter(source) {
        let (Some(whole), Some(kind), Some(name)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        if whole.start() > last {
            current.push(Node::Text(source[last..whole.start()].to_string()));
        }
        last = whole.end();
        let name = name.as_str().to_string();

        match kind.as_str() {
            "#" => {
                if let Some((outer, _)) = open.last() {
                    return Err(MarkupError::Nested {
                        outer: outer.clone(),
                        inner: name,
                    });
                }
                open.push((name, std::mem::take(&mut current)));
            }
            "/" => {
                let (opened, parent) = open
                    .pop()
                    .ok_or_else(|| MarkupError::UnexpectedClose(name.clone()))?;
                if opened != name {
                    return Err(MarkupError::MismatchedClose {
                        open: opened,
                        close: name,
                    });
                }
                let body = std::mem::replace(&mut current, parent);
                current.push(Node::Section { name, body });
            }
            _ => current.push(Node::Field(name)),
        }
    }

    if let Some((name, _)) = open.pop() {
        return Err(MarkupError::Unclosed(name));
    }
    if last < source.len() {
        current.push(Node::Text(source[last..].to_string()));
    }
    Ok(current)
}

/// Rejects fields and sections the schema does not know about.
pub fn check(nodes: &[Node], schema: &Schema) -> Result<(), MarkupError> {
    for node in nodes {
        match node {
            Node::Text(_) => {}
            Node::Field(name) => {
                if !schema.fields.contains(&name.as_str()) {
                    return Err(MarkupError::UnknownField(name.clone()));
                }
            }
            Node::Section { name, body } => {
                let (_, local) = schema
                    .sections
                    .iter()
                    .find(|(section, _)| *section == name.as_str())
                    .ok_or_else(|| MarkupError::UnknownSection(name.clone()))?;
                for inner in body {
                    if let Node::Field(field) = inner {
                        if !local.contains(&field.as_str()) && !schema.fields.contains(&field.as_str()) {
                            return Err(MarkupError::UnknownField(field.clone()));
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

/// Whether a top-level section called `name` appears in `nodes`.
pub fn has_section(nodes: &[Node], name: &str) -> bool {
    nodes
        .iter()
        .any(|node| matches!(node, Node::Section { name: section, .. } if section == name))
}

/// Appends the rendered `nodes` to `out`. Section fields resolve against
/// their scope first, then the globals.
pub fn render(nodes: &[Node], data: &RenderData, out: &mut String) -> Result<(), MarkupError> {
    render_scoped(nodes, data, None, out)
}

fn render_scoped(
    nodes: &[Node],
    data: &RenderData,
    local: Option<&Fields>,
    out: &mut String,
) -> Result<(), MarkupError> {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Field(name) => {
                let value = local
                    .and_then(|fields| fields.get(name.as_str()))
                    .or_else(|| data.fields.get(name.as_str()))
                    .ok_or_else(|| MarkupError::UnknownField(name.clone()))?;
                push_escaped(out, value);
            }
            Node::Section { name, body } => {
                let scopes = data
                    .sections
                    .get(name.as_str())
                    .ok_or_else(|| MarkupError::UnknownSection(name.clone()))?;
                for scope in scopes {
                    render_scoped(body, data, Some(scope), out)?;
                }
            }
        }
    }
    Ok(())
}

fn push_escaped(out: &mut String, value: &str) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
}
