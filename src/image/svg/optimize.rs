//! Structure-preserving minification of inline SVG markup.
//!
//! Elements, attributes and text content are kept as written. Comments,
//! processing instructions, `<metadata>` and inter-element whitespace are
//! dropped, and whitespace runs inside geometry attributes are collapsed.
//! Parsing goes through the `roxmltree` DOM re-exported by usvg.

use std::borrow::Cow;

use thiserror::Error;
use usvg::roxmltree::{self, Document, Node, NodeType};

const SVG_NAMESPACE: &str = r#" xmlns="http://www.w3.org/2000/svg""#;
const XLINK_NAMESPACE: &str = r#" xmlns:xlink="http://www.w3.org/1999/xlink""#;

/// Elements whose whitespace-only text is content.
const TEXT_CONTENT: &[&str] = &["text", "tspan", "textPath", "title", "desc", "style", "script"];

/// Attributes holding whitespace-separated number lists.
const GEOMETRY_ATTRS: &[&str] = &["d", "points", "viewBox", "transform"];

/// Containers that render nothing without attributes or children.
const EMPTY_CONTAINERS: &[&str] = &["g", "defs"];

/// SVG markup that could not be optimized.
#[derive(Debug, Error)]
pub enum SvgError {
    #[error("failed to parse SVG")]
    Parse(#[from] roxmltree::Error),
}

/// Namespace declarations added to the root so the block parses as XML.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Injected {
    default: bool,
    xlink: bool,
}

/// Optimize one `<svg>...</svg>` block, returning minified markup.
///
/// HTML allows inline SVG without namespace declarations, XML does not, so
/// missing ones are added for parsing and left out of the output.
pub fn optimize_svg(markup: &str) -> Result<String, SvgError> {
    let (source, injected) = with_namespaces(markup);
    let doc = Document::parse(&source)?;

    let mut out = String::with_capacity(markup.len());
    write_element(doc.root_element(), &source, injected, &mut out);
    Ok(out)
}

/// Add the SVG (and, when used, xlink) namespace to the root tag if missing.
fn with_namespaces(markup: &str) -> (Cow<'_, str>, Injected) {
    // `<svg` is 4 bytes, ASCII by construction of the caller's pattern
    if markup.len() < 4 || !markup.is_char_boundary(4) {
        return (Cow::Borrowed(markup), Injected::default());
    }
    let open = &markup[..markup.find('>').unwrap_or(markup.len())];
    let injected = Injected {
        default: !open.contains("xmlns="),
        xlink: markup.contains("xlink:") && !open.contains("xmlns:xlink="),
    };
    if injected == Injected::default() {
        return (Cow::Borrowed(markup), injected);
    }

    let mut out = String::with_capacity(markup.len() + SVG_NAMESPACE.len() + XLINK_NAMESPACE.len());
    out.push_str(&markup[..4]);
    if injected.default {
        out.push_str(SVG_NAMESPACE);
    }
    if injected.xlink {
        out.push_str(XLINK_NAMESPACE);
    }
    out.push_str(&markup[4..]);
    (Cow::Owned(out), injected)
}

fn write_element(node: Node<'_, '_>, source: &str, injected: Injected, out: &mut String) {
    let name = qualified_name(node, source);
    out.push('<');
    out.push_str(name);

    let parent = node.parent_element();
    for ns in node.namespaces() {
        let inherited = parent.is_some_and(|p| {
            p.namespaces()
                .any(|n| n.name() == ns.name() && n.uri() == ns.uri())
        });
        let added = parent.is_none()
            && match ns.name() {
                None => injected.default,
                Some("xlink") => injected.xlink,
                Some(_) => false,
            };
        if inherited || added || ns.name() == Some("xml") {
            continue;
        }
        out.push_str(" xmlns");
        if let Some(prefix) = ns.name() {
            out.push(':');
            out.push_str(prefix);
        }
        out.push_str("=\"");
        push_escaped(ns.uri(), out);
        out.push('"');
    }

    for attr in node.attributes() {
        let value = attr.range_value();
        // Quotes are one byte, so the delimiter sits right before the value
        let quote = &source[value.start - 1..value.start];
        out.push(' ');
        out.push_str(&source[attr.range_qname()]);
        out.push('=');
        out.push_str(quote);
        if GEOMETRY_ATTRS.contains(&attr.name()) {
            push_collapsed(&source[value], out);
        } else {
            out.push_str(&source[value]);
        }
        out.push_str(quote);
    }

    out.push('>');
    let body = out.len();
    let keep_whitespace = TEXT_CONTENT.contains(&node.tag_name().name());
    for child in node.children() {
        match child.node_type() {
            NodeType::Element if !is_droppable(child) => {
                write_element(child, source, injected, out);
            }
            NodeType::Text => {
                let text = child.text().unwrap_or_default();
                if keep_whitespace || !text.trim().is_empty() {
                    push_escaped(text, out);
                }
            }
            _ => {}
        }
    }

    if out.len() == body {
        out.pop();
        out.push_str("/>");
    } else {
        out.push_str("</");
        out.push_str(name);
        out.push('>');
    }
}

/// Tag name exactly as written, prefix included.
fn qualified_name<'s>(node: Node<'_, '_>, source: &'s str) -> &'s str {
    let tag = &source[node.range().start + 1..];
    let end = tag
        .find(|c: char| c.is_ascii_whitespace() || c == '/' || c == '>')
        .unwrap_or(tag.len());
    &tag[..end]
}

fn is_droppable(node: Node<'_, '_>) -> bool {
    let name = node.tag_name().name();
    if name == "metadata" {
        return true;
    }
    EMPTY_CONTAINERS.contains(&name)
        && node.attributes().next().is_none()
        && !node.children().any(|c| {
            c.is_element() || (c.is_text() && c.text().is_some_and(|t| !t.trim().is_empty()))
        })
}

fn push_collapsed(value: &str, out: &mut String) {
    for (i, part) in value.split_ascii_whitespace().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(part);
    }
}

fn push_escaped(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}
