//! XML codec for resource documents.
//!
//! Parsing is done with the `quick-xml` pull reader. Rendering is a small
//! pretty-printer: containers are laid out one child per line with four
//! spaces per level, while entries, items, and any element carrying text
//! are written inline so values round-trip exactly. No blank lines are
//! emitted.

use crate::core::{Document, Element, Node};
use crate::error::{ParseError, Result};
use quick_xml::escape::{escape, partial_escape};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::fmt::Display;

/// Indentation unit used when rendering.
pub const INDENT: &str = "    ";

/// Declaration line written at the top of every rendered document.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

fn malformed(path: &str, reason: impl Display) -> ParseError {
    ParseError::Malformed {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}

fn decode_name(path: &str, raw: &[u8]) -> Result<String> {
    Ok(std::str::from_utf8(raw)
        .map_err(|e| malformed(path, e))?
        .to_string())
}

fn element_from(path: &str, start: &BytesStart<'_>) -> Result<Element> {
    let mut element = Element::new(decode_name(path, start.name().as_ref())?);

    for attr in start.attributes() {
        let attr = attr.map_err(|e| malformed(path, e))?;
        let key = decode_name(path, attr.key.as_ref())?;
        let value = attr.unescape_value().map_err(|e| malformed(path, e))?;
        element.attributes.push((key, value.into_owned()));
    }

    Ok(element)
}

/// Parses resource XML into a [`Document`].
///
/// `path` is used only for error messages. The XML declaration, doctype
/// and processing instructions are dropped; comments around the root are
/// kept in the document's prolog and epilog.
///
/// # Errors
///
/// Returns a [`ParseError`] if the text is not well-formed, has no root
/// element, has more than one root element, or has text outside the root.
pub fn parse_document(text: &str, path: &str) -> Result<Document> {
    let mut reader = Reader::from_str(text);

    let mut prolog = Vec::new();
    let mut epilog = Vec::new();
    let mut root: Option<Element> = None;
    let mut stack: Vec<Element> = Vec::new();

    loop {
        let event = reader.read_event().map_err(|e| malformed(path, e))?;
        match event {
            Event::Start(start) => {
                let element = element_from(path, &start)?;
                if stack.is_empty() && root.is_some() {
                    return Err(ParseError::MultipleRoots {
                        path: path.to_string(),
                        name: element.name,
                    }
                    .into());
                }
                stack.push(element);
            }
            Event::Empty(start) => {
                let element = element_from(path, &start)?;
                attach(path, &mut stack, &mut root, element)?;
            }
            Event::End(end) => {
                let Some(element) = stack.pop() else {
                    return Err(malformed(
                        path,
                        format!(
                            "unexpected closing tag </{}>",
                            String::from_utf8_lossy(end.name().as_ref())
                        ),
                    )
                    .into());
                };
                attach(path, &mut stack, &mut root, element)?;
            }
            Event::Text(chars) => {
                let chars = chars.unescape().map_err(|e| malformed(path, e))?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(Node::Text(chars.into_owned())),
                    None if chars.trim().is_empty() => {}
                    None => {
                        return Err(ParseError::StrayText {
                            path: path.to_string(),
                        }
                        .into());
                    }
                }
            }
            Event::CData(data) => {
                let data = std::str::from_utf8(&data).map_err(|e| malformed(path, e))?;
                let Some(parent) = stack.last_mut() else {
                    return Err(ParseError::StrayText {
                        path: path.to_string(),
                    }
                    .into());
                };
                parent.children.push(Node::CData(data.to_string()));
            }
            Event::Comment(comment) => {
                let comment = std::str::from_utf8(&comment)
                    .map_err(|e| malformed(path, e))?
                    .to_string();
                match stack.last_mut() {
                    Some(parent) => parent.children.push(Node::Comment(comment)),
                    None if root.is_none() => prolog.push(comment),
                    None => epilog.push(comment),
                }
            }
            Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
    }

    if let Some(open) = stack.last() {
        return Err(ParseError::Unclosed {
            path: path.to_string(),
            name: open.name.clone(),
        }
        .into());
    }

    let root = root.ok_or_else(|| ParseError::MissingRoot {
        path: path.to_string(),
    })?;

    Ok(Document::from_parts(prolog, root, epilog))
}

/// Places a finished element under its parent, or makes it the root.
fn attach(
    path: &str,
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Node::Element(element));
        return Ok(());
    }

    if root.is_some() {
        return Err(ParseError::MultipleRoots {
            path: path.to_string(),
            name: element.name,
        }
        .into());
    }

    *root = Some(element);
    Ok(())
}

/// Renders a [`Document`] as resource XML.
///
/// The output starts with [`XML_DECLARATION`], indents with [`INDENT`],
/// contains no blank lines, and ends with a single newline.
#[must_use]
pub fn render_document(doc: &Document) -> String {
    let mut out = String::with_capacity(256);
    out.push_str(XML_DECLARATION);
    out.push('\n');

    for comment in doc.prolog() {
        push_comment(&mut out, comment);
        out.push('\n');
    }

    let root = doc.root();
    if root.children.iter().all(Node::is_blank_text) {
        push_open_tag(&mut out, root);
        out.push_str("/>\n");
    } else if root.holds_only_structure() {
        render_block(&mut out, root, 0);
    } else {
        render_element(&mut out, root, 0);
    }

    for comment in doc.epilog() {
        push_comment(&mut out, comment);
        out.push('\n');
    }

    out
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn push_open_tag(out: &mut String, element: &Element) {
    out.push('<');
    out.push_str(&element.name);
    for (key, value) in &element.attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape(value.as_str()));
        out.push('"');
    }
}

fn push_close_tag(out: &mut String, element: &Element) {
    out.push_str("</");
    out.push_str(&element.name);
    out.push('>');
}

fn push_comment(out: &mut String, comment: &str) {
    out.push_str("<!--");
    out.push_str(comment);
    out.push_str("-->");
}

/// Writes `element` on its own line(s) at `depth`.
fn render_element(out: &mut String, element: &Element, depth: usize) {
    push_indent(out, depth);
    if element.is_block() {
        render_block(out, element, depth);
    } else {
        render_inline(out, element);
        out.push('\n');
    }
}

/// Writes a container one child per line. The opening tag's indentation
/// is already in `out`.
fn render_block(out: &mut String, element: &Element, depth: usize) {
    push_open_tag(out, element);
    out.push_str(">\n");
    for child in &element.children {
        match child {
            Node::Element(e) => render_element(out, e, depth + 1),
            Node::Comment(c) => {
                push_indent(out, depth + 1);
                push_comment(out, c);
                out.push('\n');
            }
            // Containers only hold whitespace text.
            Node::Text(_) | Node::CData(_) => {}
        }
    }
    push_indent(out, depth);
    push_close_tag(out, element);
    out.push('\n');
}

/// Writes `element` and its content verbatim, without layout.
fn render_inline(out: &mut String, element: &Element) {
    push_open_tag(out, element);
    if element.children.is_empty() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    for child in &element.children {
        match child {
            Node::Element(e) => render_inline(out, e),
            Node::Text(t) => out.push_str(&partial_escape(t.as_str())),
            Node::CData(c) => {
                out.push_str("<![CDATA[");
                out.push_str(c);
                out.push_str("]]>");
            }
            Node::Comment(c) => push_comment(out, c),
        }
    }
    push_close_tag(out, element);
}
