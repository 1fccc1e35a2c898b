// docmask/src/xml.rs
//! Minimal, lossless XML scanning for text-bearing nodes.
//!
//! Office parts are rewritten byte-for-byte except for the text nodes that
//! masking actually changed. Instead of building and re-serializing a DOM, the
//! scanner records the byte ranges of every start tag and of the character data
//! that immediately follows it, CDATA sections included. Rewriting splices new text (and, when needed, a
//! new start tag) into those ranges and copies everything else verbatim.
//!
//! License: MIT OR APACHE 2.0

use std::ops::Range;

use docmask_core::TextFragment;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Comments, processing instructions, CDATA, declarations, and element tags.
static MARKUP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?s)<!--.*?-->",
        r"|<\?.*?\?>",
        r"|<!\[CDATA\[.*?\]\]>",
        r"|<![A-Za-z][^>]*>",
        r#"|<(/?)([A-Za-z_][\w.\-]*(?::[A-Za-z_][\w.\-]*)?)((?:\s+[^\s=/>]+\s*=\s*(?:"[^"]*"|'[^']*'))*)\s*(/?)>"#,
    ))
    .expect("static markup regex")
});

const CDATA_OPEN: &str = "<![CDATA[";
const CDATA_CLOSE: &str = "]]>";

static XML_SPACE_ATTR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"xml:space\s*=\s*(?:"[^"]*"|'[^']*')"#).expect("static xml:space regex")
});

/// Reasons a part cannot be scanned safely.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum XmlError {
    #[error("stray '<' at byte {0}")]
    StrayMarkup(usize),

    #[error("closing tag </{found}> at byte {offset} does not match <{expected}>")]
    MismatchedTag { expected: String, found: String, offset: usize },

    #[error("closing tag </{0}> without an open element")]
    UnexpectedClose(String),

    #[error("element <{0}> is never closed")]
    Unclosed(String),

    #[error("unknown or malformed entity reference '{0}'")]
    BadEntity(String),
}

/// One element as seen by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Qualified name, prefix included (`w:t`).
    pub qname: String,
    /// Index of the enclosing element.
    pub parent: Option<usize>,
    /// Byte range of the start tag (or of the whole self-closing tag).
    pub tag: Range<usize>,
    /// Byte range of the character data right after the start tag.
    pub content: Range<usize>,
    pub self_closing: bool,
}

impl Element {
    pub fn local_name(&self) -> &str {
        local_name(&self.qname)
    }
}

pub fn local_name(qname: &str) -> &str {
    qname.rsplit(':').next().unwrap_or(qname)
}

/// Scans `source` and returns its elements in document order.
pub fn scan_elements(source: &str) -> Result<Vec<Element>, XmlError> {
    let mut elements: Vec<Element> = Vec::new();
    let mut stack: Vec<usize> = Vec::new();
    let mut cursor = 0;
    // Element whose character data ends at the next markup.
    let mut pending: Option<usize> = None;

    for caps in MARKUP.captures_iter(source) {
        let Some(whole) = caps.get(0) else { continue };
        if let Some(pos) = source[cursor..whole.start()].find('<') {
            return Err(XmlError::StrayMarkup(cursor + pos));
        }
        cursor = whole.end();
        if whole.as_str().starts_with(CDATA_OPEN) {
            // CDATA sections belong to the surrounding character data.
            continue;
        }
        if let Some(open) = pending.take() {
            elements[open].content.end = whole.start();
        }

        let Some(name) = caps.get(2) else { continue };
        let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
        let self_closing = caps.get(4).is_some_and(|m| !m.as_str().is_empty());

        if closing {
            let open = stack.pop().ok_or_else(|| XmlError::UnexpectedClose(name.as_str().to_string()))?;
            if elements[open].qname != name.as_str() {
                return Err(XmlError::MismatchedTag {
                    expected: elements[open].qname.clone(),
                    found: name.as_str().to_string(),
                    offset: whole.start(),
                });
            }
            continue;
        }

        let index = elements.len();
        elements.push(Element {
            qname: name.as_str().to_string(),
            parent: stack.last().copied(),
            tag: whole.range(),
            content: whole.end()..whole.end(),
            self_closing,
        });
        if !self_closing {
            stack.push(index);
            pending = Some(index);
        }
    }

    if let Some(pos) = source[cursor..].find('<') {
        return Err(XmlError::StrayMarkup(cursor + pos));
    }
    if let Some(open) = stack.pop() {
        return Err(XmlError::Unclosed(elements[open].qname.clone()));
    }
    Ok(elements)
}

/// Decodes the five predefined entities and numeric character references.
pub fn unescape(raw: &str) -> Result<String, XmlError> {
    if !raw.contains('&') {
        return Ok(raw.to_string());
    }
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp..];
        let semi = after.find(';').ok_or_else(|| XmlError::BadEntity(after.chars().take(12).collect()))?;
        let entity = &after[1..semi];
        let decoded = match entity {
            "lt" => '<',
            "gt" => '>',
            "amp" => '&',
            "quot" => '"',
            "apos" => '\'',
            _ => {
                let code = if let Some(hex) = entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
                    u32::from_str_radix(hex, 16).ok()
                } else if let Some(dec) = entity.strip_prefix('#') {
                    dec.parse::<u32>().ok()
                } else {
                    None
                };
                code.and_then(char::from_u32)
                    .ok_or_else(|| XmlError::BadEntity(format!("&{};", entity)))?
            }
        };
        out.push(decoded);
        rest = &after[semi + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

/// Decodes character data that may mix escaped text and CDATA sections.
pub fn decode_character_data(raw: &str) -> Result<String, XmlError> {
    if !raw.contains(CDATA_OPEN) {
        return unescape(raw);
    }
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(open) = rest.find(CDATA_OPEN) {
        out.push_str(&unescape(&rest[..open])?);
        let body = &rest[open + CDATA_OPEN.len()..];
        let close = body.find(CDATA_CLOSE).ok_or_else(|| XmlError::StrayMarkup(open))?;
        out.push_str(&body[..close]);
        rest = &body[close + CDATA_CLOSE.len()..];
    }
    out.push_str(&unescape(rest)?);
    Ok(out)
}

/// Escapes character data for element content.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// A text-bearing element of a part, exposed to the engine as a fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextNode {
    pub qname: String,
    pub tag: Range<usize>,
    pub content: Range<usize>,
    pub self_closing: bool,
    original: String,
    text: String,
    preserve_space: bool,
}

impl TextNode {
    pub fn from_element(source: &str, element: &Element) -> Result<Self, XmlError> {
        let original = decode_character_data(&source[element.content.clone()])?;
        Ok(Self {
            qname: element.qname.clone(),
            tag: element.tag.clone(),
            content: element.content.clone(),
            self_closing: element.self_closing,
            text: original.clone(),
            original,
            preserve_space: false,
        })
    }

    /// Requests `xml:space="preserve"` on this node when the part is rewritten.
    pub fn mark_preserve_space(&mut self) {
        self.preserve_space = true;
    }

    pub fn preserves_space(&self) -> bool {
        self.preserve_space
    }

    pub fn is_modified(&self) -> bool {
        self.preserve_space || self.text != self.original
    }

    pub fn original_text(&self) -> &str {
        &self.original
    }

    fn rewritten_tag(&self, source: &str) -> String {
        let tag = &source[self.tag.clone()];
        let mut tag = if self.preserve_space {
            if XML_SPACE_ATTR.is_match(tag) {
                XML_SPACE_ATTR.replace(tag, r#"xml:space="preserve""#).into_owned()
            } else {
                let body_end = if self.self_closing { tag.len() - 2 } else { tag.len() - 1 };
                let body = tag[..body_end].trim_end();
                format!(r#"{} xml:space="preserve"{}"#, body, &tag[body_end..])
            }
        } else {
            tag.to_string()
        };
        if self.self_closing && !self.text.is_empty() {
            let body = tag[..tag.len() - 2].trim_end().to_string();
            tag = format!("{}>", body);
        }
        tag
    }
}

impl TextFragment for TextNode {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: String) {
        self.text = text;
    }
}

/// Rebuilds `source` with every modified node spliced in.
///
/// Nodes must come from [`scan_elements`] on the same `source`.
pub fn rewrite<'a, I>(source: &str, nodes: I) -> String
where
    I: IntoIterator<Item = &'a TextNode>,
{
    let mut edits: Vec<&TextNode> = nodes.into_iter().filter(|n| n.is_modified()).collect();
    edits.sort_by_key(|n| n.tag.start);

    let mut out = String::with_capacity(source.len() + 64);
    let mut cursor = 0;
    for node in edits {
        out.push_str(&source[cursor..node.tag.start]);
        out.push_str(&node.rewritten_tag(source));
        if node.self_closing {
            if !node.text.is_empty() {
                out.push_str(&escape_text(&node.text));
                out.push_str(&format!("</{}>", node.qname));
            }
            cursor = node.tag.end;
        } else {
            out.push_str(&escape_text(&node.text));
            cursor = node.content.end;
        }
    }
    out.push_str(&source[cursor..]);
    out
}
