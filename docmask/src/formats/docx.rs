// docmask/src/formats/docx.rs
//! Word-processing documents: paragraphs (`w:p`) made of run texts (`w:t`).

use docmask_core::{ExemptPolicy, TextFragment};

use super::{is_numbered_part, DocumentHandler};
use crate::xml::{Element, TextNode};

const FIXED_PARTS: [&str; 4] = [
    "word/document.xml",
    "word/comments.xml",
    "word/footnotes.xml",
    "word/endnotes.xml",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct DocxHandler;

impl DocumentHandler for DocxHandler {
    fn is_target_part(&self, name: &str) -> bool {
        FIXED_PARTS.contains(&name)
            || is_numbered_part(name, "word/", "header")
            || is_numbered_part(name, "word/", "footer")
    }

    fn is_unit(&self, element: &Element) -> bool {
        element.qname == "w:p"
    }

    fn is_text(&self, element: &Element, parent: Option<&Element>) -> bool {
        element.qname == "w:t" && parent.is_some_and(|p| p.qname == "w:r")
    }

    fn exempt_policy(&self) -> ExemptPolicy {
        ExemptPolicy::DashesAndWhitespace
    }

    /// Word drops empty `w:t` elements and trims unmarked edge spaces, so every
    /// node of a redacted paragraph keeps at least one character and gets
    /// `xml:space="preserve"` when its edges are significant.
    fn finish_unit(&self, nodes: &mut [TextNode]) {
        for node in nodes {
            if node.text().is_empty() {
                node.set_text(" ".to_string());
            }
            let text = node.text();
            if text.starts_with(' ') || text.ends_with(' ') || text.contains('\u{a0}') {
                node.mark_preserve_space();
            }
        }
    }
}
