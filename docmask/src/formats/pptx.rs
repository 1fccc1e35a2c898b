// docmask/src/formats/pptx.rs
//! Presentations: slide paragraphs (`a:p`) made of run texts (`a:t`).

use docmask_core::ExemptPolicy;

use super::{is_numbered_part, DocumentHandler};
use crate::xml::Element;

#[derive(Debug, Clone, Copy, Default)]
pub struct PptxHandler;

impl DocumentHandler for PptxHandler {
    fn is_target_part(&self, name: &str) -> bool {
        is_numbered_part(name, "ppt/slides/", "slide")
    }

    fn is_unit(&self, element: &Element) -> bool {
        element.qname == "a:p"
    }

    fn is_text(&self, element: &Element, parent: Option<&Element>) -> bool {
        element.qname == "a:t" && parent.is_some_and(|p| p.qname == "a:r")
    }

    fn exempt_policy(&self) -> ExemptPolicy {
        ExemptPolicy::Hyphen
    }
}
