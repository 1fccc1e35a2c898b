// docmask/src/formats/hwpx.rs
//! Hangul word-processor documents (OWPML inside a zip container).
//!
//! Section and header parts live under `Contents/`. Paragraphs are any element
//! with local name `p`; text is carried by `t` or `text` elements at any depth.

use docmask_core::ExemptPolicy;

use super::DocumentHandler;
use crate::xml::Element;

const CONTENTS_DIR: &str = "Contents/";

#[derive(Debug, Clone, Copy, Default)]
pub struct HwpxHandler;

fn is_xml(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(".xml")
}

impl DocumentHandler for HwpxHandler {
    fn is_target_part(&self, name: &str) -> bool {
        name.starts_with(CONTENTS_DIR) && is_xml(name)
    }

    /// Falls back to every `.xml` entry when the container has no `Contents/` folder.
    fn select_parts<'a>(&self, names: &[&'a str]) -> Vec<&'a str> {
        if names.iter().any(|n| n.starts_with(CONTENTS_DIR)) {
            names.iter().copied().filter(|n| self.is_target_part(n)).collect()
        } else {
            names.iter().copied().filter(|n| is_xml(n)).collect()
        }
    }

    fn is_unit(&self, element: &Element) -> bool {
        element.local_name() == "p"
    }

    fn is_text(&self, element: &Element, _parent: Option<&Element>) -> bool {
        matches!(element.local_name(), "t" | "text")
    }

    fn exempt_policy(&self) -> ExemptPolicy {
        ExemptPolicy::DashesAndWhitespace
    }

    fn whole_part_fallback(&self) -> bool {
        true
    }
}
