// docmask/src/formats/mod.rs
//! Per-format node extraction.
//!
//! A [`DocumentHandler`] knows, for one container type, which archive parts
//! carry text, which elements are logical units and which are text nodes, which
//! characters masking must keep, and what structural fix-ups a redacted unit
//! needs before it is serialized. Everything else (matching, merging, masking)
//! is shared and lives in `docmask-core`.
//!
//! License: MIT OR APACHE 2.0

pub mod docx;
pub mod hwpx;
pub mod pptx;
pub mod xlsx;

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use docmask_core::ExemptPolicy;
use serde::Serialize;

use crate::xml::{scan_elements, Element, TextNode, XmlError};

/// The container types docmask can process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Docx,
    Xlsx,
    Pptx,
    Hwpx,
}

impl DocumentFormat {
    pub const ALL: [DocumentFormat; 4] = [
        DocumentFormat::Docx,
        DocumentFormat::Xlsx,
        DocumentFormat::Pptx,
        DocumentFormat::Hwpx,
    ];

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Docx => "docx",
            DocumentFormat::Xlsx => "xlsx",
            DocumentFormat::Pptx => "pptx",
            DocumentFormat::Hwpx => "hwpx",
        }
    }

    /// Detects the format from a file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        Self::ALL.into_iter().find(|f| f.extension() == ext)
    }

    pub fn handler(&self) -> &'static dyn DocumentHandler {
        match self {
            DocumentFormat::Docx => &docx::DocxHandler,
            DocumentFormat::Xlsx => &xlsx::XlsxHandler,
            DocumentFormat::Pptx => &pptx::PptxHandler,
            DocumentFormat::Hwpx => &hwpx::HwpxHandler,
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Format-specific knowledge needed to extract and write back fragments.
pub trait DocumentHandler: Send + Sync {
    /// Whether the archive entry `name` is scanned.
    fn is_target_part(&self, name: &str) -> bool;

    /// Selects the parts to scan from all entry names, keeping archive order.
    fn select_parts<'a>(&self, names: &[&'a str]) -> Vec<&'a str> {
        names.iter().copied().filter(|n| self.is_target_part(n)).collect()
    }

    /// Whether `element` is a logical unit (paragraph, string entry, cell).
    fn is_unit(&self, element: &Element) -> bool;

    /// Whether `element`, whose parent is `parent`, is a text node.
    fn is_text(&self, element: &Element, parent: Option<&Element>) -> bool;

    /// Characters kept inside masked spans.
    fn exempt_policy(&self) -> ExemptPolicy;

    /// When a part has no units at all, treat all of its text nodes as one unit.
    fn whole_part_fallback(&self) -> bool {
        false
    }

    /// Structural fix-ups for the text nodes of a unit that was redacted.
    fn finish_unit(&self, _nodes: &mut [TextNode]) {}
}

/// The logical units of one part, each an ordered list of its text nodes.
#[derive(Debug, Default)]
pub struct PartLayout {
    pub units: Vec<Vec<TextNode>>,
}

impl PartLayout {
    /// Scans `source` and groups its text nodes by innermost enclosing unit.
    pub fn extract(source: &str, handler: &dyn DocumentHandler) -> Result<Self, XmlError> {
        let elements = scan_elements(source)?;
        let is_unit: Vec<bool> = elements.iter().map(|e| handler.is_unit(e)).collect();

        let mut grouped: BTreeMap<usize, Vec<TextNode>> = BTreeMap::new();
        let mut orphans: Vec<TextNode> = Vec::new();

        for element in &elements {
            let parent = element.parent.map(|p| &elements[p]);
            if !handler.is_text(element, parent) {
                continue;
            }
            let node = TextNode::from_element(source, element)?;
            match innermost_unit(&elements, &is_unit, element) {
                Some(unit) => grouped.entry(unit).or_default().push(node),
                None => orphans.push(node),
            }
        }

        let has_units = is_unit.iter().any(|u| *u);
        let mut units: Vec<Vec<TextNode>> = grouped.into_values().collect();
        if !has_units && handler.whole_part_fallback() && !orphans.is_empty() {
            units.push(orphans);
        }
        Ok(Self { units })
    }

    pub fn nodes(&self) -> impl Iterator<Item = &TextNode> {
        self.units.iter().flatten()
    }
}

fn innermost_unit(elements: &[Element], is_unit: &[bool], element: &Element) -> Option<usize> {
    let mut current = element.parent;
    while let Some(index) = current {
        if is_unit[index] {
            return Some(index);
        }
        current = elements[index].parent;
    }
    None
}

/// Part names directly inside `dir` (`"word/"`) matching `prefix*.xml`.
pub(crate) fn is_numbered_part(name: &str, dir: &str, prefix: &str) -> bool {
    name.strip_prefix(dir)
        .filter(|file| !file.contains('/'))
        .is_some_and(|file| file.starts_with(prefix) && file.ends_with(".xml"))
}
