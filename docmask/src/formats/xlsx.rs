// docmask/src/formats/xlsx.rs
//! Spreadsheets: shared-string entries (`si`) and inline-string cells (`is`).
//!
//! Cells that reference the shared string table are covered by masking the
//! table itself, so worksheets only contribute their inline strings.

use docmask_core::ExemptPolicy;

use super::{is_numbered_part, DocumentHandler};
use crate::xml::Element;

#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxHandler;

impl DocumentHandler for XlsxHandler {
    fn is_target_part(&self, name: &str) -> bool {
        name == "xl/sharedStrings.xml" || is_numbered_part(name, "xl/worksheets/", "sheet")
    }

    fn is_unit(&self, element: &Element) -> bool {
        matches!(element.local_name(), "si" | "is")
    }

    fn is_text(&self, element: &Element, parent: Option<&Element>) -> bool {
        element.local_name() == "t"
            && parent.is_some_and(|p| matches!(p.local_name(), "r" | "si" | "is"))
    }

    fn exempt_policy(&self) -> ExemptPolicy {
        ExemptPolicy::Hyphen
    }
}
