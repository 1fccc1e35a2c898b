// docmask/src/report.rs
//! Per-document outcome of a redact or scan run.

use std::collections::BTreeMap;
use std::path::PathBuf;

use docmask_core::RedactionSummary;
use serde::Serialize;

use crate::formats::DocumentFormat;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentReport {
    pub input: PathBuf,
    /// `None` for scans.
    pub output: Option<PathBuf>,
    pub format: DocumentFormat,
    pub parts_scanned: usize,
    pub parts_changed: usize,
    /// Parts that could not be decoded or scanned and were copied unchanged.
    pub parts_skipped: usize,
    /// Merged spans masked (or, for scans, that would be masked).
    pub spans: usize,
    /// Confirmed matches per rule, before merging.
    pub rule_counts: BTreeMap<String, usize>,
}

impl DocumentReport {
    pub fn new(input: PathBuf, output: Option<PathBuf>, format: DocumentFormat) -> Self {
        Self {
            input,
            output,
            format,
            parts_scanned: 0,
            parts_changed: 0,
            parts_skipped: 0,
            spans: 0,
            rule_counts: BTreeMap::new(),
        }
    }

    pub fn absorb_summary(&mut self, summary: &RedactionSummary) {
        for (rule, count) in &summary.rule_counts {
            *self.rule_counts.entry(rule.clone()).or_default() += count;
        }
    }

    pub fn total_matches(&self) -> usize {
        self.rule_counts.values().sum()
    }
}

/// Per-rule totals across several documents.
pub fn aggregate_rule_counts<'a, I>(reports: I) -> BTreeMap<String, usize>
where
    I: IntoIterator<Item = &'a DocumentReport>,
{
    let mut totals = BTreeMap::new();
    for report in reports {
        for (rule, count) in &report.rule_counts {
            *totals.entry(rule.clone()).or_default() += count;
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregates_counts_across_reports() {
        let mut a = DocumentReport::new("a.docx".into(), None, DocumentFormat::Docx);
        let mut summary = RedactionSummary::default();
        summary.record("email");
        summary.record("card");
        a.absorb_summary(&summary);
        let mut b = DocumentReport::new("b.xlsx".into(), None, DocumentFormat::Xlsx);
        b.absorb_summary(&summary);

        let totals = aggregate_rule_counts([&a, &b]);
        assert_eq!(totals.get("email"), Some(&2));
        assert_eq!(a.total_matches(), 2);
    }

    #[test]
    fn serializes_format_in_lowercase() {
        let report = DocumentReport::new("a.hwpx".into(), None, DocumentFormat::Hwpx);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains(r#""format":"hwpx""#));
        assert!(json.contains(r#""output":null"#));
    }
}
