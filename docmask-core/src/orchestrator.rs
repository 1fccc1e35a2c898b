// docmask-core/src/orchestrator.rs
//! Per-unit redaction: join fragments, find matches, merge spans, mask.
//!
//! A logical unit is processed to completion before the caller moves on. Only
//! the fragments passed in are read or written, so units that share a document
//! tree can be processed one after another, or on different workers, without
//! coordination beyond a shared read-only engine.
//!
//! License: MIT OR APACHE 2.0

use log::trace;

use crate::config::RedactionSummary;
use crate::engine::RedactionEngine;
use crate::fragment::{compute_offsets, join_fragments, TextFragment};
use crate::masking::{apply_masks, MaskPolicy};
use crate::redaction_match::RedactionMatch;
use crate::spans::{merge_spans, Span};

/// What happened to one logical unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitReport {
    /// Merged spans that were masked.
    pub spans: Vec<Span>,
    /// Confirmed matches before merging, in rule order.
    pub matches: Vec<RedactionMatch>,
}

impl UnitReport {
    pub fn span_count(&self) -> usize {
        self.spans.len()
    }

    /// Per-rule match counts for this unit.
    pub fn summary(&self) -> RedactionSummary {
        let mut summary = RedactionSummary::default();
        for m in &self.matches {
            summary.record(&m.rule_name);
        }
        summary
    }
}

/// Redacts one logical unit in place and reports spans and matches.
///
/// Fragments are left untouched when nothing is confirmed.
pub fn redact_unit_detailed<F: TextFragment>(
    engine: &dyn RedactionEngine,
    fragments: &mut [F],
    policy: &MaskPolicy,
) -> UnitReport {
    let text = join_fragments(fragments);
    if text.is_empty() {
        return UnitReport::default();
    }

    let matches = engine.find_matches(&text);
    let spans = merge_spans(matches.iter().map(RedactionMatch::span).collect());
    if spans.is_empty() {
        return UnitReport::default();
    }

    let offsets = compute_offsets(fragments);
    let replaced = apply_masks(fragments, &offsets, &spans, policy);
    trace!(
        "Masked {} span(s), {} char(s) across {} fragment(s).",
        spans.len(),
        replaced,
        fragments.len()
    );

    UnitReport { spans, matches }
}

/// Redacts one logical unit in place and returns the number of merged spans applied.
pub fn redact_unit<F: TextFragment>(
    engine: &dyn RedactionEngine,
    fragments: &mut [F],
    policy: &MaskPolicy,
) -> usize {
    redact_unit_detailed(engine, fragments, policy).span_count()
}

/// Detects without masking: the report a redaction would produce.
pub fn scan_unit<F: TextFragment>(engine: &dyn RedactionEngine, fragments: &[F]) -> UnitReport {
    let text = join_fragments(fragments);
    if text.is_empty() {
        return UnitReport::default();
    }
    let matches = engine.find_matches(&text);
    let spans = merge_spans(matches.iter().map(RedactionMatch::span).collect());
    UnitReport { spans, matches }
}
