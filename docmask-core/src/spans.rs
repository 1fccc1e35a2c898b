// docmask-core/src/spans.rs
//! Normalization of match coordinates into disjoint masking spans.

use serde::Serialize;

/// A half-open character interval `[start, end)` of a logical unit's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl From<(usize, usize)> for Span {
    fn from((start, end): (usize, usize)) -> Self {
        Self { start, end }
    }
}

/// Merges overlapping and touching spans into a sorted set of disjoint spans.
///
/// Spans that merely touch (`next.start == current.end`) are coalesced, so two
/// adjacent matches with no gap become a single masked block.
pub fn merge_spans(mut spans: Vec<Span>) -> Vec<Span> {
    spans.sort_unstable();

    let mut merged: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(current) if span.start <= current.end => {
                current.end = current.end.max(span.end);
            }
            _ => merged.push(span),
        }
    }
    merged
}
