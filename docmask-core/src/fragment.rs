// docmask-core/src/fragment.rs
//! Text fragments and the offset map between a logical unit and its pieces.
//!
//! A logical unit (a paragraph, a shared-string entry, a cell) is usually split
//! into several text-bearing nodes by formatting boundaries. The engine never
//! sees document nodes directly: it works through the [`TextFragment`] capability
//! and addresses characters of the concatenated text through [`OffsetRange`]s.
//!
//! All offsets are counted in `char`s, never bytes.
//!
//! License: MIT OR APACHE 2.0

/// A mutable, text-bearing leaf of a document.
pub trait TextFragment {
    /// The current text of the node.
    fn text(&self) -> &str;

    /// Replaces the node's text. The masker only ever passes text of the same
    /// character length as the current text.
    fn set_text(&mut self, text: String);
}

impl TextFragment for String {
    fn text(&self) -> &str {
        self.as_str()
    }

    fn set_text(&mut self, text: String) {
        *self = text;
    }
}

/// The half-open interval of the concatenated text covered by one fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetRange {
    pub index: usize,
    pub start: usize,
    pub end: usize,
}

impl OffsetRange {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Computes each fragment's range in the concatenated text.
///
/// Ranges are contiguous: the first starts at 0, each starts where the previous
/// one ended, and the last ends at the total character count. Empty fragments
/// get empty ranges and are kept so indices stay aligned with `fragments`.
pub fn compute_offsets<F: TextFragment>(fragments: &[F]) -> Vec<OffsetRange> {
    let mut running = 0;
    fragments
        .iter()
        .enumerate()
        .map(|(index, fragment)| {
            let len = fragment.text().chars().count();
            let range = OffsetRange { index, start: running, end: running + len };
            running += len;
            range
        })
        .collect()
}

/// Joins fragment texts in order into the logical string the rules run against.
pub fn join_fragments<F: TextFragment>(fragments: &[F]) -> String {
    let capacity = fragments.iter().map(|f| f.text().len()).sum();
    let mut joined = String::with_capacity(capacity);
    for fragment in fragments {
        joined.push_str(fragment.text());
    }
    joined
}
