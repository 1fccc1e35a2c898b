// docmask-core/src/masking.rs
//! Length-preserving, fragment-aware masking.
//!
//! Spans address the concatenated text of a logical unit. The masker translates
//! every span into fragment-local slices through the offset map and replaces each
//! character with the mask character unless the exempt policy keeps it. Because
//! one character always becomes one character, offsets computed before masking
//! stay valid for the whole pass, including spans that straddle several fragments.
//!
//! License: MIT OR APACHE 2.0

use serde::{Deserialize, Serialize};

use crate::config::{MaskingConfig, DEFAULT_MASK};
use crate::errors::DocmaskError;
use crate::fragment::{OffsetRange, TextFragment};
use crate::spans::Span;

/// Hyphen and dash characters that separate number groups.
pub const DASHES: [char; 8] = [
    '-', '\u{2010}', '\u{2011}', '\u{2012}', '\u{2013}', '\u{2014}', '\u{2015}', '\u{2212}',
];

/// Which characters inside a span are left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExemptPolicy {
    /// Only the ASCII hyphen.
    Hyphen,
    /// Every hyphen/dash variant.
    Dashes,
    /// Every hyphen/dash variant and all whitespace.
    DashesAndWhitespace,
}

impl ExemptPolicy {
    pub fn is_exempt(&self, c: char) -> bool {
        match self {
            ExemptPolicy::Hyphen => c == '-',
            ExemptPolicy::Dashes => DASHES.contains(&c),
            ExemptPolicy::DashesAndWhitespace => DASHES.contains(&c) || c.is_whitespace(),
        }
    }
}

/// Mask character plus exempt policy for one masking pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskPolicy {
    pub mask_char: char,
    pub exempt: ExemptPolicy,
}

impl Default for MaskPolicy {
    fn default() -> Self {
        Self { mask_char: DEFAULT_MASK, exempt: ExemptPolicy::Hyphen }
    }
}

impl MaskPolicy {
    /// Builds a policy, rejecting mask characters that could satisfy a detection rule.
    pub fn new(mask_char: char, exempt: ExemptPolicy) -> Result<Self, DocmaskError> {
        if mask_char.is_alphanumeric() {
            return Err(DocmaskError::InvalidMask(mask_char));
        }
        Ok(Self { mask_char, exempt })
    }

    /// Builds the policy for a document whose format exempts `format_default`,
    /// unless the configuration overrides the exempt policy.
    pub fn from_config(config: &MaskingConfig, format_default: ExemptPolicy) -> Result<Self, DocmaskError> {
        Self::new(config.mask_char(), config.exempt.unwrap_or(format_default))
    }

    /// Masks a plain string as a single span covering all of it.
    pub fn mask_str(&self, s: &str) -> String {
        s.chars()
            .map(|c| if self.exempt.is_exempt(c) { c } else { self.mask_char })
            .collect()
    }
}

/// Applies merged spans to fragments in place.
///
/// `offsets` must come from [`compute_offsets`](crate::fragment::compute_offsets) on
/// the same fragments, and `spans` must be sorted and disjoint. Only fragments that
/// a span touches are written back. Returns the number of characters replaced.
pub fn apply_masks<F: TextFragment>(
    fragments: &mut [F],
    offsets: &[OffsetRange],
    spans: &[Span],
    policy: &MaskPolicy,
) -> usize {
    let mut buffers: Vec<Option<Vec<char>>> = vec![None; fragments.len()];
    let mut replaced = 0;

    for span in spans {
        let first = offsets.partition_point(|range| range.end <= span.start);
        for range in &offsets[first..] {
            if range.start >= span.end {
                break;
            }
            let local_start = span.start.max(range.start) - range.start;
            let local_end = span.end.min(range.end) - range.start;
            if local_start >= local_end {
                continue;
            }

            let buffer = buffers[range.index]
                .get_or_insert_with(|| fragments[range.index].text().chars().collect());
            for c in &mut buffer[local_start..local_end] {
                if !policy.exempt.is_exempt(*c) && *c != policy.mask_char {
                    *c = policy.mask_char;
                    replaced += 1;
                }
            }
        }
    }

    for (fragment, buffer) in fragments.iter_mut().zip(buffers) {
        if let Some(chars) = buffer {
            fragment.set_text(chars.into_iter().collect());
        }
    }
    replaced
}
