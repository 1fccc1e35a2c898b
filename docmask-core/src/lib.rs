// docmask-core/src/lib.rs
//! # docmask Core Library
//!
//! `docmask-core` provides the platform-independent logic for detecting and masking
//! personal data in text that a document splits across many formatting fragments.
//! It defines the detection rules and their validators, compiles them into an immutable
//! registry, and implements the fragment-aware redaction of one logical unit
//! (a paragraph, a shared-string entry, a cell).
//!
//! The library performs no I/O on documents. Callers extract the text nodes of each
//! unit, hand them over as [`TextFragment`]s, and write the mutated nodes back.
//!
//! ## Modules
//!
//! * `config`: Defines `RedactionRule`s, validator options and masking settings.
//! * `validators`: Second-stage confirmation of regex candidates.
//! * `registry`: Compiles rules into the shared `RuleRegistry`.
//! * `engine` / `engines`: The `RedactionEngine` trait and its regex implementation.
//! * `spans`: Interval merging of confirmed matches.
//! * `fragment`: The `TextFragment` capability and the offset map.
//! * `masking`: Length-preserving masking across fragment boundaries.
//! * `orchestrator`: Wires the above together for one logical unit.
//! * `headless`: One-shot helpers for plain strings.
//!
//! ## Usage Example
//!
//! ```rust
//! use docmask_core::{redact_unit, MaskPolicy, RedactionConfig, RegexEngine};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let engine = RegexEngine::new(RedactionConfig::load_default_rules()?)?;
//!
//!     // One phone number split over two formatting runs.
//!     let mut fragments = vec!["01012".to_string(), "345678".to_string()];
//!     let spans = redact_unit(&engine, &mut fragments, &MaskPolicy::default());
//!
//!     assert_eq!(spans, 1);
//!     assert_eq!(fragments, vec!["*****", "******"]);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Configuration loading uses `anyhow::Error`; rule compilation and mask validation
//! report [`DocmaskError`]. Validator failures never surface: they reject the single
//! candidate that caused them.
//!
//! ---
//! License: MIT OR APACHE 2.0

pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod fragment;
pub mod headless;
pub mod masking;
pub mod orchestrator;
pub mod redaction_match;
pub mod registry;
pub mod spans;
pub mod validators;

/// Re-exports the public configuration types and functions for managing redaction rules.
pub use config::{
    merge_rules,
    MaskingConfig,
    RedactionConfig,
    RedactionRule,
    RedactionSummary,
    ValidationConfig,
    DEFAULT_MASK,
    MAX_PATTERN_LENGTH,
};

/// Re-exports the custom error types for clear error reporting.
pub use errors::{DocmaskError, ValidationError};

/// Re-exports the engine trait and its regex implementation.
pub use engine::RedactionEngine;
pub use engines::regex_engine::{find_matches, RegexEngine};

pub use fragment::{compute_offsets, join_fragments, OffsetRange, TextFragment};
pub use masking::{apply_masks, ExemptPolicy, MaskPolicy, DASHES};
pub use orchestrator::{redact_unit, redact_unit_detailed, scan_unit, UnitReport};
pub use redaction_match::{redact_sensitive, RedactionMatch};
pub use registry::{compile_rules, CompiledRule, RuleRegistry};
pub use spans::{merge_spans, Span};
pub use validators::{BuiltinValidator, Validate, ValidatorKind};

pub use headless::headless_mask_string;
