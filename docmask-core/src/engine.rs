// docmask-core/src/engine.rs
//! Defines the core RedactionEngine trait.
//!
//! The `RedactionEngine` trait provides a pluggable interface for detection
//! methods. The unit orchestrator only talks to this trait, so a caller can swap
//! the regex-based engine for a test double or a different detector without
//! touching the masking path.
//!
//! License: MIT OR APACHE 2.0

use crate::config::RedactionConfig;
use crate::redaction_match::RedactionMatch;
use crate::registry::RuleRegistry;

/// A trait that defines the core functionality of a detection engine.
///
/// Engines are immutable after construction and are shared read-only between
/// every logical unit, part and document processed in a run.
pub trait RedactionEngine: Send + Sync {
    /// Finds every confirmed match in the logical string `text`.
    ///
    /// Offsets of the returned matches are counted in characters. Matches from
    /// different rules may overlap; they are not deduplicated here.
    fn find_matches(&self, text: &str) -> Vec<RedactionMatch>;

    /// Returns the compiled rules used by the engine.
    fn registry(&self) -> &RuleRegistry;

    /// Returns the configuration the engine was built from.
    fn config(&self) -> &RedactionConfig;
}
