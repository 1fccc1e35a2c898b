// docmask-core/src/redaction_match.rs
//! Provides core data structures and utility functions for confirmed matches
//! and PII-safe debug logging within the `docmask-core` library.

use serde::{Serialize, Deserialize};
use log::debug;

use lazy_static::lazy_static;

use crate::spans::Span;

lazy_static! {
    /// A static boolean that is initialized once to determine if PII is allowed in debug logs.
    static ref PII_DEBUG_ALLOWED: bool = {
        std::env::var("DOCMASK_ALLOW_DEBUG_PII")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// A confirmed match over the concatenated text of a logical unit.
///
/// `start` is inclusive and `end` exclusive, both counted in characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RedactionMatch {
    pub rule_name: String,
    pub start: usize,
    pub end: usize,
    pub value: String,
}

impl RedactionMatch {
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }
}

pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    let len = s.chars().count();
    if len <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", len)
    }
}

fn get_loggable_content(sensitive_content: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        sensitive_content.to_string()
    } else {
        redact_sensitive(sensitive_content)
    }
}

pub fn log_confirmed_match_debug(
    module_path: &str,
    rule_name: &str,
    original_sensitive_content: &str,
    start: usize,
    end: usize,
) {
    debug!(
        "{} Confirmed match for rule '{}': '{}' at [{}, {})",
        module_path,
        rule_name,
        get_loggable_content(original_sensitive_content),
        start,
        end
    );
}

pub fn log_rejected_candidate_debug(
    module_path: &str,
    rule_name: &str,
    original_sensitive_content: &str,
    reason: &str,
) {
    debug!(
        "{} Rejected candidate for rule '{}': '{}' ({})",
        module_path,
        rule_name,
        get_loggable_content(original_sensitive_content),
        reason
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_sensitive_short_string() {
        assert_eq!(redact_sensitive("abc"), "[REDACTED]".to_string());
    }

    #[test]
    fn test_redact_sensitive_long_string() {
        assert_eq!(redact_sensitive("010-1234-5678"), "[REDACTED: 13 chars]".to_string());
    }

    #[test]
    fn test_match_span() {
        let m = RedactionMatch { rule_name: "email".into(), start: 3, end: 9, value: "a@b.co".into() };
        assert_eq!(m.span(), Span::new(3, 9));
    }
}
