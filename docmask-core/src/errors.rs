//! errors.rs - Custom error types for the docmask-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `docmask-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DocmaskError {
    #[error("Failed to compile redaction rule '{0}': {1}")]
    RuleCompilationError(String, regex::Error),

    #[error("Rule '{0}': pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("Rule '{0}': unknown validator '{1}'")]
    UnknownValidator(String, String),

    #[error("Mask character '{0}' is not allowed: masked output must not match detection patterns")]
    InvalidMask(char),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}

/// Failure raised by a validator while confirming a single candidate.
///
/// Never aborts a logical unit: the match finder maps it to "reject candidate".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0}")]
    Custom(String),
}
