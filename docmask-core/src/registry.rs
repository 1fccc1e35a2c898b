//! registry.rs - Compiles redaction rules into an immutable rule registry.
//!
//! This module converts a `RedactionConfig` into a `RuleRegistry`: an ordered list
//! of named rules, each a compiled regular expression plus an optional validator.
//! The registry is built once at start-up and is read-only afterwards; it is
//! `Send + Sync`, so engines holding it can be used from several threads.
//!
//! License: MIT OR APACHE 2.0

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use log::{debug, warn};
use regex::{Regex, RegexBuilder};

use crate::config::{RedactionConfig, RedactionRule, ValidationConfig, MAX_PATTERN_LENGTH};
use crate::errors::{DocmaskError, ValidationError};
use crate::validators::{BuiltinValidator, Validate, ValidatorKind};

/// Represents a single compiled rule.
pub struct CompiledRule {
    /// The unique name of the rule.
    pub name: String,
    /// The compiled regular expression used to find candidates.
    pub regex: Regex,
    /// Second-stage confirmation. `None` accepts every candidate.
    pub validator: Option<Arc<dyn Validate>>,
}

impl CompiledRule {
    /// Runs the validator on a candidate. Rules without a validator accept everything.
    pub fn confirm(&self, candidate: &str) -> Result<bool, ValidationError> {
        match &self.validator {
            Some(validator) => validator.validate(candidate),
            None => Ok(true),
        }
    }
}

impl fmt::Debug for CompiledRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledRule")
            .field("name", &self.name)
            .field("pattern", &self.regex.as_str())
            .field("has_validator", &self.validator.is_some())
            .finish()
    }
}

/// The immutable, ordered collection of rules applied to every logical unit.
#[derive(Debug, Default)]
pub struct RuleRegistry {
    /// Rules in configuration order.
    pub rules: Vec<CompiledRule>,
}

impl RuleRegistry {
    /// Compiles every active rule of `config`.
    pub fn from_config(config: &RedactionConfig) -> Result<Self, DocmaskError> {
        compile_rules(config.rules.clone(), &config.validation)
    }

    /// Adds a rule with a caller-supplied validator.
    pub fn with_rule(
        mut self,
        name: impl Into<String>,
        pattern: &str,
        validator: Option<Arc<dyn Validate>>,
    ) -> Result<Self, DocmaskError> {
        let name = name.into();
        let regex = build_regex(&name, pattern)?;
        self.rules.push(CompiledRule { name, regex, validator });
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&CompiledRule> {
        self.rules.iter().find(|r| r.name == name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn build_regex(name: &str, pattern: &str) -> Result<Regex, DocmaskError> {
    if pattern.len() > MAX_PATTERN_LENGTH {
        return Err(DocmaskError::PatternLengthExceeded(
            name.to_string(),
            pattern.len(),
            MAX_PATTERN_LENGTH,
        ));
    }

    RegexBuilder::new(pattern)
        .size_limit(10 * (1 << 20)) // 10 MB limit for compiled regex
        .build()
        .map_err(|e| DocmaskError::RuleCompilationError(name.to_string(), e))
}

/// Compiles a list of `RedactionRule`s into a `RuleRegistry`.
///
/// Disabled rules are skipped. All compilation errors are collected and reported together.
pub fn compile_rules(
    rules_to_compile: Vec<RedactionRule>,
    validation: &ValidationConfig,
) -> Result<RuleRegistry, DocmaskError> {
    debug!("Starting compilation of {} rules.", rules_to_compile.len());

    let mut compiled_rules = Vec::new();
    let mut compilation_errors = Vec::new();

    for rule in rules_to_compile {
        if rule.enabled == Some(false) {
            debug!("Skipping disabled rule '{}'.", &rule.name);
            continue;
        }

        let Some(pattern) = rule.pattern.as_ref() else {
            warn!("Skipping rule '{}' because its pattern is missing.", &rule.name);
            continue;
        };

        let validator: Option<Arc<dyn Validate>> = match rule.validator.as_deref() {
            None => None,
            Some(name) => match ValidatorKind::from_str(name) {
                Ok(kind) => Some(Arc::new(BuiltinValidator::new(kind, *validation))),
                Err(_) => {
                    compilation_errors.push(DocmaskError::UnknownValidator(rule.name.clone(), name.to_string()));
                    continue;
                }
            },
        };

        match build_regex(&rule.name, pattern) {
            Ok(regex) => {
                log::debug!(
                    target: "docmask_core::registry",
                    "Rule '{}' compiled successfully.",
                    &rule.name
                );
                compiled_rules.push(CompiledRule { name: rule.name, regex, validator });
            }
            Err(e) => compilation_errors.push(e),
        }
    }

    if !compilation_errors.is_empty() {
        let error_message = compilation_errors.iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        Err(DocmaskError::Fatal(format!("Failed to compile {} rule(s):\n{}", compilation_errors.len(), error_message)))
    } else {
        debug!(
            "Finished compiling rules. Total compiled: {}.",
            compiled_rules.len()
        );
        Ok(RuleRegistry { rules: compiled_rules })
    }
}
