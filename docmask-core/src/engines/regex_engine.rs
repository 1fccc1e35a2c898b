// docmask-core/src/engines/regex_engine.rs
//! A `RedactionEngine` implementation that uses regular expressions to find
//! candidates and the rule's validator to confirm them.
//! License: MIT OR APACHE 2.0

use anyhow::{Context, Result};

use crate::config::RedactionConfig;
use crate::engine::RedactionEngine;
use crate::redaction_match::{log_confirmed_match_debug, log_rejected_candidate_debug, RedactionMatch};
use crate::registry::RuleRegistry;

/// Converts byte offsets reported by the regex engine into char offsets.
#[derive(Debug)]
struct CharIndex {
    starts: Vec<usize>,
    len: usize,
}

impl CharIndex {
    fn new(text: &str) -> Self {
        Self {
            starts: text.char_indices().map(|(b, _)| b).collect(),
            len: text.len(),
        }
    }

    fn char_offset(&self, byte: usize) -> usize {
        if byte >= self.len {
            return self.starts.len();
        }
        match self.starts.binary_search(&byte) {
            Ok(i) => i,
            Err(i) => i,
        }
    }
}

#[derive(Debug)]
pub struct RegexEngine {
    registry: RuleRegistry,
    config: RedactionConfig,
}

impl RegexEngine {
    pub fn new(config: RedactionConfig) -> Result<Self> {
        let registry = RuleRegistry::from_config(&config)
            .context("Failed to compile redaction rules for RegexEngine")?;
        Ok(Self { registry, config })
    }
}

impl RedactionEngine for RegexEngine {
    fn find_matches(&self, text: &str) -> Vec<RedactionMatch> {
        find_matches(text, &self.registry)
    }

    fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    fn config(&self) -> &RedactionConfig {
        &self.config
    }
}

/// Runs every rule of `registry` over `text` and returns the confirmed matches.
///
/// Candidates rejected by a validator, or whose validator fails, are dropped
/// and logged at debug level. Empty regex matches are ignored. Matches are
/// grouped by rule in registry order.
pub fn find_matches(text: &str, registry: &RuleRegistry) -> Vec<RedactionMatch> {
    if text.is_empty() {
        return Vec::new();
    }

    let index = CharIndex::new(text);
    let mut matches = Vec::new();

    for rule in &registry.rules {
        for candidate in rule.regex.find_iter(text) {
            if candidate.start() == candidate.end() {
                continue;
            }
            let value = candidate.as_str();
            match rule.confirm(value) {
                Ok(true) => {
                    let start = index.char_offset(candidate.start());
                    let end = index.char_offset(candidate.end());
                    log_confirmed_match_debug(module_path!(), &rule.name, value, start, end);
                    matches.push(RedactionMatch {
                        rule_name: rule.name.clone(),
                        start,
                        end,
                        value: value.to_string(),
                    });
                }
                Ok(false) => {
                    log_rejected_candidate_debug(module_path!(), &rule.name, value, "validator returned false");
                }
                Err(e) => {
                    log_rejected_candidate_debug(module_path!(), &rule.name, value, &e.to_string());
                }
            }
        }
    }

    matches
}
