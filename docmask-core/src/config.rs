//! Configuration management for `docmask-core`.
//!
//! This module defines the core data structures for detection rules, validator
//! options and masking settings. It handles deserialization of YAML configurations
//! and provides utilities for loading, merging, and validating these configs.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::str::FromStr;
use log::{debug, info, warn};
use regex::Regex;

use crate::masking::ExemptPolicy;
use crate::validators::ValidatorKind;

/// Maximum allowed length for a regex pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// Mask character used when none (or an empty string) is configured.
pub const DEFAULT_MASK: char = '*';

/// Represents a single detection rule: a regex plus an optional second-stage validator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RedactionRule {
    /// Unique identifier for the rule (e.g., "phone_mobile").
    pub name: String,
    /// Human-readable description of what the rule targets.
    pub description: Option<String>,
    /// The regex pattern string.
    pub pattern: Option<String>,
    /// Name of the built-in validator confirming each candidate. `None` accepts every candidate.
    pub validator: Option<String>,
    /// Explicit override for enabling/disabling the rule.
    pub enabled: Option<bool>,
    /// If true, the rule is disabled unless explicitly enabled.
    pub opt_in: bool,
    /// Severity level (e.g., "high", "medium").
    pub severity: Option<String>,
    /// Metadata tags for categorization.
    pub tags: Option<Vec<String>>,
}

/// Options consumed by the built-in validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Verify the national ID check digit in addition to the birth date.
    pub rrn_checksum: bool,
    /// Require card numbers to pass the Luhn checksum.
    pub card_luhn: bool,
    /// Require card numbers to start with a known issuer range.
    pub card_iin: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            rrn_checksum: true,
            card_luhn: true,
            card_iin: true,
        }
    }
}

/// How confirmed spans are rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MaskingConfig {
    /// Mask string; only its first character is used.
    pub mask: String,
    /// Overrides every document format's default exempt policy when set.
    pub exempt: Option<ExemptPolicy>,
}

impl Default for MaskingConfig {
    fn default() -> Self {
        Self {
            mask: DEFAULT_MASK.to_string(),
            exempt: None,
        }
    }
}

impl MaskingConfig {
    /// The effective mask character: the first character of `mask`, or `*` when empty.
    pub fn mask_char(&self) -> char {
        self.mask.chars().next().unwrap_or(DEFAULT_MASK)
    }
}

/// Represents the top-level configuration structure for docmask.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct RedactionConfig {
    /// The detection rules.
    pub rules: Vec<RedactionRule>,
    /// Validator options.
    #[serde(default)]
    pub validation: ValidationConfig,
    /// Masking settings.
    #[serde(default)]
    pub masking: MaskingConfig,
}

/// Per-rule count of confirmed matches, ordered by rule name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RedactionSummary {
    pub rule_counts: BTreeMap<String, usize>,
}

impl RedactionSummary {
    pub fn record(&mut self, rule_name: &str) {
        *self.rule_counts.entry(rule_name.to_string()).or_default() += 1;
    }

    pub fn absorb(&mut self, other: &RedactionSummary) {
        for (name, count) in &other.rule_counts {
            *self.rule_counts.entry(name.clone()).or_default() += count;
        }
    }

    pub fn total(&self) -> usize {
        self.rule_counts.values().sum()
    }
}

impl RedactionConfig {
    /// Loads rules from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading custom rules from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: RedactionConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        validate_rules(&config.rules)?;
        info!("Loaded {} rules from file {}.", config.rules.len(), path.display());

        Ok(config)
    }

    /// Loads the default rules from the embedded configuration.
    pub fn load_default_rules() -> Result<Self> {
        debug!("Loading default rules from embedded string...");
        let default_yaml = include_str!("../config/default_rules.yaml");
        let config: RedactionConfig = serde_yml::from_str(default_yaml)
            .context("Failed to parse default rules")?;

        debug!("Loaded {} default rules.", config.rules.len());
        Ok(config)
    }

    /// Filters active rules based on enable/disable lists provided via CLI.
    pub fn set_active_rules(&mut self, enable_rules: &[String], disable_rules: &[String]) {
        let enable_set: HashSet<&str> = enable_rules.iter().map(String::as_str).collect();
        let disable_set: HashSet<&str> = disable_rules.iter().map(String::as_str).collect();

        debug!("Initial rules count before filtering: {}", self.rules.len());

        let all_rule_names: HashSet<&str> = self.rules.iter().map(|r| r.name.as_str()).collect();

        for rule_name in enable_set.difference(&all_rule_names) {
            warn!("Rule '{}' in `enable_rules` list does not exist.", rule_name);
        }

        for rule_name in disable_set.difference(&all_rule_names) {
            warn!("Rule '{}' in `disable_rules` list does not exist.", rule_name);
        }

        self.rules.retain(|rule| {
            let rule_name_str = rule.name.as_str();
            !disable_set.contains(rule_name_str)
                && rule.enabled != Some(false)
                && (!rule.opt_in || enable_set.contains(rule_name_str))
        });

        debug!("Final active rules count after filtering: {}", self.rules.len());
    }
}

/// Merges user-defined rules, validator options and masking settings with defaults.
///
/// User rules replace default rules of the same name; the user's `validation`
/// and `masking` sections replace the defaults wholesale.
pub fn merge_rules(
    default_config: RedactionConfig,
    user_config: Option<RedactionConfig>,
) -> RedactionConfig {
    debug!("merge_rules called. Initial default rules count: {}", default_config.rules.len());

    let Some(user_cfg) = user_config else {
        return default_config;
    };

    debug!("User config provided. Merging {} user rules.", user_cfg.rules.len());
    let mut final_rules = default_config.rules;
    for user_rule in user_cfg.rules {
        match final_rules.iter_mut().find(|r| r.name == user_rule.name) {
            Some(existing) => *existing = user_rule,
            None => final_rules.push(user_rule),
        }
    }

    debug!("Final total rules after merge: {}", final_rules.len());

    RedactionConfig {
        rules: final_rules,
        validation: user_cfg.validation,
        masking: user_cfg.masking,
    }
}

/// Validates rule integrity (names, regex compilation, validator names).
fn validate_rules(rules: &[RedactionRule]) -> Result<()> {
    let mut rule_names = HashSet::new();
    let mut errors = Vec::new();

    for rule in rules {
        if rule.name.is_empty() {
            errors.push("A rule has an empty `name` field.".to_string());
        } else if !rule_names.insert(rule.name.clone()) {
            errors.push(format!("Duplicate rule name found: '{}'.", rule.name));
        }

        let pattern = match &rule.pattern {
            Some(p) => p,
            None => {
                errors.push(format!("Rule '{}' is missing the `pattern` field.", rule.name));
                continue;
            }
        };

        if pattern.is_empty() {
            errors.push(format!("Rule '{}' has an empty `pattern` field.", rule.name));
        }

        if pattern.len() > MAX_PATTERN_LENGTH {
            errors.push(format!(
                "Rule '{}': pattern length ({}) exceeds maximum allowed ({}).",
                rule.name,
                pattern.len(),
                MAX_PATTERN_LENGTH
            ));
        }

        if let Err(e) = Regex::new(pattern) {
            errors.push(format!("Rule '{}' has an invalid regex pattern: {}", rule.name, e));
        }

        if let Some(validator) = &rule.validator {
            if ValidatorKind::from_str(validator).is_err() {
                errors.push(format!("Rule '{}' references unknown validator '{}'.", rule.name, validator));
            }
        }
    }

    if !errors.is_empty() {
        let full_error_message = format!("Rule validation failed:\n{}", errors.join("\n"));
        Err(anyhow!(full_error_message))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_char_uses_first_character() {
        let masking = MaskingConfig { mask: "#!".to_string(), exempt: None };
        assert_eq!(masking.mask_char(), '#');
    }

    #[test]
    fn test_empty_mask_falls_back_to_default() {
        let masking = MaskingConfig { mask: String::new(), exempt: None };
        assert_eq!(masking.mask_char(), '*');
    }

    #[test]
    fn test_validate_rules_rejects_unknown_validator() {
        let rules = vec![RedactionRule {
            name: "custom".to_string(),
            pattern: Some(r"\d+".to_string()),
            validator: Some("no_such_validator".to_string()),
            ..Default::default()
        }];
        let err = validate_rules(&rules).unwrap_err();
        assert!(err.to_string().contains("unknown validator"));
    }

    #[test]
    fn test_set_active_rules_respects_opt_in_and_enabled_flag() {
        let mut config = RedactionConfig {
            rules: vec![
                RedactionRule { name: "a".into(), pattern: Some("a".into()), ..Default::default() },
                RedactionRule { name: "b".into(), pattern: Some("b".into()), opt_in: true, ..Default::default() },
                RedactionRule { name: "c".into(), pattern: Some("c".into()), enabled: Some(false), ..Default::default() },
            ],
            ..Default::default()
        };
        config.set_active_rules(&[], &[]);
        let names: Vec<&str> = config.rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a"]);
    }

    #[test]
    fn test_summary_absorb_adds_counts() {
        let mut a = RedactionSummary::default();
        a.record("email");
        let mut b = RedactionSummary::default();
        b.record("email");
        b.record("card");
        a.absorb(&b);
        assert_eq!(a.rule_counts.get("email"), Some(&2));
        assert_eq!(a.total(), 3);
    }
}
