// docmask-core/src/headless.rs
//! `headless.rs`
//! Convenience wrappers for one-shot use of the core engine on plain strings,
//! without any document container around them.

use anyhow::Result;

use crate::config::RedactionConfig;
use crate::engines::regex_engine::RegexEngine;
use crate::masking::{ExemptPolicy, MaskPolicy};
use crate::orchestrator::redact_unit;

/// Masks every confirmed match in `content` as a single logical unit.
///
/// # Arguments
///
/// * `config` - The merged RedactionConfig (defaults + optional user overrides).
/// * `content` - The string to be masked.
/// * `exempt` - Characters kept inside masked spans, unless the config overrides it.
pub fn headless_mask_string(config: RedactionConfig, content: &str, exempt: ExemptPolicy) -> Result<String> {
    let policy = MaskPolicy::from_config(&config.masking, exempt)?;
    let engine = RegexEngine::new(config)?;
    let mut fragments = vec![content.to_string()];
    redact_unit(&engine, &mut fragments, &policy);
    Ok(fragments.concat())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_mask_string_defaults() -> Result<()> {
        let config = RedactionConfig::load_default_rules()?;
        let masked = headless_mask_string(config, "mail me at kim@example.com or 010-1234-5678", ExemptPolicy::Hyphen)?;
        assert_eq!(masked, "mail me at *************** or ***-****-****");
        Ok(())
    }

    #[test]
    fn test_headless_rejects_alphanumeric_mask() {
        let mut config = RedactionConfig::load_default_rules().unwrap();
        config.masking.mask = "X".into();
        assert!(headless_mask_string(config, "010-1234-5678", ExemptPolicy::Hyphen).is_err());
    }
}
