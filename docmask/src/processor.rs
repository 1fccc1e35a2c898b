// docmask/src/processor.rs
//! Runs the core engine over every logical unit of every selected part of a document.
//!
//! Parts are processed one after another and units within a part in document
//! order. A part that cannot be decoded or scanned is copied unchanged and
//! reported as skipped. Only container-level failures abort a document.
//!
//! License: MIT OR APACHE 2.0

use std::path::Path;

use docmask_core::{
    redact_unit_detailed, scan_unit, DocmaskError, ExemptPolicy, MaskPolicy, RedactionEngine,
    RedactionSummary,
};
use log::{debug, info, warn};

use crate::archive::{ArchiveError, Container};
use crate::formats::{DocumentFormat, DocumentHandler, PartLayout};
use crate::report::DocumentReport;
use crate::xml::{self, XmlError};

/// Result of processing one XML part.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PartOutcome {
    /// The new part text, when masking changed anything.
    pub rewritten: Option<String>,
    pub spans: usize,
    pub summary: RedactionSummary,
}

/// Applies one engine and one mask setting to whole documents.
pub struct Redactor<'a> {
    engine: &'a dyn RedactionEngine,
    mask_char: char,
    exempt_override: Option<ExemptPolicy>,
}

impl<'a> Redactor<'a> {
    /// Takes the mask settings from the engine's configuration.
    pub fn new(engine: &'a dyn RedactionEngine) -> Result<Self, DocmaskError> {
        let masking = &engine.config().masking;
        // Validates the mask once; the exempt policy is per format.
        let checked = MaskPolicy::new(masking.mask_char(), ExemptPolicy::Hyphen)?;
        Ok(Self {
            engine,
            mask_char: checked.mask_char,
            exempt_override: masking.exempt,
        })
    }

    pub fn policy_for(&self, handler: &dyn DocumentHandler) -> MaskPolicy {
        MaskPolicy {
            mask_char: self.mask_char,
            exempt: self.exempt_override.unwrap_or_else(|| handler.exempt_policy()),
        }
    }

    /// Masks one part. With `apply == false` only detects.
    pub fn process_part(
        &self,
        handler: &dyn DocumentHandler,
        source: &str,
        apply: bool,
    ) -> Result<PartOutcome, XmlError> {
        let mut layout = PartLayout::extract(source, handler)?;
        let policy = self.policy_for(handler);
        let mut outcome = PartOutcome::default();
        let mut changed = false;

        for unit in layout.units.iter_mut() {
            let report = if apply {
                redact_unit_detailed(self.engine, unit, &policy)
            } else {
                scan_unit(self.engine, unit)
            };
            if report.matches.is_empty() {
                continue;
            }
            if apply {
                handler.finish_unit(unit);
                changed = true;
            }
            outcome.spans += report.span_count();
            outcome.summary.absorb(&report.summary());
        }

        if changed {
            outcome.rewritten = Some(xml::rewrite(source, layout.nodes()));
        }
        Ok(outcome)
    }

    /// Masks `input` and writes the result to `output`.
    pub fn redact_file(&self, input: &Path, output: &Path) -> Result<DocumentReport, ArchiveError> {
        let (format, mut container) = open(input)?;
        let mut report = DocumentReport::new(input.to_path_buf(), Some(output.to_path_buf()), format);

        for (name, outcome) in self.run_parts(format.handler(), &container, true, &mut report) {
            if let Some(rewritten) = outcome.rewritten {
                container.replace(&name, rewritten.into_bytes());
                report.parts_changed += 1;
            }
        }

        container.save(input, output)?;
        info!(
            "{}: {} span(s) masked in {} of {} part(s) -> {}",
            input.display(),
            report.spans,
            report.parts_changed,
            report.parts_scanned,
            output.display()
        );
        Ok(report)
    }

    /// Detects without writing anything.
    pub fn scan_file(&self, input: &Path) -> Result<DocumentReport, ArchiveError> {
        let (format, container) = open(input)?;
        let mut report = DocumentReport::new(input.to_path_buf(), None, format);
        for (_, outcome) in self.run_parts(format.handler(), &container, false, &mut report) {
            if outcome.spans > 0 {
                report.parts_changed += 1;
            }
        }
        info!("{}: {} span(s) found in {} part(s)", input.display(), report.spans, report.parts_scanned);
        Ok(report)
    }

    fn run_parts(
        &self,
        handler: &dyn DocumentHandler,
        container: &Container,
        apply: bool,
        report: &mut DocumentReport,
    ) -> Vec<(String, PartOutcome)> {
        let names = container.names();
        let mut outcomes = Vec::new();

        for name in handler.select_parts(&names) {
            let Some(entry) = container.get(name) else { continue };
            report.parts_scanned += 1;

            let source = match std::str::from_utf8(&entry.data) {
                Ok(s) => s,
                Err(e) => {
                    warn!("Skipping part '{}' of {}: not UTF-8 ({})", name, report.input.display(), e);
                    report.parts_skipped += 1;
                    continue;
                }
            };

            match self.process_part(handler, source, apply) {
                Ok(outcome) => {
                    debug!("Part '{}': {} span(s).", name, outcome.spans);
                    report.spans += outcome.spans;
                    report.absorb_summary(&outcome.summary);
                    outcomes.push((name.to_string(), outcome));
                }
                Err(e) => {
                    warn!("Skipping part '{}' of {}: {}", name, report.input.display(), e);
                    report.parts_skipped += 1;
                }
            }
        }
        outcomes
    }
}

fn open(input: &Path) -> Result<(DocumentFormat, Container), ArchiveError> {
    let format = DocumentFormat::from_path(input)
        .ok_or_else(|| ArchiveError::UnsupportedFormat(input.to_path_buf()))?;
    let container = Container::read(input)?;
    Ok((format, container))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::docx::DocxHandler;
    use crate::formats::xlsx::XlsxHandler;
    use docmask_core::{RedactionConfig, RegexEngine};

    fn engine() -> RegexEngine {
        RegexEngine::new(RedactionConfig::load_default_rules().unwrap()).unwrap()
    }

    #[test]
    fn docx_part_is_masked_across_runs() {
        let engine = engine();
        let redactor = Redactor::new(&engine).unwrap();
        let src = concat!(
            r#"<w:document><w:body><w:p><w:r><w:t>Tel </w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t>010-1234</w:t></w:r>"#,
            r#"<w:r><w:t>-5678</w:t></w:r><w:r><w:t/></w:r></w:p><w:p><w:r><w:t>no pii</w:t></w:r></w:p></w:body></w:document>"#,
        );
        let outcome = redactor.process_part(&DocxHandler, src, true).unwrap();
        assert_eq!(outcome.spans, 1);
        assert_eq!(outcome.summary.rule_counts.get("phone_mobile"), Some(&1));
        let out = outcome.rewritten.unwrap();
        assert!(out.contains(r#"<w:t xml:space="preserve">Tel </w:t>"#));
        assert!(out.contains("<w:t>***-****</w:t>"));
        assert!(out.contains("<w:t>-****</w:t>"));
        assert!(out.contains(r#"<w:t xml:space="preserve"> </w:t>"#));
        assert!(out.contains("<w:t>no pii</w:t>"));
    }

    #[test]
    fn scan_never_rewrites() {
        let engine = engine();
        let redactor = Redactor::new(&engine).unwrap();
        let src = r#"<sst><si><t>kim@example.com</t></si></sst>"#;
        let outcome = redactor.process_part(&XlsxHandler, src, false).unwrap();
        assert_eq!(outcome.spans, 1);
        assert!(outcome.rewritten.is_none());
    }

    #[test]
    fn cdata_text_is_masked() {
        let engine = engine();
        let redactor = Redactor::new(&engine).unwrap();
        let src = "<sst><si><t><![CDATA[kim@example.com]]></t></si></sst>";
        let outcome = redactor.process_part(&XlsxHandler, src, true).unwrap();
        assert_eq!(outcome.spans, 1);
        assert_eq!(
            outcome.rewritten.unwrap(),
            format!("<sst><si><t>{}</t></si></sst>", "*".repeat(15))
        );
    }

    #[test]
    fn part_without_matches_is_not_rewritten() {
        let engine = engine();
        let redactor = Redactor::new(&engine).unwrap();
        let outcome = redactor.process_part(&XlsxHandler, "<sst><si><t>hello</t></si></sst>", true).unwrap();
        assert_eq!(outcome, PartOutcome::default());
    }

    #[test]
    fn exempt_override_applies_to_every_format() {
        let mut config = RedactionConfig::load_default_rules().unwrap();
        config.masking.exempt = Some(ExemptPolicy::Dashes);
        config.masking.mask = "#".into();
        let engine = RegexEngine::new(config).unwrap();
        let redactor = Redactor::new(&engine).unwrap();
        let policy = redactor.policy_for(&DocxHandler);
        assert_eq!(policy.exempt, ExemptPolicy::Dashes);
        assert_eq!(policy.mask_char, '#');
    }

    #[test]
    fn alphanumeric_mask_is_refused() {
        let mut config = RedactionConfig::load_default_rules().unwrap();
        config.masking.mask = "a".into();
        let engine = RegexEngine::new(config).unwrap();
        assert!(Redactor::new(&engine).is_err());
    }
}
