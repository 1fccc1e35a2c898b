// docmask/src/commands/scan.rs
//! `docmask scan`: reports what `redact` would mask without writing anything.
//! License: MIT OR APACHE 2.0

use anyhow::Result;
use log::info;

use docmask_core::RegexEngine;

use crate::cli::ScanCommand;
use crate::commands::{build_config, error_msg, warn_msg, BatchOutcome};
use crate::processor::Redactor;
use crate::ui::theme::ThemeMap;
use crate::utils::discovery::{discover_inputs, DEFAULT_SUFFIX};

/// Runs the command and returns the number of documents that failed.
pub fn run_scan(cmd: ScanCommand, quiet: bool, theme: &ThemeMap) -> Result<usize> {
    let config = build_config(&cmd.rules)?;
    let engine = RegexEngine::new(config)?;
    let redactor = Redactor::new(&engine)?;

    let inputs = discover_inputs(&cmd.inputs, cmd.recursive, DEFAULT_SUFFIX)?;
    let mut batch = BatchOutcome::default();
    for input in inputs {
        match redactor.scan_file(&input) {
            Ok(report) => {
                if report.parts_skipped > 0 && !quiet && !cmd.rules.json {
                    warn_msg(
                        format!("{}: {} part(s) could not be scanned", input.display(), report.parts_skipped),
                        theme,
                    );
                }
                batch.documents.push(report);
            }
            Err(e) => {
                error_msg(format!("{}: {}", input.display(), e), theme);
                batch.fail(input, e);
            }
        }
    }

    info!(
        "Scan finished: {} document(s), {} span(s), {} failure(s).",
        batch.documents.len(),
        batch.total_spans(),
        batch.failures.len()
    );
    if !quiet || cmd.rules.json {
        batch.print(cmd.rules.json, theme)?;
    }
    Ok(batch.failures.len())
}
