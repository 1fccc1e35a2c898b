// docmask/src/commands/redact.rs
//! `docmask redact`: masks every discovered document into a sibling copy.
//! License: MIT OR APACHE 2.0

use std::io;

use anyhow::{bail, Result};
use is_terminal::IsTerminal;
use log::{debug, info};

use docmask_core::RegexEngine;

use crate::cli::RedactCommand;
use crate::commands::{build_config, error_msg, info_msg, BatchOutcome};
use crate::processor::Redactor;
use crate::ui::output;
use crate::ui::theme::ThemeMap;
use crate::utils::discovery::{discover_inputs, output_path_for};

/// Runs the command and returns the number of documents that failed.
pub fn run_redact(cmd: RedactCommand, quiet: bool, theme: &ThemeMap) -> Result<usize> {
    let mut config = build_config(&cmd.rules)?;
    if let Some(mask) = &cmd.mask {
        config.masking.mask = mask.clone();
    }

    let engine = RegexEngine::new(config)?;
    let redactor = Redactor::new(&engine)?;

    let inputs = discover_inputs(&cmd.inputs, cmd.recursive, &cmd.suffix)?;
    if cmd.output.is_some() && inputs.len() != 1 {
        bail!("--output requires exactly one input document, found {}", inputs.len());
    }
    if let Some(dir) = &cmd.out_dir {
        std::fs::create_dir_all(dir)?;
    }
    debug!("Redacting {} document(s).", inputs.len());

    let stderr_supports_color = io::stderr().is_terminal();
    let mut batch = BatchOutcome::default();
    for input in inputs {
        let output_path = match &cmd.output {
            Some(path) => path.clone(),
            None => output_path_for(&input, cmd.out_dir.as_deref(), &cmd.suffix),
        };
        match redactor.redact_file(&input, &output_path) {
            Ok(report) => {
                if !quiet && !cmd.rules.json {
                    let _ = output::print_document_status(&mut io::stderr(), &report, theme, stderr_supports_color);
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
        "Redaction finished: {} document(s), {} span(s), {} failure(s).",
        batch.documents.len(),
        batch.total_spans(),
        batch.failures.len()
    );
    if !quiet && !cmd.rules.json && !batch.documents.is_empty() {
        info_msg(format!("{} span(s) masked.", batch.total_spans()), theme);
    }
    if !quiet || cmd.rules.json {
        batch.print(cmd.rules.json, theme)?;
    }
    Ok(batch.failures.len())
}
