// docmask/src/commands/mod.rs
//! Command implementations and the helpers they share.
//! License: MIT OR APACHE 2.0

pub mod redact;
pub mod scan;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use docmask_core::{merge_rules, RedactionConfig};
use is_terminal::IsTerminal;
use log::debug;
use serde::Serialize;

use crate::cli::RuleArgs;
use crate::report::{aggregate_rule_counts, DocumentReport};
use crate::ui::output;
use crate::ui::summary;
use crate::ui::theme::ThemeMap;

/// Helper for printing info messages to stderr.
pub fn info_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output::print_info_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing warning messages to stderr.
pub fn warn_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output::print_warn_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing error messages to stderr.
pub fn error_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output::print_error_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Default rules, merged with the user file, filtered by `-e`/`-x`, then the
/// `--no-*` validator switches.
pub fn build_config(args: &RuleArgs) -> Result<RedactionConfig> {
    let defaults = RedactionConfig::load_default_rules()?;
    let user = match &args.config {
        Some(path) => Some(
            RedactionConfig::load_from_file(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        ),
        None => None,
    };
    let mut config = merge_rules(defaults, user);
    config.set_active_rules(&args.enable, &args.disable);

    if args.no_rrn_checksum {
        config.validation.rrn_checksum = false;
    }
    if args.no_card_luhn {
        config.validation.card_luhn = false;
    }
    if args.no_card_iin {
        config.validation.card_iin = false;
    }
    debug!("Active rules: {:?}", config.rules.iter().map(|r| r.name.as_str()).collect::<Vec<_>>());
    Ok(config)
}

/// A document that could not be processed.
#[derive(Debug, Clone, Serialize)]
pub struct FailedDocument {
    pub input: PathBuf,
    pub error: String,
}

/// Everything a batch produced, as printed by `--json`.
#[derive(Debug, Default, Serialize)]
pub struct BatchOutcome {
    pub documents: Vec<DocumentReport>,
    pub failures: Vec<FailedDocument>,
}

impl BatchOutcome {
    pub fn fail(&mut self, input: PathBuf, error: impl ToString) {
        self.failures.push(FailedDocument { input, error: error.to_string() });
    }

    pub fn total_spans(&self) -> usize {
        self.documents.iter().map(|d| d.spans).sum()
    }

    /// Prints the batch to stdout, either as JSON or as summary tables.
    pub fn print(&self, json: bool, theme: &ThemeMap) -> Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        if json {
            #[derive(Serialize)]
            struct JsonView<'a> {
                documents: &'a [DocumentReport],
                failures: &'a [FailedDocument],
                rule_counts: std::collections::BTreeMap<String, usize>,
            }
            let view = JsonView {
                documents: &self.documents,
                failures: &self.failures,
                rule_counts: aggregate_rule_counts(&self.documents),
            };
            serde_json::to_writer_pretty(&mut handle, &view).context("Failed to serialize report")?;
            writeln!(handle)?;
        } else {
            let supports_color = io::stdout().is_terminal();
            if !self.documents.is_empty() {
                summary::print_document_table(&mut handle, &self.documents, theme, supports_color)?;
            }
            summary::print_rule_table(&mut handle, &self.documents, theme, supports_color)?;
        }
        handle.flush()?;
        Ok(())
    }
}
