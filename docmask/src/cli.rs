// docmask/src/cli.rs
//! This file defines the command-line interface (CLI) for the docmask application,
//! including all available commands and their arguments.
//! License: MIT OR APACHE 2.0

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::utils::discovery::DEFAULT_SUFFIX;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "docmask",
    author = "Relay",
    version = env!("CARGO_PKG_VERSION"),
    about = "Mask personal data inside office documents",
    long_about = "docmask finds national ID, phone, email, card, passport and driver license numbers in docx, xlsx, pptx and hwpx documents and masks them in place. Text split across formatting runs is handled as one string, masked output keeps the original length, and separators such as hyphens stay readable.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `docmask` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Masks personal data and writes redacted copies of the documents.
    #[command(about = "Masks personal data and writes redacted copies of the documents.")]
    Redact(RedactCommand),

    /// Reports personal data per document and rule without writing anything.
    #[command(about = "Reports personal data per document and rule without writing anything.")]
    Scan(ScanCommand),
}

/// Rule selection and validator options shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct RuleArgs {
    /// Path to a custom redaction configuration file (YAML).
    #[arg(long = "config", value_name = "FILE", env = "DOCMASK_CONFIG", help = "Path to a custom redaction configuration file (YAML).")]
    pub config: Option<PathBuf>,

    /// Enable these rule names, including opt-in rules (comma-separated).
    #[arg(long, short = 'e', value_delimiter = ',', help = "Enable these rule names, including opt-in rules (comma-separated).")]
    pub enable: Vec<String>,

    /// Explicitly disable these rule names (comma-separated).
    #[arg(long, short = 'x', value_delimiter = ',', help = "Explicitly disable these rule names (comma-separated).")]
    pub disable: Vec<String>,

    /// Skip the national ID check digit and only validate the birth date.
    #[arg(long = "no-rrn-checksum", help = "Skip the national ID check digit and only validate the birth date.")]
    pub no_rrn_checksum: bool,

    /// Do not require card numbers to pass the Luhn checksum.
    #[arg(long = "no-card-luhn", help = "Do not require card numbers to pass the Luhn checksum.")]
    pub no_card_luhn: bool,

    /// Do not require card numbers to start with a known issuer range.
    #[arg(long = "no-card-iin", help = "Do not require card numbers to start with a known issuer range.")]
    pub no_card_iin: bool,

    /// Print reports as JSON instead of tables.
    #[arg(long, help = "Print reports as JSON instead of tables.")]
    pub json: bool,
}

/// Arguments for the `redact` command.
#[derive(Parser, Debug)]
pub struct RedactCommand {
    /// Documents or directories to process (defaults to the current directory).
    #[arg(value_name = "INPUTS")]
    pub inputs: Vec<PathBuf>,

    /// Output file; only valid with a single input document.
    #[arg(long, short = 'o', value_name = "FILE", conflicts_with = "out_dir", help = "Write the redacted document to this file (single input only).")]
    pub output: Option<PathBuf>,

    /// Directory receiving the redacted copies.
    #[arg(long = "out-dir", value_name = "DIR", help = "Write redacted copies into this directory.")]
    pub out_dir: Option<PathBuf>,

    /// Suffix appended to the file stem of redacted copies.
    #[arg(long, value_name = "SUFFIX", default_value = DEFAULT_SUFFIX, help = "Suffix appended to the file stem of redacted copies.")]
    pub suffix: String,

    /// Descend into subdirectories of input directories.
    #[arg(long, short = 'r', help = "Descend into subdirectories of input directories.")]
    pub recursive: bool,

    /// Mask character (only the first character is used).
    #[arg(long, value_name = "CHAR", help = "Mask character; only the first character is used.")]
    pub mask: Option<String>,

    #[command(flatten)]
    pub rules: RuleArgs,
}

/// Arguments for the `scan` command.
#[derive(Parser, Debug)]
pub struct ScanCommand {
    /// Documents or directories to scan (defaults to the current directory).
    #[arg(value_name = "INPUTS")]
    pub inputs: Vec<PathBuf>,

    /// Descend into subdirectories of input directories.
    #[arg(long, short = 'r', help = "Descend into subdirectories of input directories.")]
    pub recursive: bool,

    #[command(flatten)]
    pub rules: RuleArgs,
}
