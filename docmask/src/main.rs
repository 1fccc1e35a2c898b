// docmask/src/main.rs
//! docmask entry point.
//!
//! Parses the command line, installs the logger and dispatches to the chosen
//! command. Exits with status 1 when any document failed.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use docmask::cli::{Cli, Commands};
use docmask::commands::{error_msg, redact::run_redact, scan::run_scan};
use docmask::logger;
use docmask::ui::theme::{ThemeMap, ThemeStyle};

fn run(cli: Cli, theme: &ThemeMap) -> Result<usize> {
    match cli.command {
        Commands::Redact(cmd) => run_redact(cmd, cli.quiet, theme),
        Commands::Scan(cmd) => run_scan(cmd, cli.quiet, theme),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init_logger(logger::level_from_flags(cli.quiet, cli.debug));
    let theme = ThemeStyle::default_theme_map();

    match run(cli, &theme) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failures) => {
            log::debug!("{} document(s) failed.", failures);
            ExitCode::FAILURE
        }
        Err(e) => {
            error_msg(format!("{:#}", e), &theme);
            ExitCode::FAILURE
        }
    }
}
