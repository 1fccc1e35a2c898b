// docmask/src/logger.rs
//! Process-wide logging setup for the `docmask` binary.
//!
//! The library crates only log through the `log` facade. This module installs
//! `env_logger` once, at start-up, honouring `RUST_LOG` unless the caller forces
//! a level from the command line.
//!
//! License: MIT OR APACHE 2.0

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Installs the global logger.
///
/// * `None` keeps `RUST_LOG` (default `warn`).
/// * `Some(level)` overrides `RUST_LOG` for every module.
///
/// Calling this more than once is harmless: later calls are ignored.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder
        .format_timestamp(None)
        .format_target(true)
        .try_init()
        .ok();
}

/// Maps the global `--quiet` / `--debug` flags onto a forced log level.
pub fn level_from_flags(quiet: bool, debug: bool) -> Option<LevelFilter> {
    if debug {
        Some(LevelFilter::Debug)
    } else if quiet {
        Some(LevelFilter::Off)
    } else {
        None
    }
}
