// docmask-core/src/engines/mod.rs
//! This module contains the detection engine implementations.
//!
//! Each engine is a separate file within this directory and implements the
//! `RedactionEngine` trait.
//!
//! License: MIT OR APACHE 2.0

pub mod regex_engine;
