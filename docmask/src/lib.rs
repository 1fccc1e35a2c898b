// docmask/src/lib.rs
//! # docmask
//!
//! Command-line front end of the docmask engine. It opens docx, xlsx, pptx and
//! hwpx containers, picks the XML parts that carry document text, groups their
//! text nodes into paragraphs or cells, and hands each group to
//! `docmask_core` for detection and masking. Everything outside the masked text
//! nodes is written back byte for byte.

pub mod archive;
pub mod cli;
pub mod commands;
pub mod formats;
pub mod logger;
pub mod processor;
pub mod report;
pub mod ui;
pub mod utils;
pub mod xml;

pub use processor::Redactor;
pub use report::DocumentReport;
