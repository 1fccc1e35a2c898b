// docmask/src/utils/discovery.rs
//! Batch input discovery and output naming.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use log::{debug, warn};
use walkdir::WalkDir;

use crate::formats::DocumentFormat;

/// Suffix appended to the stem of redacted copies.
pub const DEFAULT_SUFFIX: &str = "_redacted";

/// Whether `path` names a document docmask should pick up during a directory scan.
///
/// Office lock files (`~$name.docx`) and files already carrying `suffix` are skipped.
pub fn is_candidate(path: &Path, suffix: &str) -> bool {
    if DocumentFormat::from_path(path).is_none() {
        return false;
    }
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if name.starts_with("~$") {
        return false;
    }
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    suffix.is_empty() || !stem.to_lowercase().ends_with(&suffix.to_lowercase())
}

/// Expands files and directories into the sorted list of documents to process.
///
/// Explicit files are taken as given (their format is checked later). With no
/// inputs at all, the current directory is scanned.
pub fn discover_inputs(inputs: &[PathBuf], recursive: bool, suffix: &str) -> Result<Vec<PathBuf>> {
    let default_input = [PathBuf::from(".")];
    let inputs = if inputs.is_empty() { &default_input[..] } else { inputs };

    let mut found = BTreeSet::new();
    for input in inputs {
        if input.is_dir() {
            let depth = if recursive { usize::MAX } else { 1 };
            for entry in WalkDir::new(input).max_depth(depth) {
                let entry = entry.with_context(|| format!("Failed to walk {}", input.display()))?;
                if entry.file_type().is_file() && is_candidate(entry.path(), suffix) {
                    found.insert(entry.path().to_path_buf());
                }
            }
        } else if input.is_file() {
            found.insert(input.clone());
        } else {
            bail!("Input not found: {}", input.display());
        }
    }

    if found.is_empty() {
        warn!("No supported documents found.");
    }
    debug!("Discovered {} document(s).", found.len());
    Ok(found.into_iter().collect())
}

/// `<stem><suffix>.<ext>` next to the input, or inside `out_dir`.
pub fn output_path_for(input: &Path, out_dir: Option<&Path>, suffix: &str) -> PathBuf {
    let stem = input.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    let file_name = match input.extension() {
        Some(ext) => format!("{}{}.{}", stem, suffix, ext.to_string_lossy()),
        None => format!("{}{}", stem, suffix),
    };
    match out_dir {
        Some(dir) => dir.join(file_name),
        None => input.with_file_name(file_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn candidates_skip_lock_files_and_previous_output() {
        assert!(is_candidate(Path::new("report.docx"), DEFAULT_SUFFIX));
        assert!(is_candidate(Path::new("SHEET.XLSX"), DEFAULT_SUFFIX));
        assert!(!is_candidate(Path::new("~$report.docx"), DEFAULT_SUFFIX));
        assert!(!is_candidate(Path::new("report_redacted.docx"), DEFAULT_SUFFIX));
        assert!(!is_candidate(Path::new("report_REDACTED.pptx"), DEFAULT_SUFFIX));
        assert!(!is_candidate(Path::new("notes.txt"), DEFAULT_SUFFIX));
    }

    #[test]
    fn output_names() {
        assert_eq!(
            output_path_for(Path::new("dir/a.docx"), None, DEFAULT_SUFFIX),
            PathBuf::from("dir/a_redacted.docx")
        );
        assert_eq!(
            output_path_for(Path::new("dir/a.hwpx"), Some(Path::new("out")), "_masked"),
            PathBuf::from("out/a_masked.hwpx")
        );
    }

    #[test]
    fn directory_scan_respects_recursion() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.docx"), b"").unwrap();
        fs::write(dir.path().join("a_redacted.docx"), b"").unwrap();
        fs::write(dir.path().join("~$a.docx"), b"").unwrap();
        fs::write(dir.path().join("b.txt"), b"").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/c.pptx"), b"").unwrap();

        let flat = discover_inputs(&[dir.path().to_path_buf()], false, DEFAULT_SUFFIX).unwrap();
        assert_eq!(flat, vec![dir.path().join("a.docx")]);

        let deep = discover_inputs(&[dir.path().to_path_buf()], true, DEFAULT_SUFFIX).unwrap();
        assert_eq!(deep.len(), 2);
    }

    #[test]
    fn missing_input_is_an_error() {
        assert!(discover_inputs(&[PathBuf::from("/no/such/input")], false, DEFAULT_SUFFIX).is_err());
    }
}
