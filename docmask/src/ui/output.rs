// docmask/src/ui/output.rs
//! Status lines written to stderr (or any writer), colored when supported.

use std::io::{self, Write};

use owo_colors::OwoColorize;

use crate::report::DocumentReport;
use crate::ui::theme::{color_for, ThemeEntry, ThemeMap};

fn print_tagged<W: Write>(
    writer: &mut W,
    tag: &str,
    message: &str,
    entry: ThemeEntry,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    if supports_color {
        writeln!(writer, "{} {}", tag.color(color_for(theme, entry)), message)
    } else {
        writeln!(writer, "{} {}", tag, message)
    }
}

pub fn print_info_message<W: Write>(writer: &mut W, message: &str, theme: &ThemeMap, supports_color: bool) -> io::Result<()> {
    print_tagged(writer, "[INFO]", message, ThemeEntry::Info, theme, supports_color)
}

pub fn print_warn_message<W: Write>(writer: &mut W, message: &str, theme: &ThemeMap, supports_color: bool) -> io::Result<()> {
    print_tagged(writer, "[WARN]", message, ThemeEntry::Warn, theme, supports_color)
}

pub fn print_error_message<W: Write>(writer: &mut W, message: &str, theme: &ThemeMap, supports_color: bool) -> io::Result<()> {
    print_tagged(writer, "[ERROR]", message, ThemeEntry::Error, theme, supports_color)
}

/// One line per processed document: `[DOCX] in -> out (N spans)`.
pub fn print_document_status<W: Write>(
    writer: &mut W,
    report: &DocumentReport,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    let tag = format!("[{}]", report.format.extension().to_uppercase());
    let target = match &report.output {
        Some(output) => format!("{} -> {}", report.input.display(), output.display()),
        None => report.input.display().to_string(),
    };
    let mut message = format!("{} ({} span(s)", target, report.spans);
    if report.parts_skipped > 0 {
        message.push_str(&format!(", {} part(s) skipped", report.parts_skipped));
    }
    message.push(')');
    print_tagged(writer, &tag, &message, ThemeEntry::Success, theme, supports_color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::DocumentFormat;
    use crate::ui::theme::ThemeStyle;
    use std::path::PathBuf;

    #[test]
    fn plain_status_line() {
        let mut report = DocumentReport::new(PathBuf::from("a.docx"), Some(PathBuf::from("a_redacted.docx")), DocumentFormat::Docx);
        report.spans = 3;
        let mut buf = Vec::new();
        print_document_status(&mut buf, &report, &ThemeStyle::default_theme_map(), false).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "[DOCX] a.docx -> a_redacted.docx (3 span(s))\n");
    }

    #[test]
    fn colored_output_contains_escape_codes() {
        let mut buf = Vec::new();
        print_error_message(&mut buf, "boom", &ThemeStyle::default_theme_map(), true).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert!(s.contains("\u{1b}["));
        assert!(s.ends_with("boom\n"));
    }
}
