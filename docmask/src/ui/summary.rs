// docmask/src/ui/summary.rs
//! Summary tables printed after a batch.

use std::io::{self, Write};

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table};
use owo_colors::AnsiColors;

use crate::report::{aggregate_rule_counts, DocumentReport};
use crate::ui::theme::{color_for, ThemeEntry, ThemeMap};

fn table_color(color: AnsiColors) -> Color {
    match color {
        AnsiColors::Black => Color::Black,
        AnsiColors::Red => Color::DarkRed,
        AnsiColors::Green => Color::DarkGreen,
        AnsiColors::Yellow => Color::DarkYellow,
        AnsiColors::Blue => Color::DarkBlue,
        AnsiColors::Magenta => Color::DarkMagenta,
        AnsiColors::Cyan => Color::DarkCyan,
        AnsiColors::White => Color::Grey,
        AnsiColors::BrightBlack => Color::DarkGrey,
        AnsiColors::BrightRed => Color::Red,
        AnsiColors::BrightGreen => Color::Green,
        AnsiColors::BrightYellow => Color::Yellow,
        AnsiColors::BrightBlue => Color::Blue,
        AnsiColors::BrightMagenta => Color::Magenta,
        AnsiColors::BrightCyan => Color::Cyan,
        _ => Color::White,
    }
}

fn styled(text: impl ToString, theme: &ThemeMap, entry: ThemeEntry) -> Cell {
    Cell::new(text.to_string()).fg(table_color(color_for(theme, entry)))
}

fn new_table(theme: &ThemeMap, headers: &[&str], supports_color: bool) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.iter().map(|h| styled(h, theme, ThemeEntry::Header)).collect::<Vec<_>>());
    if supports_color {
        table.enforce_styling();
    } else {
        table.force_no_tty();
    }
    table
}

/// Per-document table: format, spans, matches, parts changed.
pub fn print_document_table<W: Write>(
    writer: &mut W,
    reports: &[DocumentReport],
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    let mut table = new_table(theme, &["Document", "Format", "Spans", "Matches", "Parts changed"], supports_color);
    for report in reports {
        table.add_row(vec![
            Cell::new(report.input.display().to_string()),
            Cell::new(report.format.to_string()),
            styled(report.spans, theme, ThemeEntry::SummaryOccurrences).set_alignment(CellAlignment::Right),
            Cell::new(report.total_matches()).set_alignment(CellAlignment::Right),
            Cell::new(format!("{}/{}", report.parts_changed, report.parts_scanned)).set_alignment(CellAlignment::Right),
        ]);
    }
    writeln!(writer, "{}", table)
}

/// Per-rule match totals across all reports.
pub fn print_rule_table<W: Write>(
    writer: &mut W,
    reports: &[DocumentReport],
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    let totals = aggregate_rule_counts(reports);
    if totals.is_empty() {
        return writeln!(writer, "No personal data found.");
    }
    let mut table = new_table(theme, &["Rule", "Matches"], supports_color);
    for (rule, count) in &totals {
        table.add_row(vec![
            styled(rule, theme, ThemeEntry::SummaryRuleName),
            styled(count, theme, ThemeEntry::SummaryOccurrences).set_alignment(CellAlignment::Right),
        ]);
    }
    writeln!(writer, "{}", table)
}
