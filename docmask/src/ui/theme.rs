//! Colors used for terminal output.
//!
//! Each logical kind of output line maps to one of the 16 named ANSI colors.
//! The map is fixed at start-up; output is only colored when the target stream
//! is a terminal.

use std::collections::HashMap;

use owo_colors::AnsiColors;

/// Type alias for the theme map, providing a consistent type definition.
pub type ThemeMap = HashMap<ThemeEntry, ThemeStyle>;

/// The different logical parts of the output that can be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeEntry {
    /// Table headers and section titles.
    Header,
    /// A document processed successfully.
    Success,
    /// General informational messages.
    Info,
    /// Warnings, e.g. skipped parts.
    Warn,
    /// A document that failed.
    Error,
    /// Rule names in the summary table.
    SummaryRuleName,
    /// Match counts in the summary table.
    SummaryOccurrences,
}

impl ThemeEntry {
    pub const ALL: [ThemeEntry; 7] = [
        ThemeEntry::Header,
        ThemeEntry::Success,
        ThemeEntry::Info,
        ThemeEntry::Warn,
        ThemeEntry::Error,
        ThemeEntry::SummaryRuleName,
        ThemeEntry::SummaryOccurrences,
    ];
}

/// A named ANSI color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeColor(AnsiColors);

impl ThemeColor {
    /// Converts the color into its `owo_colors::AnsiColors` counterpart.
    pub fn to_ansi_color(&self) -> AnsiColors {
        self.0
    }
}

/// The style of one `ThemeEntry`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemeStyle {
    pub fg: Option<ThemeColor>,
}

impl ThemeStyle {
    /// Returns the default theme map.
    pub fn default_theme_map() -> ThemeMap {
        let mut theme = HashMap::new();
        let colors = [
            (ThemeEntry::Header, AnsiColors::Cyan),
            (ThemeEntry::Success, AnsiColors::Green),
            (ThemeEntry::Info, AnsiColors::White),
            (ThemeEntry::Warn, AnsiColors::Yellow),
            (ThemeEntry::Error, AnsiColors::Red),
            (ThemeEntry::SummaryRuleName, AnsiColors::BrightBlue),
            (ThemeEntry::SummaryOccurrences, AnsiColors::BrightMagenta),
        ];
        for (entry, color) in colors {
            theme.insert(entry, ThemeStyle { fg: Some(ThemeColor(color)) });
        }
        theme
    }
}

/// The foreground color for `entry`, white when unset.
pub fn color_for(theme: &ThemeMap, entry: ThemeEntry) -> AnsiColors {
    theme
        .get(&entry)
        .and_then(|style| style.fg.as_ref())
        .map(ThemeColor::to_ansi_color)
        .unwrap_or(AnsiColors::White)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_covers_every_entry() {
        let theme = ThemeStyle::default_theme_map();
        for entry in ThemeEntry::ALL {
            assert!(theme.contains_key(&entry));
        }
        assert_eq!(color_for(&theme, ThemeEntry::Error), AnsiColors::Red);
        assert_eq!(color_for(&HashMap::new(), ThemeEntry::Error), AnsiColors::White);
    }
}
