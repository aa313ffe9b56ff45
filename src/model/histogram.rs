//! Histogram entries.

use serde::{Deserialize, Serialize};

use crate::util::{is_num, remove_spaces, split_nonempty, trim_spaces};

/// Delimiter between an entry's name and value.
pub const NAME_DELIMITER: char = '|';

/// Value of a histogram line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HistogramValue {
    /// A plottable number, with its text as written (after normalization)
    Number {
        /// Normalized text shown after the bar
        text: String,
        /// Parsed value
        value: f64,
    },
    /// Value that is not a number; shown as `error`
    Error,
    /// Blank value; rendered as an empty line
    Spacer,
}

/// One line of a histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramEntry {
    /// Label, `None` for value-only lines
    pub name: Option<String>,

    /// Parsed value
    pub value: HistogramValue,
}

impl HistogramEntry {
    /// Parse one line: `name | value` or a bare value.
    ///
    /// Returns `None` for lines made only of delimiters.
    pub fn parse(line: &str) -> Option<Self> {
        let mut pieces = split_nonempty(line, NAME_DELIMITER);
        let first = pieces.next()?;
        let entry = match pieces.next() {
            Some(value) => Self {
                name: Some(trim_spaces(first).to_string()),
                value: parse_value(value),
            },
            None => Self {
                name: None,
                value: parse_value(first),
            },
        };
        Some(entry)
    }

    /// True for blank-line spacers.
    pub fn is_spacer(&self) -> bool {
        matches!(self.value, HistogramValue::Spacer)
    }

    /// Text shown after the bar.
    pub fn value_text(&self) -> &str {
        match &self.value {
            HistogramValue::Number { text, .. } => text,
            HistogramValue::Error => "error",
            HistogramValue::Spacer => "",
        }
    }

    /// Numeric value, if any.
    pub fn number(&self) -> Option<f64> {
        match self.value {
            HistogramValue::Number { value, .. } => Some(value),
            HistogramValue::Error | HistogramValue::Spacer => None,
        }
    }
}

/// Parse all entries of a histogram body.
pub fn parse_entries(text: &str) -> Vec<HistogramEntry> {
    split_nonempty(text, '\n')
        .filter_map(HistogramEntry::parse)
        .collect()
}

fn parse_value(raw: &str) -> HistogramValue {
    let text = remove_spaces(raw).replace(',', ".");
    if text.is_empty() {
        return HistogramValue::Spacer;
    }
    match text.parse::<f64>() {
        Ok(value) if is_num(&text) => HistogramValue::Number { text, value },
        _ => HistogramValue::Error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_entry() {
        let entry = HistogramEntry::parse("  apples | 1 200,5 ").unwrap();
        assert_eq!(entry.name.as_deref(), Some("apples"));
        assert_eq!(entry.value_text(), "1200.5");
        assert_eq!(entry.number(), Some(1200.5));
    }

    #[test]
    fn test_anonymous_and_spacer() {
        let entry = HistogramEntry::parse("42").unwrap();
        assert_eq!(entry.name, None);
        assert_eq!(entry.number(), Some(42.0));

        assert!(HistogramEntry::parse("x| ").unwrap().is_spacer());
        assert!(HistogramEntry::parse("   ").unwrap().is_spacer());
        assert!(HistogramEntry::parse("||").is_none());
    }

    #[test]
    fn test_error_values() {
        let entry = HistogramEntry::parse("pears|lots").unwrap();
        assert_eq!(entry.value, HistogramValue::Error);
        assert_eq!(entry.value_text(), "error");

        assert_eq!(HistogramEntry::parse("1-2").unwrap().value, HistogramValue::Error);
    }

    #[test]
    fn test_parse_entries_skips_blank_lines() {
        let entries = parse_entries("a|1\n\nb|2\n");
        assert_eq!(entries.len(), 2);
    }
}
