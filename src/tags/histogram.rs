//! `histogram` tag.
//!
//! Each line is ` <label> | <bar> | <value> `. Bars scale with the absolute
//! value so that the largest magnitude fills the whole bar budget, which is
//! the document width minus the widest label, the widest value and eight
//! columns of separators.

use crate::model::{parse_entries, HistogramEntry};
use crate::parser::Attributes;
use crate::render::Context;
use crate::util::{fill, max_width, pad_left};

/// Columns taken by the separators around label, bar and value.
const CHROME_WIDTH: usize = 8;

/// Label of value-only entries.
const ANONYMOUS_LABEL: &str = " ";

/// `<histogram c>`: bar chart drawn with `c` (default `#`).
pub fn histogram(ctx: &mut Context<'_>, content: &str, attrs: &Attributes) -> String {
    let bar_char = attrs.first_char().unwrap_or('#');
    render_entries(&parse_entries(content), bar_char, ctx.width())
}

/// Lay out histogram entries at document width `width`.
pub fn render_entries(entries: &[HistogramEntry], bar_char: char, width: usize) -> String {
    let plotted = || entries.iter().filter(|e| !e.is_spacer());

    let label_width = max_width(plotted().map(label));
    let value_width = max_width(plotted().map(HistogramEntry::value_text));
    let max_abs = plotted()
        .filter_map(HistogramEntry::number)
        .map(f64::abs)
        .fold(0.0, f64::max);
    let budget = width.saturating_sub(label_width + value_width + CHROME_WIDTH);

    entries
        .iter()
        .map(|entry| {
            if entry.is_spacer() {
                return String::new();
            }
            let bar = entry
                .number()
                .map_or(0, |v| bar_length(v, max_abs, budget));
            format!(
                " {} | {}{} | {} ",
                pad_left(label(entry), label_width),
                fill(bar_char, bar),
                fill(' ', budget - bar),
                entry.value_text()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Bar length for `value`: `round(|value| / (max_abs / budget))`, at most
/// `budget`.
pub fn bar_length(value: f64, max_abs: f64, budget: usize) -> usize {
    if budget == 0 || max_abs == 0.0 || !max_abs.is_finite() || !value.is_finite() {
        return 0;
    }
    let len = (value.abs() / (max_abs / budget as f64)).round();
    (len as usize).min(budget)
}

fn label(entry: &HistogramEntry) -> &str {
    entry.name.as_deref().unwrap_or(ANONYMOUS_LABEL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderOptions;

    fn render(content: &str, width: usize) -> String {
        let options = RenderOptions::new().with_width(width);
        let mut ctx = Context::new(&options);
        histogram(&mut ctx, content, &Attributes::default())
    }

    #[test]
    fn test_largest_value_fills_budget() {
        let out = render("a|10\nbb|5", 30);
        // budget = 30 - 2 - 2 - 8
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], format!("  a | {} | 10 ", "#".repeat(18)));
        assert_eq!(lines[1], format!(" bb | {}{} | 5 ", "#".repeat(9), " ".repeat(9)));
        assert_eq!(lines[0].len(), 30);
    }

    #[test]
    fn test_negative_values_use_magnitude() {
        let out = render("up|4\ndown|-8", 30);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[1].matches('#').count(), 30 - 4 - 2 - 8);
        assert_eq!(lines[0].matches('#').count(), 8);
    }

    #[test]
    fn test_error_and_spacer() {
        let out = render("a|1\nb| \nc|oops", 30);
        let lines: Vec<&str> = out.split('\n').collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "");
        assert!(lines[2].ends_with("| error "));
        assert_eq!(lines[2].matches('#').count(), 0);
    }

    #[test]
    fn test_custom_bar_char() {
        let options = RenderOptions::new().with_width(20);
        let mut ctx = Context::new(&options);
        let out = histogram(&mut ctx, "x|1", &Attributes::new(["*"]));
        assert_eq!(out, format!(" x | {} | 1 ", "*".repeat(10)));
    }

    #[test]
    fn test_bar_length_edges() {
        assert_eq!(bar_length(5.0, 0.0, 10), 0);
        assert_eq!(bar_length(5.0, 10.0, 0), 0);
        assert_eq!(bar_length(10.0, 10.0, 7), 7);
        assert_eq!(bar_length(-10.0, 10.0, 7), 7);
        assert_eq!(bar_length(1.0, 3.0, 10), 3);
    }
}
