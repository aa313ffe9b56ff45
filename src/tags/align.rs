//! `center` and `right` tags.

use crate::parser::Attributes;
use crate::render::Context;
use crate::util::{display_width, fill, split_nonempty};

/// Horizontal alignment of a line within the document width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Equal padding on both sides, the odd space going right
    Center,
    /// All padding on the left
    Right,
}

/// Align one line within `width` columns.
///
/// Lines at least `width` wide are returned unpadded.
pub fn align_line(line: &str, width: usize, alignment: Alignment) -> String {
    let spaces = width.saturating_sub(display_width(line));
    let (left, right) = match alignment {
        Alignment::Center => (spaces / 2, spaces - spaces / 2),
        Alignment::Right => (spaces, 0),
    };

    let mut out = String::with_capacity(line.len() + spaces);
    out.push_str(&fill(' ', left));
    out.push_str(line);
    out.push_str(&fill(' ', right));
    out
}

/// Align every non-empty line of `text`.
pub fn align_lines(text: &str, width: usize, alignment: Alignment) -> String {
    split_nonempty(text, '\n')
        .map(|line| align_line(line, width, alignment))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `<center>`: center each line.
pub fn center(ctx: &mut Context<'_>, content: &str, _attrs: &Attributes) -> String {
    align_lines(content, ctx.width(), Alignment::Center)
}

/// `<right>`: right-justify each line.
pub fn right(ctx: &mut Context<'_>, content: &str, _attrs: &Attributes) -> String {
    align_lines(content, ctx.width(), Alignment::Right)
}
