//! Text formatting tags: `doc_width`, `def_width`, `sep`, `p`, `frame`,
//! `list` and `lines`.

use super::align::{align_line, Alignment};
use crate::parser::Attributes;
use crate::render::Context;
use crate::util::{digit_count, display_width, fill, max_width, split_nonempty};

/// Columns reserved by `p` for its indent or trailing margin.
const PARAGRAPH_MARGIN: usize = 2;

/// Most newlines a single `lines` tag emits.
pub const MAX_LINES: usize = u16::MAX as usize;

/// `<doc_width N>`: set the document width. Without a numeric attribute
/// the width is left alone.
pub fn doc_width(ctx: &mut Context<'_>, _content: &str, attrs: &Attributes) -> String {
    if let Some(width) = attrs.first_number() {
        ctx.set_width(width);
    }
    String::new()
}

/// `<def_width>`: restore the configured default width.
pub fn def_width(ctx: &mut Context<'_>, _content: &str, _attrs: &Attributes) -> String {
    ctx.reset_width();
    String::new()
}

/// `<sep c>`: a rule across the document width (default `-`).
pub fn sep(ctx: &mut Context<'_>, _content: &str, attrs: &Attributes) -> String {
    fill(attrs.first_char().unwrap_or('-'), ctx.width())
}

/// `<lines N>`: `N` newlines, at least one and at most [`MAX_LINES`].
pub fn lines(_ctx: &mut Context<'_>, _content: &str, attrs: &Attributes) -> String {
    let count = attrs
        .first_number()
        .filter(|&n| n > 0)
        .and_then(|n| usize::try_from(n).ok())
        .map_or(1, |n| n.min(MAX_LINES));
    fill('\n', count)
}

/// `<p>`: paragraph.
///
/// Without attributes every line is indented by two columns. With any
/// attribute the text is right-justified within `width - 2` and followed
/// by a two-column margin. Lines wider than the available space are
/// wrapped, and the paragraph ends with a blank line.
pub fn paragraph(ctx: &mut Context<'_>, content: &str, attrs: &Attributes) -> String {
    let available = ctx.width().saturating_sub(PARAGRAPH_MARGIN).max(1);
    let wrapped = wrap_lines(content, available);
    let margin = fill(' ', PARAGRAPH_MARGIN);

    let mut out = String::new();
    if attrs.is_empty() {
        for line in &wrapped {
            out.push_str(&margin);
            out.push_str(line);
            out.push('\n');
        }
    } else {
        let width = ctx.width().saturating_sub(PARAGRAPH_MARGIN);
        ctx.with_width(width, |ctx| {
            for line in &wrapped {
                out.push_str(&align_line(line, ctx.width(), Alignment::Right));
                out.push_str(&margin);
                out.push('\n');
            }
        });
    }
    out.push('\n');
    out
}

/// Split into non-empty lines, wrapping those wider than `width`.
fn wrap_lines(content: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for line in split_nonempty(content, '\n') {
        if display_width(line) > width {
            lines.extend(textwrap::wrap(line, width).into_iter().map(|l| l.into_owned()));
        } else {
            lines.push(line.to_string());
        }
    }
    lines
}

/// `<frame>`: center the text inside a box fitted to the longest line.
pub fn frame(ctx: &mut Context<'_>, content: &str, _attrs: &Attributes) -> String {
    let lines: Vec<&str> = split_nonempty(content, '\n').collect();
    if lines.is_empty() {
        return String::new();
    }
    let longest = max_width(lines.iter().copied());

    ctx.with_width(longest + 2, |ctx| {
        let inner = ctx.width();
        let rule = fill('=', inner.saturating_sub(2));

        let mut rows = Vec::with_capacity(lines.len() + 2);
        rows.push(format!(" .+-{}-+. ", rule));
        for line in &lines {
            rows.push(format!(" ||{}|| ", align_line(line, inner, Alignment::Center)));
        }
        rows.push(format!(" '+-{}-+' ", rule));
        rows.join("\n")
    })
}

/// `<list>`: numbered list, or bulleted with the first attribute character.
pub fn list(_ctx: &mut Context<'_>, content: &str, attrs: &Attributes) -> String {
    let items: Vec<&str> = split_nonempty(content, '\n').collect();
    let bullet = attrs.first_char();
    let number_width = digit_count(items.len());

    items
        .iter()
        .enumerate()
        .map(|(i, item)| match bullet {
            Some(c) => format!(" {} {}", c, item),
            None => {
                let n = i + 1;
                format!(" {}) {}{}", n, fill(' ', number_width - digit_count(n)), item)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
