//! Header tags `h1` to `h4`.
//!
//! `h1` puts centered text between two full-width rules. `h2` and `h3`
//! embed the text in a single rule line. `h4` underlines the text. The
//! first character of the first attribute overrides the fill character.

use super::align::{align_lines, Alignment};
use crate::parser::Attributes;
use crate::render::Context;
use crate::util::{display_width, fill};

/// `<h1>`: rule, centered text, rule.
pub fn h1(ctx: &mut Context<'_>, content: &str, attrs: &Attributes) -> String {
    let fill_char = attrs.first_char().unwrap_or('=');
    with_fitting_width(ctx, content, |ctx| {
        let width = ctx.width();
        let rule = fill(fill_char, width);
        format!(
            "{}\n{}\n{}",
            rule,
            align_lines(content, width, Alignment::Center),
            rule
        )
    })
}

/// `<h2>`: `==== text ====` across the width.
pub fn h2(ctx: &mut Context<'_>, content: &str, attrs: &Attributes) -> String {
    inline_header(ctx, content, attrs.first_char().unwrap_or('='))
}

/// `<h3>`: `---- text ----` across the width.
pub fn h3(ctx: &mut Context<'_>, content: &str, attrs: &Attributes) -> String {
    inline_header(ctx, content, attrs.first_char().unwrap_or('-'))
}

/// `<h4>`: text underlined by a rule of the same length.
pub fn h4(_ctx: &mut Context<'_>, content: &str, attrs: &Attributes) -> String {
    let fill_char = attrs.first_char().unwrap_or('-');
    format!("{}\n{}", content, fill(fill_char, display_width(content)))
}

fn inline_header(ctx: &mut Context<'_>, content: &str, fill_char: char) -> String {
    with_fitting_width(ctx, content, |ctx| {
        let width = ctx.width();
        let len = display_width(content);
        let mut line = fill(fill_char, width.saturating_sub(len + 1) / 2);
        line.push(' ');
        line.push_str(content);
        line.push(' ');
        let rest = width.saturating_sub(display_width(&line));
        line.push_str(&fill(fill_char, rest));
        line
    })
}

/// Widen the document while rendering text longer than the current width.
fn with_fitting_width<F>(ctx: &mut Context<'_>, content: &str, render: F) -> String
where
    F: FnOnce(&mut Context<'_>) -> String,
{
    let len = display_width(content);
    if ctx.width() < len {
        ctx.with_width(len + 4, |ctx| render(ctx))
    } else {
        render(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderOptions;

    #[test]
    fn test_h2_spans_width() {
        let options = RenderOptions::default();
        let mut ctx = Context::new(&options);
        let out = h2(&mut ctx, "Report", &Attributes::default());

        assert_eq!(out.len(), 80);
        assert_eq!(out, format!("{} Report {}", "=".repeat(36), "=".repeat(36)));
    }

    #[test]
    fn test_h3_default_and_custom_fill() {
        let options = RenderOptions::new().with_width(20);
        let mut ctx = Context::new(&options);

        assert_eq!(h3(&mut ctx, "abc", &Attributes::default()), "-------- abc -------");
        assert_eq!(h3(&mut ctx, "abc", &Attributes::new(["*"])), "******** abc *******");
    }

    #[test]
    fn test_h1_rules_and_center() {
        let options = RenderOptions::new().with_width(10);
        let mut ctx = Context::new(&options);
        let out = h1(&mut ctx, "Hi", &Attributes::default());
        assert_eq!(out, "==========\n    Hi    \n==========");
    }

    #[test]
    fn test_long_header_widens_then_restores() {
        let options = RenderOptions::new().with_width(10);
        let mut ctx = Context::new(&options);
        let text = "a rather long title";
        let out = h1(&mut ctx, text, &Attributes::default());

        let first = out.lines().next().unwrap();
        assert_eq!(first.len(), text.len() + 4);
        assert_eq!(ctx.width(), 10);
    }

    #[test]
    fn test_h4_underline() {
        let options = RenderOptions::default();
        let mut ctx = Context::new(&options);
        assert_eq!(h4(&mut ctx, "Notes", &Attributes::default()), "Notes\n-----");
        assert_eq!(h4(&mut ctx, "Notes", &Attributes::new(["~"])), "Notes\n~~~~~");
    }
}
