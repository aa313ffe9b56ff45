//! `date`, `time` and `datetime` tags.

use crate::parser::Attributes;
use crate::render::Context;

/// Format of `<date>`: `17.05.2023`.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Format of `<time>`: `09:30:00`.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Current date.
pub fn date(ctx: &mut Context<'_>, _content: &str, _attrs: &Attributes) -> String {
    ctx.now().format(DATE_FORMAT).to_string()
}

/// Current time.
pub fn time(ctx: &mut Context<'_>, _content: &str, _attrs: &Attributes) -> String {
    ctx.now().format(TIME_FORMAT).to_string()
}

/// Current date and time, separated by a space.
pub fn datetime(ctx: &mut Context<'_>, _content: &str, _attrs: &Attributes) -> String {
    let now = ctx.now();
    format!("{} {}", now.format(DATE_FORMAT), now.format(TIME_FORMAT))
}
