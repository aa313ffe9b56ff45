//! Rendering: turns a markup document into plain text.
//!
//! [`render`] is the top-level driver. It normalizes the input, resolves all
//! tags with a fresh [`Context`], and restores escaped markup exactly once at
//! the end.

mod context;
mod escape;
mod executor;
mod layout;
mod options;
mod result;

pub use context::Context;
pub use escape::{escape_markup, is_reserved, restore_markup, strip_reserved, Placeholder};
pub use executor::Executor;
pub use layout::{clamp_width, Layout, WidthChange, DEFAULT_WIDTH, MAX_WIDTH, MIN_WIDTH};
pub use options::RenderOptions;
pub use result::{RenderResult, RenderStats, Warning};

use crate::error::Result;
use crate::parser::ParseOptions;
use crate::tags::TagRegistry;

/// Normalize raw document text: CRLF line endings become LF and reserved
/// placeholder characters are removed.
pub fn normalize_input(source: &str) -> String {
    strip_reserved(&source.replace("\r\n", "\n"))
}

/// Render a document to plain text.
pub fn render(
    source: &str,
    registry: &TagRegistry,
    parse: &ParseOptions,
    options: &RenderOptions,
) -> Result<RenderResult> {
    let mut ctx = Context::new(options);
    let resolved = Executor::new(registry, parse).resolve(&mut ctx, normalize_input(source))?;
    let content = restore_markup(&resolved);

    let (warnings, mut stats) = ctx.into_parts();
    stats.count_text(&content);
    Ok(RenderResult::new(content, warnings, stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_default(source: &str) -> RenderResult {
        render(
            source,
            &TagRegistry::with_defaults(),
            &ParseOptions::default(),
            &RenderOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_normalize_input() {
        assert_eq!(normalize_input("a\r\nb\u{FDD0}"), "a\nb");
    }

    #[test]
    fn test_render_collects_stats() {
        let result = render_default("<calc>2+2</calc>\n<calc s>2+2</calc>");
        assert_eq!(result.content, "4\n2+2 = 4");
        assert_eq!(result.stats.tags_resolved, 2);
        assert_eq!(result.stats.line_count, 2);
        assert!(result.is_clean());
    }

    #[test]
    fn test_width_does_not_leak_between_documents() {
        let registry = TagRegistry::with_defaults();
        let parse = ParseOptions::default();
        let options = RenderOptions::default();

        let first = render("<doc_width 20><sep>", &registry, &parse, &options).unwrap();
        assert_eq!(first.content.len(), 20);

        let second = render("<sep>", &registry, &parse, &options).unwrap();
        assert_eq!(second.content.len(), 80);
    }
}
