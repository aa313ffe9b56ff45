//! Recursive tag executor.
//!
//! Resolution is innermost-first: a tag's content is fully resolved before
//! the tag itself is dispatched. After every splice the whole document is
//! scanned again from the start, so text produced by a handler is resolved
//! too.

use std::ops::Range;

use super::Context;
use crate::error::{Error, Result};
use crate::parser::{find_tag, ParseOptions, TagContent};
use crate::tags::TagRegistry;

/// Resolves every tag in a document against a registry.
pub struct Executor<'r> {
    registry: &'r TagRegistry,
    options: &'r ParseOptions,
}

impl<'r> Executor<'r> {
    /// Create an executor.
    pub fn new(registry: &'r TagRegistry, options: &'r ParseOptions) -> Self {
        Self { registry, options }
    }

    /// Resolve `text` until no tag remains.
    pub fn resolve(&self, ctx: &mut Context<'_>, text: String) -> Result<String> {
        self.resolve_at(ctx, text, 0)
    }

    fn resolve_at(&self, ctx: &mut Context<'_>, mut text: String, depth: usize) -> Result<String> {
        if depth > self.options.max_depth {
            return Err(Error::NestingTooDeep {
                limit: self.options.max_depth,
            });
        }
        ctx.stats_mut().record_depth(depth);

        while let Some(tag) = find_tag(&text, |name| self.registry.is_single(name)) {
            let content = match tag.content {
                TagContent::Text(inner) => {
                    TagContent::Text(self.resolve_at(ctx, inner, depth + 1)?)
                }
                other => other,
            };
            log::debug!("resolving <{}> at depth {}", tag.head.name, depth);

            let output = self
                .registry
                .dispatch(ctx, &tag.head, &content, self.options.error_mode)?;
            text = splice(&text, tag.span, &output)?;
        }

        Ok(text)
    }
}

/// Replace `span` of `text` with `replacement`.
fn splice(text: &str, span: Range<usize>, replacement: &str) -> Result<String> {
    let mut out = String::new();
    out.try_reserve(text.len() - span.len() + replacement.len())?;
    out.push_str(&text[..span.start]);
    out.push_str(replacement);
    out.push_str(&text[span.end..]);
    Ok(out)
}
