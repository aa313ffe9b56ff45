//! Tag dispatch registry and the built-in tag handlers.
//!
//! The registry maps a tag name to its [`TagKind`] and a [`TagHandler`]. The
//! scanner asks it which names are single (content-less), and the executor
//! hands every located tag to [`TagRegistry::dispatch`].
//!
//! # Example
//!
//! ```
//! use txtml::parser::Attributes;
//! use txtml::render::Context;
//! use txtml::tags::{TagKind, TagRegistry};
//!
//! let mut registry = TagRegistry::with_defaults();
//! registry.register_fn("upper", TagKind::Paired, |_ctx: &mut Context<'_>, content: &str, _attrs: &Attributes| {
//!     content.to_uppercase()
//! });
//! assert!(registry.get("upper").is_some());
//! ```

pub mod align;
pub mod calc;
pub mod datetime;
pub mod header;
pub mod histogram;
pub mod insert;
pub mod table;
pub mod text;

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::parser::{Attributes, ErrorMode, TagContent, TagHead};
use crate::render::{Context, Warning};

/// Whether a tag takes content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// Content-less tag with no closing form, e.g. `<date>`
    Single,
    /// Tag wrapping content up to a matching `</name>`
    Paired,
}

/// Produces the replacement text for one tag.
///
/// Handlers receive content that is already free of tags. They may read
/// and change the document width through the [`Context`].
pub trait TagHandler: Send + Sync {
    /// Render the tag.
    fn render(&self, ctx: &mut Context<'_>, content: &str, attrs: &Attributes) -> String;
}

impl<F> TagHandler for F
where
    F: Fn(&mut Context<'_>, &str, &Attributes) -> String + Send + Sync,
{
    fn render(&self, ctx: &mut Context<'_>, content: &str, attrs: &Attributes) -> String {
        self(ctx, content, attrs)
    }
}

/// A registered tag.
#[derive(Clone)]
pub struct TagSpec {
    /// Single or paired
    pub kind: TagKind,
    /// Handler producing the output
    pub handler: Arc<dyn TagHandler>,
}

/// Registry of known tags.
pub struct TagRegistry {
    tags: HashMap<String, TagSpec>,
}

impl TagRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            tags: HashMap::new(),
        }
    }

    /// Create a registry with every built-in tag.
    pub fn with_defaults() -> Self {
        use TagKind::{Paired, Single};

        let mut registry = Self::new();
        registry.register_fn("date", Single, datetime::date);
        registry.register_fn("time", Single, datetime::time);
        registry.register_fn("datetime", Single, datetime::datetime);
        registry.register_fn("right", Paired, align::right);
        registry.register_fn("center", Paired, align::center);
        registry.register_fn("h1", Paired, header::h1);
        registry.register_fn("h2", Paired, header::h2);
        registry.register_fn("h3", Paired, header::h3);
        registry.register_fn("h4", Paired, header::h4);
        registry.register_fn("doc_width", Single, text::doc_width);
        registry.register_fn("def_width", Single, text::def_width);
        registry.register_fn("sep", Single, text::sep);
        registry.register_fn("p", Paired, text::paragraph);
        registry.register_fn("frame", Paired, text::frame);
        registry.register_fn("list", Paired, text::list);
        registry.register_fn("lines", Single, text::lines);
        registry.register_fn("calc", Paired, calc::calc);
        registry.register_fn("table", Paired, table::table);
        registry.register_fn("histogram", Paired, histogram::histogram);
        registry.register_fn("insert", Single, insert::insert);
        registry
    }

    /// Register a handler, replacing any tag of the same name.
    pub fn register(&mut self, name: impl Into<String>, kind: TagKind, handler: Arc<dyn TagHandler>) {
        self.tags.insert(name.into(), TagSpec { kind, handler });
    }

    /// Register a function or closure as a handler.
    pub fn register_fn<F>(&mut self, name: impl Into<String>, kind: TagKind, handler: F)
    where
        F: Fn(&mut Context<'_>, &str, &Attributes) -> String + Send + Sync + 'static,
    {
        self.register(name, kind, Arc::new(handler));
    }

    /// Look up a tag.
    pub fn get(&self, name: &str) -> Option<&TagSpec> {
        self.tags.get(name)
    }

    /// True when `name` is a registered single tag.
    pub fn is_single(&self, name: &str) -> bool {
        self.get(name).is_some_and(|spec| spec.kind == TagKind::Single)
    }

    /// Registered tag names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tags.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Run the handler for a located tag.
    ///
    /// Unknown names pass their (already resolved) content through with a
    /// warning. Unterminated known tags fail in strict mode and are dropped
    /// with a warning otherwise. Empty tags produce nothing.
    pub fn dispatch(
        &self,
        ctx: &mut Context<'_>,
        head: &TagHead,
        content: &TagContent,
        mode: ErrorMode,
    ) -> Result<String> {
        let Some(spec) = self.get(&head.name) else {
            ctx.warn(Warning::UnknownTag {
                name: head.name.clone(),
            });
            ctx.stats_mut().add_unknown();
            return Ok(content.as_str().to_string());
        };

        match content {
            TagContent::Unterminated => match mode {
                ErrorMode::Strict => Err(Error::UnterminatedTag {
                    name: head.name.clone(),
                }),
                ErrorMode::Lenient => {
                    ctx.warn(Warning::UnterminatedTag {
                        name: head.name.clone(),
                    });
                    ctx.stats_mut().add_unterminated();
                    Ok(String::new())
                }
            },
            TagContent::Empty => {
                log::debug!("empty <{}> ignored", head.name);
                Ok(String::new())
            }
            TagContent::Single | TagContent::Text(_) => {
                let output = spec.handler.render(ctx, content.as_str(), &head.attributes);
                ctx.stats_mut().add_resolved();
                Ok(output)
            }
        }
    }
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
