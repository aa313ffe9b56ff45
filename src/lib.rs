//! # txtml
//!
//! Markup-to-text compiler for `.tml` documents.
//!
//! A document is plain text with tags such as `<center>`, `<table>` or
//! `<calc>`. Tags are resolved innermost-first and replaced with laid-out
//! text: aligned lines, headers, framed text, bordered tables, histograms,
//! dates and arithmetic results.
//!
//! ## Quick Start
//!
//! ```
//! use txtml::render_str;
//!
//! fn main() -> txtml::Result<()> {
//!     let text = render_str("<calc s>2+2</calc>")?;
//!     assert_eq!(text, "2+2 = 4");
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Nested tags**: inner tags resolve before the tags around them
//! - **Layout**: alignment, headers, paragraphs, lists, frames, separators
//! - **Tables**: per-cell arithmetic, numeric alignment, grid borders
//! - **Histograms**: bars scaled to the document width
//! - **Batch conversion**: every `.tml` in a directory, in parallel with Rayon

pub mod convert;
pub mod error;
pub mod expr;
pub mod model;
pub mod parser;
pub mod render;
pub mod tags;
pub mod util;

// Re-export commonly used types
pub use convert::{BatchReport, ConvertOptions, ConvertResult, Converter};
pub use error::{Error, Result};
pub use parser::{Attributes, ErrorMode, ParseOptions};
pub use render::{RenderOptions, RenderResult, RenderStats, Warning};
pub use tags::{TagHandler, TagKind, TagRegistry};

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

/// Render markup text with default options.
///
/// # Example
///
/// ```
/// let text = txtml::render_str("<right>x</right>").unwrap();
/// assert_eq!(text.len(), 80);
/// ```
pub fn render_str(source: &str) -> Result<String> {
    Ok(render_str_with_options(source, &RenderOptions::default())?.content)
}

/// Render markup text with custom render options, keeping diagnostics.
///
/// # Example
///
/// ```
/// use txtml::{render_str_with_options, RenderOptions};
///
/// let options = RenderOptions::new().with_width(20);
/// let result = render_str_with_options("<sep>", &options).unwrap();
/// assert_eq!(result.content, "-".repeat(20));
/// ```
pub fn render_str_with_options(source: &str, options: &RenderOptions) -> Result<RenderResult> {
    render::render(
        source,
        &TagRegistry::with_defaults(),
        &ParseOptions::default(),
        options,
    )
}

/// Render a `.tml` file and return its text without writing anything.
///
/// Relative `insert` paths resolve against the file's directory.
///
/// # Example
///
/// ```no_run
/// let text = txtml::render_file("report.tml").unwrap();
/// println!("{}", text);
/// ```
pub fn render_file<P: AsRef<Path>>(path: P) -> Result<String> {
    Ok(Txtml::new().render_file(path)?.content)
}

/// Builder for rendering documents.
///
/// # Example
///
/// ```
/// use txtml::Txtml;
///
/// let result = Txtml::new()
///     .with_width(40)
///     .strict()
///     .render("<h3>Totals</h3>")?;
/// assert_eq!(result.content.len(), 40);
/// # Ok::<(), txtml::Error>(())
/// ```
pub struct Txtml {
    registry: TagRegistry,
    parse_options: ParseOptions,
    render_options: RenderOptions,
}

impl Txtml {
    /// Create a new builder with the built-in tags.
    pub fn new() -> Self {
        Self {
            registry: TagRegistry::with_defaults(),
            parse_options: ParseOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Set the starting document width.
    pub fn with_width(mut self, width: usize) -> Self {
        self.render_options = self.render_options.with_width(width);
        self
    }

    /// Fail on unterminated tags.
    pub fn strict(mut self) -> Self {
        self.parse_options = self.parse_options.strict();
        self
    }

    /// Drop unterminated tags with a warning (default).
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Set the nesting depth limit.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.parse_options = self.parse_options.with_max_depth(depth);
        self
    }

    /// Set the directory for resolving `insert` paths.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.render_options = self.render_options.with_base_dir(dir);
        self
    }

    /// Pin the clock used by date and time tags.
    pub fn at(mut self, now: NaiveDateTime) -> Self {
        self.render_options = self.render_options.with_now(now);
        self
    }

    /// Use a custom tag registry.
    pub fn with_registry(mut self, registry: TagRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Render markup text.
    pub fn render(&self, source: &str) -> Result<RenderResult> {
        render::render(
            source,
            &self.registry,
            &self.parse_options,
            &self.render_options,
        )
    }

    /// Render a file. Relative `insert` paths resolve against the file's
    /// directory unless a base directory was set. Invalid UTF-8 is replaced
    /// and reported as a warning.
    pub fn render_file<P: AsRef<Path>>(&self, path: P) -> Result<RenderResult> {
        let path = path.as_ref();
        let (source, warning) = convert::read_source(path)?;

        let mut options = self.render_options.clone();
        if options.base_dir.is_none() {
            options.base_dir = path.parent().map(Path::to_path_buf);
        }
        let mut result = render::render(&source, &self.registry, &self.parse_options, &options)?;
        if let Some(warning) = warning {
            result.prepend_warning(warning);
        }
        Ok(result)
    }

    /// Turn the builder into a file converter.
    pub fn into_converter(self, parallel: bool) -> Converter {
        let options = ConvertOptions::new()
            .with_parse_options(self.parse_options)
            .with_render_options(self.render_options)
            .with_parallel(parallel);
        Converter::with_registry(self.registry, options)
    }
}

impl Default for Txtml {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_render_str_plain_text() {
        assert_eq!(render_str("hello").unwrap(), "hello");
    }

    #[test]
    fn test_builder_at_pins_clock() {
        let now = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        let result = Txtml::new().at(now).render("<datetime>").unwrap();
        assert_eq!(result.content, "02.01.2024 03:04:05");
    }

    #[test]
    fn test_builder_strict() {
        let err = Txtml::new().strict().render("<p>open").unwrap_err();
        assert!(matches!(err, Error::UnterminatedTag { .. }));
        assert!(Txtml::new().render("<p>open").is_ok());
    }

    #[test]
    fn test_builder_custom_registry() {
        let mut registry = TagRegistry::new();
        registry.register_fn("shout", TagKind::Paired, |_: &mut render::Context<'_>, content: &str, _: &Attributes| {
            content.to_uppercase()
        });
        let result = Txtml::new()
            .with_registry(registry)
            .render("<shout>hi</shout> <center>x</center>")
            .unwrap();
        assert_eq!(result.content, "HI x");
        assert_eq!(result.warnings.len(), 1);
    }
}
