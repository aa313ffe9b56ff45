//! Per-document rendering context threaded through every tag handler.

use chrono::{Local, NaiveDateTime};

use super::layout::Layout;
use super::{RenderOptions, RenderStats, Warning};

/// Request-scoped state for resolving one document.
///
/// Holds the current document width, the render options, and the warnings
/// and statistics collected so far. A fresh context is created for every
/// document, so width changes never leak between files.
#[derive(Debug)]
pub struct Context<'a> {
    layout: Layout,
    options: &'a RenderOptions,
    warnings: Vec<Warning>,
    stats: RenderStats,
}

impl<'a> Context<'a> {
    /// Create a context at the configured default width.
    pub fn new(options: &'a RenderOptions) -> Self {
        Self {
            layout: Layout::new(options.default_width),
            options,
            warnings: Vec::new(),
            stats: RenderStats::new(),
        }
    }

    /// Current document width.
    pub fn width(&self) -> usize {
        self.layout.width()
    }

    /// Set the document width as requested by markup.
    ///
    /// Out-of-range requests are clamped and reported.
    pub fn set_width(&mut self, requested: i64) {
        let change = self.layout.set_width(requested);
        if change.is_clamped() {
            self.warn(Warning::WidthClamped {
                requested: change.requested,
                applied: change.applied,
            });
        }
    }

    /// Restore the configured default width.
    pub fn reset_width(&mut self) {
        self.layout.reset();
    }

    /// Run `f` with the width temporarily set to `width` (clamped), then
    /// restore the previous width.
    pub fn with_width<T>(&mut self, width: usize, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.layout.width();
        let change = self
            .layout
            .set_width(i64::try_from(width).unwrap_or(i64::MAX));
        if change.is_clamped() {
            log::debug!(
                "scoped width {} clamped to {}",
                change.requested,
                change.applied
            );
        }
        let out = f(self);
        self.layout.set_width(saved as i64);
        out
    }

    /// Render options of this document.
    pub fn options(&self) -> &RenderOptions {
        self.options
    }

    /// Timestamp for date and time tags.
    pub fn now(&self) -> NaiveDateTime {
        self.options
            .now
            .unwrap_or_else(|| Local::now().naive_local())
    }

    /// Record a warning and log it.
    pub fn warn(&mut self, warning: Warning) {
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }

    /// Warnings collected so far.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Mutable access to the statistics.
    pub fn stats_mut(&mut self) -> &mut RenderStats {
        &mut self.stats
    }

    /// Consume the context, yielding its warnings and statistics.
    pub fn into_parts(self) -> (Vec<Warning>, RenderStats) {
        (self.warnings, self.stats)
    }
}
