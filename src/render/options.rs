//! Rendering options and configuration.

use std::path::PathBuf;

use chrono::NaiveDateTime;

use super::layout::DEFAULT_WIDTH;

/// Options for rendering a document.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Width every document starts with, and the value `def_width` restores
    pub default_width: usize,

    /// Directory that relative `insert` paths are resolved against
    /// (current directory when `None`)
    pub base_dir: Option<PathBuf>,

    /// Fixed timestamp for `date`/`time`/`datetime` (local clock when `None`)
    pub now: Option<NaiveDateTime>,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the starting document width.
    pub fn with_width(mut self, width: usize) -> Self {
        self.default_width = width;
        self
    }

    /// Set the directory for resolving `insert` paths.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Pin the clock used by date and time tags.
    pub fn with_now(mut self, now: NaiveDateTime) -> Self {
        self.now = Some(now);
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            default_width: DEFAULT_WIDTH,
            base_dir: None,
            now: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_render_options_builder() {
        let now = NaiveDate::from_ymd_opt(2023, 5, 17)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let options = RenderOptions::new()
            .with_width(60)
            .with_base_dir("docs")
            .with_now(now);

        assert_eq!(options.default_width, 60);
        assert_eq!(options.base_dir, Some(PathBuf::from("docs")));
        assert_eq!(options.now, Some(now));
    }

    #[test]
    fn test_render_options_defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.default_width, 80);
        assert!(options.base_dir.is_none());
        assert!(options.now.is_none());
    }
}
