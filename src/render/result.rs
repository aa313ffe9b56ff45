//! Rendering result with warnings and statistics.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Result of rendering a document, including content and diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered plain text
    pub content: String,

    /// Non-fatal problems found while resolving tags
    pub warnings: Vec<Warning>,

    /// Resolution statistics
    pub stats: RenderStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, warnings: Vec<Warning>, stats: RenderStats) -> Self {
        Self {
            content,
            warnings,
            stats,
        }
    }

    /// Add a warning found before resolution started (e.g. while reading
    /// the source), keeping it ahead of the resolution warnings.
    pub fn prepend_warning(&mut self, warning: Warning) {
        log::warn!("{}", warning);
        self.warnings.insert(0, warning);
    }

    /// True when resolution produced no warnings.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// A recoverable problem reported while resolving a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// Tag name is not registered; its content was kept, its markers dropped
    UnknownTag {
        /// Tag name as written
        name: String,
    },

    /// Paired tag without a closing tag; the opening marker was dropped
    UnterminatedTag {
        /// Tag name
        name: String,
    },

    /// Requested document width was outside the allowed range
    WidthClamped {
        /// Width asked for
        requested: i64,
        /// Width actually applied
        applied: usize,
    },

    /// `insert` without any file attribute
    InsertWithoutFile,

    /// `insert` file could not be read
    MissingInsertFile {
        /// Path as resolved
        path: PathBuf,
        /// Underlying I/O error
        reason: String,
    },

    /// File was not valid UTF-8; invalid bytes were replaced
    InvalidUtf8 {
        /// File path
        path: PathBuf,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnknownTag { name } => write!(f, "invalid tag \"{}\". Ignoring", name),
            Warning::UnterminatedTag { name } => {
                write!(f, "no closing tag found for \"{}\". Ignoring", name)
            }
            Warning::WidthClamped { requested, applied } => write!(
                f,
                "document width {} is out of range, using {}",
                requested, applied
            ),
            Warning::InsertWithoutFile => write!(f, "inserting txt: file not specified"),
            Warning::MissingInsertFile { path, reason } => {
                write!(f, "opening file \"{}\": {}", path.display(), reason)
            }
            Warning::InvalidUtf8 { path } => write!(
                f,
                "file \"{}\" is not valid UTF-8, invalid bytes replaced",
                path.display()
            ),
        }
    }
}

/// Statistics collected while resolving a document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderStats {
    /// Number of tags dispatched to a handler
    pub tags_resolved: u32,

    /// Number of unknown tags passed through
    pub unknown_tags: u32,

    /// Number of unterminated tags dropped
    pub unterminated_tags: u32,

    /// Deepest nesting level reached
    pub max_depth: u32,

    /// Lines in the rendered output
    pub line_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment resolved tag count.
    pub fn add_resolved(&mut self) {
        self.tags_resolved += 1;
    }

    /// Increment unknown tag count.
    pub fn add_unknown(&mut self) {
        self.unknown_tags += 1;
    }

    /// Increment unterminated tag count.
    pub fn add_unterminated(&mut self) {
        self.unterminated_tags += 1;
    }

    /// Record a nesting level.
    pub fn record_depth(&mut self, depth: usize) {
        let depth = u32::try_from(depth).unwrap_or(u32::MAX);
        self.max_depth = self.max_depth.max(depth);
    }

    /// Add line and character counts from rendered text.
    pub fn count_text(&mut self, text: &str) {
        self.line_count += text.lines().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &RenderStats) {
        self.tags_resolved += other.tags_resolved;
        self.unknown_tags += other.unknown_tags;
        self.unterminated_tags += other.unterminated_tags;
        self.max_depth = self.max_depth.max(other.max_depth);
        self.line_count += other.line_count;
        self.char_count += other.char_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_stats_count_text() {
        let mut stats = RenderStats::new();
        stats.count_text("Hello, world!\nSecond line");

        assert_eq!(stats.line_count, 2);
        assert_eq!(stats.char_count, 22);
    }

    #[test]
    fn test_render_stats_merge() {
        let mut stats1 = RenderStats::new();
        stats1.tags_resolved = 5;
        stats1.max_depth = 2;

        let stats2 = RenderStats {
            tags_resolved: 3,
            unknown_tags: 1,
            max_depth: 4,
            ..Default::default()
        };

        stats1.merge(&stats2);

        assert_eq!(stats1.tags_resolved, 8);
        assert_eq!(stats1.unknown_tags, 1);
        assert_eq!(stats1.max_depth, 4);
    }

    #[test]
    fn test_warning_display() {
        let warning = Warning::UnknownTag {
            name: "blink".to_string(),
        };
        assert_eq!(warning.to_string(), "invalid tag \"blink\". Ignoring");

        let warning = Warning::WidthClamped {
            requested: 5,
            applied: 10,
        };
        assert_eq!(
            warning.to_string(),
            "document width 5 is out of range, using 10"
        );
    }

    #[test]
    fn test_warning_serializes_with_kind() {
        let json = serde_json::to_string(&Warning::InsertWithoutFile).unwrap();
        assert_eq!(json, r#"{"kind":"insert_without_file"}"#);
    }

    #[test]
    fn test_prepend_warning() {
        let mut result = RenderResult::new(
            "text".to_string(),
            vec![Warning::InsertWithoutFile],
            RenderStats::default(),
        );
        result.prepend_warning(Warning::InvalidUtf8 {
            path: PathBuf::from("a.tml"),
        });

        assert_eq!(result.warnings.len(), 2);
        assert!(matches!(result.warnings[0], Warning::InvalidUtf8 { .. }));
        assert!(!result.is_clean());
    }
}
