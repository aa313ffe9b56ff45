//! Parsing options and configuration.

/// Default limit for tag nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Options controlling how tags are located and resolved.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Maximum tag nesting depth before resolution fails
    pub max_depth: usize,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable strict mode (unterminated tags fail the document).
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Enable lenient mode (unterminated tags are dropped with a warning).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set the nesting depth limit.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Lenient,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Error handling mode for malformed markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail the document on an unterminated tag
    Strict,
    /// Drop the unterminated opening tag, warn, and continue
    #[default]
    Lenient,
}
