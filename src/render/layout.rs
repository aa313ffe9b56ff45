//! Document width state.

/// Width every document starts with unless configured otherwise.
pub const DEFAULT_WIDTH: usize = 80;

/// Smallest allowed document width.
pub const MIN_WIDTH: usize = 10;

/// Largest allowed document width.
pub const MAX_WIDTH: usize = 250;

/// Clamp a requested width into `[MIN_WIDTH, MAX_WIDTH]`.
pub fn clamp_width(requested: i64) -> usize {
    if requested < MIN_WIDTH as i64 {
        MIN_WIDTH
    } else if requested > MAX_WIDTH as i64 {
        MAX_WIDTH
    } else {
        requested as usize
    }
}

/// Outcome of a width change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidthChange {
    /// Width asked for
    pub requested: i64,
    /// Width applied after clamping
    pub applied: usize,
}

impl WidthChange {
    /// True when the request was out of range.
    pub fn is_clamped(&self) -> bool {
        self.requested != self.applied as i64
    }
}

/// Current document width, always within `[MIN_WIDTH, MAX_WIDTH]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    width: usize,
    default_width: usize,
}

impl Layout {
    /// Create a layout starting at `default_width` (clamped).
    pub fn new(default_width: usize) -> Self {
        let default_width = clamp_width(i64::try_from(default_width).unwrap_or(i64::MAX));
        Self {
            width: default_width,
            default_width,
        }
    }

    /// Current width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Width restored by [`Layout::reset`].
    pub fn default_width(&self) -> usize {
        self.default_width
    }

    /// Set the width, clamping out-of-range requests.
    pub fn set_width(&mut self, requested: i64) -> WidthChange {
        self.width = clamp_width(requested);
        WidthChange {
            requested,
            applied: self.width,
        }
    }

    /// Return to the default width.
    pub fn reset(&mut self) {
        self.width = self.default_width;
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_bounds() {
        assert_eq!(clamp_width(5), 10);
        assert_eq!(clamp_width(-3), 10);
        assert_eq!(clamp_width(300), 250);
        assert_eq!(clamp_width(40), 40);
        assert_eq!(clamp_width(10), 10);
        assert_eq!(clamp_width(250), 250);
    }

    #[test]
    fn test_set_width_reports_clamping() {
        let mut layout = Layout::default();
        let change = layout.set_width(5);
        assert!(change.is_clamped());
        assert_eq!(layout.width(), 10);

        let change = layout.set_width(300);
        assert!(change.is_clamped());
        assert_eq!(layout.width(), 250);

        let change = layout.set_width(60);
        assert!(!change.is_clamped());
        assert_eq!(layout.width(), 60);
    }

    #[test]
    fn test_reset_and_default() {
        let mut layout = Layout::new(1000);
        assert_eq!(layout.default_width(), 250);
        layout.set_width(20);
        layout.reset();
        assert_eq!(layout.width(), 250);
    }
}
