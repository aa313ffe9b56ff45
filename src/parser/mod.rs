//! Markup parsing: tag heads, the tag scanner, and parse options.

mod head;
mod options;
mod scanner;

pub use head::{Attributes, TagHead};
pub use options::{ErrorMode, ParseOptions, DEFAULT_MAX_DEPTH};
pub use scanner::{close_marker, find_tag, TagContent, TagOccurrence};
