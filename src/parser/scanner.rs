//! Tag scanner: finds the first tag occurrence in a text buffer.
//!
//! A tag opens with `<head>` where the head is everything up to the first
//! `>`. A `<` immediately followed by `/` is a close marker and is never
//! taken as an opening. Paired tags take everything up to their matching
//! `</name>` as content, counting nested openings of the same name so that
//! `<center><center>x</center></center>` pairs correctly.

use std::ops::Range;

use super::head::TagHead;

/// Content of a located tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagContent {
    /// The tag is content-less by definition (`<date>`, `<sep>`, ...)
    Single,
    /// Opening tag immediately followed by its closing tag
    Empty,
    /// No matching closing tag was found
    Unterminated,
    /// Text between the opening and closing tags
    Text(String),
}

impl TagContent {
    /// The content text, or `""` for the marker variants.
    pub fn as_str(&self) -> &str {
        match self {
            TagContent::Text(text) => text,
            TagContent::Single | TagContent::Empty | TagContent::Unterminated => "",
        }
    }
}

/// A tag located in a text buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOccurrence {
    /// Parsed head (name and attributes)
    pub head: TagHead,

    /// Byte range of the whole occurrence, including a closing tag if present
    pub span: Range<usize>,

    /// Extracted content
    pub content: TagContent,
}

impl TagOccurrence {
    /// Tag name.
    pub fn name(&self) -> &str {
        &self.head.name
    }

    /// True for content-less tags.
    pub fn is_single(&self) -> bool {
        matches!(self.content, TagContent::Single)
    }
}

/// Find the first tag in `text`.
///
/// `is_single` decides whether a tag name is content-less. Returns `None`
/// when no `<` has a following `>`.
pub fn find_tag<F>(text: &str, is_single: F) -> Option<TagOccurrence>
where
    F: Fn(&str) -> bool,
{
    let mut from = 0;
    loop {
        let open = from + text[from..].find('<')?;
        let head_start = open + 1;
        if text[head_start..].starts_with('/') {
            from = head_start;
            continue;
        }
        let head_end = head_start + text[head_start..].find('>')?;
        let raw_head = &text[head_start..head_end];

        // `a < b <center>`: the real opening is the last `<` before `>`.
        if let Some(inner) = raw_head.rfind('<') {
            from = head_start + inner;
            continue;
        }

        let open_end = head_end + 1;
        let head = TagHead::parse(raw_head);
        if head.name.is_empty() {
            from = open_end;
            continue;
        }

        if is_single(&head.name) {
            return Some(TagOccurrence {
                head,
                span: open..open_end,
                content: TagContent::Single,
            });
        }

        let occurrence = match find_close(text, open_end, &head.name) {
            Some(close_start) => {
                let close_end = close_start + close_marker(&head.name).len();
                let raw_content = &text[open_end..close_start];
                let content = if raw_content.is_empty() {
                    TagContent::Empty
                } else {
                    TagContent::Text(trim_newlines(raw_content).to_string())
                };
                TagOccurrence {
                    head,
                    span: open..close_end,
                    content,
                }
            }
            None => TagOccurrence {
                head,
                span: open..open_end,
                content: TagContent::Unterminated,
            },
        };
        return Some(occurrence);
    }
}

/// Closing marker for a tag name: `</name>`.
pub fn close_marker(name: &str) -> String {
    format!("</{}>", name)
}

/// Byte offset of the `</name>` matching an opening that ends at `from`.
fn find_close(text: &str, from: usize, name: &str) -> Option<usize> {
    let close = close_marker(name);
    let mut depth = 1usize;
    let mut pos = from;
    while let Some(rel) = text[pos..].find('<') {
        let at = pos + rel;
        let rest = &text[at..];
        if rest.starts_with(&close) {
            depth -= 1;
            if depth == 0 {
                return Some(at);
            }
            pos = at + close.len();
            continue;
        }
        if opens_same(&rest[1..], name) {
            depth += 1;
        }
        pos = at + 1;
    }
    None
}

/// True when `after_lt` (text following a `<`) opens another `name` tag.
fn opens_same(after_lt: &str, name: &str) -> bool {
    let Some(rest) = after_lt.strip_prefix(name) else {
        return false;
    };
    match rest.chars().next() {
        Some('>') => true,
        Some(c) if c.is_whitespace() => match rest.find('>') {
            Some(end) => !rest[..end].contains('<'),
            None => false,
        },
        _ => false,
    }
}

/// Strip at most one leading and one trailing newline.
fn trim_newlines(s: &str) -> &str {
    let s = s.strip_prefix('\n').unwrap_or(s);
    s.strip_suffix('\n').unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(name: &str) -> bool {
        matches!(name, "date" | "sep" | "doc_width" | "insert")
    }

    #[test]
    fn test_no_tag() {
        assert!(find_tag("plain text", single).is_none());
        assert!(find_tag("a < b", single).is_none());
        assert!(find_tag("a > b < c", single).is_none());
        assert!(find_tag("", single).is_none());
    }

    #[test]
    fn test_paired_tag() {
        let text = "before <center>hello</center> after";
        let tag = find_tag(text, single).unwrap();
        assert_eq!(tag.name(), "center");
        assert_eq!(tag.content, TagContent::Text("hello".to_string()));
        assert_eq!(&text[tag.span.clone()], "<center>hello</center>");
    }

    #[test]
    fn test_single_tag() {
        let text = "x <sep => y";
        let tag = find_tag(text, single).unwrap();
        assert!(tag.is_single());
        assert_eq!(tag.head.attributes.first(), Some("="));
        assert_eq!(&text[tag.span], "<sep =>");
    }

    #[test]
    fn test_close_marker_is_skipped() {
        let text = "</p> then <center>x</center>";
        let tag = find_tag(text, single).unwrap();
        assert_eq!(tag.name(), "center");
    }

    #[test]
    fn test_stray_lt_before_tag() {
        let text = "x < y <center>z</center>";
        let tag = find_tag(text, single).unwrap();
        assert_eq!(tag.name(), "center");
        assert_eq!(tag.span.start, 6);
    }

    #[test]
    fn test_newlines_trimmed_once() {
        let tag = find_tag("<p>\n\nline\n\n</p>", single).unwrap();
        assert_eq!(tag.content, TagContent::Text("\nline\n".to_string()));
    }

    #[test]
    fn test_empty_and_unterminated() {
        let tag = find_tag("<center></center>", single).unwrap();
        assert_eq!(tag.content, TagContent::Empty);

        let text = "<center>no close here";
        let tag = find_tag(text, single).unwrap();
        assert_eq!(tag.content, TagContent::Unterminated);
        assert_eq!(&text[tag.span], "<center>");
    }

    #[test]
    fn test_nested_same_name() {
        let text = "<center><center>x</center></center>!";
        let tag = find_tag(text, single).unwrap();
        assert_eq!(
            tag.content,
            TagContent::Text("<center>x</center>".to_string())
        );
        assert_eq!(&text[tag.span.end..], "!");
    }

    #[test]
    fn test_nested_same_name_with_attributes() {
        let text = "<list><list *>a</list></list>";
        let tag = find_tag(text, single).unwrap();
        assert_eq!(tag.content, TagContent::Text("<list *>a</list>".to_string()));
    }

    #[test]
    fn test_similar_prefix_is_not_nested() {
        let text = "<h1><h10>x</h1>";
        let tag = find_tag(text, single).unwrap();
        assert_eq!(tag.content, TagContent::Text("<h10>x".to_string()));
    }

    #[test]
    fn test_empty_head_skipped() {
        let tag = find_tag("<> < > <date>", single).unwrap();
        assert_eq!(tag.name(), "date");
    }
}
