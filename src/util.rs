//! String helpers shared by the scanner and the tag handlers.
//!
//! Widths are measured in terminal columns (`unicode-width`), not bytes, so
//! alignment stays correct for non-ASCII text.

use std::sync::OnceLock;

use regex::Regex;
use unicode_width::UnicodeWidthStr;

/// Split `s` on `delim`, dropping empty pieces.
///
/// Consecutive delimiters collapse, and leading/trailing delimiters produce
/// nothing, so `"a||b\n"` split on `'|'` yields `["a", "b\n"]`.
pub fn split_nonempty(s: &str, delim: char) -> impl Iterator<Item = &str> {
    s.split(delim).filter(|piece| !piece.is_empty())
}

/// Build a string of `count` copies of `ch`.
pub fn fill(ch: char, count: usize) -> String {
    std::iter::repeat(ch).take(count).collect()
}

/// Display width of `s` in columns.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Widest line among `lines`, 0 when empty.
pub fn max_width<'a>(lines: impl IntoIterator<Item = &'a str>) -> usize {
    lines.into_iter().map(display_width).max().unwrap_or(0)
}

/// Pad `s` with spaces on the left up to `width` columns.
pub fn pad_left(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(display_width(s));
    let mut out = String::with_capacity(s.len() + pad);
    out.push_str(&fill(' ', pad));
    out.push_str(s);
    out
}

/// Pad `s` with spaces on the right up to `width` columns.
pub fn pad_right(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(display_width(s));
    let mut out = String::with_capacity(s.len() + pad);
    out.push_str(s);
    out.push_str(&fill(' ', pad));
    out
}

fn num_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9.\- ]+$").unwrap())
}

fn number_like_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9.,\- ]+$").unwrap())
}

/// True when `s` is non-empty and made only of digits, `-`, `.` and spaces.
///
/// This is the loose check used for numeric attributes and histogram values.
pub fn is_num(s: &str) -> bool {
    num_pattern().is_match(s)
}

/// Like [`is_num`] but also accepts `,` as a decimal separator.
///
/// Table cells that pass this check are right-aligned.
pub fn is_number_like(s: &str) -> bool {
    number_like_pattern().is_match(s)
}

/// Parse the leading integer of `s` the way C `atoi` does.
///
/// Leading spaces are skipped, an optional sign is honoured, and parsing
/// stops at the first non-digit. Returns 0 when no digits are found.
pub fn atoi(s: &str) -> i64 {
    let s = s.trim_start_matches(' ');
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let value = digits
        .chars()
        .take_while(char::is_ascii_digit)
        .fold(0i64, |acc, d| {
            acc.saturating_mul(10)
                .saturating_add(i64::from(d as u8 - b'0'))
        });
    if negative {
        -value
    } else {
        value
    }
}

/// Number of decimal digits needed to print `n`.
pub fn digit_count(n: usize) -> usize {
    n.to_string().len()
}

/// Trim ASCII spaces (only spaces) from both ends.
pub fn trim_spaces(s: &str) -> &str {
    s.trim_matches(' ')
}

/// Decode bytes as UTF-8, replacing invalid sequences with U+FFFD.
///
/// The flag is true when any replacement was made.
pub fn decode_lossy(bytes: Vec<u8>) -> (String, bool) {
    match String::from_utf8(bytes) {
        Ok(text) => (text, false),
        Err(err) => (String::from_utf8_lossy(err.as_bytes()).into_owned(), true),
    }
}

/// Remove every ASCII space from `s`.
pub fn remove_spaces(s: &str) -> String {
    s.chars().filter(|&c| c != ' ').collect()
}
