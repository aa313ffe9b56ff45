//! Placeholder protocol for literal angle brackets.
//!
//! Text pulled in from outside the document (inserted files) may contain
//! `<` and `>` that must never be read as tags. Such text is escaped into
//! placeholder characters before it is spliced into the document, and the
//! driver restores them once after resolution has finished.
//!
//! Placeholders are Unicode noncharacters (U+FDD0 and up). The whole
//! noncharacter block U+FDD0..=U+FDEF is reserved: it is stripped from
//! input so a document can never forge a placeholder.

/// Characters standing in for literal markup until resolution is complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// A literal `<`
    OpenAngle,
    /// A literal `>`
    CloseAngle,
}

impl Placeholder {
    /// All placeholders.
    pub const ALL: [Placeholder; 2] = [Placeholder::OpenAngle, Placeholder::CloseAngle];

    /// Reserved character that encodes this placeholder.
    pub const fn as_char(self) -> char {
        match self {
            Placeholder::OpenAngle => '\u{FDD0}',
            Placeholder::CloseAngle => '\u{FDD1}',
        }
    }

    /// Literal character this placeholder stands for.
    pub const fn literal(self) -> char {
        match self {
            Placeholder::OpenAngle => '<',
            Placeholder::CloseAngle => '>',
        }
    }

    fn from_char(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_char() == c)
    }

    fn from_literal(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.literal() == c)
    }
}

/// True for characters in the reserved noncharacter block.
pub fn is_reserved(c: char) -> bool {
    ('\u{FDD0}'..='\u{FDEF}').contains(&c)
}

/// Replace literal `<` and `>` with placeholders.
pub fn escape_markup(text: &str) -> String {
    text.chars()
        .map(|c| Placeholder::from_literal(c).map_or(c, Placeholder::as_char))
        .collect()
}

/// Turn placeholders back into `<` and `>`, dropping any other reserved
/// character.
pub fn restore_markup(text: &str) -> String {
    text.chars()
        .filter_map(|c| match Placeholder::from_char(c) {
            Some(p) => Some(p.literal()),
            None if is_reserved(c) => None,
            None => Some(c),
        })
        .collect()
}

/// Remove reserved characters from untrusted text.
pub fn strip_reserved(text: &str) -> String {
    text.chars().filter(|&c| !is_reserved(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_then_restore() {
        let escaped = escape_markup("a <b> c");
        assert!(!escaped.contains('<'));
        assert!(!escaped.contains('>'));
        assert_eq!(restore_markup(&escaped), "a <b> c");
    }

    #[test]
    fn test_forged_placeholders_are_stripped() {
        let forged = "x\u{FDD0}center\u{FDD1}y\u{FDEF}";
        assert_eq!(strip_reserved(forged), "xcentery");
    }

    #[test]
    fn test_restore_drops_unknown_reserved() {
        assert_eq!(restore_markup("a\u{FDE0}b"), "ab");
    }

    #[test]
    fn test_placeholders_are_reserved() {
        for p in Placeholder::ALL {
            assert!(is_reserved(p.as_char()));
        }
        assert!(!is_reserved('<'));
    }
}
