//! Tag heads: the text between `<` and `>` of an opening tag.

use serde::{Deserialize, Serialize};

use crate::util;

/// A parsed tag head: `<name attr1 attr2>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagHead {
    /// Tag name, the first whitespace-delimited token
    pub name: String,

    /// Remaining tokens, in order
    pub attributes: Attributes,
}

impl TagHead {
    /// Parse a raw head such as `" table nb nc "`.
    ///
    /// Returns an empty name when the head has no tokens.
    pub fn parse(raw: &str) -> Self {
        let mut tokens = raw.split_whitespace();
        let name = tokens.next().unwrap_or_default().to_string();
        let attributes = Attributes(tokens.map(str::to_string).collect());
        Self { name, attributes }
    }
}

/// Ordered attribute list of a tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes(Vec<String>);

impl Attributes {
    /// Create an attribute list from tokens.
    pub fn new<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self(values.into_iter().map(Into::into).collect())
    }

    /// True when the tag was written without attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// First attribute, if any.
    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// First character of the first attribute.
    ///
    /// Fill characters for rules, bars and bullets are given this way.
    pub fn first_char(&self) -> Option<char> {
        self.first().and_then(|a| a.chars().next())
    }

    /// Integer value of the first attribute, when it looks numeric.
    ///
    /// Non-numeric attributes are ignored (`None`), never an error.
    pub fn first_number(&self) -> Option<i64> {
        self.first()
            .filter(|a| util::is_num(a))
            .map(util::atoi)
    }

    /// True when `flag` appears among the attributes.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.0.iter().any(|a| a == flag)
    }

    /// Iterate over the attributes.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}
