//! Indentation settings.

use std::borrow::Cow;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// How nested properties and elements are laid out.
///
/// `Spaces(0)` and an empty `Custom` string are the same as `Compact`: no
/// line breaks and no space after `:`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "IndentRepr", into = "IndentRepr")]
pub enum Indent {
    #[default]
    Compact,
    /// `n` space characters per nesting level.
    Spaces(usize),
    /// A literal string per nesting level, capped at
    /// [`Indent::MAX_CUSTOM_LEN`] characters.
    Custom(String),
}

impl Indent {
    /// Longest custom indent string; longer input is truncated.
    pub const MAX_CUSTOM_LEN: usize = 10;

    pub fn spaces(n: usize) -> Self {
        Indent::Spaces(n)
    }

    /// A custom indent string, truncated to [`Indent::MAX_CUSTOM_LEN`] chars.
    ///
    /// # Example
    ///
    /// ```
    /// use json_canon::Indent;
    ///
    /// assert_eq!(Indent::custom("\t"), Indent::Custom("\t".into()));
    /// assert_eq!(Indent::custom("--------------"), Indent::Custom("----------".into()));
    /// ```
    pub fn custom(s: &str) -> Self {
        Indent::Custom(truncate(s).to_owned())
    }

    /// The string repeated once per nesting level. Empty means compact.
    pub fn unit(&self) -> Cow<'_, str> {
        match self {
            Indent::Compact => Cow::Borrowed(""),
            Indent::Spaces(n) => Cow::Owned(" ".repeat(*n)),
            // The variant is public, so the cap is enforced here as well.
            Indent::Custom(s) => Cow::Borrowed(truncate(s)),
        }
    }

    pub fn is_compact(&self) -> bool {
        self.unit().is_empty()
    }
}

fn truncate(s: &str) -> &str {
    match s.char_indices().nth(Indent::MAX_CUSTOM_LEN) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

impl From<usize> for Indent {
    fn from(n: usize) -> Self {
        Indent::spaces(n)
    }
}

impl From<&str> for Indent {
    fn from(s: &str) -> Self {
        Indent::custom(s)
    }
}

/// Parses `compact`, `tab`, or a non-negative space count.
impl FromStr for Indent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "compact" | "none" => Ok(Indent::Compact),
            "tab" => Ok(Indent::custom("\t")),
            other => other
                .parse::<usize>()
                .map(Indent::spaces)
                .map_err(|_| Error::InvalidIndent(s.to_owned())),
        }
    }
}

/// Wire form: a number of spaces or a literal string, like the `space`
/// argument of `JSON.stringify`.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum IndentRepr {
    Count(usize),
    Text(String),
}

impl From<IndentRepr> for Indent {
    fn from(repr: IndentRepr) -> Self {
        match repr {
            IndentRepr::Count(n) => Indent::spaces(n),
            IndentRepr::Text(s) => Indent::custom(&s),
        }
    }
}

impl From<Indent> for IndentRepr {
    fn from(indent: Indent) -> Self {
        match indent {
            Indent::Compact => IndentRepr::Count(0),
            Indent::Spaces(n) => IndentRepr::Count(n),
            Indent::Custom(s) => IndentRepr::Text(truncate(&s).to_owned()),
        }
    }
}
