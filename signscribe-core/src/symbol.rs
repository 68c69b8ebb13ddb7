//! Resolved per-tick symbols.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One resolved tick: a letter, a control gesture, or nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum SymbolToken {
    /// An uppercase ASCII letter `A..=Z`.
    Letter(char),
    Space,
    Confirm,
    Delete,
    DoubleSpace,
    /// No confident classification this tick.
    #[default]
    Blank,
}

impl SymbolToken {
    pub fn is_control(self) -> bool {
        matches!(
            self,
            SymbolToken::Space
                | SymbolToken::Confirm
                | SymbolToken::Delete
                | SymbolToken::DoubleSpace
        )
    }

    /// Display marker used on the wire: the letter itself, a control name,
    /// or `"-"` for blank.
    pub fn marker(self) -> String {
        match self {
            SymbolToken::Letter(c) => c.to_string(),
            SymbolToken::Space => "space".into(),
            SymbolToken::Confirm => "confirm".into(),
            SymbolToken::Delete => "delete".into(),
            SymbolToken::DoubleSpace => "double_space".into(),
            SymbolToken::Blank => "-".into(),
        }
    }

    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "space" => Some(SymbolToken::Space),
            "confirm" => Some(SymbolToken::Confirm),
            "delete" => Some(SymbolToken::Delete),
            "double_space" => Some(SymbolToken::DoubleSpace),
            "-" => Some(SymbolToken::Blank),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_uppercase() => Some(SymbolToken::Letter(c)),
                    _ => None,
                }
            }
        }
    }
}

/// Position of an uppercase ASCII letter in the alphabet.
pub fn letter_index(c: char) -> Option<usize> {
    c.is_ascii_uppercase().then(|| (c as u8 - b'A') as usize)
}

impl fmt::Display for SymbolToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.marker())
    }
}

impl From<SymbolToken> for String {
    fn from(token: SymbolToken) -> Self {
        token.marker()
    }
}

impl TryFrom<String> for SymbolToken {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        SymbolToken::from_marker(&value).ok_or_else(|| format!("unknown symbol marker {value:?}"))
    }
}
