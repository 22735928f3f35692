//! Character sets used for skipping and for run-of-characters scans.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use unicode_xid::UnicodeXID;

/// One class of characters making up a [`CharacterSet`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CharClass {
    /// An inclusive range of scalar values.
    Range { start: char, end: char },
    /// Horizontal whitespace: tab and the space separators.
    Whitespaces,
    /// U+000A..=U+000D, U+0085, U+2028 and U+2029.
    Newlines,
    /// ASCII decimal digits.
    DecimalDigits,
    Letters,
    Alphanumerics,
    /// `XID_Start` plus `_`.
    IdentifierStart,
    /// `XID_Continue`.
    IdentifierContinue,
    Nested(Box<CharacterSet>),
}

impl CharClass {
    pub fn contains(&self, ch: char) -> bool {
        match self {
            CharClass::Range { start, end } => (*start..=*end).contains(&ch),
            CharClass::Whitespaces => ch.is_whitespace() && !is_newline(ch),
            CharClass::Newlines => is_newline(ch),
            CharClass::DecimalDigits => ch.is_ascii_digit(),
            CharClass::Letters => ch.is_alphabetic(),
            CharClass::Alphanumerics => ch.is_alphanumeric(),
            CharClass::IdentifierStart => ch == '_' || ch.is_xid_start(),
            CharClass::IdentifierContinue => ch.is_xid_continue(),
            CharClass::Nested(set) => set.contains(ch),
        }
    }
}

#[inline]
fn is_newline(ch: char) -> bool {
    matches!(ch, '\n'..='\r' | '\u{0085}' | '\u{2028}' | '\u{2029}')
}

/// A set of Unicode scalar values.
///
/// The empty set matches nothing; an inverted set matches everything its
/// classes do not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterSet {
    classes: Vec<CharClass>,
    #[serde(default)]
    inverted: bool,
}

impl CharacterSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    fn of(class: CharClass) -> Self {
        Self {
            classes: vec![class],
            inverted: false,
        }
    }

    pub fn whitespaces() -> Self {
        Self::of(CharClass::Whitespaces)
    }

    pub fn newlines() -> Self {
        Self::of(CharClass::Newlines)
    }

    /// The default skip set of a scanner.
    pub fn whitespaces_and_newlines() -> Self {
        Self {
            classes: vec![CharClass::Whitespaces, CharClass::Newlines],
            inverted: false,
        }
    }

    pub fn decimal_digits() -> Self {
        Self::of(CharClass::DecimalDigits)
    }

    pub fn letters() -> Self {
        Self::of(CharClass::Letters)
    }

    pub fn alphanumerics() -> Self {
        Self::of(CharClass::Alphanumerics)
    }

    pub fn identifier_start() -> Self {
        Self::of(CharClass::IdentifierStart)
    }

    pub fn identifier_continue() -> Self {
        Self::of(CharClass::IdentifierContinue)
    }

    /// A set holding exactly the characters of `chars`.
    pub fn from_chars(chars: &str) -> Self {
        Self {
            classes: chars
                .chars()
                .map(|ch| CharClass::Range { start: ch, end: ch })
                .collect(),
            inverted: false,
        }
    }

    pub fn from_range(range: RangeInclusive<char>) -> Self {
        Self::of(CharClass::Range {
            start: *range.start(),
            end: *range.end(),
        })
    }

    /// Characters in either set.
    pub fn union(mut self, other: CharacterSet) -> Self {
        if self.inverted || other.inverted {
            return Self {
                classes: vec![
                    CharClass::Nested(Box::new(self)),
                    CharClass::Nested(Box::new(other)),
                ],
                inverted: false,
            };
        }
        self.classes.extend(other.classes);
        self
    }

    /// The complement of this set.
    pub fn inverted(mut self) -> Self {
        self.inverted = !self.inverted;
        self
    }

    #[inline]
    pub fn contains(&self, ch: char) -> bool {
        self.classes.iter().any(|class| class.contains(ch)) != self.inverted
    }

    /// Whether the set matches nothing. An inverted empty set matches everything.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && !self.inverted
    }
}

impl FromIterator<char> for CharacterSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Self {
            classes: iter
                .into_iter()
                .map(|ch| CharClass::Range { start: ch, end: ch })
                .collect(),
            inverted: false,
        }
    }
}
