//! Position types and code-unit/character conversion.
//!
//! Scanners track their cursor as an offset in UTF-16 code units. Diagnostics
//! are reported in characters (extended grapheme clusters) with 1-based lines
//! and columns. Everything in this module walks the text from the start, so
//! it is meant for diagnostics and must stay out of scanning loops.

use memchr::{memchr_iter, memrchr};
use std::fmt;
use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

/// An offset in the text measured in UTF-16 code units.
pub type CodeUnitOffset = usize;

/// Why a code-unit offset could not be mapped to a character position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("offset {offset} is past the end of the text ({len} code units)")]
    OutOfBounds { offset: CodeUnitOffset, len: usize },
    #[error("offset {offset} falls inside a character")]
    NotOnBoundary { offset: CodeUnitOffset },
}

/// A character position resolved from a code-unit offset.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct CharacterIndex {
    /// Number of characters preceding the position.
    pub characters: usize,
    /// Byte offset of the position in the UTF-8 text.
    pub byte_offset: usize,
}

/// The length of `text` in UTF-16 code units.
pub fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

/// Map a UTF-16 offset to the character that starts there.
///
/// Fails when the offset lies past the end of the text or inside a
/// multi-code-unit character (a surrogate pair, a CRLF pair, a base
/// character followed by combining marks).
pub fn character_index_of(
    text: &str,
    offset: CodeUnitOffset,
) -> Result<CharacterIndex, PositionError> {
    let mut units = 0;
    let mut characters = 0;
    for (byte_offset, grapheme) in text.grapheme_indices(true) {
        if units >= offset {
            return if units == offset {
                Ok(CharacterIndex {
                    characters,
                    byte_offset,
                })
            } else {
                Err(PositionError::NotOnBoundary { offset })
            };
        }
        units += utf16_len(grapheme);
        characters += 1;
    }

    match units.cmp(&offset) {
        std::cmp::Ordering::Equal => Ok(CharacterIndex {
            characters,
            byte_offset: text.len(),
        }),
        std::cmp::Ordering::Less => Err(PositionError::OutOfBounds { offset, len: units }),
        std::cmp::Ordering::Greater => Err(PositionError::NotOnBoundary { offset }),
    }
}

/// Count the line breaks in `text`.
///
/// Only LF is counted, so a CRLF pair is one break and a lone CR is none.
pub fn count_line_breaks(text: &str) -> usize {
    memchr_iter(b'\n', text.as_bytes()).count()
}

/// 1-based line of the position at the end of `text`.
#[inline]
pub fn line_at_end(text: &str) -> usize {
    count_line_breaks(text) + 1
}

/// 1-based column of the position at the end of `text`, in characters.
pub fn column_at_end(text: &str) -> usize {
    let tail = match memrchr(b'\n', text.as_bytes()) {
        // LF is a single byte, so the slice starts on a char boundary.
        Some(lf) => &text[lf + 1..],
        None => text,
    };
    tail.graphemes(true).count() + 1
}

/// The text of the given 1-based line, without its terminating LF or CRLF.
///
/// Returns an empty string for a line past the end of the text.
pub fn line_text(text: &str, line: usize) -> &str {
    text.split('\n')
        .nth(line.saturating_sub(1))
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or("")
}

/// 1-based line and column, both counted in characters.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct LineAndColumn {
    pub line: usize,
    pub column: usize,
}

impl LineAndColumn {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Line and column of the position right after `parsed`.
    pub fn at_end_of(parsed: &str) -> Self {
        Self {
            line: line_at_end(parsed),
            column: column_at_end(parsed),
        }
    }
}

impl Default for LineAndColumn {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl fmt::Display for LineAndColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A scanner position expressed in every coordinate system we report.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct SourceLocation {
    /// Raw cursor, in UTF-16 code units.
    pub offset: CodeUnitOffset,
    /// Index in characters, 0 when the cursor is not on a character boundary.
    pub character: usize,
    pub line_and_column: LineAndColumn,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.line_and_column, f)
    }
}
