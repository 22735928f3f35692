//! textscan_core: Text position and character-set utilities.
//!
//! Provides the code-unit to character conversion, line/column helpers and
//! the character sets consulted by the scanner when skipping or matching runs
//! of characters.

pub mod charset;
pub mod text;

// Re-export commonly used types
pub use charset::{CharClass, CharacterSet};
pub use text::{CharacterIndex, CodeUnitOffset, LineAndColumn, PositionError, SourceLocation};
