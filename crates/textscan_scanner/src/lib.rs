//! textscan_scanner: Positional text scanning.
//!
//! Layers position tracking on top of a forward-only scanner:
//! - `skip_*` variants of every scan primitive
//! - scoped skip-set overrides with guaranteed restoration
//! - code-unit cursor to character index conversion
//! - on-demand 1-based line and column reporting
//! - non-consuming lookahead of the next code unit
//!
//! [`BaseScanner`] is the primitive interface; [`TextScanner`] implements it
//! over UTF-16 code units and [`ScannerPosition`] extends every
//! implementation.

mod base;
mod char_codes;
mod error;
mod options;
mod position;
mod scanner;

pub use base::BaseScanner;
pub use error::ScanError;
pub use options::ScannerOptions;
pub use position::{ScannerPosition, SkipSetGuard};
pub use scanner::TextScanner;
pub use textscan_core::{CharacterSet, LineAndColumn, PositionError, SourceLocation};
