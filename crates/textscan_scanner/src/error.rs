//! Errors reported by scanner state changes.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// A cursor move past the end of the text.
    #[error("scan location {location} is past the end of the text ({len} code units)")]
    LocationOutOfBounds { location: usize, len: usize },
}
