//! Scanner configuration.

use serde::{Deserialize, Serialize};
use textscan_core::CharacterSet;

/// Options applied when a [`TextScanner`](crate::TextScanner) is created.
///
/// The defaults match a Foundation scanner: literal matches ignore case and
/// whitespace and newlines are skipped before every scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScannerOptions {
    /// Whether literal string matches are case sensitive.
    pub case_sensitive: bool,
    /// Characters skipped before each scan; `None` skips nothing.
    pub skip_set: Option<CharacterSet>,
}

impl ScannerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn with_skip_set(mut self, skip_set: Option<CharacterSet>) -> Self {
        self.skip_set = skip_set;
        self
    }
}

impl Default for ScannerOptions {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            skip_set: Some(CharacterSet::whitespaces_and_newlines()),
        }
    }
}
