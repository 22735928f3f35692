//! Skip variants of the scan primitives, scoped skip-set overrides and
//! position reporting for any [`BaseScanner`].
//!
//! Position queries (`position_in_characters`, `parsed_text`, `line`,
//! `column`, ...) walk the text from the start on every call and cache
//! nothing. They are meant for diagnostics after a failed scan, not for use
//! inside a scanning loop.

use crate::base::BaseScanner;
use std::ops::{Deref, DerefMut};
use textscan_core::text::{self, CharacterIndex, LineAndColumn, PositionError, SourceLocation};
use textscan_core::CharacterSet;
use tracing::{debug, trace};

/// Restores a scanner's skip set, and optionally its cursor, when dropped.
///
/// Dereferences to the scanner, so scans can be run through the guard.
pub struct SkipSetGuard<'a, S: BaseScanner + ?Sized> {
    scanner: &'a mut S,
    saved: Option<CharacterSet>,
    saved_location: Option<usize>,
}

impl<'a, S: BaseScanner + ?Sized> SkipSetGuard<'a, S> {
    /// Install `skip_set` on `scanner` until the guard is dropped.
    pub fn install(scanner: &'a mut S, skip_set: Option<CharacterSet>) -> Self {
        trace!(
            target: "textscan::position",
            skipping = skip_set.is_some(),
            "overriding skip set"
        );
        let saved = scanner.set_skip_set(skip_set);
        Self {
            scanner,
            saved,
            saved_location: None,
        }
    }

    /// Also restore the current cursor when the guard is dropped.
    pub fn restoring_location(mut self) -> Self {
        self.saved_location = Some(self.scanner.scan_location());
        self
    }

    /// The skip set that will be restored.
    pub fn saved(&self) -> Option<&CharacterSet> {
        self.saved.as_ref()
    }
}

impl<S: BaseScanner + ?Sized> Deref for SkipSetGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.scanner
    }
}

impl<S: BaseScanner + ?Sized> DerefMut for SkipSetGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.scanner
    }
}

impl<S: BaseScanner + ?Sized> Drop for SkipSetGuard<'_, S> {
    fn drop(&mut self) {
        self.scanner.set_skip_set(self.saved.take());
        if let Some(location) = self.saved_location {
            if let Err(error) = self.scanner.set_scan_location(location) {
                debug!(target: "textscan::position", %error, "could not restore scan location");
            }
        }
    }
}

/// Resolve the cursor, logging why it could not be resolved.
fn resolve<S: BaseScanner + ?Sized>(scanner: &S) -> Option<CharacterIndex> {
    match text::character_index_of(scanner.string(), scanner.scan_location()) {
        Ok(index) => Some(index),
        Err(error) => {
            debug!(
                target: "textscan::position",
                %error,
                offset = scanner.scan_location(),
                "position unavailable, using default"
            );
            None
        }
    }
}

/// Position helpers available on every [`BaseScanner`].
pub trait ScannerPosition: BaseScanner {
    // ========================================================================
    // Skip wrappers
    // ========================================================================

    fn skip_integer(&mut self) -> bool {
        self.try_scan_integer().is_some()
    }

    fn skip_int32(&mut self) -> bool {
        self.try_scan_int32().is_some()
    }

    fn skip_int64(&mut self) -> bool {
        self.try_scan_int64().is_some()
    }

    fn skip_uint64(&mut self) -> bool {
        self.try_scan_uint64().is_some()
    }

    fn skip_float(&mut self) -> bool {
        self.try_scan_float().is_some()
    }

    /// [`BaseScanner::scan_double_into`] in `Option` form.
    fn try_scan_double(&mut self) -> Option<f64> {
        let mut result = 0.0;
        if self.scan_double_into(&mut result) {
            Some(result)
        } else {
            None
        }
    }

    fn skip_double(&mut self) -> bool {
        self.try_scan_double().is_some()
    }

    fn skip_hex_uint32(&mut self) -> bool {
        self.try_scan_hex_uint32().is_some()
    }

    fn skip_hex_uint64(&mut self) -> bool {
        self.try_scan_hex_uint64().is_some()
    }

    fn skip_hex_float(&mut self) -> bool {
        self.try_scan_hex_float().is_some()
    }

    fn skip_hex_double(&mut self) -> bool {
        self.try_scan_hex_double().is_some()
    }

    fn skip_string(&mut self, string: &str) -> bool {
        self.try_scan_string(string).is_some()
    }

    fn skip_characters(&mut self, set: &CharacterSet) -> bool {
        self.try_scan_characters(set).is_some()
    }

    fn skip_up_to(&mut self, string: &str) -> bool {
        self.try_scan_up_to_string(string).is_some()
    }

    fn skip_up_to_characters(&mut self, set: &CharacterSet) -> bool {
        self.try_scan_up_to_characters(set).is_some()
    }

    // ========================================================================
    // Scoped skip set
    // ========================================================================

    /// Run `body` with `skip_set` installed, restoring the previous skip set
    /// however `body` exits. Errors returned by `body` and panics pass
    /// through unchanged. The cursor is not restored.
    fn with_skip_set<R>(
        &mut self,
        skip_set: Option<CharacterSet>,
        body: impl FnOnce(&mut Self) -> R,
    ) -> R {
        let mut guard = SkipSetGuard::install(self, skip_set);
        body(&mut *guard)
    }

    /// Install `skip_set` until the returned guard is dropped.
    fn override_skip_set(&mut self, skip_set: Option<CharacterSet>) -> SkipSetGuard<'_, Self> {
        SkipSetGuard::install(self, skip_set)
    }

    // ========================================================================
    // Cursor and characters
    // ========================================================================

    /// The cursor as a character position.
    fn character_index(&self) -> Result<CharacterIndex, PositionError> {
        text::character_index_of(self.string(), self.scan_location())
    }

    /// Number of characters before the cursor; 0 when the cursor is past the
    /// end or inside a character.
    fn position_in_characters(&self) -> usize {
        resolve(self).map_or(0, |index| index.characters)
    }

    /// The text before the cursor; empty when the cursor cannot be resolved.
    fn parsed_text(&self) -> &str {
        match resolve(self) {
            Some(index) => &self.string()[..index.byte_offset],
            None => "",
        }
    }

    /// The text from the cursor on; empty when the cursor cannot be resolved.
    fn remaining_text(&self) -> &str {
        match resolve(self) {
            Some(index) => &self.string()[index.byte_offset..],
            None => "",
        }
    }

    // ========================================================================
    // Lines and columns
    // ========================================================================

    /// 1-based line of the cursor. LF and CRLF each end one line; a lone CR
    /// does not.
    fn line(&self) -> usize {
        text::line_at_end(self.parsed_text())
    }

    /// 1-based column of the cursor, in characters.
    fn column(&self) -> usize {
        text::column_at_end(self.parsed_text())
    }

    fn line_and_column(&self) -> LineAndColumn {
        LineAndColumn::at_end_of(self.parsed_text())
    }

    /// The full line holding the cursor, without its line terminator.
    fn line_being_parsed(&self) -> &str {
        text::line_text(self.string(), self.line())
    }

    fn location(&self) -> SourceLocation {
        SourceLocation {
            offset: self.scan_location(),
            character: self.position_in_characters(),
            line_and_column: self.line_and_column(),
        }
    }

    // ========================================================================
    // Lookahead
    // ========================================================================

    /// The code unit a scan would start at, after skipping, without moving
    /// the cursor. `None` at the end of the text.
    fn peek_next_code_unit(&mut self) -> Option<u16> {
        let mut guard = SkipSetGuard::install(self, None).restoring_location();
        if let Some(skip_set) = guard.saved().cloned() {
            guard.skip_characters(&skip_set);
        }
        let location = guard.scan_location();
        guard.code_units().get(location).copied()
    }
}

impl<S: BaseScanner + ?Sized> ScannerPosition for S {}
