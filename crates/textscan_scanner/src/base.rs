//! The primitive scanning interface the position layer is built on.

use crate::error::ScanError;
use textscan_core::CharacterSet;

/// A forward-only scanner over UTF-16 code units.
///
/// Every `try_scan_*` primitive first skips the characters of the current
/// skip set, then tries to match. On success it returns the value and leaves
/// the cursor after the match; on failure it returns `None` and the cursor
/// is where it was before the call, skipped characters included.
pub trait BaseScanner {
    /// The full input text.
    fn string(&self) -> &str;

    /// The input text as UTF-16 code units; the cursor indexes this slice.
    fn code_units(&self) -> &[u16];

    /// The cursor, in code units.
    fn scan_location(&self) -> usize;

    /// Move the cursor. Fails if `location` is past the end of the text.
    fn set_scan_location(&mut self, location: usize) -> Result<(), ScanError>;

    /// Characters skipped before each scan.
    fn skip_set(&self) -> Option<&CharacterSet>;

    /// Install a new skip set, returning the previous one.
    fn set_skip_set(&mut self, skip_set: Option<CharacterSet>) -> Option<CharacterSet>;

    fn try_scan_integer(&mut self) -> Option<isize>;

    fn try_scan_int32(&mut self) -> Option<i32>;

    fn try_scan_int64(&mut self) -> Option<i64>;

    fn try_scan_uint64(&mut self) -> Option<u64>;

    fn try_scan_float(&mut self) -> Option<f32>;

    /// Scan a double into `result`, returning whether one was found.
    ///
    /// `result` is left untouched on failure. Use
    /// [`ScannerPosition::try_scan_double`](crate::ScannerPosition::try_scan_double)
    /// for the `Option` form.
    fn scan_double_into(&mut self, result: &mut f64) -> bool;

    fn try_scan_hex_uint32(&mut self) -> Option<u32>;

    fn try_scan_hex_uint64(&mut self) -> Option<u64>;

    fn try_scan_hex_float(&mut self) -> Option<f32>;

    fn try_scan_hex_double(&mut self) -> Option<f64>;

    /// Match `string` literally, returning the matched source text.
    fn try_scan_string(&mut self, string: &str) -> Option<String>;

    /// Match the longest non-empty run of characters from `set`.
    fn try_scan_characters(&mut self, set: &CharacterSet) -> Option<String>;

    /// Consume everything up to `string` or the end of the text.
    /// Fails if nothing was consumed.
    fn try_scan_up_to_string(&mut self, string: &str) -> Option<String>;

    /// Consume everything up to the first character from `set` or the end of
    /// the text. Fails if nothing was consumed.
    fn try_scan_up_to_characters(&mut self, set: &CharacterSet) -> Option<String>;
}
