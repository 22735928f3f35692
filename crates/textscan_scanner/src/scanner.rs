//! A Foundation-style scanner over UTF-16 code units.
//!
//! The text is kept both as UTF-8 (for slicing and diagnostics) and as
//! UTF-16 code units (for the cursor). All numeric grammars are ASCII.

use crate::base::BaseScanner;
use crate::char_codes::*;
use crate::error::ScanError;
use crate::options::ScannerOptions;
use textscan_core::CharacterSet;
use tracing::{debug, trace};

/// Decode the character starting at `location` and its length in code units.
/// A lone surrogate decodes as U+FFFD of length 1.
fn decode_at(units: &[u16], location: usize) -> Option<(char, usize)> {
    let rest = units.get(location..)?;
    match char::decode_utf16(rest.iter().copied()).next()? {
        Ok(ch) => Some((ch, ch.len_utf16())),
        Err(_) => Some((char::REPLACEMENT_CHARACTER, 1)),
    }
}

#[inline]
fn chars_equal(a: char, b: char, case_sensitive: bool) -> bool {
    a == b || (!case_sensitive && a.to_lowercase().eq(b.to_lowercase()))
}

#[inline]
fn digit_char(digit: u32) -> char {
    char::from(b'0' + digit as u8)
}

/// Hex mantissas stop accumulating fraction digits past this magnitude.
const HEX_MANTISSA_LIMIT: f64 = (1u64 << 60) as f64;

/// The scanner converts source text into primitive values on demand.
#[derive(Debug, Clone)]
pub struct TextScanner {
    /// The source text.
    text: String,
    /// The source text as UTF-16 code units.
    units: Vec<u16>,
    /// Current position, in code units.
    location: usize,
    /// Characters skipped before each scan.
    skip_set: Option<CharacterSet>,
    /// Whether literal matches are case sensitive.
    case_sensitive: bool,
}

impl TextScanner {
    /// Create a scanner with the default options.
    pub fn new(text: &str) -> Self {
        Self::with_options(text, ScannerOptions::default())
    }

    pub fn with_options(text: &str, options: ScannerOptions) -> Self {
        let units: Vec<u16> = text.encode_utf16().collect();
        trace!(
            target: "textscan::scanner",
            len = units.len(),
            case_sensitive = options.case_sensitive,
            skipping = options.skip_set.is_some(),
            "created scanner"
        );
        Self {
            text: text.to_owned(),
            units,
            location: 0,
            skip_set: options.skip_set,
            case_sensitive: options.case_sensitive,
        }
    }

    #[inline]
    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn set_case_sensitive(&mut self, case_sensitive: bool) {
        self.case_sensitive = case_sensitive;
    }

    /// Whether only skippable characters remain.
    pub fn is_at_end(&self) -> bool {
        self.skipped_location() >= self.units.len()
    }

    /// The character at the cursor, without skipping.
    pub fn char_at_location(&self) -> Option<char> {
        decode_at(&self.units, self.location).map(|(ch, _)| ch)
    }

    // ========================================================================
    // Scanning helpers
    // ========================================================================

    /// The cursor after skipping characters of the skip set.
    fn skipped_location(&self) -> usize {
        let mut location = self.location;
        if let Some(set) = &self.skip_set {
            while let Some((ch, len)) = decode_at(&self.units, location) {
                if !set.contains(ch) {
                    break;
                }
                location += len;
            }
        }
        location
    }

    /// Skip, then run `read`. On failure the cursor is restored, skipped
    /// characters included.
    fn scan<T>(&mut self, read: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let start = self.location;
        self.location = self.skipped_location();
        let result = read(self);
        if result.is_none() {
            self.location = start;
        }
        result
    }

    #[inline]
    fn current_unit(&self) -> Option<u16> {
        self.units.get(self.location).copied()
    }

    #[inline]
    fn eat(&mut self, unit: u16) -> bool {
        if self.current_unit() == Some(unit) {
            self.location += 1;
            true
        } else {
            false
        }
    }

    /// Consume an optional sign, returning whether it was `-`.
    fn eat_sign(&mut self) -> bool {
        if self.eat(MINUS) {
            return true;
        }
        self.eat(PLUS);
        false
    }

    /// Consume a run of digits, feeding each value to `fold`.
    /// Returns the number of digits consumed.
    fn eat_digits(&mut self, value_of: fn(u16) -> Option<u32>, mut fold: impl FnMut(u32)) -> usize {
        let mut count = 0;
        while let Some(digit) = self.current_unit().and_then(value_of) {
            fold(digit);
            self.location += 1;
            count += 1;
        }
        count
    }

    fn advance_while(&mut self, keep_going: impl Fn(char) -> bool) {
        while let Some((ch, len)) = decode_at(&self.units, self.location) {
            if !keep_going(ch) {
                break;
            }
            self.location += len;
        }
    }

    fn hex_digit_at(&self, location: usize) -> bool {
        self.units
            .get(location)
            .copied()
            .and_then(hex_digit_value)
            .is_some()
    }

    /// Consume a `0x` prefix, but only when a hex mantissa follows it;
    /// otherwise the `0` is left to be read as a digit.
    fn eat_hex_prefix(&mut self, allow_fraction: bool) {
        let start = self.location;
        if self.eat(_0) && self.current_unit().is_some_and(is_hex_marker) {
            let mantissa = self.location + 1;
            let fraction_follows = allow_fraction
                && self.units.get(mantissa) == Some(&DOT)
                && self.hex_digit_at(mantissa + 1);
            if self.hex_digit_at(mantissa) || fraction_follows {
                self.location = mantissa;
                return;
            }
        }
        self.location = start;
    }

    /// End of a match of `string` starting at `location`.
    fn match_at(&self, location: usize, string: &str) -> Option<usize> {
        let mut end = location;
        for expected in string.chars() {
            let (ch, len) = decode_at(&self.units, end)?;
            if !chars_equal(ch, expected, self.case_sensitive) {
                return None;
            }
            end += len;
        }
        Some(end)
    }

    fn text_between(&self, start: usize, end: usize) -> String {
        String::from_utf16_lossy(&self.units[start..end])
    }

    // ========================================================================
    // Readers (no skipping)
    // ========================================================================

    /// Decimal integer with optional sign, saturated to `min..=max`.
    fn read_integer(&mut self, min: i128, max: i128) -> Option<i128> {
        let negative = if min < 0 {
            self.eat_sign()
        } else {
            self.eat(PLUS);
            false
        };
        let mut magnitude: i128 = 0;
        let digits = self.eat_digits(digit_value, |d| {
            magnitude = magnitude.saturating_mul(10).saturating_add(d as i128)
        });
        if digits == 0 {
            return None;
        }
        let value = if negative { -magnitude } else { magnitude };
        Some(value.clamp(min, max))
    }

    /// Decimal floating point literal, normalized for `str::parse`.
    fn read_decimal_literal(&mut self) -> Option<String> {
        let mut literal = String::from(if self.eat_sign() { "-" } else { "" });
        let integer_digits = self.eat_digits(digit_value, |d| literal.push(digit_char(d)));
        if integer_digits == 0 {
            literal.push('0');
        }

        let mut fraction_digits = 0;
        if self.eat(DOT) {
            let mut fraction = String::from(".");
            fraction_digits = self.eat_digits(digit_value, |d| fraction.push(digit_char(d)));
            if fraction_digits > 0 {
                literal.push_str(&fraction);
            }
        }
        if integer_digits + fraction_digits == 0 {
            return None;
        }

        if self.current_unit().is_some_and(is_exponent_marker) {
            let marker = self.location;
            self.location += 1;
            let mut exponent = String::from(if self.eat_sign() { "e-" } else { "e" });
            if self.eat_digits(digit_value, |d| exponent.push(digit_char(d))) > 0 {
                literal.push_str(&exponent);
            } else {
                self.location = marker;
            }
        }
        Some(literal)
    }

    /// Hex integer with optional `0x` prefix, saturated to `max`.
    fn read_hex_integer(&mut self, max: u64) -> Option<u64> {
        self.eat_hex_prefix(false);
        let mut value: u128 = 0;
        let digits = self.eat_digits(hex_digit_value, |d| {
            value = value.saturating_mul(16).saturating_add(d as u128)
        });
        (digits > 0).then(|| value.min(max as u128) as u64)
    }

    /// Hex floating point literal: `[sign][0x]h[.h][p[sign]d]`.
    fn read_hex_float(&mut self) -> Option<f64> {
        let negative = self.eat_sign();
        self.eat_hex_prefix(true);

        let mut mantissa = 0f64;
        let integer_digits = self.eat_digits(hex_digit_value, |d| {
            mantissa = mantissa * 16.0 + d as f64;
        });
        let mut fraction_digits = 0;
        let mut scaled_digits: i32 = 0;
        if self.eat(DOT) {
            fraction_digits = self.eat_digits(hex_digit_value, |d| {
                if mantissa < HEX_MANTISSA_LIMIT {
                    mantissa = mantissa * 16.0 + d as f64;
                    scaled_digits += 1;
                }
            });
        }
        if integer_digits + fraction_digits == 0 {
            return None;
        }

        let mut exponent: i32 = 0;
        if self.current_unit().is_some_and(is_binary_exponent_marker) {
            let marker = self.location;
            self.location += 1;
            let negative_exponent = self.eat_sign();
            let mut magnitude: i32 = 0;
            let digits = self.eat_digits(digit_value, |d| {
                magnitude = magnitude.saturating_mul(10).saturating_add(d as i32)
            });
            if digits > 0 {
                exponent = if negative_exponent { -magnitude } else { magnitude };
            } else {
                self.location = marker;
            }
        }

        let value = mantissa * 2f64.powi(exponent.saturating_sub(scaled_digits * 4));
        Some(if negative { -value } else { value })
    }
}

impl BaseScanner for TextScanner {
    #[inline]
    fn string(&self) -> &str {
        &self.text
    }

    #[inline]
    fn code_units(&self) -> &[u16] {
        &self.units
    }

    #[inline]
    fn scan_location(&self) -> usize {
        self.location
    }

    fn set_scan_location(&mut self, location: usize) -> Result<(), ScanError> {
        if location > self.units.len() {
            debug!(
                target: "textscan::scanner",
                location,
                len = self.units.len(),
                "rejected scan location"
            );
            return Err(ScanError::LocationOutOfBounds {
                location,
                len: self.units.len(),
            });
        }
        self.location = location;
        Ok(())
    }

    #[inline]
    fn skip_set(&self) -> Option<&CharacterSet> {
        self.skip_set.as_ref()
    }

    fn set_skip_set(&mut self, skip_set: Option<CharacterSet>) -> Option<CharacterSet> {
        std::mem::replace(&mut self.skip_set, skip_set)
    }

    fn try_scan_integer(&mut self) -> Option<isize> {
        self.scan(|s| s.read_integer(isize::MIN as i128, isize::MAX as i128))
            .map(|v| v as isize)
    }

    fn try_scan_int32(&mut self) -> Option<i32> {
        self.scan(|s| s.read_integer(i32::MIN as i128, i32::MAX as i128))
            .map(|v| v as i32)
    }

    fn try_scan_int64(&mut self) -> Option<i64> {
        self.scan(|s| s.read_integer(i64::MIN as i128, i64::MAX as i128))
            .map(|v| v as i64)
    }

    fn try_scan_uint64(&mut self) -> Option<u64> {
        self.scan(|s| s.read_integer(0, u64::MAX as i128))
            .map(|v| v as u64)
    }

    fn try_scan_float(&mut self) -> Option<f32> {
        self.scan(|s| s.read_decimal_literal()?.parse().ok())
    }

    fn scan_double_into(&mut self, result: &mut f64) -> bool {
        match self.scan(|s| s.read_decimal_literal()?.parse::<f64>().ok()) {
            Some(value) => {
                *result = value;
                true
            }
            None => false,
        }
    }

    fn try_scan_hex_uint32(&mut self) -> Option<u32> {
        self.scan(|s| s.read_hex_integer(u32::MAX as u64))
            .map(|v| v as u32)
    }

    fn try_scan_hex_uint64(&mut self) -> Option<u64> {
        self.scan(|s| s.read_hex_integer(u64::MAX))
    }

    fn try_scan_hex_float(&mut self) -> Option<f32> {
        self.scan(|s| s.read_hex_float()).map(|v| v as f32)
    }

    fn try_scan_hex_double(&mut self) -> Option<f64> {
        self.scan(|s| s.read_hex_float())
    }

    fn try_scan_string(&mut self, string: &str) -> Option<String> {
        if string.is_empty() {
            return None;
        }
        self.scan(|s| {
            let start = s.location;
            s.location = s.match_at(start, string)?;
            Some(s.text_between(start, s.location))
        })
    }

    fn try_scan_characters(&mut self, set: &CharacterSet) -> Option<String> {
        self.scan(|s| {
            let start = s.location;
            s.advance_while(|ch| set.contains(ch));
            (s.location > start).then(|| s.text_between(start, s.location))
        })
    }

    fn try_scan_up_to_string(&mut self, string: &str) -> Option<String> {
        self.scan(|s| {
            let start = s.location;
            while s.match_at(s.location, string).is_none() {
                let Some((_, len)) = decode_at(&s.units, s.location) else {
                    break;
                };
                s.location += len;
            }
            (s.location > start).then(|| s.text_between(start, s.location))
        })
    }

    fn try_scan_up_to_characters(&mut self, set: &CharacterSet) -> Option<String> {
        self.scan(|s| {
            let start = s.location;
            s.advance_while(|ch| !set.contains(ch));
            (s.location > start).then(|| s.text_between(start, s.location))
        })
    }
}
