//! UTF-16 code unit constants used by the numeric scanners.

pub const PLUS: u16 = b'+' as u16;
pub const MINUS: u16 = b'-' as u16;
pub const DOT: u16 = b'.' as u16;
pub const _0: u16 = b'0' as u16;
pub const E_UPPER: u16 = b'E' as u16;
pub const E_LOWER: u16 = b'e' as u16;
pub const P_UPPER: u16 = b'P' as u16;
pub const P_LOWER: u16 = b'p' as u16;
pub const X_UPPER: u16 = b'X' as u16;
pub const X_LOWER: u16 = b'x' as u16;

/// Value of an ASCII decimal digit.
#[inline]
pub fn digit_value(unit: u16) -> Option<u32> {
    char::from_u32(unit as u32)?.to_digit(10)
}

/// Value of an ASCII hex digit.
#[inline]
pub fn hex_digit_value(unit: u16) -> Option<u32> {
    char::from_u32(unit as u32)?.to_digit(16)
}

#[inline]
pub fn is_exponent_marker(unit: u16) -> bool {
    unit == E_LOWER || unit == E_UPPER
}

#[inline]
pub fn is_binary_exponent_marker(unit: u16) -> bool {
    unit == P_LOWER || unit == P_UPPER
}

#[inline]
pub fn is_hex_marker(unit: u16) -> bool {
    unit == X_LOWER || unit == X_UPPER
}
