//! Position layer integration tests.
//!
//! Covers character conversion, line/column reporting, scoped skip sets and
//! lookahead on top of `TextScanner`.

use std::panic::{self, AssertUnwindSafe};
use textscan_scanner::{
    BaseScanner, CharacterSet, LineAndColumn, PositionError, ScannerOptions, ScannerPosition,
    TextScanner,
};

/// Helper: a scanner with the cursor moved to `location`.
fn scanner_at(source: &str, location: usize) -> TextScanner {
    let mut scanner = TextScanner::new(source);
    scanner.set_scan_location(location).unwrap();
    scanner
}

/// Helper: a scanner that skips nothing.
fn unskipped(source: &str) -> TextScanner {
    TextScanner::with_options(source, ScannerOptions::new().with_skip_set(None))
}

// ============================================================================
// Characters
// ============================================================================

#[test]
fn test_empty_source() {
    let mut scanner = TextScanner::new("");
    assert_eq!(scanner.position_in_characters(), 0);
    assert_eq!(scanner.parsed_text(), "");
    assert_eq!(scanner.remaining_text(), "");
    assert_eq!(scanner.line(), 1);
    assert_eq!(scanner.column(), 1);
    assert_eq!(scanner.peek_next_code_unit(), None);
}

#[test]
fn test_parsed_and_remaining_text() {
    let source = "let x = 42;";
    let mut scanner = TextScanner::new(source);
    assert!(scanner.skip_string("let"));
    assert!(scanner.skip_characters(&CharacterSet::letters()));
    assert_eq!(scanner.parsed_text(), "let x");
    assert_eq!(scanner.remaining_text(), " = 42;");
    assert_eq!(
        format!("{}{}", scanner.parsed_text(), scanner.remaining_text()),
        source
    );
    assert_eq!(scanner.position_in_characters(), 5);
}

#[test]
fn test_characters_differ_from_code_units() {
    // Two emoji (two code units each) and a combining sequence.
    let source = "\u{1F600}\u{1F600}e\u{0301}!";
    let mut scanner = unskipped(source);
    assert!(scanner.skip_up_to("!"));
    assert_eq!(scanner.scan_location(), 6);
    assert_eq!(scanner.position_in_characters(), 3);
    assert_eq!(scanner.parsed_text(), "\u{1F600}\u{1F600}e\u{0301}");
    assert_eq!(scanner.remaining_text(), "!");
    assert_eq!(scanner.column(), 4);
}

#[test]
fn test_cursor_inside_surrogate_pair() {
    let scanner = scanner_at("a\u{1F600}b", 2);
    assert_eq!(
        scanner.character_index(),
        Err(PositionError::NotOnBoundary { offset: 2 })
    );
    assert_eq!(scanner.position_in_characters(), 0);
    assert_eq!(scanner.parsed_text(), "");
    assert_eq!(scanner.remaining_text(), "");
    assert_eq!(scanner.line(), 1);
    assert_eq!(scanner.column(), 1);
}

#[test]
fn test_cursor_at_end() {
    let source = "abc";
    let scanner = scanner_at(source, 3);
    assert_eq!(scanner.position_in_characters(), 3);
    assert_eq!(scanner.parsed_text(), source);
    assert_eq!(scanner.remaining_text(), "");
}

#[test]
fn test_location_out_of_range_is_rejected() {
    let mut scanner = TextScanner::new("abc");
    assert!(scanner.set_scan_location(10).is_err());
    assert_eq!(scanner.scan_location(), 0);
    assert_eq!(scanner.remaining_text(), "abc");
}

#[test]
fn test_position_queries_are_idempotent() {
    let mut scanner = TextScanner::new("one\ntwo three");
    assert!(scanner.skip_up_to("three"));
    let first = (
        scanner.position_in_characters(),
        scanner.parsed_text().to_string(),
        scanner.line(),
        scanner.column(),
    );
    for _ in 0..3 {
        assert_eq!(scanner.position_in_characters(), first.0);
        assert_eq!(scanner.parsed_text(), first.1);
        assert_eq!(scanner.line(), first.2);
        assert_eq!(scanner.column(), first.3);
    }
}

// ============================================================================
// Lines and columns
// ============================================================================

#[test]
fn test_line_and_column_lf() {
    let scanner = scanner_at("a\nb\nc", 5);
    assert_eq!(scanner.line(), 3);
    assert_eq!(scanner.column(), 2);
}

#[test]
fn test_crlf_counts_as_one_line_break() {
    let source = "ab\r\ncd";
    let scanner = scanner_at(source, 4);
    assert_eq!(scanner.line(), 2);
    assert_eq!(scanner.column(), 1);
    assert_eq!(scanner.line_and_column(), LineAndColumn::new(2, 1));
}

#[test]
fn test_cursor_between_cr_and_lf() {
    // CRLF is a single character, so this offset is not a character boundary.
    let scanner = scanner_at("ab\r\ncd", 3);
    assert!(scanner.character_index().is_err());
    assert_eq!(scanner.line(), 1);
    assert_eq!(scanner.column(), 1);
}

#[test]
fn test_mixed_line_endings() {
    let source = "one\r\ntwo\nthree\r\nfour";
    let mut scanner = TextScanner::new(source);
    assert!(scanner.skip_up_to("four"));
    assert_eq!(scanner.line(), 4);
    assert_eq!(scanner.column(), 1);
    assert!(scanner.skip_string("fo"));
    assert_eq!(scanner.column(), 3);
}

#[test]
fn test_lone_carriage_return_is_not_a_line_break() {
    let scanner = scanner_at("a\rb", 3);
    assert_eq!(scanner.line(), 1);
    assert_eq!(scanner.column(), 4);
}

#[test]
fn test_line_being_parsed() {
    let mut scanner = TextScanner::new("first line\r\nsecond line\nthird");
    assert_eq!(scanner.line_being_parsed(), "first line");
    assert!(scanner.skip_up_to("line\n"));
    assert_eq!(scanner.line(), 2);
    assert_eq!(scanner.line_being_parsed(), "second line");
}

#[test]
fn test_location_display() {
    let mut scanner = TextScanner::new("x = 1\ny = oops");
    assert!(scanner.skip_up_to("oops"));
    let location = scanner.location();
    assert_eq!(location.offset, 10);
    assert_eq!(location.character, 10);
    assert_eq!(location.to_string(), "2:5");
}

// ============================================================================
// Scoped skip set
// ============================================================================

#[test]
fn test_with_skip_set_installs_and_restores() {
    let mut scanner = TextScanner::new("a,b , c");
    let commas = CharacterSet::from_chars(",");
    let letters = CharacterSet::letters();

    let scanned = scanner.with_skip_set(Some(commas.clone()), |s| {
        assert_eq!(s.skip_set(), Some(&commas));
        let mut parts = Vec::new();
        while let Some(part) = s.try_scan_characters(&letters) {
            parts.push(part);
        }
        parts
    });

    // The space before the second comma stops the comma-only skip set.
    assert_eq!(scanned, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(
        scanner.skip_set(),
        Some(&CharacterSet::whitespaces_and_newlines())
    );
    assert_eq!(scanner.scan_location(), 3);
}

#[test]
fn test_with_skip_set_none_disables_skipping() {
    let mut scanner = TextScanner::new("  42");
    let found = scanner.with_skip_set(None, |s| s.skip_integer());
    assert!(!found);
    assert!(scanner.skip_integer());
}

#[test]
fn test_with_skip_set_passes_errors_through() {
    let mut scanner = TextScanner::new("abc");
    let result: Result<(), String> = scanner.with_skip_set(None, |s| {
        if s.skip_integer() {
            Ok(())
        } else {
            Err(format!("expected integer at {}", s.location()))
        }
    });
    assert_eq!(result, Err("expected integer at 1:1".to_string()));
    assert_eq!(
        scanner.skip_set(),
        Some(&CharacterSet::whitespaces_and_newlines())
    );
}

#[test]
fn test_with_skip_set_restores_after_panic() {
    let mut scanner = TextScanner::new("abc");
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        scanner.with_skip_set(Some(CharacterSet::letters()), |_| {
            panic!("body failed");
        })
    }));
    assert!(outcome.is_err());
    assert_eq!(
        scanner.skip_set(),
        Some(&CharacterSet::whitespaces_and_newlines())
    );
}

#[test]
fn test_with_skip_set_nested() {
    let mut scanner = TextScanner::new("x");
    scanner.with_skip_set(Some(CharacterSet::letters()), |outer| {
        outer.with_skip_set(None, |inner| assert_eq!(inner.skip_set(), None));
        assert_eq!(outer.skip_set(), Some(&CharacterSet::letters()));
    });
    assert_eq!(
        scanner.skip_set(),
        Some(&CharacterSet::whitespaces_and_newlines())
    );
}

// ============================================================================
// Lookahead
// ============================================================================

#[test]
fn test_peek_skips_insignificant_characters() {
    let mut scanner = TextScanner::new("   \n  x");
    assert_eq!(scanner.peek_next_code_unit(), Some(u16::from(b'x')));
    assert_eq!(scanner.scan_location(), 0);
}

#[test]
fn test_peek_does_not_mutate_state() {
    let mut scanner = TextScanner::new("  12 34");
    let skip_set = scanner.skip_set().cloned();
    for _ in 0..3 {
        assert_eq!(scanner.peek_next_code_unit(), Some(u16::from(b'1')));
        assert_eq!(scanner.scan_location(), 0);
        assert_eq!(scanner.skip_set().cloned(), skip_set);
    }
    assert_eq!(scanner.try_scan_integer(), Some(12));
    assert_eq!(scanner.peek_next_code_unit(), Some(u16::from(b'3')));
    assert_eq!(scanner.try_scan_integer(), Some(34));
    assert_eq!(scanner.peek_next_code_unit(), None);
}

#[test]
fn test_peek_without_skip_set() {
    let mut scanner = unskipped("  x");
    assert_eq!(scanner.peek_next_code_unit(), Some(u16::from(b' ')));
}

#[test]
fn test_peek_at_trailing_whitespace() {
    let mut scanner = TextScanner::new("x   ");
    assert!(scanner.skip_string("x"));
    assert_eq!(scanner.peek_next_code_unit(), None);
    assert_eq!(scanner.scan_location(), 1);
}

#[test]
fn test_peek_returns_code_unit_not_character() {
    let mut scanner = TextScanner::new(" \u{1F600}");
    assert_eq!(scanner.peek_next_code_unit(), Some(0xD83D));
}
