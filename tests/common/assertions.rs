//! Domain-specific assertion macros for jingles harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear *which* input broke *which* normalization guarantee.

// ---------------------------------------------------------------------------
// Date assertions
// ---------------------------------------------------------------------------

/// Assert that `normalize(input)` yields exactly `expected`.
///
/// ```rust
/// assert_normalizes!("25/12/2023", "2023-12-25T00:00:00.000Z");
/// ```
#[macro_export]
macro_rules! assert_normalizes {
    ($input:expr, $expected:expr) => {{
        let input: &str = $input;
        let expected: &str = $expected;
        match jingles_core::normalize(input) {
            Some(actual) => pretty_assertions::assert_eq!(
                actual,
                expected,
                "normalize({:?}) produced the wrong timestamp",
                input
            ),
            None => panic!(
                "assert_normalizes! failed: normalize({:?}) returned None\n  expected: {:?}",
                input, expected
            ),
        }
    }};
}

/// Assert that `normalize(input)` is `None` and `normalize_required(input)`
/// fails carrying the same input.
#[macro_export]
macro_rules! assert_rejected {
    ($input:expr) => {{
        let input: &str = $input;
        if let Some(actual) = jingles_core::normalize(input) {
            panic!(
                "assert_rejected! failed: normalize({:?}) returned {:?}",
                input, actual
            );
        }
        match jingles_core::normalize_required(input) {
            Err(err) => pretty_assertions::assert_eq!(err.input(), input),
            Ok(actual) => panic!(
                "assert_rejected! failed: normalize_required({:?}) returned {:?}",
                input, actual
            ),
        }
    }};
}

/// Assert that a string has the exact canonical shape
/// `YYYY-MM-DDTHH:mm:ss.sssZ` and parses as an RFC 3339 instant.
#[macro_export]
macro_rules! assert_canonical {
    ($value:expr) => {{
        let value: &str = $value;
        let shape_ok = value.len() == 24
            && value.bytes().enumerate().all(|(i, b)| match i {
                4 | 7 => b == b'-',
                10 => b == b'T',
                13 | 16 => b == b':',
                19 => b == b'.',
                23 => b == b'Z',
                _ => b.is_ascii_digit(),
            });
        if !shape_ok || chrono::DateTime::parse_from_rfc3339(value).is_err() {
            panic!(
                "assert_canonical! failed: {:?} is not YYYY-MM-DDTHH:mm:ss.sssZ",
                value
            );
        }
    }};
}

// ---------------------------------------------------------------------------
// Import assertions
// ---------------------------------------------------------------------------

/// Assert that an imported row has `key` set to `value`.
///
/// ```rust
/// assert_property!(report.rows[0], "date", "2023-12-25T00:00:00.000Z");
/// ```
#[macro_export]
macro_rules! assert_property {
    ($row:expr, $key:expr, $value:expr) => {{
        let row: &jingles_core::ImportedRow = &$row;
        let key: &str = $key;
        let expected = serde_json::json!($value);
        match row.properties.get(key) {
            Some(actual) if *actual == expected => {}
            Some(actual) => panic!(
                "assert_property! failed:\n  line {} properties[{:?}]\n  expected: {}\n  actual:   {}",
                row.line, key, expected, actual
            ),
            None => panic!(
                "assert_property! failed: property {:?} not found on line {}.\n  Available: {:?}",
                key,
                row.line,
                row.properties.keys().collect::<Vec<_>>()
            ),
        }
    }};
}

/// Assert that an imported row does not carry `key`.
#[macro_export]
macro_rules! assert_no_property {
    ($row:expr, $key:expr) => {{
        let row: &jingles_core::ImportedRow = &$row;
        let key: &str = $key;
        if let Some(actual) = row.properties.get(key) {
            panic!(
                "assert_no_property! failed: line {} has {:?} = {}",
                row.line, key, actual
            );
        }
    }};
}
