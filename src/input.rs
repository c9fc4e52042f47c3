//! Lenient numeric parsing for hand-entered values.
//!
//! Every numeric field in the companion is typed by a player at the table, so
//! malformed input is never an error: it reads as `0`.

/// Parses the leading integer of `text`, returning `0` when there is none.
///
/// Leading whitespace and a single sign are accepted, and parsing stops at the
/// first non-digit, so `"12 hp"` reads as `12` and `"3.9"` as `3`. Values
/// outside the `i32` range saturate.
pub fn parse_int_or_zero(text: &str) -> i32 {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for c in digits.chars() {
        let Some(d) = c.to_digit(10) else { break };
        seen_digit = true;
        value = (value * 10 + i64::from(d)).min(i64::from(i32::MAX) + 1);
    }

    if !seen_digit {
        return 0;
    }

    let signed = if negative { -value } else { value };
    signed.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
