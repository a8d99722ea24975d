// src/core/sanitize.rs

use crate::error::{Error, Result};

/// Parse a human-readable price such as `"217.1k"`, `"2m"`, `"+1,223"`.
///
/// Suffixes `k`, `m`, `b` (any case) scale by 10^3, 10^6, 10^9. Commas are
/// ignored. Any fraction left after scaling is truncated toward zero, so
/// `"1.2345k"` is `1234`. Decimal math is done on integers; `"2.3k"` is
/// exactly `2300`.
pub fn convert(input: &str) -> Result<i64> {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| *c != ',')
        .map(|c| c.to_ascii_lowercase())
        .collect();
    let bad = || Error::InvalidNumber(s!(input));

    let (negative, body) = match cleaned.as_bytes().first() {
        Some(b'-') => (true, &cleaned[1..]),
        Some(b'+') => (false, &cleaned[1..]),
        _ => (false, cleaned.as_str()),
    };

    let (digits, scale) = match body.as_bytes().last() {
        Some(b'k') => (&body[..body.len() - 1], 1_000i64),
        Some(b'm') => (&body[..body.len() - 1], 1_000_000),
        Some(b'b') => (&body[..body.len() - 1], 1_000_000_000),
        _ => (body, 1),
    };

    let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && frac.is_empty()) || !all_digits(whole) || !all_digits(frac) {
        return Err(bad());
    }

    let whole_val: i64 = if whole.is_empty() { 0 } else { whole.parse().map_err(|_| bad())? };

    // Scale is at most 10^9, so digits past the ninth can't reach the integer part
    let frac = &frac[..frac.len().min(9)];
    let frac_val: i64 = if frac.is_empty() { 0 } else { frac.parse().map_err(|_| bad())? };
    let frac_scaled = frac_val * scale / 10i64.pow(frac.len() as u32);

    let value = whole_val
        .checked_mul(scale)
        .and_then(|v| v.checked_add(frac_scaled))
        .ok_or_else(bad)?;

    Ok(if negative { -value } else { value })
}
