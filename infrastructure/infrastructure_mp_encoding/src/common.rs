//! Common Encoding/Decoding Utilities
//!
//! Decimal digit helpers shared by the string formats.
//!
//! ## Overview
//!
//! A multiprecision value is exactly `D * 10^e` for a decimal digit string `D`.
//! The helpers here produce that pair and round it at a chosen power of ten,
//! half away from zero, working on the decimal text directly so no precision is
//! lost before the requested position.

use entities_multiprecision::{MpNumber, LOG_MP_RADIX};

/// Decimal digits of `|x|` and the power of ten of the last digit
///
/// The digit string has no leading zeros; zero yields `("0", 0)`.
pub(crate) fn decimal_digits(x: &MpNumber) -> (String, i64) {
    if x.is_zero() {
        return ("0".to_string(), 0);
    }
    let digits = x.digits();
    let mut text = digits[0].to_string();
    for d in &digits[1..] {
        text.push_str(&format!("{:07}", d));
    }
    let last_power = (x.exponent() - (digits.len() as i64 - 1)) * i64::from(LOG_MP_RADIX);
    let trimmed = text.trim_end_matches('0');
    let exp10 = last_power + (text.len() - trimmed.len()) as i64;
    (trimmed.to_string(), exp10)
}

/// Add one to a decimal digit string
fn increment(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

/// Round `digits * 10^exp10` to a multiple of `10^place`
///
/// Returns the multiplier as a decimal digit string without leading zeros
/// (`"0"` when the value rounds to zero).
pub(crate) fn round_at(digits: &str, exp10: i64, place: i64) -> String {
    if exp10 >= place {
        let zeros = usize::try_from(exp10 - place).unwrap_or(0);
        return format!("{}{}", digits, "0".repeat(zeros));
    }
    let drop = usize::try_from(place - exp10).unwrap_or(usize::MAX);
    if drop > digits.len() {
        return "0".to_string();
    }
    let keep = digits.len() - drop;
    let mut kept = digits.as_bytes()[..keep].to_vec();
    if digits.as_bytes()[keep] >= b'5' {
        increment(&mut kept);
    }
    let text = String::from_utf8_lossy(&kept);
    let text = text.trim_start_matches('0');
    if text.is_empty() {
        "0".to_string()
    } else {
        text.to_string()
    }
}
