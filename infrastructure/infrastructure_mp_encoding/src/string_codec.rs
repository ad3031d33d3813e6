//! String Codec Module
//!
//! Decimal text to and from multiprecision numbers.
//!
//! ## Numeral Syntax
//!
//! ```text
//! [sign] digits [ . digits ] [ (e|E) [sign] digits ]
//! ```
//!
//! Either the integral or the fractional digit run may be empty, not both.
//! Surrounding whitespace is ignored. Decimal digits are grouped into radix
//! digits of seven characters aligned on the decimal point, and the value is
//! rounded half away from zero to the requested precision.
//!
//! ## Formats
//!
//! - [`StringCodec::format`]: exact scientific text, the round-trip form
//! - [`StringCodec::format_fixed`]: fixed number of decimals
//! - [`StringCodec::format_scientific`]: fixed number of significant digits

use entities_multiprecision::{round_buffer, Arena, MpDigit, MpError, MpNumber, MpResult, Temp};

use crate::common::{decimal_digits, round_at};

/// Decimal string codec
pub struct StringCodec;

fn invalid(text: &str, reason: &'static str) -> MpError {
    MpError::InvalidNumeral {
        text: text.to_string(),
        reason,
    }
}

/// Split of a numeral into its syntactic parts
struct Numeral<'t> {
    negative: bool,
    integral: &'t str,
    fraction: &'t str,
    exponent: i64,
}

impl<'t> Numeral<'t> {
    fn scan(text: &'t str) -> MpResult<Self> {
        let body = text.trim();
        if body.is_empty() {
            return Err(invalid(text, "empty numeral"));
        }
        let (negative, body) = match body.as_bytes()[0] {
            b'-' => (true, &body[1..]),
            b'+' => (false, &body[1..]),
            _ => (false, body),
        };
        let (mantissa, exponent) = match body.find(['e', 'E']) {
            Some(at) => (&body[..at], Some(&body[at + 1..])),
            None => (body, None),
        };
        let (integral, fraction) = match mantissa.find('.') {
            Some(at) => (&mantissa[..at], &mantissa[at + 1..]),
            None => (mantissa, ""),
        };
        if integral.is_empty() && fraction.is_empty() {
            return Err(invalid(text, "no digits"));
        }
        if !integral.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid(text, "unexpected character"));
        }
        let exponent = match exponent {
            None => 0,
            Some(e) => {
                let digits = e.strip_prefix(['+', '-']).unwrap_or(e);
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid(text, "malformed exponent"));
                }
                e.parse::<i64>()
                    .map_err(|_| invalid(text, "exponent too large"))?
            }
        };
        Ok(Self {
            negative,
            integral,
            fraction,
            exponent,
        })
    }
}

impl StringCodec {
    /// Parse a decimal numeral at precision `n`
    ///
    /// # Errors
    ///
    /// * `InvalidNumeral` - `text` does not follow the numeral syntax
    /// * `ExponentOverflow` - the value exceeds the representable range
    pub fn parse<'a>(arena: &'a Arena, text: &str, n: usize) -> MpResult<Temp<'a>> {
        let numeral = Numeral::scan(text)?;
        let all: String = numeral.integral.chars().chain(numeral.fraction.chars()).collect();
        let significant = all.trim_start_matches('0');
        if significant.is_empty() {
            return Ok(arena.alloc(n));
        }
        // power of ten of the first significant digit
        let top = numeral
            .exponent
            .checked_add(numeral.integral.len() as i64)
            .and_then(|p| p.checked_sub((all.len() - significant.len()) as i64 + 1))
            .ok_or_else(|| invalid(text, "exponent too large"))?;
        let pad = 6 - top.rem_euclid(7) as usize;
        let exponent = top.div_euclid(7);

        // only the digits that can influence rounding at precision n
        let groups_needed = n.max(1) + 1;
        let mut aligned = "0".repeat(pad);
        aligned.extend(significant.chars().take(groups_needed * 7));
        let mut digits: Vec<MpDigit> = Vec::with_capacity(groups_needed);
        for chunk in aligned.as_bytes().chunks(7) {
            let group = chunk
                .iter()
                .chain(std::iter::repeat(&b'0'))
                .take(7)
                .fold(0, |acc, &b| acc * 10 + MpDigit::from(b - b'0'));
            digits.push(group);
        }
        round_buffer(arena, numeral.negative, exponent, &digits, n)
    }

    /// Exact scientific rendering, parseable back to the same value
    pub fn format(x: &MpNumber) -> String {
        x.to_string()
    }

    /// Render with exactly `decimals` fractional digits
    pub fn format_fixed(x: &MpNumber, decimals: usize) -> String {
        let (digits, exp10) = decimal_digits(x);
        let scaled = round_at(&digits, exp10, -(decimals as i64));
        let padded = if scaled.len() <= decimals {
            format!("{}{}", "0".repeat(decimals + 1 - scaled.len()), scaled)
        } else {
            scaled
        };
        let (whole, fraction) = padded.split_at(padded.len() - decimals);
        let sign = if x.is_negative() && padded.bytes().any(|b| b != b'0') {
            "-"
        } else {
            ""
        };
        if decimals == 0 {
            format!("{}{}", sign, whole)
        } else {
            format!("{}{}.{}", sign, whole, fraction)
        }
    }

    /// Render with `significant` significant digits, e.g. `-1.250E+3`
    pub fn format_scientific(x: &MpNumber, significant: usize) -> String {
        let significant = significant.max(1);
        if x.is_zero() {
            return mantissa_text("", &"0".repeat(significant), 0);
        }
        let (digits, exp10) = decimal_digits(x);
        let mut top = exp10 + digits.len() as i64 - 1;
        let mut scaled = round_at(&digits, exp10, top - (significant as i64 - 1));
        if scaled.len() > significant {
            top += 1;
            scaled.truncate(significant);
        }
        let sign = if x.is_negative() { "-" } else { "" };
        mantissa_text(sign, &scaled, top)
    }
}

fn mantissa_text(sign: &str, digits: &str, exponent: i64) -> String {
    let (head, tail) = digits.split_at(1);
    if tail.is_empty() {
        format!("{}{}E{:+}", sign, head, exponent)
    } else {
        format!("{}{}.{}E{:+}", sign, head, tail, exponent)
    }
}
