//! Multiprecision Number Representation
//!
//! Sign-magnitude decimal floating values with radix `10^7` digits.
//!
//! ## Overview
//!
//! A value is `sign * (d[0] + d[1]/R + ... + d[N-1]/R^(N-1)) * R^exponent`
//! where `R` is [`MP_RADIX`]. The working precision `N` is the length of the
//! digit vector and is chosen by the caller of every operation; values of
//! different precision mix freely, digits beyond a value's length read as zero.
//!
//! ## Invariants
//!
//! - Every stored digit lies in `[0, MP_RADIX)`; the sign is kept separately.
//! - A nonzero value has a nonzero leading digit.
//! - Zero is canonical: leading digit `0`, exponent `0`, not negative.

use std::fmt;
use std::fmt::Write as _;

use crate::error::{MpError, MpResult};

/// Storage type of one radix digit
pub type MpDigit = i64;

/// Decimal digits per radix digit
pub const LOG_MP_RADIX: u32 = 7;

/// Radix of the digit representation; `MP_RADIX^2` is exact in `f64` and `i64`
pub const MP_RADIX: MpDigit = 10_000_000;

/// Half the radix, the rounding threshold for the first discarded digit
pub const HALF_MP_RADIX: MpDigit = MP_RADIX / 2;

/// Largest representable radix exponent
pub const MAX_MP_EXPONENT: i64 = 142_857;

/// Precision of the default low-precision tier
pub const LONG_MP_DIGITS: usize = 5;

/// Precision of the default high-precision tier
pub const LONG_LONG_MP_DIGITS: usize = 12;

/// Largest magnitude accepted by the digit-scale multiply/divide kernels
pub const MAX_DIGIT_SCALE: MpDigit = 100_000_000_000;

/// Guard digits carried by kernels working towards precision `n`
pub fn guard_digits(n: usize) -> usize {
    if n == LONG_MP_DIGITS {
        2
    } else {
        3
    }
}

/// Working precision of a transcendental kernel targeting precision `n`
pub fn fun_digits(n: usize) -> usize {
    n + guard_digits(n)
}

/// Radix digits needed to hold `decimals` significant decimal digits
pub fn digits_for_decimals(decimals: usize) -> usize {
    decimals.div_ceil(LOG_MP_RADIX as usize) + 1
}

/// Number of unnormalized accumulation steps an `i64` digit survives
///
/// Each step adds at most one product of two digits (`< MP_RADIX^2`) to a
/// buffer slot; `margin` accounts for the other buffers feeding the slot.
pub fn overflow_threshold(margin: i64) -> usize {
    let bound = i64::MAX / (margin * MP_RADIX * MP_RADIX);
    usize::try_from(bound).unwrap_or(usize::MAX).max(1)
}

/// Multiprecision decimal number
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MpNumber {
    pub(crate) negative: bool,
    pub(crate) exponent: i64,
    pub(crate) digits: Vec<MpDigit>,
}

impl MpNumber {
    /// Canonical zero at precision `n`
    pub fn zero(n: usize) -> Self {
        Self {
            negative: false,
            exponent: 0,
            digits: vec![0; n.max(1)],
        }
    }

    /// Value without storage, only valid while moving digits in and out of the arena
    pub(crate) fn detached() -> Self {
        Self {
            negative: false,
            exponent: 0,
            digits: Vec::new(),
        }
    }

    /// Build a value from raw parts
    ///
    /// Leading zero digits are stripped (adjusting the exponent) and an all-zero
    /// digit run becomes canonical zero. The precision is the length of `digits`.
    ///
    /// # Errors
    ///
    /// * `OutOfRange` - a digit lies outside `[0, MP_RADIX)`
    /// * `ExponentOverflow` - the adjusted exponent exceeds [`MAX_MP_EXPONENT`]
    pub fn from_digits(negative: bool, exponent: i64, digits: Vec<MpDigit>) -> MpResult<Self> {
        if digits.iter().any(|d| !(0..MP_RADIX).contains(d)) {
            return Err(MpError::OutOfRange { target: "digit" });
        }
        let n = digits.len().max(1);
        let Some(lead) = digits.iter().position(|&d| d != 0) else {
            return Ok(Self::zero(n));
        };
        let mut shifted = vec![0; n];
        shifted[..digits.len() - lead].copy_from_slice(&digits[lead..]);
        let exponent = exponent - lead as i64;
        if exponent > MAX_MP_EXPONENT {
            return Err(MpError::ExponentOverflow);
        }
        if exponent < -MAX_MP_EXPONENT {
            return Ok(Self::zero(n));
        }
        Ok(Self {
            negative,
            exponent,
            digits: shifted,
        })
    }

    pub fn is_zero(&self) -> bool {
        self.digits.first().map_or(true, |&d| d == 0)
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// `-1`, `0` or `1`
    pub fn sign(&self) -> i32 {
        if self.is_zero() {
            0
        } else if self.negative {
            -1
        } else {
            1
        }
    }

    /// Radix power of the leading digit
    pub fn exponent(&self) -> i64 {
        self.exponent
    }

    /// Magnitude digits, most significant first
    pub fn digits(&self) -> &[MpDigit] {
        &self.digits
    }

    /// Digit `k` (0-based), zero beyond the stored precision
    pub fn digit(&self, k: usize) -> MpDigit {
        self.digits.get(k).copied().unwrap_or(0)
    }

    /// Number of stored digits
    pub fn precision(&self) -> usize {
        self.digits.len()
    }

    /// Whether the value has no fractional part
    pub fn is_integral(&self) -> bool {
        if self.is_zero() {
            return true;
        }
        if self.exponent < 0 {
            return false;
        }
        let whole = usize::try_from(self.exponent).unwrap_or(usize::MAX);
        self.digits.iter().skip(whole.saturating_add(1)).all(|&d| d == 0)
    }

    /// Flip the sign in place; zero stays positive
    pub fn negate(&mut self) {
        if !self.is_zero() {
            self.negative = !self.negative;
        }
    }

    /// Clear the sign in place
    pub fn make_positive(&mut self) {
        self.negative = false;
    }

    /// Whether the representation invariants hold
    pub fn is_normalized(&self) -> bool {
        if self.digits.is_empty() || self.digits.iter().any(|d| !(0..MP_RADIX).contains(d)) {
            return false;
        }
        if self.digits[0] == 0 {
            return self.exponent == 0 && !self.negative && self.digits.iter().all(|&d| d == 0);
        }
        (-MAX_MP_EXPONENT..=MAX_MP_EXPONENT).contains(&self.exponent)
    }

    /// Reset to canonical zero keeping the precision
    pub(crate) fn clear(&mut self) {
        self.digits.iter_mut().for_each(|d| *d = 0);
        self.exponent = 0;
        self.negative = false;
    }
}

/// Exact scientific rendering, e.g. `-1.2345E+12`
impl fmt::Display for MpNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }
        let mut text = self.digits[0].to_string();
        let lead_len = text.len() as i64;
        for d in &self.digits[1..] {
            write!(text, "{:07}", d)?;
        }
        let trimmed = text.trim_end_matches('0');
        let (head, tail) = trimmed.split_at(1);
        let decimal_exponent = self.exponent * i64::from(LOG_MP_RADIX) + lead_len - 1;
        if self.negative {
            f.write_str("-")?;
        }
        f.write_str(head)?;
        if !tail.is_empty() {
            write!(f, ".{}", tail)?;
        }
        write!(f, "E{:+}", decimal_exponent)
    }
}
