//! Machine Number Conversions
//!
//! Conversions between multiprecision values and machine integers, `f64` and
//! `malachite` integers.
//!
//! ## Overview
//!
//! Integer exports take the integral part (towards zero) and fail with a range
//! error when it does not fit the target. `f64` conversions scale digit by digit
//! and are bounded by the significance of a double. [`from_integer`] is exact
//! up to `n` digits and rounds beyond that; [`to_integer`] is exact and never
//! fails.

use malachite::Integer;
use num_traits::{FromPrimitive, ToPrimitive};

use crate::arena::{Arena, Temp};
use crate::error::{MpError, MpResult};
use crate::mp_number::{MpDigit, MpNumber, MP_RADIX};
use crate::normalize::{round_buffer, round_digits};

/// Radix digits of a 128-bit magnitude, most significant first
fn magnitude_digits(mut magnitude: u128) -> Vec<MpDigit> {
    let radix = MP_RADIX as u128;
    let mut digits = Vec::new();
    while magnitude > 0 {
        digits.push((magnitude % radix) as MpDigit);
        magnitude /= radix;
    }
    digits.reverse();
    digits
}

fn from_magnitude(arena: &Arena, negative: bool, magnitude: u128, n: usize) -> Temp<'_> {
    let digits = magnitude_digits(magnitude);
    let exponent = digits.len() as i64 - 1;
    let (mut z, exponent) = round_digits(arena, negative, exponent, &digits, n);
    if !z.is_zero() {
        z.exponent = exponent;
    } else {
        z.clear();
    }
    z
}

/// `v` at precision `n`
pub fn from_i64(arena: &Arena, v: i64, n: usize) -> Temp<'_> {
    from_magnitude(arena, v < 0, u128::from(v.unsigned_abs()), n)
}

/// `v` at precision `n`
pub fn from_u64(arena: &Arena, v: u64, n: usize) -> Temp<'_> {
    from_magnitude(arena, false, u128::from(v), n)
}

/// Any primitive integer at precision `n`
///
/// # Errors
///
/// * `OutOfRange` - `v` has no 128-bit integer representation
pub fn from_primitive<T: ToPrimitive>(arena: &Arena, v: T, n: usize) -> MpResult<Temp<'_>> {
    if let Some(signed) = v.to_i128() {
        return Ok(from_magnitude(arena, signed < 0, signed.unsigned_abs(), n));
    }
    let unsigned = v.to_u128().ok_or(MpError::OutOfRange { target: "i128" })?;
    Ok(from_magnitude(arena, false, unsigned, n))
}

/// Integral part of `x` as an `i128`
fn integral_i128(x: &MpNumber) -> MpResult<i128> {
    if x.is_zero() || x.exponent < 0 {
        return Ok(0);
    }
    // more than six radix digits never fit 128 bits
    if x.exponent > 5 {
        return Err(MpError::OutOfRange { target: "i128" });
    }
    let mut acc: i128 = 0;
    for k in 0..=x.exponent as usize {
        acc = acc
            .checked_mul(i128::from(MP_RADIX))
            .and_then(|a| a.checked_add(i128::from(x.digit(k))))
            .ok_or(MpError::OutOfRange { target: "i128" })?;
    }
    Ok(if x.negative { -acc } else { acc })
}

/// Integral part of `x` as an `i64`
///
/// # Errors
///
/// * `OutOfRange` - the integral part does not fit
pub fn to_i64(x: &MpNumber) -> MpResult<i64> {
    let whole = integral_i128(x).map_err(|_| MpError::OutOfRange { target: "i64" })?;
    i64::try_from(whole).map_err(|_| MpError::OutOfRange { target: "i64" })
}

/// Integral part of `x` as a `u64`
///
/// # Errors
///
/// * `OutOfRange` - the integral part is negative or does not fit
pub fn to_u64(x: &MpNumber) -> MpResult<u64> {
    let whole = integral_i128(x).map_err(|_| MpError::OutOfRange { target: "u64" })?;
    u64::try_from(whole).map_err(|_| MpError::OutOfRange { target: "u64" })
}

/// Integral part of `x` as any primitive integer
///
/// # Errors
///
/// * `OutOfRange` - the integral part does not fit `T`
pub fn to_primitive<T: FromPrimitive>(x: &MpNumber) -> MpResult<T> {
    let target = std::any::type_name::<T>();
    let whole = integral_i128(x).map_err(|_| MpError::OutOfRange { target })?;
    T::from_i128(whole).ok_or(MpError::OutOfRange { target })
}

/// Nearest `f64` to `x`, from its three leading digits
///
/// # Errors
///
/// * `OutOfRange` - `x` exceeds the range of `f64`
pub fn to_f64(x: &MpNumber) -> MpResult<f64> {
    if x.is_zero() {
        return Ok(0.0);
    }
    let radix = MP_RADIX as f64;
    let mantissa = x.digit(0) as f64 + (x.digit(1) as f64 + x.digit(2) as f64 / radix) / radix;
    let exponent = i32::try_from(x.exponent).map_err(|_| MpError::OutOfRange { target: "f64" })?;
    let magnitude = if exponent >= 0 {
        mantissa * radix.powi(exponent)
    } else if exponent > -40 {
        mantissa / radix.powi(-exponent)
    } else {
        // the divisor itself would overflow
        (mantissa / radix.powi(40)) / radix.powi(-exponent - 40)
    };
    if !magnitude.is_finite() {
        return Err(MpError::OutOfRange { target: "f64" });
    }
    Ok(if x.negative { -magnitude } else { magnitude })
}

/// `v` at precision `n`
///
/// # Errors
///
/// * `Domain` - `v` is infinite or NaN
pub fn from_f64(arena: &Arena, v: f64, n: usize) -> MpResult<Temp<'_>> {
    if !v.is_finite() {
        return Err(MpError::Domain { operation: "from_f64" });
    }
    if v == 0.0 {
        return Ok(arena.alloc(n));
    }
    let radix = MP_RADIX as f64;
    let mut m = v.abs();
    let mut exponent: i64 = 0;
    while m >= radix {
        m /= radix;
        exponent += 1;
    }
    while m < 1.0 {
        m *= radix;
        exponent -= 1;
    }
    let mut digits = [0 as MpDigit; 3];
    for slot in digits.iter_mut() {
        let d = m.floor();
        *slot = (d as MpDigit).clamp(0, MP_RADIX - 1);
        m = (m - d) * radix;
    }
    round_buffer(arena, v < 0.0, exponent, &digits, n)
}

/// `value` at precision `n`
///
/// An integer with more than `n` radix digits is rounded half away from zero
/// into `n` digits, so the result is no longer exactly `value`. It is never
/// rejected for length.
///
/// # Errors
///
/// * `ExponentOverflow` - the integer exceeds the representable range
pub fn from_integer<'a>(arena: &'a Arena, value: &Integer, n: usize) -> MpResult<Temp<'a>> {
    let is_negative = *value < Integer::from(0);
    let mut v = if is_negative { -value.clone() } else { value.clone() };
    let base = Integer::from(MP_RADIX);
    let mut digits = Vec::new();
    while v > Integer::from(0) {
        let remainder = &v % &base;
        // remainder is below the radix, so it fits an i64
        digits.push(i64::try_from(&remainder).unwrap_or(0));
        v = &v / &base;
    }
    if digits.is_empty() {
        return Ok(arena.alloc(n));
    }
    digits.reverse();
    let exponent = digits.len() as i64 - 1;
    round_buffer(arena, is_negative, exponent, &digits, n)
}

/// Integral part of `x` (towards zero) as an exact integer
///
/// Unlike the primitive exports this cannot fail: every digit of the integral
/// part is kept whatever the precision of `x`.
pub fn to_integer(x: &MpNumber) -> Integer {
    if x.is_zero() || x.exponent < 0 {
        return Integer::from(0);
    }
    let base = Integer::from(MP_RADIX);
    let mut acc = Integer::from(0);
    for k in 0..=x.exponent as usize {
        acc = acc * &base + Integer::from(x.digit(k));
    }
    if x.negative {
        -acc
    } else {
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mp_number::HALF_MP_RADIX;

    #[test]
    fn test_int_round_trip_scenario() {
        let arena = Arena::new();
        let x = from_i64(&arena, 123, 10);
        assert_eq!(to_i64(&x).unwrap(), 123);
        assert_eq!(x.precision(), 10);
    }

    #[test]
    fn test_extreme_integers() {
        let arena = Arena::new();
        for v in [i64::MIN, i64::MAX, -1, 0, MP_RADIX, -MP_RADIX * MP_RADIX] {
            assert_eq!(to_i64(&from_i64(&arena, v, 4)).unwrap(), v);
        }
        assert_eq!(to_u64(&from_u64(&arena, u64::MAX, 4)).unwrap(), u64::MAX);
    }

    #[test]
    fn test_range_errors() {
        let arena = Arena::new();
        let big = from_u64(&arena, u64::MAX, 4);
        assert_eq!(to_i64(&big).unwrap_err(), MpError::OutOfRange { target: "i64" });
        let minus = from_i64(&arena, -1, 2);
        assert_eq!(to_u64(&minus).unwrap_err(), MpError::OutOfRange { target: "u64" });
        let huge = MpNumber::from_digits(false, 9, vec![1]).unwrap();
        assert!(to_i64(&huge).is_err());
        assert!(to_primitive::<u8>(&from_i64(&arena, 256, 2)).is_err());
        assert_eq!(to_primitive::<i16>(&from_i64(&arena, -300, 2)).unwrap(), -300);
    }

    #[test]
    fn test_integral_part_truncates() {
        let arena = Arena::new();
        let x = from_f64(&arena, -7.9, 3).unwrap();
        assert_eq!(to_i64(&x).unwrap(), -7);
    }

    #[test]
    fn test_rounding_on_import() {
        let arena = Arena::new();
        let x = from_i64(&arena, 123_456_789_012_345, 2);
        assert_eq!(x.exponent(), 2);
        assert_eq!(x.digits(), &[1, 2_345_679]);
    }

    #[test]
    fn test_f64_conversions() {
        let arena = Arena::new();
        for v in [1.0, -0.25, 3.5e20, 1.0e-30, 123_456.789] {
            let x = from_f64(&arena, v, 4).unwrap();
            let back = to_f64(&x).unwrap();
            assert!(((back - v) / v).abs() < 1e-14, "{} -> {}", v, back);
        }
        assert!(from_f64(&arena, f64::NAN, 4).is_err());
        assert!(from_f64(&arena, f64::INFINITY, 4).is_err());
        let huge = MpNumber::from_digits(false, 50, vec![1]).unwrap();
        assert_eq!(to_f64(&huge).unwrap_err(), MpError::OutOfRange { target: "f64" });
    }

    #[test]
    fn test_integer_conversions() {
        let arena = Arena::new();
        let value = Integer::from(-987_654_321_i64) * Integer::from(1_000_000_000_000_i64);
        let x = from_integer(&arena, &value, 6).unwrap();
        assert_eq!(to_integer(&x), value);
        let primitive = from_primitive(&arena, u128::MAX, 8).unwrap();
        assert_eq!(to_integer(&primitive), Integer::from(u128::MAX));
    }

    #[test]
    fn test_integer_conversions_at_precision_boundary() {
        let arena = Arena::new();
        let radix = Integer::from(MP_RADIX);
        // three radix digits [1, 0, HALF_MP_RADIX] into two
        let value = &radix * &radix + Integer::from(HALF_MP_RADIX);
        let x = from_integer(&arena, &value, 2).unwrap();
        assert_eq!(x.digits(), &[1, 1]);
        assert_eq!(to_integer(&x), &radix * &radix + &radix);
        let exact = from_integer(&arena, &value, 3).unwrap();
        assert_eq!(to_integer(&exact), value);
        let fraction = from_f64(&arena, -2.75, 2).unwrap();
        assert_eq!(to_integer(&fraction), Integer::from(-2));
    }
}
