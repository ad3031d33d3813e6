//! Core Arithmetic
//!
//! Addition, subtraction, multiplication and division of multiprecision
//! numbers, digit-scale variants, reciprocal and integer powers.
//!
//! ## Overview
//!
//! All kernels accumulate into an arena buffer of `N + 2` digits (two guard
//! digits) plus a carry slot, normalize, and round half away from zero into the
//! `N`-digit result. Operand precision is independent of `N`.
//!
//! - Addition and subtraction dispatch on the four sign combinations and share a
//!   single digit-wise combination kernel.
//! - Multiplication is a schoolbook convolution with periodic normalization every
//!   [`overflow_threshold(2)`](crate::overflow_threshold) rows.
//! - Division follows Smith's fixed-point method: each quotient digit is estimated
//!   from the four leading remainder digits against the four leading divisor
//!   digits, and the remainder is left unnormalized between steps.

use std::cmp::Ordering;

use tracing::trace;

use crate::arena::{Arena, Temp};
use crate::compare::compare_magnitude;
use crate::error::{MpError, MpResult};
use crate::machine::from_i64;
use crate::mp_number::{
    fun_digits, overflow_threshold, MpDigit, MpNumber, MAX_DIGIT_SCALE, MAX_MP_EXPONENT, MP_RADIX,
};
use crate::normalize::{finish, normalize, normalize_fast, round_buffer, round_copy};
use crate::precision::truncate;

/// Sign combination of two operands; zero counts as positive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SignCase {
    BothPositive,
    PositiveNegative,
    NegativePositive,
    BothNegative,
}

impl SignCase {
    fn of(x: &MpNumber, y: &MpNumber) -> Self {
        match (x.negative, y.negative) {
            (false, false) => SignCase::BothPositive,
            (false, true) => SignCase::PositiveNegative,
            (true, false) => SignCase::NegativePositive,
            (true, true) => SignCase::BothNegative,
        }
    }
}

/// `x + y` rounded to `n` digits
pub fn add<'a>(arena: &'a Arena, x: &MpNumber, y: &MpNumber, n: usize) -> MpResult<Temp<'a>> {
    if y.is_zero() {
        return round_copy(arena, x, n);
    }
    if x.is_zero() {
        return round_copy(arena, y, n);
    }
    match SignCase::of(x, y) {
        SignCase::BothPositive => combine(arena, x, y, 1, false, n),
        SignCase::BothNegative => combine(arena, x, y, 1, true, n),
        SignCase::PositiveNegative => sub_magnitudes(arena, x, y, n),
        SignCase::NegativePositive => sub_magnitudes(arena, y, x, n),
    }
}

/// `x - y` rounded to `n` digits
pub fn sub<'a>(arena: &'a Arena, x: &MpNumber, y: &MpNumber, n: usize) -> MpResult<Temp<'a>> {
    if y.is_zero() {
        return round_copy(arena, x, n);
    }
    if x.is_zero() {
        return neg(arena, y, n);
    }
    match SignCase::of(x, y) {
        SignCase::BothPositive => sub_magnitudes(arena, x, y, n),
        SignCase::BothNegative => sub_magnitudes(arena, y, x, n),
        SignCase::PositiveNegative => combine(arena, x, y, 1, false, n),
        SignCase::NegativePositive => combine(arena, x, y, 1, true, n),
    }
}

/// `|x| - |y|` rounded to `n` digits
fn sub_magnitudes<'a>(arena: &'a Arena, x: &MpNumber, y: &MpNumber, n: usize) -> MpResult<Temp<'a>> {
    match compare_magnitude(x, y) {
        Ordering::Equal => Ok(arena.alloc(n)),
        Ordering::Greater => combine(arena, x, y, -1, false, n),
        Ordering::Less => combine(arena, y, x, -1, true, n),
    }
}

/// `|x| + direction * |y|` with the given result sign
///
/// For subtraction (`direction == -1`) the caller guarantees `|x| > |y|`.
fn combine<'a>(
    arena: &'a Arena,
    x: &MpNumber,
    y: &MpNumber,
    direction: MpDigit,
    negative: bool,
    n: usize,
) -> MpResult<Temp<'a>> {
    let top = x.exponent.max(y.exponent);
    let width = n + 2;
    let mut buf = arena.buffer(width + 1);
    accumulate(&mut buf, top, x, 1);
    accumulate(&mut buf, top, y, direction);
    normalize_fast(&mut buf, 0, width);
    round_buffer(arena, negative, top + 1, &buf, n)
}

/// Add `factor * |x|` into a buffer whose slot 0 has radix power `top + 1`
fn accumulate(buf: &mut [MpDigit], top: i64, x: &MpNumber, factor: MpDigit) {
    let Ok(shift) = usize::try_from(top - x.exponent) else {
        return;
    };
    let start = shift.saturating_add(1);
    if start >= buf.len() {
        return;
    }
    for (slot, &d) in buf[start..].iter_mut().zip(&x.digits) {
        *slot += factor * d;
    }
}

/// `-x` rounded to `n` digits
pub fn neg<'a>(arena: &'a Arena, x: &MpNumber, n: usize) -> MpResult<Temp<'a>> {
    let mut z = round_copy(arena, x, n)?;
    z.negate();
    Ok(z)
}

/// `|x|` rounded to `n` digits
pub fn abs<'a>(arena: &'a Arena, x: &MpNumber, n: usize) -> MpResult<Temp<'a>> {
    let mut z = round_copy(arena, x, n)?;
    z.make_positive();
    Ok(z)
}

/// `x * y` rounded to `n` digits
pub fn mul<'a>(arena: &'a Arena, x: &MpNumber, y: &MpNumber, n: usize) -> MpResult<Temp<'a>> {
    mul_normalizing_every(arena, x, y, n, overflow_threshold(2))
}

/// [`mul`] with the accumulator normalized after every `oflow` rows
pub(crate) fn mul_normalizing_every<'a>(
    arena: &'a Arena,
    x: &MpNumber,
    y: &MpNumber,
    n: usize,
    oflow: usize,
) -> MpResult<Temp<'a>> {
    if x.is_zero() || y.is_zero() {
        return Ok(arena.alloc(n));
    }
    let width = n + 2;
    let mut buf = arena.buffer(width + 1);
    let oflow = oflow.max(1);
    let lx = x.digits.len().min(width);
    let ly = y.digits.len().min(width);
    for i in 0..lx {
        let xi = x.digits[i];
        if xi != 0 {
            for j in 0..ly.min(width - i) {
                buf[1 + i + j] += xi * y.digits[j];
            }
        }
        if (i + 1) % oflow == 0 {
            normalize(&mut buf, 0, width);
        }
    }
    normalize(&mut buf, 0, width);
    round_buffer(arena, x.negative != y.negative, x.exponent + y.exponent + 1, &buf, n)
}

/// Leading four digits of a digit run as a fixed-point estimate
fn leading_estimate(digits: &[MpDigit], from: usize) -> f64 {
    let radix = MP_RADIX as f64;
    (0..4).fold(0.0, |acc, k| {
        acc * radix + digits.get(from + k).map_or(0.0, |&d| d as f64)
    })
}

/// Quotient digit estimate, truncated towards minus infinity
fn quotient_digit(remainder: &[MpDigit], at: usize, inverse: f64) -> MpDigit {
    (leading_estimate(remainder, at) * inverse).floor() as MpDigit
}

/// `x / y` rounded to `n` digits
///
/// # Errors
///
/// * `DivisionByZero` - `y` is zero
pub fn div<'a>(arena: &'a Arena, x: &MpNumber, y: &MpNumber, n: usize) -> MpResult<Temp<'a>> {
    div_normalizing_every(arena, x, y, n, overflow_threshold(3))
}

/// [`div`] with the remainder normalized once `oflow` quotient digits are pending
pub(crate) fn div_normalizing_every<'a>(
    arena: &'a Arena,
    x: &MpNumber,
    y: &MpNumber,
    n: usize,
    oflow: usize,
) -> MpResult<Temp<'a>> {
    if y.is_zero() {
        return Err(MpError::DivisionByZero);
    }
    if x.is_zero() {
        return Ok(arena.alloc(n));
    }
    let quotient_digits = n + 2;
    let divisor_len = y.digits.len().min(quotient_digits + 1);
    let divisor_len = y.digits[..divisor_len]
        .iter()
        .rposition(|&d| d != 0)
        .map_or(1, |last| last + 1);
    let divisor = &y.digits[..divisor_len];
    let inverse = 1.0 / leading_estimate(divisor, 0);

    // rem[0] has radix power x.exponent + 1; quotient digit q lands in rem[q]
    let mut rem = arena.buffer(quotient_digits + 1);
    for (slot, &d) in rem[1..].iter_mut().zip(&x.digits) {
        *slot = d;
    }
    let oflow = oflow.max(1);
    let mut pending = 0;
    for qi in 0..quotient_digits {
        let mut q = quotient_digit(&rem, qi, inverse);
        if q != 0 {
            pending += 1;
            if pending >= oflow {
                normalize(&mut rem, qi, quotient_digits);
                pending = 0;
                q = quotient_digit(&rem, qi, inverse);
            }
            let stop = divisor_len.min(quotient_digits + 1 - qi);
            for (slot, &d) in rem[qi..qi + stop].iter_mut().zip(divisor) {
                *slot -= q * d;
            }
        }
        let carried = rem[qi];
        rem[qi + 1] += carried * MP_RADIX;
        rem[qi] = q;
    }
    let last = quotient_digit(&rem, quotient_digits, inverse);
    rem[quotient_digits] = last;

    let mut quotient = arena.buffer(quotient_digits + 2);
    quotient[1..].copy_from_slice(&rem);
    normalize(&mut quotient, 0, quotient_digits + 1);
    round_buffer(
        arena,
        x.negative != y.negative,
        x.exponent - y.exponent + 2,
        &quotient,
        n,
    )
}

/// `1 / x` rounded to `n` digits
pub fn reciprocal<'a>(arena: &'a Arena, x: &MpNumber, n: usize) -> MpResult<Temp<'a>> {
    let one = from_i64(arena, 1, 1);
    div(arena, &one, x, n)
}

fn check_scale(k: MpDigit) -> MpResult<()> {
    if k.unsigned_abs() > MAX_DIGIT_SCALE.unsigned_abs() {
        return Err(MpError::OutOfRange {
            target: "digit scale",
        });
    }
    Ok(())
}

/// `x * k` for a machine-sized `k`, rounded to `n` digits
///
/// # Errors
///
/// * `OutOfRange` - `|k|` exceeds [`MAX_DIGIT_SCALE`]
pub fn mul_digit<'a>(arena: &'a Arena, x: &MpNumber, k: MpDigit, n: usize) -> MpResult<Temp<'a>> {
    check_scale(k)?;
    if x.is_zero() || k == 0 {
        return Ok(arena.alloc(n));
    }
    let scale = k.abs();
    let used = x.digits.len().min(n + 2);
    // slots 0 and 1 catch the carries of a scale up to MP_RADIX^2
    let mut buf = arena.buffer(used + 2);
    for (slot, &d) in buf[2..].iter_mut().zip(&x.digits[..used]) {
        *slot = d * scale;
    }
    normalize(&mut buf, 0, used + 1);
    round_buffer(arena, x.negative != (k < 0), x.exponent + 2, &buf, n)
}

/// `x / k` for a machine-sized `k`, rounded to `n` digits
///
/// # Errors
///
/// * `DivisionByZero` - `k` is zero
/// * `OutOfRange` - `|k|` exceeds [`MAX_DIGIT_SCALE`]
pub fn div_digit<'a>(arena: &'a Arena, x: &MpNumber, k: MpDigit, n: usize) -> MpResult<Temp<'a>> {
    if k == 0 {
        return Err(MpError::DivisionByZero);
    }
    check_scale(k)?;
    if x.is_zero() {
        return Ok(arena.alloc(n));
    }
    let scale = k.abs();
    // a scale above the radix leaves up to two leading zero digits
    let len = n + 4;
    let mut buf = arena.buffer(len);
    let mut carry: MpDigit = 0;
    for (j, slot) in buf.iter_mut().enumerate() {
        let partial = carry * MP_RADIX + x.digit(j);
        *slot = partial / scale;
        carry = partial % scale;
    }
    round_buffer(arena, x.negative != (k < 0), x.exponent, &buf, n)
}

/// Exact integer division of a non-negative integral `x` by `k > 0`
///
/// Returns the quotient at precision `n` and the remainder.
///
/// # Errors
///
/// * `DivisionByZero` - `k` is zero
/// * `OutOfRange` - `x` is negative or not integral, or `k` is negative or too large
pub fn divrem_digit<'a>(
    arena: &'a Arena,
    x: &MpNumber,
    k: MpDigit,
    n: usize,
) -> MpResult<(Temp<'a>, MpDigit)> {
    if k == 0 {
        return Err(MpError::DivisionByZero);
    }
    if k < 0 || k > MAX_DIGIT_SCALE {
        return Err(MpError::OutOfRange {
            target: "digit scale",
        });
    }
    if x.negative || !x.is_integral() {
        return Err(MpError::OutOfRange {
            target: "integer division",
        });
    }
    if x.is_zero() {
        return Ok((arena.alloc(n), 0));
    }
    let whole = usize::try_from(x.exponent).unwrap_or(0) + 1;
    let mut buf = arena.buffer(whole);
    let mut carry: MpDigit = 0;
    for (j, slot) in buf.iter_mut().enumerate() {
        let partial = carry * MP_RADIX + x.digit(j);
        *slot = partial / k;
        carry = partial % k;
    }
    let quotient = round_buffer(arena, false, x.exponent, &buf, n)?;
    Ok((quotient, carry))
}

/// `x * MP_RADIX^k` rounded to `n` digits
pub fn scale_radix<'a>(arena: &'a Arena, x: &MpNumber, k: i64, n: usize) -> MpResult<Temp<'a>> {
    let z = round_copy(arena, x, n)?;
    let exponent = z.exponent + k;
    finish(z, exponent)
}

/// `x^k` for an integer `k`, rounded to `n` digits
///
/// Square-and-multiply at a lengthened precision; a negative `k` inverts the
/// final power. `x^0` is one for every `x`.
///
/// # Errors
///
/// * `DivisionByZero` - `x` is zero and `k` is negative
pub fn pow_int<'a>(arena: &'a Arena, x: &MpNumber, k: i64, n: usize) -> MpResult<Temp<'a>> {
    if k == 0 {
        return Ok(from_i64(arena, 1, n));
    }
    if x.is_zero() {
        return if k < 0 {
            Err(MpError::DivisionByZero)
        } else {
            Ok(arena.alloc(n))
        };
    }
    let g = fun_digits(n) + 1;
    let mut base = round_copy(arena, x, g)?;
    let mut acc = from_i64(arena, 1, g);
    let mut e = k.unsigned_abs();
    let mut steps = 0;
    while e > 0 {
        if e & 1 == 1 {
            acc = mul(arena, &acc, &base, g)?;
        }
        e >>= 1;
        if e > 0 {
            base = mul(arena, &base, &base, g)?;
        }
        steps += 1;
    }
    trace!(power = k, steps, "integer power");
    if k < 0 {
        acc = reciprocal(arena, &acc, g)?;
    }
    round_copy(arena, &acc, n)
}

/// Quotient of `x / y` truncated towards zero, at precision `n`
///
/// # Errors
///
/// * `DivisionByZero` - `y` is zero
/// * `OutOfRange` - the quotient has more integral digits than the working precision
pub fn over<'a>(arena: &'a Arena, x: &MpNumber, y: &MpNumber, n: usize) -> MpResult<Temp<'a>> {
    let g = fun_digits(n);
    let q = div(arena, x, y, g)?;
    let mut t = truncate(arena, &q, g)?;
    if t.is_zero() && x.is_zero() {
        return Ok(arena.alloc(n));
    }
    // the rounded quotient may sit one unit off an exact integer
    let step = from_i64(arena, if x.negative == y.negative { 1 } else { -1 }, 1);
    let product = mul(arena, &t, y, g)?;
    let r = sub(arena, x, &product, g)?;
    if !r.is_zero() && r.negative != x.negative {
        t = sub(arena, &t, &step, g)?;
    } else if compare_magnitude(&r, y) != Ordering::Less {
        t = add(arena, &t, &step, g)?;
    }
    round_copy(arena, &t, n)
}

/// Non-negative remainder of `x` modulo `y`, at precision `n`
///
/// # Errors
///
/// * `DivisionByZero` - `y` is zero
/// * `OutOfRange` - the quotient has more integral digits than the working precision
pub fn modulo<'a>(arena: &'a Arena, x: &MpNumber, y: &MpNumber, n: usize) -> MpResult<Temp<'a>> {
    let g = fun_digits(n);
    let t = over(arena, x, y, g)?;
    let product = mul(arena, &t, y, g)?;
    let mut r = sub(arena, x, &product, g)?;
    if r.negative {
        let magnitude = abs(arena, y, g)?;
        r = add(arena, &r, &magnitude, g)?;
    }
    round_copy(arena, &r, n)
}

/// Exact `10^k` at precision `n`
///
/// # Errors
///
/// * `ExponentOverflow` - `10^k` exceeds the representable range
pub fn ten_up<'a>(arena: &'a Arena, k: i64, n: usize) -> MpResult<Temp<'a>> {
    let exponent = k.div_euclid(7);
    if exponent > MAX_MP_EXPONENT {
        return Err(MpError::ExponentOverflow);
    }
    let mut z = arena.alloc(n);
    z.digits[0] = 10_i64.pow(k.rem_euclid(7) as u32);
    finish(z, exponent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::{from_f64, to_f64, to_i64, to_integer};
    use quickcheck::{quickcheck, TestResult};

    fn num<'a>(arena: &'a Arena, v: i64) -> Temp<'a> {
        from_i64(arena, v, 4)
    }

    #[test]
    fn test_add_sign_cases() {
        let arena = Arena::new();
        let cases = [(5, 3), (5, -3), (-5, 3), (-5, -3), (3, -5), (-3, 5), (7, -7), (0, -4)];
        for (a, b) in cases {
            let x = num(&arena, a);
            let y = num(&arena, b);
            assert_eq!(to_i64(&add(&arena, &x, &y, 4).unwrap()).unwrap(), a + b);
            assert_eq!(to_i64(&sub(&arena, &x, &y, 4).unwrap()).unwrap(), a - b);
        }
    }

    #[test]
    fn test_add_carry_into_new_digit() {
        let arena = Arena::new();
        let x = from_i64(&arena, MP_RADIX - 1, 2);
        let y = from_i64(&arena, 1, 2);
        let z = add(&arena, &x, &y, 2).unwrap();
        assert_eq!(z.exponent(), 1);
        assert_eq!(z.digits(), &[1, 0]);
    }

    #[test]
    fn test_sub_cancellation_keeps_precision() {
        let arena = Arena::new();
        let x = MpNumber::from_digits(false, 0, vec![1, 0, 0, 5]).unwrap();
        let y = MpNumber::from_digits(false, 0, vec![1, 0, 0, 2]).unwrap();
        let z = sub(&arena, &x, &y, 4).unwrap();
        assert_eq!(z.exponent(), -3);
        assert_eq!(z.digits(), &[3, 0, 0, 0]);
    }

    #[test]
    fn test_mul_scenario() {
        let arena = Arena::new();
        let x = from_i64(&arena, 99_999, 10);
        let z = mul(&arena, &x, &x, 10).unwrap();
        assert_eq!(to_i64(&z).unwrap(), 9_999_800_001);
        assert!(z.is_normalized());
    }

    #[test]
    fn test_mul_signs() {
        let arena = Arena::new();
        let z = mul(&arena, &num(&arena, -12), &num(&arena, 12), 4).unwrap();
        assert_eq!(to_i64(&z).unwrap(), -144);
        let z = mul(&arena, &num(&arena, -12), &num(&arena, -12), 4).unwrap();
        assert_eq!(to_i64(&z).unwrap(), 144);
    }

    #[test]
    fn test_div_one_third() {
        let arena = Arena::new();
        let third = div(&arena, &num(&arena, 1), &num(&arena, 3), 15).unwrap();
        assert_eq!(third.exponent(), -1);
        assert!(third.digits().iter().all(|&d| d == 3_333_333));
        let back = mul(&arena, &third, &num(&arena, 3), 15).unwrap();
        let one = num(&arena, 1);
        let diff = sub(&arena, &back, &one, 15).unwrap();
        assert!(diff.is_zero() || diff.exponent() <= -14);
    }

    #[test]
    fn test_div_exact_and_signs() {
        let arena = Arena::new();
        let z = div(&arena, &num(&arena, -144), &num(&arena, 12), 4).unwrap();
        assert_eq!(to_i64(&z).unwrap(), -12);
        let big = from_i64(&arena, 9_999_800_001, 6);
        let z = div(&arena, &big, &from_i64(&arena, 99_999, 6), 6).unwrap();
        assert_eq!(to_i64(&z).unwrap(), 99_999);
    }

    #[test]
    fn test_div_by_zero() {
        let arena = Arena::new();
        let mark = arena.mark();
        {
            let zero = arena.alloc(3);
            let one = num(&arena, 1);
            assert_eq!(div(&arena, &one, &zero, 3).unwrap_err(), MpError::DivisionByZero);
            assert_eq!(reciprocal(&arena, &zero, 3).unwrap_err(), MpError::DivisionByZero);
        }
        assert!(arena.is_released(mark));
    }

    #[test]
    fn test_digit_scale() {
        let arena = Arena::new();
        let x = from_i64(&arena, 123_456_789, 4);
        let z = mul_digit(&arena, &x, -1_000, 4).unwrap();
        assert_eq!(to_i64(&z).unwrap(), -123_456_789_000);
        let z = div_digit(&arena, &x, 9, 4).unwrap();
        assert_eq!(to_i64(&z).unwrap(), 13_717_421);
        let z = div_digit(&arena, &num(&arena, 1), MAX_DIGIT_SCALE, 4).unwrap();
        assert!((to_f64(&z).unwrap() - 1e-11).abs() < 1e-24);
        assert!(mul_digit(&arena, &x, MAX_DIGIT_SCALE + 1, 4).is_err());
        assert_eq!(div_digit(&arena, &x, 0, 4).unwrap_err(), MpError::DivisionByZero);
    }

    #[test]
    fn test_divrem_digit() {
        let arena = Arena::new();
        let x = from_i64(&arena, 1_000_000_007, 4);
        let (q, r) = divrem_digit(&arena, &x, 1 << 23, 4).unwrap();
        assert_eq!(to_i64(&q).unwrap(), 1_000_000_007 / (1 << 23));
        assert_eq!(r, 1_000_000_007 % (1 << 23));
        let half = from_f64(&arena, 0.5, 2).unwrap();
        assert!(divrem_digit(&arena, &half, 2, 2).is_err());
    }

    #[test]
    fn test_pow_int() {
        let arena = Arena::new();
        let z = pow_int(&arena, &num(&arena, -3), 5, 4).unwrap();
        assert_eq!(to_i64(&z).unwrap(), -243);
        let z = pow_int(&arena, &num(&arena, 2), -2, 4).unwrap();
        assert_eq!(to_f64(&z).unwrap(), 0.25);
        let z = pow_int(&arena, &arena.alloc(2), 0, 4).unwrap();
        assert_eq!(to_i64(&z).unwrap(), 1);
        assert_eq!(
            pow_int(&arena, &arena.alloc(2), -1, 4).unwrap_err(),
            MpError::DivisionByZero
        );
    }

    #[test]
    fn test_over_and_modulo() {
        let arena = Arena::new();
        for (a, b) in [(17, 5), (-17, 5), (17, -5), (-17, -5), (15, 5)] {
            let x = num(&arena, a);
            let y = num(&arena, b);
            let q = over(&arena, &x, &y, 4).unwrap();
            assert_eq!(to_i64(&q).unwrap(), a / b);
            let r = modulo(&arena, &x, &y, 4).unwrap();
            assert_eq!(to_i64(&r).unwrap(), a.rem_euclid(b));
        }
    }

    #[test]
    fn test_ten_up() {
        let arena = Arena::new();
        assert_eq!(to_i64(&ten_up(&arena, 9, 3).unwrap()).unwrap(), 1_000_000_000);
        assert_eq!(to_f64(&ten_up(&arena, -3, 3).unwrap()).unwrap(), 0.001);
        assert_eq!(ten_up(&arena, 7 * (MAX_MP_EXPONENT + 1), 3).unwrap_err(), MpError::ExponentOverflow);
    }

    /// Integer with up to eight random radix digits
    fn integer_from(raw: &[u32], negative: bool) -> Option<MpNumber> {
        let mut digits: Vec<MpDigit> = raw
            .iter()
            .take(8)
            .map(|&d| MpDigit::from(d) % MP_RADIX)
            .collect();
        let lead = digits.first_mut()?;
        *lead = 1 + *lead % (MP_RADIX - 1);
        let exponent = digits.len() as i64 - 1;
        MpNumber::from_digits(negative, exponent, digits).ok()
    }

    quickcheck! {
        fn prop_mul_with_frequent_normalization_is_exact(
            a: Vec<u32>,
            b: Vec<u32>,
            negative: bool,
            every: u8
        ) -> TestResult {
            let (Some(x), Some(y)) = (integer_from(&a, negative), integer_from(&b, false)) else {
                return TestResult::discard();
            };
            let arena = Arena::new();
            let n = x.precision() + y.precision();
            let oflow = 1 + usize::from(every % 3);
            let z = mul_normalizing_every(&arena, &x, &y, n, oflow).unwrap();
            TestResult::from_bool(
                to_integer(&z) == to_integer(&x) * to_integer(&y) && z.is_normalized(),
            )
        }

        fn prop_div_with_frequent_normalization_is_exact(
            a: Vec<u32>,
            b: Vec<u32>,
            negative: bool,
            every: u8
        ) -> TestResult {
            let (Some(q), Some(y)) = (integer_from(&a, negative), integer_from(&b, false)) else {
                return TestResult::discard();
            };
            let arena = Arena::new();
            let x = mul(&arena, &q, &y, q.precision() + y.precision()).unwrap();
            let oflow = 1 + usize::from(every % 3);
            let z = div_normalizing_every(&arena, &x, &y, q.precision(), oflow).unwrap();
            TestResult::from_bool(to_integer(&z) == to_integer(&q) && z.is_normalized())
        }
    }

    #[test]
    fn test_normalization_interval_does_not_change_long_products() {
        let arena = Arena::new();
        let n = 40;
        let seven = from_i64(&arena, 7, n);
        let x = div_normalizing_every(&arena, &from_i64(&arena, 1, n), &seven, n, 1).unwrap();
        assert_eq!(*x, *div(&arena, &from_i64(&arena, 1, n), &seven, n).unwrap());
        let square = mul_normalizing_every(&arena, &x, &x, n, 2).unwrap();
        assert_eq!(*square, *mul(&arena, &x, &x, n).unwrap());
    }

    #[test]
    fn test_exponent_overflow_from_mul() {
        let arena = Arena::new();
        let huge = MpNumber::from_digits(false, MAX_MP_EXPONENT, vec![1]).unwrap();
        assert_eq!(mul(&arena, &huge, &huge, 2).unwrap_err(), MpError::ExponentOverflow);
    }
}
