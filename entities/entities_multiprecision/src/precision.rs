//! Precision Conversion
//!
//! Moving values between working precisions, and integer rounding modes.
//!
//! ## Overview
//!
//! - [`lengthen`] pads with zero digits and never changes the value.
//! - [`shorten`] rounds half away from zero into fewer digits.
//! - [`truncate`] drops the fractional part (towards zero).
//! - [`round`] rounds to the nearest integer, ties away from zero.
//! - [`entier`] rounds towards minus infinity.

use crate::arena::{Arena, Temp};
use crate::arithmetic::{add, sub};
use crate::error::{MpError, MpResult};
use crate::machine::from_i64;
use crate::mp_number::{MpNumber, HALF_MP_RADIX};
use crate::normalize::round_copy;

/// Copy `x` into `n >= x.precision()` digits, zero padded
///
/// A shorter `n` falls back to [`shorten`].
pub fn lengthen<'a>(arena: &'a Arena, x: &MpNumber, n: usize) -> MpResult<Temp<'a>> {
    if n < x.digits.len() {
        return shorten(arena, x, n);
    }
    let mut z = arena.alloc(n);
    z.digits[..x.digits.len()].copy_from_slice(&x.digits);
    z.exponent = x.exponent;
    z.negative = x.negative;
    Ok(z)
}

/// Round `x` into `n` digits
pub fn shorten<'a>(arena: &'a Arena, x: &MpNumber, n: usize) -> MpResult<Temp<'a>> {
    round_copy(arena, x, n)
}

/// Lengthen or shorten `x` to exactly `n` digits
pub fn convert<'a>(arena: &'a Arena, x: &MpNumber, n: usize) -> MpResult<Temp<'a>> {
    if n >= x.digits.len() {
        lengthen(arena, x, n)
    } else {
        shorten(arena, x, n)
    }
}

/// Integral part of `x` (towards zero) at precision `n`
///
/// # Errors
///
/// * `OutOfRange` - the integral part needs more than `n` digits
pub fn truncate<'a>(arena: &'a Arena, x: &MpNumber, n: usize) -> MpResult<Temp<'a>> {
    let mut z = arena.alloc(n);
    if x.is_zero() || x.exponent < 0 {
        return Ok(z);
    }
    if x.exponent >= z.digits.len() as i64 {
        return Err(MpError::OutOfRange { target: "truncate" });
    }
    let whole = (x.exponent as usize + 1).min(x.digits.len());
    z.digits[..whole].copy_from_slice(&x.digits[..whole]);
    z.exponent = x.exponent;
    z.negative = x.negative;
    Ok(z)
}

/// Nearest integer to `x`, ties away from zero, at precision `n`
///
/// # Errors
///
/// * `OutOfRange` - the integral part needs more than `n + 1` digits
pub fn round<'a>(arena: &'a Arena, x: &MpNumber, n: usize) -> MpResult<Temp<'a>> {
    if x.is_integral() {
        return convert(arena, x, n);
    }
    let mut half = arena.alloc(1);
    half.digits[0] = HALF_MP_RADIX;
    half.exponent = -1;
    // wide enough that the shifted sum is exact
    let width = x.digits.len().max(n) + 1;
    let shifted = if x.negative {
        sub(arena, x, &half, width)?
    } else {
        add(arena, x, &half, width)?
    };
    let whole = truncate(arena, &shifted, n + 1)?;
    shorten(arena, &whole, n)
}

/// Largest integer not above `x`, at precision `n`
///
/// # Errors
///
/// * `OutOfRange` - the integral part needs more than `n` digits
pub fn entier<'a>(arena: &'a Arena, x: &MpNumber, n: usize) -> MpResult<Temp<'a>> {
    let whole = truncate(arena, x, n)?;
    if x.negative && !x.is_integral() {
        let one = from_i64(arena, 1, 1);
        return sub(arena, &whole, &one, n);
    }
    Ok(whole)
}
