//! Normalization and Rounding
//!
//! Carry propagation and rounding primitives shared by every kernel.
//!
//! ## Overview
//!
//! Kernels accumulate into raw digit buffers whose slots may leave
//! `[0, MP_RADIX)`. The buffers are then normalized (carries and borrows pushed
//! towards index 0) and rounded into an `N`-digit [`Temp`]. Slot `0` of a buffer
//! is the most significant; the caller supplies the radix power of slot `0`.

use crate::arena::{Arena, Temp};
use crate::error::{MpError, MpResult};
use crate::mp_number::{MpDigit, MpNumber, HALF_MP_RADIX, MAX_MP_EXPONENT, MP_RADIX};

/// Carry propagation for slots at most one radix step out of range
///
/// Slots `first+1..=last` end in `[0, MP_RADIX)`; the carry lands in `buf[first]`.
pub fn normalize_fast(buf: &mut [MpDigit], first: usize, last: usize) {
    for k in (first + 1..=last).rev() {
        if buf[k] >= MP_RADIX {
            buf[k] -= MP_RADIX;
            buf[k - 1] += 1;
        } else if buf[k] < 0 {
            buf[k] += MP_RADIX;
            buf[k - 1] -= 1;
        }
    }
}

/// Carry propagation for arbitrarily large excursions
///
/// Slots `first+1..=last` end in `[0, MP_RADIX)`; the carry lands in `buf[first]`.
pub fn normalize(buf: &mut [MpDigit], first: usize, last: usize) {
    for k in (first + 1..=last).rev() {
        let d = buf[k];
        if !(0..MP_RADIX).contains(&d) {
            buf[k - 1] += d.div_euclid(MP_RADIX);
            buf[k] = d.rem_euclid(MP_RADIX);
        }
    }
}

/// Round a normalized digit run into `n` digits without range checking
///
/// Leading zero slots are skipped first, which restores full precision after
/// cancellation. The first discarded digit decides rounding, half away from zero.
/// Returns the rounded value together with its (unchecked) exponent.
pub(crate) fn round_digits<'a>(
    arena: &'a Arena,
    negative: bool,
    exponent: i64,
    buf: &[MpDigit],
    n: usize,
) -> (Temp<'a>, i64) {
    let n = n.max(1);
    let mut result = arena.alloc(n);
    let Some(lead) = buf.iter().position(|&d| d != 0) else {
        return (result, 0);
    };
    let take = (buf.len() - lead).min(n);
    result.digits[..take].copy_from_slice(&buf[lead..lead + take]);
    let mut exponent = exponent - lead as i64;
    if buf.get(lead + n).is_some_and(|&d| d >= HALF_MP_RADIX) {
        let mut k = n;
        loop {
            k -= 1;
            result.digits[k] += 1;
            if result.digits[k] < MP_RADIX {
                break;
            }
            result.digits[k] = 0;
            if k == 0 {
                result.digits[0] = 1;
                exponent += 1;
                break;
            }
        }
    }
    result.negative = negative;
    (result, exponent)
}

/// Round a normalized digit run into an `n`-digit value
///
/// `exponent` is the radix power of `buf[0]`. Results above
/// [`MAX_MP_EXPONENT`] are an error, results below its negation flush to zero.
pub fn round_buffer<'a>(
    arena: &'a Arena,
    negative: bool,
    exponent: i64,
    buf: &[MpDigit],
    n: usize,
) -> MpResult<Temp<'a>> {
    let (result, exponent) = round_digits(arena, negative, exponent, buf, n);
    finish(result, exponent)
}

/// Install `exponent` after a range check
pub(crate) fn finish(mut result: Temp<'_>, exponent: i64) -> MpResult<Temp<'_>> {
    if result.is_zero() {
        result.clear();
        return Ok(result);
    }
    if exponent > MAX_MP_EXPONENT {
        return Err(MpError::ExponentOverflow);
    }
    if exponent < -MAX_MP_EXPONENT {
        result.clear();
        return Ok(result);
    }
    result.exponent = exponent;
    Ok(result)
}

/// Round `x` to `n` digits
pub fn round_copy<'a>(arena: &'a Arena, x: &MpNumber, n: usize) -> MpResult<Temp<'a>> {
    round_buffer(arena, x.negative, x.exponent, &x.digits, n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_fast_borrow() {
        let mut buf = vec![0, 5, -3, MP_RADIX + 2];
        normalize_fast(&mut buf, 0, 3);
        assert_eq!(buf, vec![0, 4, MP_RADIX - 2, 2]);
    }

    #[test]
    fn test_normalize_large_excursion() {
        let mut buf = vec![0, 0, 3 * MP_RADIX * MP_RADIX + 17];
        normalize(&mut buf, 0, 2);
        assert_eq!(buf, vec![3, 0, 17]);
        let mut neg = vec![1, -1];
        normalize(&mut neg, 0, 1);
        assert_eq!(neg, vec![0, MP_RADIX - 1]);
    }

    #[test]
    fn test_round_half_away() {
        let arena = Arena::new();
        let r = round_buffer(&arena, true, 0, &[0, 4, 9, HALF_MP_RADIX], 2).unwrap();
        assert_eq!(r.exponent(), -1);
        assert_eq!(r.digits(), &[4, 10]);
        assert!(r.is_negative());
        let r = round_buffer(&arena, false, 0, &[4, 9, HALF_MP_RADIX - 1], 2).unwrap();
        assert_eq!(r.digits(), &[4, 9]);
    }

    #[test]
    fn test_round_carry_out() {
        let arena = Arena::new();
        let r = round_buffer(&arena, false, 2, &[MP_RADIX - 1, MP_RADIX - 1, HALF_MP_RADIX], 2)
            .unwrap();
        assert_eq!(r.exponent(), 3);
        assert_eq!(r.digits(), &[1, 0]);
    }

    #[test]
    fn test_round_range() {
        let arena = Arena::new();
        assert_eq!(
            round_buffer(&arena, false, MAX_MP_EXPONENT + 1, &[1], 1).unwrap_err(),
            MpError::ExponentOverflow
        );
        let tiny = round_buffer(&arena, true, -MAX_MP_EXPONENT - 1, &[1], 1).unwrap();
        assert!(tiny.is_zero());
        assert!(!tiny.is_negative());
        let zero = round_buffer(&arena, true, 5, &[0, 0], 3).unwrap();
        assert!(zero.is_normalized());
        assert_eq!(zero.precision(), 3);
    }
}
