//! Roots
//!
//! Square root, cube root and overflow-safe hypotenuse.
//!
//! ## Overview
//!
//! The argument is first scaled by an even (square root) or multiple-of-three
//! (cube root) power of the radix so its exponent is small; the root of the
//! scaled value is seeded from `f64` and refined with Newton's method along a
//! [`precision_ladder`], then the scale is put back by dividing the exponent.

use entities_multiprecision::{
    abs, add, compare_magnitude, div, div_digit, from_f64, from_i64, fun_digits, mul, mul_digit,
    scale_radix, to_f64, MpError, MpNumber, MpResult, Temp,
};
use tracing::{debug, trace};

use crate::context::Context;
use crate::newton::precision_ladder;

/// `√x` at precision `n`
///
/// # Errors
///
/// * `Domain` - `x` is negative
pub fn sqrt<'a>(ctx: &'a Context, x: &MpNumber, n: usize) -> MpResult<Temp<'a>> {
    let arena = ctx.arena();
    if x.is_negative() {
        debug!(operation = "sqrt", "negative argument");
        return Err(MpError::Domain { operation: "sqrt" });
    }
    if x.is_zero() {
        return Ok(arena.alloc(n));
    }
    let g = fun_digits(n);
    let half = x.exponent().div_euclid(2);
    let a = scale_radix(arena, x, -2 * half, g)?;
    let mut z = from_f64(arena, to_f64(&a)?.sqrt(), 2)?;
    let ladder = precision_ladder(g);
    for &p in &ladder {
        let q = div(arena, &a, &z, p)?;
        let s = add(arena, &z, &q, p)?;
        z = div_digit(arena, &s, 2, p)?;
    }
    trace!(steps = ladder.len(), scale = half, "square root");
    scale_radix(arena, &z, half, n)
}

/// `∛x` at precision `n`, defined for every real `x`
pub fn cbrt<'a>(ctx: &'a Context, x: &MpNumber, n: usize) -> MpResult<Temp<'a>> {
    let arena = ctx.arena();
    if x.is_zero() {
        return Ok(arena.alloc(n));
    }
    let g = fun_digits(n);
    let third = x.exponent().div_euclid(3);
    let mut a = scale_radix(arena, x, -3 * third, g)?;
    a.make_positive();
    let mut z = from_f64(arena, to_f64(&a)?.cbrt(), 2)?;
    let ladder = precision_ladder(g);
    for &p in &ladder {
        let square = mul(arena, &z, &z, p)?;
        let q = div(arena, &a, &square, p)?;
        let twice = mul_digit(arena, &z, 2, p)?;
        let s = add(arena, &twice, &q, p)?;
        z = div_digit(arena, &s, 3, p)?;
    }
    trace!(steps = ladder.len(), scale = third, "cube root");
    let mut root = scale_radix(arena, &z, third, n)?;
    if x.is_negative() {
        root.negate();
    }
    Ok(root)
}

/// `√(x² + y²)` at precision `n`, as `max·√(1 + (min/max)²)`
pub fn hypot<'a>(ctx: &'a Context, x: &MpNumber, y: &MpNumber, n: usize) -> MpResult<Temp<'a>> {
    let arena = ctx.arena();
    let g = fun_digits(n);
    let (big, small) = if compare_magnitude(x, y).is_ge() {
        (abs(arena, x, g)?, abs(arena, y, g)?)
    } else {
        (abs(arena, y, g)?, abs(arena, x, g)?)
    };
    if big.is_zero() {
        return Ok(arena.alloc(n));
    }
    if small.is_zero() {
        return abs(arena, &big, n);
    }
    let ratio = div(arena, &small, &big, g)?;
    let square = mul(arena, &ratio, &ratio, g)?;
    let one = from_i64(arena, 1, 1);
    let sum = add(arena, &one, &square, g)?;
    let root = sqrt(ctx, &sum, g)?;
    mul(arena, &big, &root, n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use entities_multiprecision::{sub, to_i64};
    use infrastructure_mp_encoding::StringCodec;

    fn parse<'a>(ctx: &'a Context, text: &str, n: usize) -> Temp<'a> {
        StringCodec::parse(ctx.arena(), text, n).unwrap()
    }

    #[test]
    fn test_sqrt_two() {
        let ctx = Context::new();
        let two = from_i64(ctx.arena(), 2, 6);
        let root = sqrt(&ctx, &two, 6).unwrap();
        let expected = parse(&ctx, "1.41421356237309504880168872420969807856967187537694", 6);
        assert_eq!(*root, *expected);
    }

    #[test]
    fn test_sqrt_exact_squares() {
        let ctx = Context::new();
        for (v, r) in [(1, 1), (4, 2), (144, 12), (99_980_001, 9_999), (10_000_000_000_000_000, 100_000_000)] {
            let x = from_i64(ctx.arena(), v, 5);
            assert_eq!(to_i64(&sqrt(&ctx, &x, 5).unwrap()).unwrap(), r, "sqrt({})", v);
        }
    }

    #[test]
    fn test_sqrt_small_and_large_exponents() {
        let ctx = Context::new();
        let tiny = parse(&ctx, "4e-301", 4);
        let root = sqrt(&ctx, &tiny, 4).unwrap();
        assert!(StringCodec::format(&root).starts_with("6.3245553203367586"));
        assert!(StringCodec::format(&root).ends_with("E-151"));
        let check = mul(ctx.arena(), &root, &root, 4).unwrap();
        let diff = sub(ctx.arena(), &check, &tiny, 4).unwrap();
        assert!(diff.is_zero() || diff.exponent() <= tiny.exponent() - 3);
    }

    #[test]
    fn test_sqrt_negative_is_domain_error() {
        let ctx = Context::new();
        let x = from_i64(ctx.arena(), -1, 2);
        assert_eq!(
            sqrt(&ctx, &x, 2).unwrap_err(),
            MpError::Domain { operation: "sqrt" }
        );
        assert!(sqrt(&ctx, &MpNumber::zero(2), 2).unwrap().is_zero());
    }

    #[test]
    fn test_cbrt_signs() {
        let ctx = Context::new();
        let x = from_i64(ctx.arena(), -27_000, 4);
        assert_eq!(to_i64(&cbrt(&ctx, &x, 4).unwrap()).unwrap(), -30);
        let y = parse(&ctx, "8e-21", 4);
        let root = cbrt(&ctx, &y, 4).unwrap();
        assert_eq!(StringCodec::format(&root), "2E-7");
    }

    #[test]
    fn test_hypot() {
        let ctx = Context::new();
        let three = from_i64(ctx.arena(), -3, 3);
        let four = from_i64(ctx.arena(), 4, 3);
        assert_eq!(to_i64(&hypot(&ctx, &three, &four, 3).unwrap()).unwrap(), 5);
        let big = parse(&ctx, "3e600000", 3);
        let bigger = parse(&ctx, "4e600000", 3);
        let h = hypot(&ctx, &big, &bigger, 3).unwrap();
        assert_eq!(StringCodec::format(&h), "5E+600000");
    }
}
