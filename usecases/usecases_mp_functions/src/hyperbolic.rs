//! Hyperbolic Functions
//!
//! `sinh`, `cosh`, `tanh` and their inverses, expressed through [`exp`],
//! [`expm1`] and [`ln`].
//!
//! Odd functions are evaluated on `|x|` and the sign restored afterwards.
//! Where the defining identity cancels, the computation switches form:
//! `sinh` and `tanh` use `expm1`, and the inverse functions widen the working
//! precision by the leading zero digits of the quantity that approaches the
//! singular point. Arguments so small or large that the identity degenerates
//! at the working precision take the limiting form directly.

use std::cmp::Ordering;

use entities_multiprecision::{
    add, compare_magnitude, div, div_digit, from_i64, fun_digits, mul, mul_digit, reciprocal,
    round_copy, sub, to_f64, MpError, MpNumber, MpResult, Temp, LOG_MP_RADIX,
};
use tracing::debug;

use crate::context::Context;
use crate::exp_log::{exp, expm1, ln};
use crate::roots::sqrt;

/// Zero radix digits between the point and the leading digit of `x`
fn leading_zeros(x: &MpNumber) -> usize {
    usize::try_from(-x.exponent()).unwrap_or(0)
}

/// `x²` is negligible next to one at precision `g`
fn is_tiny(x: &MpNumber, g: usize) -> bool {
    2 * x.exponent() < -(g as i64)
}

/// One is negligible next to `x²` at precision `g`
fn is_huge(x: &MpNumber, g: usize) -> bool {
    2 * x.exponent() > g as i64
}

fn with_sign_of<'a>(mut value: Temp<'a>, x: &MpNumber) -> Temp<'a> {
    if x.is_negative() {
        value.negate();
    }
    value
}

/// `sinh(x)` at precision `n`
///
/// # Errors
///
/// * `ExponentOverflow` - the result exceeds the representable range
pub fn sinh<'a>(ctx: &'a Context, x: &MpNumber, n: usize) -> MpResult<Temp<'a>> {
    let arena = ctx.arena();
    if x.is_zero() {
        return Ok(arena.alloc(n));
    }
    let g = fun_digits(n);
    let mut a = arena.copy(x);
    a.make_positive();
    // with e = expm1(a): sinh(a) = e·(e + 2) / (2·(e + 1))
    let e = expm1(ctx, &a, g)?;
    let one = from_i64(arena, 1, 1);
    let two = from_i64(arena, 2, 1);
    let above = add(arena, &e, &two, g)?;
    let below = add(arena, &e, &one, g)?;
    let ratio = div(arena, &above, &below, g)?;
    let product = mul(arena, &e, &ratio, g)?;
    let s = div_digit(arena, &product, 2, n)?;
    Ok(with_sign_of(s, x))
}

/// `cosh(x)` at precision `n`
///
/// # Errors
///
/// * `ExponentOverflow` - the result exceeds the representable range
pub fn cosh<'a>(ctx: &'a Context, x: &MpNumber, n: usize) -> MpResult<Temp<'a>> {
    let arena = ctx.arena();
    let g = fun_digits(n);
    let mut a = arena.copy(x);
    a.make_positive();
    let e = exp(ctx, &a, g)?;
    let inverse = reciprocal(arena, &e, g)?;
    let sum = add(arena, &e, &inverse, g)?;
    div_digit(arena, &sum, 2, n)
}

/// `tanh(x)` at precision `n`
pub fn tanh<'a>(ctx: &'a Context, x: &MpNumber, n: usize) -> MpResult<Temp<'a>> {
    let arena = ctx.arena();
    if x.is_zero() {
        return Ok(arena.alloc(n));
    }
    let g = fun_digits(n);
    let mut a = arena.copy(x);
    a.make_positive();
    // 1 - tanh(a) ≈ 2e^(-2a) drops below the last digit
    let saturation = (g * LOG_MP_RADIX as usize + 1) as f64 * std::f64::consts::LN_10 / 2.0;
    if a.exponent() > 0 || to_f64(&a)? > saturation {
        return Ok(with_sign_of(from_i64(arena, 1, n), x));
    }
    let twice = mul_digit(arena, &a, 2, g)?;
    let e = expm1(ctx, &twice, g)?;
    let two = from_i64(arena, 2, 1);
    let below = add(arena, &e, &two, g)?;
    let t = div(arena, &e, &below, n)?;
    Ok(with_sign_of(t, x))
}

/// `asinh(x)` at precision `n`
pub fn asinh<'a>(ctx: &'a Context, x: &MpNumber, n: usize) -> MpResult<Temp<'a>> {
    let arena = ctx.arena();
    if x.is_zero() {
        return Ok(arena.alloc(n));
    }
    let g = fun_digits(n);
    let mut a = arena.copy(x);
    a.make_positive();
    if is_tiny(&a, g) {
        return round_copy(arena, x, n);
    }
    let result = if is_huge(&a, g) {
        let doubled = mul_digit(arena, &a, 2, g)?;
        ln(ctx, &doubled, n)?
    } else {
        let w = g + leading_zeros(&a) + 1;
        let one = from_i64(arena, 1, 1);
        let square = mul(arena, &a, &a, w)?;
        let lifted = add(arena, &square, &one, w)?;
        let root = sqrt(ctx, &lifted, w)?;
        let sum = add(arena, &a, &root, w)?;
        ln(ctx, &sum, n)?
    };
    Ok(with_sign_of(result, x))
}

/// `acosh(x)` at precision `n`
///
/// # Errors
///
/// * `Domain` - `x < 1`
pub fn acosh<'a>(ctx: &'a Context, x: &MpNumber, n: usize) -> MpResult<Temp<'a>> {
    let arena = ctx.arena();
    let one = from_i64(arena, 1, 1);
    let ordering = if x.is_negative() {
        Ordering::Less
    } else {
        compare_magnitude(x, &one)
    };
    match ordering {
        Ordering::Less => {
            debug!(operation = "acosh", "argument below one");
            return Err(MpError::Domain { operation: "acosh" });
        }
        Ordering::Equal => return Ok(arena.alloc(n)),
        Ordering::Greater => {}
    }
    let g = fun_digits(n);
    if is_huge(x, g) {
        let doubled = mul_digit(arena, x, 2, g)?;
        return ln(ctx, &doubled, n);
    }
    // x + √((x - 1)(x + 1)), widened by the digits x - 1 lost
    let d = sub(arena, x, &one, g)?;
    let w = g + leading_zeros(&d) + 1;
    let above = add(arena, x, &one, w)?;
    let product = mul(arena, &d, &above, w)?;
    let root = sqrt(ctx, &product, w)?;
    let sum = add(arena, x, &root, w)?;
    ln(ctx, &sum, n)
}

/// `atanh(x)` at precision `n`
///
/// # Errors
///
/// * `Domain` - `|x| >= 1`
pub fn atanh<'a>(ctx: &'a Context, x: &MpNumber, n: usize) -> MpResult<Temp<'a>> {
    let arena = ctx.arena();
    let one = from_i64(arena, 1, 1);
    if compare_magnitude(x, &one).is_ge() {
        debug!(operation = "atanh", "argument outside (-1, 1)");
        return Err(MpError::Domain { operation: "atanh" });
    }
    if x.is_zero() {
        return Ok(arena.alloc(n));
    }
    let g = fun_digits(n);
    let mut a = arena.copy(x);
    a.make_positive();
    if is_tiny(&a, g) {
        return round_copy(arena, x, n);
    }
    // ln((1 + a) / (1 - a)) / 2
    let w = g + leading_zeros(&a) + 1;
    let above = add(arena, &one, &a, w)?;
    let below = sub(arena, &one, &a, w)?;
    let ratio = div(arena, &above, &below, w)?;
    let l = ln(ctx, &ratio, w)?;
    let result = div_digit(arena, &l, 2, n)?;
    Ok(with_sign_of(result, x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use infrastructure_mp_encoding::StringCodec;

    type RealFn = for<'c> fn(&'c Context, &MpNumber, usize) -> MpResult<Temp<'c>>;

    fn parse<'a>(ctx: &'a Context, text: &str, n: usize) -> Temp<'a> {
        StringCodec::parse(ctx.arena(), text, n).unwrap()
    }

    #[test]
    fn test_hyperbolic_at_one() {
        let ctx = Context::new();
        let n = 4;
        let one = from_i64(ctx.arena(), 1, 1);
        let cases: [(RealFn, &str); 4] = [
            (sinh, "1.17520119364380145688238185059560081515571798133409587022956"),
            (cosh, "1.54308063481524377847790562075706168260152911236586370473740"),
            (tanh, "0.761594155955764888119458282604793590412768597257936551596809"),
            (asinh, "0.881373587019543025232609324979792309028160328261635410753296"),
        ];
        for (f, expected) in cases {
            assert_eq!(*f(&ctx, &one, n).unwrap(), *parse(&ctx, expected, n), "{}", expected);
        }
    }

    #[test]
    fn test_odd_symmetry() {
        let ctx = Context::new();
        let n = 4;
        let x = parse(&ctx, "-0.75", 1);
        let y = parse(&ctx, "0.75", 1);
        let odd: [RealFn; 4] = [sinh, tanh, asinh, atanh];
        for f in odd {
            let a = f(&ctx, &x, n).unwrap();
            let b = f(&ctx, &y, n).unwrap();
            assert!(a.is_negative() && !b.is_negative());
            assert_eq!(a.digits(), b.digits());
        }
        assert_eq!(*cosh(&ctx, &x, n).unwrap(), *cosh(&ctx, &y, n).unwrap());
    }

    #[test]
    fn test_inverse_values() {
        let ctx = Context::new();
        let n = 4;
        let two = from_i64(ctx.arena(), 2, 1);
        let expected = parse(&ctx, "1.31695789692481670862504634730796844402698197146751647976847", n);
        assert_eq!(*acosh(&ctx, &two, n).unwrap(), *expected);
        let half = parse(&ctx, "0.5", 1);
        let expected = parse(&ctx, "0.549306144334054845697622618461262852323745278911374725867345", n);
        assert_eq!(*atanh(&ctx, &half, n).unwrap(), *expected);
        let one = from_i64(ctx.arena(), 1, 1);
        assert!(acosh(&ctx, &one, n).unwrap().is_zero());
    }

    #[test]
    fn test_small_arguments_keep_precision() {
        let ctx = Context::new();
        let n = 4;
        let x = parse(&ctx, "1e-5", 1);
        let expected = parse(&ctx, "0.0000100000000001666666666675000000000019841269841297398589085", n);
        assert_eq!(*sinh(&ctx, &x, n).unwrap(), *expected);
        let expected = parse(&ctx, "0.00000999999999983333333334083333333288690476193514384920411201095", n);
        assert_eq!(*asinh(&ctx, &x, n).unwrap(), *expected);
        let tiny = parse(&ctx, "-3e-40", n);
        assert_eq!(*asinh(&ctx, &tiny, n).unwrap(), *tiny);
        assert_eq!(*atanh(&ctx, &tiny, n).unwrap(), *tiny);
    }

    #[test]
    fn test_saturation_and_large_arguments() {
        let ctx = Context::new();
        let n = 3;
        let big = from_i64(ctx.arena(), 1000, 1);
        assert_eq!(*tanh(&ctx, &big, n).unwrap(), *from_i64(ctx.arena(), 1, n));
        let huge = parse(&ctx, "1e30", 1);
        let a = asinh(&ctx, &huge, n).unwrap();
        let doubled = parse(&ctx, "2e30", 1);
        assert_eq!(*a, *ln(&ctx, &doubled, n).unwrap());
        let overflow = parse(&ctx, "1e7", 1);
        assert_eq!(cosh(&ctx, &overflow, n).unwrap_err(), MpError::ExponentOverflow);
    }

    #[test]
    fn test_domain_errors() {
        let ctx = Context::new();
        let mark = ctx.arena().mark();
        let half = parse(&ctx, "0.5", 1);
        assert_eq!(acosh(&ctx, &half, 3).unwrap_err(), MpError::Domain { operation: "acosh" });
        let minus = from_i64(ctx.arena(), -3, 1);
        assert_eq!(acosh(&ctx, &minus, 3).unwrap_err(), MpError::Domain { operation: "acosh" });
        let one = from_i64(ctx.arena(), -1, 1);
        assert_eq!(atanh(&ctx, &one, 3).unwrap_err(), MpError::Domain { operation: "atanh" });
        drop((half, minus, one));
        assert!(ctx.arena().is_released(mark));
    }
}
