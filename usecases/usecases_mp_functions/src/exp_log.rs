//! Exponential and Logarithm
//!
//! `exp`, `expm1`, natural and decimal logarithms, real powers and the cached
//! logarithm constants.
//!
//! ## Overview
//!
//! - **exp**: the argument is halved `m` times until it is below
//!   [`REDUCED_BOUND`], the Taylor series is summed, and the sum is squared `m`
//!   times. Working precision grows with `m` to absorb the error doubling of
//!   each squaring.
//! - **expm1**: the same series without its leading one; the halvings are
//!   undone with `e(2t) - 1 = s(s + 2)` so no cancellation happens near zero.
//! - **ln**: the argument is scaled into `[1/MP_RADIX, MP_RADIX)` and the scale
//!   is added back as a multiple of `ln(MP_RADIX)`. Arguments within `1e-7` of
//!   one use the series of `ln(1 + d)`; everything else runs Newton's method on
//!   `exp(z) = a`, seeded from `f64`.

use entities_multiprecision::{
    add, div, div_digit, from_f64, from_i64, fun_digits, mul, mul_digit, neg, pow_int,
    round_copy, scale_radix, sub, to_f64, to_i64, MpError, MpNumber, MpResult, Temp,
    LOG_MP_RADIX, LONG_MP_DIGITS, MAX_MP_EXPONENT,
};
use tracing::{debug, trace};

use crate::context::{Constant, Context};
use crate::newton::precision_ladder;

/// Magnitude below which the exponential series is summed directly
pub const REDUCED_BOUND: f64 = 0.1;

/// Series length used at and below the long precision tier
const FIXED_SERIES_TERMS: i64 = 28;

/// Largest halving applied by one digit-scale division
const HALVING_CHUNK: u32 = 30;

/// `|x|` above which `exp(x)` leaves the representable range
fn exp_limit() -> f64 {
    (MAX_MP_EXPONENT + 1) as f64 * f64::from(LOG_MP_RADIX) * std::f64::consts::LN_10
}

fn exp_out_of_range(x: &MpNumber) -> MpResult<bool> {
    // three radix digits already exceed the limit
    if x.exponent() > 2 {
        return Ok(true);
    }
    Ok(to_f64(x)?.abs() > exp_limit())
}

/// Halvings that bring `x` below [`REDUCED_BOUND`]
fn halvings(x: &MpNumber) -> MpResult<u32> {
    let mut v = to_f64(x)?.abs();
    let mut m = 0;
    while v >= REDUCED_BOUND {
        v /= 2.0;
        m += 1;
    }
    Ok(m)
}

/// `x / 2^m` at precision `g`
fn halve<'a>(ctx: &'a Context, x: &MpNumber, m: u32, g: usize) -> MpResult<Temp<'a>> {
    let arena = ctx.arena();
    let mut t = round_copy(arena, x, g)?;
    let mut left = m;
    while left > 0 {
        let step = left.min(HALVING_CHUNK);
        t = div_digit(arena, &t, 1 << step, g)?;
        left -= step;
    }
    Ok(t)
}

/// `Σ_{k≥1} t^k / k!` at precision `g`
fn exp_series<'a>(ctx: &'a Context, t: &MpNumber, g: usize, fixed: bool) -> MpResult<Temp<'a>> {
    let arena = ctx.arena();
    let mut term = round_copy(arena, t, g)?;
    let mut sum = term.clone();
    let mut k: i64 = 1;
    loop {
        k += 1;
        if fixed && k > FIXED_SERIES_TERMS {
            break;
        }
        term = mul(arena, &term, t, g)?;
        term = div_digit(arena, &term, k, g)?;
        if !fixed && (term.is_zero() || sum.exponent() - term.exponent() > g as i64) {
            break;
        }
        sum = add(arena, &sum, &term, g)?;
    }
    trace!(terms = k - 1, digits = g, "exponential series");
    Ok(sum)
}

/// `e^x` at precision `n`
///
/// Arguments far below the representable range flush to zero.
///
/// # Errors
///
/// * `ExponentOverflow` - `e^x` exceeds the representable range
pub fn exp<'a>(ctx: &'a Context, x: &MpNumber, n: usize) -> MpResult<Temp<'a>> {
    let arena = ctx.arena();
    if x.is_zero() {
        return Ok(from_i64(arena, 1, n));
    }
    if exp_out_of_range(x)? {
        return if x.is_negative() {
            Ok(arena.alloc(n))
        } else {
            Err(MpError::ExponentOverflow)
        };
    }
    let m = halvings(x)?;
    let g = fun_digits(n) + 1 + m as usize / 20;
    let t = halve(ctx, x, m, g)?;
    let s = exp_series(ctx, &t, g, n <= LONG_MP_DIGITS)?;
    let one = from_i64(arena, 1, 1);
    let mut z = add(arena, &s, &one, g)?;
    for _ in 0..m {
        z = mul(arena, &z, &z, g)?;
    }
    round_copy(arena, &z, n)
}

/// `e^x - 1` at precision `n`, accurate for `x` near zero
///
/// # Errors
///
/// * `ExponentOverflow` - `e^x` exceeds the representable range
pub fn expm1<'a>(ctx: &'a Context, x: &MpNumber, n: usize) -> MpResult<Temp<'a>> {
    let arena = ctx.arena();
    if x.is_zero() {
        return Ok(arena.alloc(n));
    }
    if exp_out_of_range(x)? {
        return if x.is_negative() {
            Ok(from_i64(arena, -1, n))
        } else {
            Err(MpError::ExponentOverflow)
        };
    }
    let m = halvings(x)?;
    let g = fun_digits(n) + 1 + m as usize / 20;
    let t = halve(ctx, x, m, g)?;
    let mut s = exp_series(ctx, &t, g, n <= LONG_MP_DIGITS)?;
    let two = from_i64(arena, 2, 1);
    for _ in 0..m {
        let shifted = add(arena, &s, &two, g)?;
        s = mul(arena, &s, &shifted, g)?;
    }
    round_copy(arena, &s, n)
}

/// `ln(a)` at precision `g` for `a` in `[1/MP_RADIX, MP_RADIX)`
fn ln_kernel<'a>(ctx: &'a Context, a: &MpNumber, g: usize) -> MpResult<Temp<'a>> {
    let arena = ctx.arena();
    let one = from_i64(arena, 1, 1);
    let d = sub(arena, a, &one, g)?;
    if d.is_zero() {
        return Ok(arena.alloc(g));
    }
    if d.exponent() < -1 {
        // ln(1 + d) = d - d²/2 + d³/3 - ...
        let mut power = d.clone();
        let mut sum = d.clone();
        let mut k: i64 = 1;
        loop {
            k += 1;
            power = mul(arena, &power, &d, g)?;
            let mut term = div_digit(arena, &power, k, g)?;
            if term.is_zero() || sum.exponent() - term.exponent() > g as i64 {
                break;
            }
            if k % 2 == 0 {
                term.negate();
            }
            sum = add(arena, &sum, &term, g)?;
        }
        trace!(terms = k - 1, digits = g, "logarithm series");
        return Ok(sum);
    }
    let mut z = from_f64(arena, to_f64(a)?.ln(), 2)?;
    let ladder = precision_ladder(g);
    for &p in &ladder {
        // z - 1 + a·e^-z
        let minus = neg(arena, &z, p)?;
        let e = exp(ctx, &minus, p)?;
        let scaled = mul(arena, a, &e, p)?;
        let correction = sub(arena, &scaled, &one, p)?;
        z = add(arena, &z, &correction, p)?;
    }
    trace!(steps = ladder.len(), digits = g, "logarithm newton");
    Ok(z)
}

/// `ln(10)` at precision `n`, cached
pub fn ln_ten<'a>(ctx: &'a Context, n: usize) -> MpResult<Temp<'a>> {
    ctx.constant(Constant::LnTen, n, |g| {
        let ten = from_i64(ctx.arena(), 10, 1);
        ln_kernel(ctx, &ten, g)
    })
}

/// `ln(MP_RADIX)` at precision `n`, cached
pub fn ln_radix<'a>(ctx: &'a Context, n: usize) -> MpResult<Temp<'a>> {
    ctx.constant(Constant::LnRadix, n, |g| {
        let ten = ln_ten(ctx, g)?;
        mul_digit(ctx.arena(), &ten, i64::from(LOG_MP_RADIX), g)
    })
}

/// Natural logarithm at precision `n`
///
/// # Errors
///
/// * `Domain` - `x` is zero or negative
pub fn ln<'a>(ctx: &'a Context, x: &MpNumber, n: usize) -> MpResult<Temp<'a>> {
    if x.is_zero() || x.is_negative() {
        debug!(operation = "ln", "non-positive argument");
        return Err(MpError::Domain { operation: "ln" });
    }
    let arena = ctx.arena();
    let g = fun_digits(n);
    let k = x.exponent();
    if k == 0 || k == -1 {
        let z = ln_kernel(ctx, x, g)?;
        return round_copy(arena, &z, n);
    }
    let a = scale_radix(arena, x, -k, g)?;
    let z = ln_kernel(ctx, &a, g)?;
    let radix = ln_radix(ctx, g)?;
    let shift = mul_digit(arena, &radix, k, g)?;
    add(arena, &z, &shift, n)
}

/// Decimal logarithm at precision `n`
///
/// # Errors
///
/// * `Domain` - `x` is zero or negative
pub fn log<'a>(ctx: &'a Context, x: &MpNumber, n: usize) -> MpResult<Temp<'a>> {
    if x.is_zero() || x.is_negative() {
        debug!(operation = "log", "non-positive argument");
        return Err(MpError::Domain { operation: "log" });
    }
    let g = fun_digits(n);
    let l = ln(ctx, x, g)?;
    let ten = ln_ten(ctx, g)?;
    div(ctx.arena(), &l, &ten, n)
}

/// `x^y` at precision `n`
///
/// An integral `y` that fits `i64` uses [`pow_int`], so negative bases are
/// accepted there; otherwise the result is `e^(y·ln x)`.
///
/// # Errors
///
/// * `Domain` - `x` is negative and `y` is not an integer, or `x` is zero and `y` is negative
/// * `DivisionByZero` - `x` is zero and `y` is a negative integer
/// * `ExponentOverflow` - the power exceeds the representable range
pub fn pow_real<'a>(ctx: &'a Context, x: &MpNumber, y: &MpNumber, n: usize) -> MpResult<Temp<'a>> {
    let arena = ctx.arena();
    if y.is_integral() {
        if let Ok(k) = to_i64(y) {
            return pow_int(arena, x, k, n);
        }
    }
    if x.is_zero() && !y.is_negative() {
        return Ok(arena.alloc(n));
    }
    if x.is_zero() || x.is_negative() {
        debug!(operation = "pow", "base outside the domain of a real power");
        return Err(MpError::Domain { operation: "pow" });
    }
    let g = fun_digits(n) + 2;
    let l = ln(ctx, x, g)?;
    let product = mul(arena, y, &l, g)?;
    exp(ctx, &product, n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use entities_multiprecision::{to_f64, ErrorKind};
    use infrastructure_mp_encoding::StringCodec;

    const E: &str = "2.71828182845904523536028747135266249775724709369995957496696762772407663";
    const LN2: &str = "0.693147180559945309417232121458176568075500134360255254120680009493393622";
    const LN10: &str = "2.30258509299404568401799145468436420760110148862877297603332790096757260";

    fn parse<'a>(ctx: &'a Context, text: &str, n: usize) -> Temp<'a> {
        StringCodec::parse(ctx.arena(), text, n).unwrap()
    }

    #[test]
    fn test_exp_one_matches_e() {
        let ctx = Context::new();
        for n in [2, 5, 8] {
            let one = from_i64(ctx.arena(), 1, n);
            let e = exp(&ctx, &one, n).unwrap();
            assert_eq!(*e, *parse(&ctx, E, n), "n = {}", n);
        }
    }

    #[test]
    fn test_exp_range() {
        let ctx = Context::new();
        let zero = MpNumber::zero(3);
        assert_eq!(to_i64(&exp(&ctx, &zero, 3).unwrap()).unwrap(), 1);
        let big = parse(&ctx, "1e7", 3);
        assert_eq!(exp(&ctx, &big, 3).unwrap_err(), MpError::ExponentOverflow);
        assert_eq!(exp(&ctx, &big, 3).unwrap_err().kind(), ErrorKind::Range);
        let small = parse(&ctx, "-1e7", 3);
        assert!(exp(&ctx, &small, 3).unwrap().is_zero());
        let hundred = from_i64(ctx.arena(), -100, 3);
        let tiny = exp(&ctx, &hundred, 3).unwrap();
        assert!((to_f64(&tiny).unwrap() / 3.720075976020836e-44 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_expm1_near_zero_keeps_precision() {
        let ctx = Context::new();
        let x = parse(&ctx, "1e-20", 5);
        let y = expm1(&ctx, &x, 5).unwrap();
        // 1e-20 + 5e-41 + ...
        let expected = parse(&ctx, "1.000000000000000000005e-20", 5);
        assert_eq!(*y, *expected);
        let m = parse(&ctx, "-1e7", 3);
        assert_eq!(to_i64(&expm1(&ctx, &m, 3).unwrap()).unwrap(), -1);
    }

    #[test]
    fn test_expm1_agrees_with_exp() {
        let ctx = Context::new();
        let x = parse(&ctx, "3.75", 4);
        let a = expm1(&ctx, &x, 4).unwrap();
        let b = exp(&ctx, &x, 6).unwrap();
        let one = from_i64(ctx.arena(), 1, 1);
        let b = sub(ctx.arena(), &b, &one, 4).unwrap();
        assert_eq!(*a, *b);
    }

    #[test]
    fn test_ln_constants() {
        let ctx = Context::new();
        assert_eq!(*ln_ten(&ctx, 6).unwrap(), *parse(&ctx, LN10, 6));
        let two = from_i64(ctx.arena(), 2, 6);
        assert_eq!(*ln(&ctx, &two, 6).unwrap(), *parse(&ctx, LN2, 6));
        let radix = ln_radix(&ctx, 6).unwrap();
        let seven = mul_digit(ctx.arena(), &parse(&ctx, LN10, 9), 7, 6).unwrap();
        assert_eq!(*radix, *seven);
    }

    #[test]
    fn test_ln_scaled_arguments() {
        let ctx = Context::new();
        let x = parse(&ctx, "1e100", 5);
        let l = ln(&ctx, &x, 5).unwrap();
        let expected = mul_digit(ctx.arena(), &parse(&ctx, LN10, 8), 100, 5).unwrap();
        assert_eq!(*l, *expected);
        let y = parse(&ctx, "1e-100", 5);
        let m = ln(&ctx, &y, 5).unwrap();
        assert!(m.is_negative());
        assert_eq!(m.digits(), expected.digits());
    }

    #[test]
    fn test_ln_near_one() {
        let ctx = Context::new();
        let x = parse(&ctx, "1.00000000000000000001", 5);
        let l = ln(&ctx, &x, 5).unwrap();
        // 1e-20 - 5e-41
        let expected = parse(&ctx, "9.99999999999999999995e-21", 5);
        assert_eq!(*l, *expected);
        let one = from_i64(ctx.arena(), 1, 5);
        assert!(ln(&ctx, &one, 5).unwrap().is_zero());
    }

    #[test]
    fn test_ln_domain_errors() {
        let ctx = Context::new();
        let mark = ctx.arena().mark();
        for v in [0, -1] {
            let x = from_i64(ctx.arena(), v, 3);
            assert_eq!(ln(&ctx, &x, 3).unwrap_err(), MpError::Domain { operation: "ln" });
            assert_eq!(log(&ctx, &x, 3).unwrap_err(), MpError::Domain { operation: "log" });
        }
        assert!(ctx.arena().is_released(mark));
    }

    #[test]
    fn test_log_of_powers_of_ten() {
        let ctx = Context::new();
        for k in [-12_i64, 0, 3, 21] {
            let x = parse(&ctx, &format!("1e{}", k), 4);
            let l = log(&ctx, &x, 4).unwrap();
            let r = entities_multiprecision::round(ctx.arena(), &l, 4).unwrap();
            assert_eq!(to_i64(&r).unwrap(), k);
            let diff = sub(ctx.arena(), &l, &r, 4).unwrap();
            assert!(diff.is_zero() || diff.exponent() <= -3);
        }
    }

    #[test]
    fn test_pow_real() {
        let ctx = Context::new();
        let base = from_i64(ctx.arena(), -2, 4);
        let three = from_i64(ctx.arena(), 3, 1);
        assert_eq!(to_i64(&pow_real(&ctx, &base, &three, 4).unwrap()).unwrap(), -8);
        let half = parse(&ctx, "0.5", 1);
        assert_eq!(
            pow_real(&ctx, &base, &half, 4).unwrap_err(),
            MpError::Domain { operation: "pow" }
        );
        let two = from_i64(ctx.arena(), 2, 4);
        let root = pow_real(&ctx, &two, &half, 4).unwrap();
        let expected = parse(&ctx, "1.41421356237309504880168872420969807856967187537694", 4);
        assert_eq!(*root, *expected);
        assert!(pow_real(&ctx, &MpNumber::zero(1), &half, 4).unwrap().is_zero());
    }
}
