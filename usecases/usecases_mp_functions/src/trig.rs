//! Trigonometric Functions
//!
//! Sine, cosine, tangent, their inverses and the two-argument arctangent.
//!
//! ## Overview
//!
//! - **sin** works on `|x|` and restores the sign. The argument is reduced
//!   modulo 2π at a precision widened by its integral digits, folded into
//!   `[0, π/2]` by `sin(r) = -sin(r - π)` and `sin(r) = sin(π - r)`, then
//!   divided by 3 until below [`TRIPLE_BOUND`]. The Taylor sum of the small
//!   angle is lifted back with `sin(3t) = s·(3 - 4s²)`, once per division.
//! - **cos** is `sin(π/2 - (|x| mod 2π))`.
//! - **tan** is `s / ±√(1 - s²)`; a cosine close to zero loses digits in the
//!   subtraction, so the computation is repeated once with those digits added.
//! - **atan** uses `π/2 - atan(1/x)` above one, a Taylor series for tiny
//!   arguments and Newton's method `z - c·(s - a·c)` otherwise.
//! - **asin** and **acos** go through `atan` with `√((1 - x)(1 + x))`.

use std::cmp::Ordering;

use entities_multiprecision::{
    add, compare_magnitude, div, div_digit, entier, from_f64, from_i64, fun_digits, mul,
    mul_digit, reciprocal, round_copy, sub, to_f64, MpError, MpNumber, MpResult, Temp,
};
use tracing::{debug, trace};

use crate::context::Context;
use crate::newton::precision_ladder;
use crate::pi::{pi, pi_multiple, PiMultiple};
use crate::roots::sqrt;

/// Magnitude below which the sine series is summed directly
pub const TRIPLE_BOUND: f64 = 0.01;

/// `x mod 2π`, in `[0, 2π)`, at precision `g`
fn reduce_two_pi<'a>(ctx: &'a Context, x: &MpNumber, g: usize) -> MpResult<Temp<'a>> {
    let arena = ctx.arena();
    let w = g + usize::try_from(x.exponent()).unwrap_or(0) + 1;
    let two_pi = pi_multiple(ctx, PiMultiple::TwoPi, w)?;
    let q = div(arena, x, &two_pi, w)?;
    let whole = entier(arena, &q, w)?;
    if whole.is_zero() && !x.is_negative() {
        return round_copy(arena, x, g);
    }
    let product = mul(arena, &whole, &two_pi, w)?;
    let mut r = sub(arena, x, &product, w)?;
    if r.is_negative() {
        r = add(arena, &r, &two_pi, w)?;
    } else if compare_magnitude(&r, &two_pi).is_ge() {
        r = sub(arena, &r, &two_pi, w)?;
    }
    trace!(digits = w, "reduced modulo two pi");
    round_copy(arena, &r, g)
}

/// `sin(r)` at precision `g` for `r` in `[0, π/2]`
fn sin_kernel<'a>(ctx: &'a Context, r: &MpNumber, g: usize) -> MpResult<Temp<'a>> {
    let arena = ctx.arena();
    let mut v = to_f64(r)?;
    let mut m: u32 = 0;
    while v > TRIPLE_BOUND {
        v /= 3.0;
        m += 1;
    }
    let t = div_digit(arena, r, 3_i64.pow(m), g)?;
    let square = mul(arena, &t, &t, g)?;
    let mut term = t.clone();
    let mut s = t.clone();
    let mut k: i64 = 1;
    loop {
        term = mul(arena, &term, &square, g)?;
        term = div_digit(arena, &term, (2 * k) * (2 * k + 1), g)?;
        term.negate();
        k += 1;
        if term.is_zero() || s.exponent() - term.exponent() > g as i64 {
            break;
        }
        s = add(arena, &s, &term, g)?;
    }
    let three = from_i64(arena, 3, 1);
    for _ in 0..m {
        let s2 = mul(arena, &s, &s, g)?;
        let four = mul_digit(arena, &s2, 4, g)?;
        let factor = sub(arena, &three, &four, g)?;
        s = mul(arena, &s, &factor, g)?;
    }
    trace!(triplings = m, terms = k, digits = g, "sine kernel");
    Ok(s)
}

/// `sin(x)` at precision `n`
pub fn sin<'a>(ctx: &'a Context, x: &MpNumber, n: usize) -> MpResult<Temp<'a>> {
    let arena = ctx.arena();
    if x.is_zero() {
        return Ok(arena.alloc(n));
    }
    let g = fun_digits(n);
    let mut magnitude = arena.copy(x);
    magnitude.make_positive();
    let mut negative = x.is_negative();
    let mut r = reduce_two_pi(ctx, &magnitude, g)?;
    let pi = pi(ctx, g)?;
    if compare_magnitude(&r, &pi).is_gt() {
        r = sub(arena, &r, &pi, g)?;
        negative = !negative;
    }
    let half = div_digit(arena, &pi, 2, g)?;
    if compare_magnitude(&r, &half).is_gt() {
        r = sub(arena, &pi, &r, g)?;
    }
    if r.is_zero() {
        return Ok(arena.alloc(n));
    }
    let s = sin_kernel(ctx, &r, g)?;
    let mut result = round_copy(arena, &s, n)?;
    if negative {
        result.negate();
    }
    Ok(result)
}

/// `cos(x)` at precision `n`
pub fn cos<'a>(ctx: &'a Context, x: &MpNumber, n: usize) -> MpResult<Temp<'a>> {
    let arena = ctx.arena();
    let g = fun_digits(n);
    let mut magnitude = arena.copy(x);
    magnitude.make_positive();
    let r = reduce_two_pi(ctx, &magnitude, g)?;
    let half = pi_multiple(ctx, PiMultiple::HalfPi, g)?;
    let shifted = sub(arena, &half, &r, g)?;
    sin(ctx, &shifted, n)
}

/// `tan(x)` at precision `n`
///
/// # Errors
///
/// * `Domain` - the cosine of `x` vanishes at the working precision
pub fn tan<'a>(ctx: &'a Context, x: &MpNumber, n: usize) -> MpResult<Temp<'a>> {
    let arena = ctx.arena();
    if x.is_zero() {
        return Ok(arena.alloc(n));
    }
    let mut magnitude = arena.copy(x);
    magnitude.make_positive();
    let one = from_i64(arena, 1, 1);
    let mut w = fun_digits(n);
    let mut widened = false;
    loop {
        let r = reduce_two_pi(ctx, &magnitude, w)?;
        let s = sin(ctx, &r, w)?;
        let s2 = mul(arena, &s, &s, w)?;
        let c2 = sub(arena, &one, &s2, w)?;
        let vanished = c2.is_zero() || c2.is_negative();
        let lost = if vanished {
            w
        } else {
            usize::try_from(-c2.exponent()).unwrap_or(0)
        };
        if lost > 1 && !widened {
            trace!(lost, digits = w, "tangent near a pole, widening");
            w += lost + 1;
            widened = true;
            continue;
        }
        if vanished {
            debug!(operation = "tan", "cosine vanishes");
            return Err(MpError::Domain { operation: "tan" });
        }
        let c = sqrt(ctx, &c2, w)?;
        let mut t = div(arena, &s, &c, n)?;
        let half = pi_multiple(ctx, PiMultiple::HalfPi, w)?;
        let three_half = mul_digit(arena, &half, 3, w)?;
        let cos_negative = compare_magnitude(&r, &half).is_gt()
            && compare_magnitude(&r, &three_half).is_lt();
        if cos_negative != x.is_negative() {
            t.negate();
        }
        return Ok(t);
    }
}

/// `atan(a)` at precision `g` for `0 < a < 1`
fn atan_kernel<'a>(ctx: &'a Context, a: &MpNumber, g: usize) -> MpResult<Temp<'a>> {
    let arena = ctx.arena();
    if a.exponent() < -1 {
        // a - a³/3 + a⁵/5 - ...
        let square = mul(arena, a, a, g)?;
        let mut power = round_copy(arena, a, g)?;
        let mut sum = power.clone();
        let mut j: i64 = 1;
        loop {
            j += 2;
            power = mul(arena, &power, &square, g)?;
            power.negate();
            let term = div_digit(arena, &power, j, g)?;
            if term.is_zero() || sum.exponent() - term.exponent() > g as i64 {
                break;
            }
            sum = add(arena, &sum, &term, g)?;
        }
        trace!(terms = j / 2, digits = g, "arctangent series");
        return Ok(sum);
    }
    let one = from_i64(arena, 1, 1);
    let mut z = from_f64(arena, to_f64(a)?.atan(), 2)?;
    let ladder = precision_ladder(g);
    for &p in &ladder {
        let s = sin(ctx, &z, p)?;
        let s2 = mul(arena, &s, &s, p)?;
        let c2 = sub(arena, &one, &s2, p)?;
        let c = sqrt(ctx, &c2, p)?;
        let ac = mul(arena, a, &c, p)?;
        let f = sub(arena, &s, &ac, p)?;
        let step = mul(arena, &c, &f, p)?;
        z = sub(arena, &z, &step, p)?;
    }
    trace!(steps = ladder.len(), digits = g, "arctangent newton");
    Ok(z)
}

/// `atan(x)` at precision `n`, in `(-π/2, π/2)`
pub fn atan<'a>(ctx: &'a Context, x: &MpNumber, n: usize) -> MpResult<Temp<'a>> {
    let arena = ctx.arena();
    if x.is_zero() {
        return Ok(arena.alloc(n));
    }
    let g = fun_digits(n);
    let mut a = arena.copy(x);
    a.make_positive();
    let one = from_i64(arena, 1, 1);
    let z = match compare_magnitude(&a, &one) {
        Ordering::Equal => {
            let p = pi(ctx, g)?;
            div_digit(arena, &p, 4, g)?
        }
        Ordering::Greater => {
            let inverse = reciprocal(arena, &a, g)?;
            let inner = if inverse.is_zero() {
                inverse
            } else {
                atan_kernel(ctx, &inverse, g)?
            };
            let half = pi_multiple(ctx, PiMultiple::HalfPi, g)?;
            sub(arena, &half, &inner, g)?
        }
        Ordering::Less => atan_kernel(ctx, &a, g)?,
    };
    let mut result = round_copy(arena, &z, n)?;
    if x.is_negative() {
        result.negate();
    }
    Ok(result)
}

/// `√((1 - x)(1 + x))` at precision `g`
fn cosine_of_asin<'a>(ctx: &'a Context, x: &MpNumber, g: usize) -> MpResult<Temp<'a>> {
    let arena = ctx.arena();
    let one = from_i64(arena, 1, 1);
    let below = sub(arena, &one, x, g)?;
    let above = add(arena, &one, x, g)?;
    let product = mul(arena, &below, &above, g)?;
    sqrt(ctx, &product, g)
}

/// `asin(x)` at precision `n`, in `[-π/2, π/2]`
///
/// # Errors
///
/// * `Domain` - `|x| > 1`
pub fn asin<'a>(ctx: &'a Context, x: &MpNumber, n: usize) -> MpResult<Temp<'a>> {
    let arena = ctx.arena();
    let one = from_i64(arena, 1, 1);
    match compare_magnitude(x, &one) {
        Ordering::Greater => {
            debug!(operation = "asin", "argument outside [-1, 1]");
            return Err(MpError::Domain { operation: "asin" });
        }
        Ordering::Equal => {
            let mut half = pi_multiple(ctx, PiMultiple::HalfPi, n)?;
            if x.is_negative() {
                half.negate();
            }
            return Ok(half);
        }
        Ordering::Less => {}
    }
    if x.is_zero() {
        return Ok(arena.alloc(n));
    }
    let g = fun_digits(n);
    let c = cosine_of_asin(ctx, x, g)?;
    let t = div(arena, x, &c, g)?;
    atan(ctx, &t, n)
}

/// `acos(x)` at precision `n`, in `[0, π]`
///
/// # Errors
///
/// * `Domain` - `|x| > 1`
pub fn acos<'a>(ctx: &'a Context, x: &MpNumber, n: usize) -> MpResult<Temp<'a>> {
    let arena = ctx.arena();
    let one = from_i64(arena, 1, 1);
    match compare_magnitude(x, &one) {
        Ordering::Greater => {
            debug!(operation = "acos", "argument outside [-1, 1]");
            return Err(MpError::Domain { operation: "acos" });
        }
        Ordering::Equal if x.is_negative() => return pi(ctx, n),
        Ordering::Equal => return Ok(arena.alloc(n)),
        Ordering::Less => {}
    }
    if x.is_zero() {
        return pi_multiple(ctx, PiMultiple::HalfPi, n);
    }
    let g = fun_digits(n);
    let c = cosine_of_asin(ctx, x, g)?;
    let t = div(arena, &c, x, g)?;
    let a = atan(ctx, &t, g)?;
    if x.is_negative() {
        let p = pi(ctx, g)?;
        return add(arena, &a, &p, n);
    }
    round_copy(arena, &a, n)
}

/// Angle of the point `(x, y)` at precision `n`, in `(-π, π]`
///
/// # Errors
///
/// * `Domain` - both coordinates are zero
pub fn atan2<'a>(ctx: &'a Context, y: &MpNumber, x: &MpNumber, n: usize) -> MpResult<Temp<'a>> {
    let arena = ctx.arena();
    if x.is_zero() {
        if y.is_zero() {
            debug!(operation = "atan2", "angle of the origin");
            return Err(MpError::Domain { operation: "atan2" });
        }
        let mut half = pi_multiple(ctx, PiMultiple::HalfPi, n)?;
        if y.is_negative() {
            half.negate();
        }
        return Ok(half);
    }
    let g = fun_digits(n);
    // the ratio would leave the exponent range long before atan stops moving
    if !y.is_zero() && y.exponent() - x.exponent() > g as i64 + 1 {
        let mut half = pi_multiple(ctx, PiMultiple::HalfPi, n)?;
        if y.is_negative() {
            half.negate();
        }
        return Ok(half);
    }
    let q = div(arena, y, x, g)?;
    let a = atan(ctx, &q, g)?;
    if !x.is_negative() {
        return round_copy(arena, &a, n);
    }
    let p = pi(ctx, g)?;
    if y.is_negative() {
        sub(arena, &a, &p, n)
    } else {
        add(arena, &a, &p, n)
    }
}
