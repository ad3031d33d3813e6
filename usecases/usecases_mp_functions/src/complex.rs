//! Complex Functions
//!
//! Complex arithmetic and elementary functions over pairs of real
//! multiprecision numbers, written in terms of the real kernels.
//!
//! ## Overview
//!
//! Operands are passed as `(re, im)` pairs of borrowed numbers and results come
//! back as an [`MpComplex`] whose parts live in the context's arena. Where two
//! algebraically equal formulas exist, the one that avoids cancellation for the
//! given magnitudes is chosen:
//!
//! - [`cdiv`] follows Smith's method, dividing through by the larger of `|c|`
//!   and `|d|`.
//! - [`csqrt`] computes `w = √((|a| + |z|)/2)` in the form matching whether
//!   `|a| >= |b|`, and derives the other part as `b / 2w`.
//! - [`casin`] works on the lower half plane and conjugates, so the real parts
//!   added inside the logarithm never cancel.

use std::fmt;

use entities_multiprecision::{
    abs, add, compare_magnitude, div, div_digit, from_i64, fun_digits, mul, mul_digit, neg,
    round_copy, sub, MpError, MpNumber, MpResult, Temp,
};
use tracing::debug;

use crate::context::Context;
use crate::exp_log::{exp, ln};
use crate::hyperbolic::{cosh, sinh};
use crate::pi::{pi_multiple, PiMultiple};
use crate::roots::{hypot, sqrt};
use crate::trig::{atan2, cos, sin};

/// Borrowed complex operand, real part first
pub type ComplexRef<'x> = (&'x MpNumber, &'x MpNumber);

/// Complex value held in an arena
#[derive(Clone)]
pub struct MpComplex<'a> {
    pub re: Temp<'a>,
    pub im: Temp<'a>,
}

impl<'a> MpComplex<'a> {
    pub fn new(re: Temp<'a>, im: Temp<'a>) -> Self {
        Self { re, im }
    }

    /// Both parts as an operand of another complex function
    pub fn parts(&self) -> ComplexRef<'_> {
        (&self.re, &self.im)
    }

    /// Detach both parts from the arena
    pub fn into_owned(self) -> (MpNumber, MpNumber) {
        (self.re.into_owned(), self.im.into_owned())
    }
}

impl fmt::Debug for MpComplex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MpComplex")
            .field("re", &*self.re)
            .field("im", &*self.im)
            .finish()
    }
}

impl fmt::Display for MpComplex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im.is_negative() {
            let mut magnitude = self.im.clone();
            magnitude.make_positive();
            write!(f, "{} - {}i", *self.re, *magnitude)
        } else {
            write!(f, "{} + {}i", *self.re, *self.im)
        }
    }
}

/// Round both parts of a working-precision result to `n`
fn finish<'a>(ctx: &'a Context, re: &MpNumber, im: &MpNumber, n: usize) -> MpResult<MpComplex<'a>> {
    let arena = ctx.arena();
    Ok(MpComplex::new(round_copy(arena, re, n)?, round_copy(arena, im, n)?))
}

/// `x·y` at precision `n`
pub fn cmul<'a>(ctx: &'a Context, x: ComplexRef<'_>, y: ComplexRef<'_>, n: usize) -> MpResult<MpComplex<'a>> {
    let arena = ctx.arena();
    let g = fun_digits(n);
    let (a, b) = x;
    let (c, d) = y;
    let ac = mul(arena, a, c, g)?;
    let bd = mul(arena, b, d, g)?;
    let ad = mul(arena, a, d, g)?;
    let bc = mul(arena, b, c, g)?;
    let re = sub(arena, &ac, &bd, n)?;
    let im = add(arena, &ad, &bc, n)?;
    Ok(MpComplex::new(re, im))
}

/// `x / y` at precision `n`, by Smith's method
///
/// # Errors
///
/// * `DivisionByZero` - `y` is zero
pub fn cdiv<'a>(ctx: &'a Context, x: ComplexRef<'_>, y: ComplexRef<'_>, n: usize) -> MpResult<MpComplex<'a>> {
    let arena = ctx.arena();
    let (a, b) = x;
    let (c, d) = y;
    if c.is_zero() && d.is_zero() {
        return Err(MpError::DivisionByZero);
    }
    let g = fun_digits(n);
    if compare_magnitude(c, d).is_ge() {
        // r = d/c, den = c + d·r
        let r = div(arena, d, c, g)?;
        let dr = mul(arena, d, &r, g)?;
        let den = add(arena, c, &dr, g)?;
        let br = mul(arena, b, &r, g)?;
        let ar = mul(arena, a, &r, g)?;
        let re_num = add(arena, a, &br, g)?;
        let im_num = sub(arena, b, &ar, g)?;
        let re = div(arena, &re_num, &den, n)?;
        let im = div(arena, &im_num, &den, n)?;
        Ok(MpComplex::new(re, im))
    } else {
        // r = c/d, den = c·r + d
        let r = div(arena, c, d, g)?;
        let cr = mul(arena, c, &r, g)?;
        let den = add(arena, &cr, d, g)?;
        let ar = mul(arena, a, &r, g)?;
        let br = mul(arena, b, &r, g)?;
        let re_num = add(arena, &ar, b, g)?;
        let im_num = sub(arena, &br, a, g)?;
        let re = div(arena, &re_num, &den, n)?;
        let im = div(arena, &im_num, &den, n)?;
        Ok(MpComplex::new(re, im))
    }
}

/// `|x|` at precision `n`
pub fn cabs<'a>(ctx: &'a Context, x: ComplexRef<'_>, n: usize) -> MpResult<Temp<'a>> {
    hypot(ctx, x.0, x.1, n)
}

/// Argument of `x` in `(-π, π]` at precision `n`
///
/// # Errors
///
/// * `Domain` - `x` is zero
pub fn carg<'a>(ctx: &'a Context, x: ComplexRef<'_>, n: usize) -> MpResult<Temp<'a>> {
    atan2(ctx, x.1, x.0, n)
}

/// Principal square root at precision `n`
pub fn csqrt<'a>(ctx: &'a Context, x: ComplexRef<'_>, n: usize) -> MpResult<MpComplex<'a>> {
    let arena = ctx.arena();
    let (a, b) = x;
    if a.is_zero() && b.is_zero() {
        return Ok(MpComplex::new(arena.alloc(n), arena.alloc(n)));
    }
    let g = fun_digits(n);
    let one = from_i64(arena, 1, 1);
    let abs_a = abs(arena, a, g)?;
    let abs_b = abs(arena, b, g)?;
    let w = if compare_magnitude(a, b).is_ge() {
        // √|a| · √((1 + √(1 + r²)) / 2), r = b/a
        let r = div(arena, b, a, g)?;
        let r2 = mul(arena, &r, &r, g)?;
        let lifted = add(arena, &one, &r2, g)?;
        let root = sqrt(ctx, &lifted, g)?;
        let inner = add(arena, &one, &root, g)?;
        let half = div_digit(arena, &inner, 2, g)?;
        let left = sqrt(ctx, &abs_a, g)?;
        let right = sqrt(ctx, &half, g)?;
        mul(arena, &left, &right, g)?
    } else {
        // √|b| · √((|r| + √(1 + r²)) / 2), r = a/b
        let r = div(arena, a, b, g)?;
        let abs_r = abs(arena, &r, g)?;
        let r2 = mul(arena, &r, &r, g)?;
        let lifted = add(arena, &one, &r2, g)?;
        let root = sqrt(ctx, &lifted, g)?;
        let inner = add(arena, &abs_r, &root, g)?;
        let half = div_digit(arena, &inner, 2, g)?;
        let left = sqrt(ctx, &abs_b, g)?;
        let right = sqrt(ctx, &half, g)?;
        mul(arena, &left, &right, g)?
    };
    let twice = mul_digit(arena, &w, 2, g)?;
    if !a.is_negative() {
        let im = div(arena, b, &twice, g)?;
        return finish(ctx, &w, &im, n);
    }
    let mut im = w.clone();
    if b.is_negative() {
        im.negate();
        let mut doubled = twice;
        doubled.negate();
        let re = div(arena, b, &doubled, g)?;
        return finish(ctx, &re, &im, n);
    }
    let re = div(arena, b, &twice, g)?;
    finish(ctx, &re, &im, n)
}

/// `e^x` at precision `n`
pub fn cexp<'a>(ctx: &'a Context, x: ComplexRef<'_>, n: usize) -> MpResult<MpComplex<'a>> {
    let arena = ctx.arena();
    let g = fun_digits(n);
    let (a, b) = x;
    let scale = exp(ctx, a, g)?;
    let c = cos(ctx, b, g)?;
    let s = sin(ctx, b, g)?;
    let re = mul(arena, &scale, &c, n)?;
    let im = mul(arena, &scale, &s, n)?;
    Ok(MpComplex::new(re, im))
}

/// Principal natural logarithm at precision `n`
///
/// # Errors
///
/// * `Domain` - `x` is zero
pub fn cln<'a>(ctx: &'a Context, x: ComplexRef<'_>, n: usize) -> MpResult<MpComplex<'a>> {
    let (a, b) = x;
    if a.is_zero() && b.is_zero() {
        debug!(operation = "cln", "logarithm of zero");
        return Err(MpError::Domain { operation: "cln" });
    }
    let g = fun_digits(n);
    let modulus = cabs(ctx, x, g)?;
    let re = ln(ctx, &modulus, n)?;
    let im = carg(ctx, x, n)?;
    Ok(MpComplex::new(re, im))
}

/// `sin(x)` at precision `n`
pub fn csin<'a>(ctx: &'a Context, x: ComplexRef<'_>, n: usize) -> MpResult<MpComplex<'a>> {
    let arena = ctx.arena();
    let g = fun_digits(n);
    let (a, b) = x;
    // sin a·cosh b + i·cos a·sinh b
    let sa = sin(ctx, a, g)?;
    let ca = cos(ctx, a, g)?;
    let chb = cosh(ctx, b, g)?;
    let shb = sinh(ctx, b, g)?;
    let re = mul(arena, &sa, &chb, n)?;
    let im = mul(arena, &ca, &shb, n)?;
    Ok(MpComplex::new(re, im))
}

/// `cos(x)` at precision `n`
pub fn ccos<'a>(ctx: &'a Context, x: ComplexRef<'_>, n: usize) -> MpResult<MpComplex<'a>> {
    let arena = ctx.arena();
    let g = fun_digits(n);
    let (a, b) = x;
    // cos a·cosh b - i·sin a·sinh b
    let sa = sin(ctx, a, g)?;
    let ca = cos(ctx, a, g)?;
    let chb = cosh(ctx, b, g)?;
    let shb = sinh(ctx, b, g)?;
    let re = mul(arena, &ca, &chb, n)?;
    let mut im = mul(arena, &sa, &shb, n)?;
    im.negate();
    Ok(MpComplex::new(re, im))
}

/// `tan(x)` at precision `n`
///
/// # Errors
///
/// * `DivisionByZero` - `x` is a pole of the tangent at the working precision
pub fn ctan<'a>(ctx: &'a Context, x: ComplexRef<'_>, n: usize) -> MpResult<MpComplex<'a>> {
    let arena = ctx.arena();
    let g = fun_digits(n);
    let (a, b) = x;
    // (sin 2a + i·sinh 2b) / (cos 2a + cosh 2b)
    let a2 = mul_digit(arena, a, 2, g)?;
    let b2 = mul_digit(arena, b, 2, g)?;
    let s = sin(ctx, &a2, g)?;
    let c = cos(ctx, &a2, g)?;
    let sh = sinh(ctx, &b2, g)?;
    let ch = cosh(ctx, &b2, g)?;
    let den = add(arena, &c, &ch, g)?;
    if den.is_zero() {
        debug!(operation = "ctan", "pole of the tangent");
        return Err(MpError::DivisionByZero);
    }
    let re = div(arena, &s, &den, n)?;
    let im = div(arena, &sh, &den, n)?;
    Ok(MpComplex::new(re, im))
}

/// `asin(x)` at precision `n`, `-i·ln(i·x + √(1 - x²))`
pub fn casin<'a>(ctx: &'a Context, x: ComplexRef<'_>, n: usize) -> MpResult<MpComplex<'a>> {
    let arena = ctx.arena();
    let g = fun_digits(n);
    let (a, b) = x;
    // asin(conj z) = conj(asin z); work with im <= 0
    let flipped = !b.is_negative() && !b.is_zero();
    let b = if flipped { neg(arena, b, g)? } else { round_copy(arena, b, g)? };
    let one = from_i64(arena, 1, 1);
    // 1 - z² = (1 - a)(1 + a) + b² - 2ab·i
    let below = sub(arena, &one, a, g)?;
    let above = add(arena, &one, a, g)?;
    let product = mul(arena, &below, &above, g)?;
    let b2 = mul(arena, &b, &b, g)?;
    let w_re = add(arena, &product, &b2, g)?;
    let ab = mul(arena, a, &b, g)?;
    let mut w_im = mul_digit(arena, &ab, 2, g)?;
    w_im.negate();
    let root = csqrt(ctx, (&w_re, &w_im), g)?;
    // i·z + root = (root.re - b) + (root.im + a)·i
    let t_re = sub(arena, &root.re, &b, g)?;
    let t_im = add(arena, &root.im, a, g)?;
    let l = cln(ctx, (&t_re, &t_im), g)?;
    // -i·(l.re + l.im·i) = l.im - l.re·i
    let mut im = l.re.clone();
    if !flipped {
        im.negate();
    }
    finish(ctx, &l.im, &im, n)
}

/// `acos(x)` at precision `n`, `π/2 - asin(x)`
pub fn cacos<'a>(ctx: &'a Context, x: ComplexRef<'_>, n: usize) -> MpResult<MpComplex<'a>> {
    let arena = ctx.arena();
    let g = fun_digits(n);
    let s = casin(ctx, x, g)?;
    let half = pi_multiple(ctx, PiMultiple::HalfPi, g)?;
    let re = sub(arena, &half, &s.re, n)?;
    let im = neg(arena, &s.im, n)?;
    Ok(MpComplex::new(re, im))
}

/// `atan(x)` at precision `n`, `(i/2)·ln((1 - i·x) / (1 + i·x))`
///
/// # Errors
///
/// * `DivisionByZero` or `Domain` - `x` is `±i`
pub fn catan<'a>(ctx: &'a Context, x: ComplexRef<'_>, n: usize) -> MpResult<MpComplex<'a>> {
    let arena = ctx.arena();
    let g = fun_digits(n);
    let (a, b) = x;
    let one = from_i64(arena, 1, 1);
    // i·x = -b + a·i
    let num_re = add(arena, &one, b, g)?;
    let num_im = neg(arena, a, g)?;
    let den_re = sub(arena, &one, b, g)?;
    let q = cdiv(ctx, (&num_re, &num_im), (&den_re, a), g)?;
    let l = cln(ctx, q.parts(), g)?;
    // (i/2)·(l.re + l.im·i) = -l.im/2 + (l.re/2)·i
    let mut re = div_digit(arena, &l.im, 2, n)?;
    re.negate();
    let im = div_digit(arena, &l.re, 2, n)?;
    Ok(MpComplex::new(re, im))
}

#[cfg(test)]
mod tests {
    use super::*;
    use entities_multiprecision::to_i64;
    use infrastructure_mp_encoding::StringCodec;

    fn num<'a>(ctx: &'a Context, text: &str) -> Temp<'a> {
        StringCodec::parse(ctx.arena(), text, 6).unwrap()
    }

    fn close(ctx: &Context, x: &MpNumber, expected: &str, n: usize) -> bool {
        let y = StringCodec::parse(ctx.arena(), expected, n + 2).unwrap();
        let d = sub(ctx.arena(), x, &y, n + 2).unwrap();
        d.is_zero() || d.exponent() < -(n as i64 - 1)
    }

    #[test]
    fn test_cmul_and_cdiv() {
        let ctx = Context::new();
        let (a, b, c, d) = (num(&ctx, "3"), num(&ctx, "2"), num(&ctx, "1"), num(&ctx, "-4"));
        let p = cmul(&ctx, (&a, &b), (&c, &d), 4).unwrap();
        assert_eq!(to_i64(&p.re).unwrap(), 11);
        assert_eq!(to_i64(&p.im).unwrap(), -10);
        let q = cdiv(&ctx, p.parts(), (&c, &d), 4).unwrap();
        assert!(close(&ctx, &q.re, "3", 4));
        assert!(close(&ctx, &q.im, "2", 4));
        // other branch of Smith's method
        let r = cdiv(&ctx, p.parts(), (&a, &b), 4).unwrap();
        assert!(close(&ctx, &r.re, "1", 4));
        assert!(close(&ctx, &r.im, "-4", 4));
        let zero = MpNumber::zero(1);
        assert_eq!(cdiv(&ctx, (&a, &b), (&zero, &zero), 4).unwrap_err(), MpError::DivisionByZero);
    }

    #[test]
    fn test_cabs_and_carg() {
        let ctx = Context::new();
        let (a, b) = (num(&ctx, "-3"), num(&ctx, "4"));
        assert_eq!(to_i64(&cabs(&ctx, (&a, &b), 4).unwrap()).unwrap(), 5);
        let angle = carg(&ctx, (&a, &b), 4).unwrap();
        assert!(close(&ctx, &angle, "2.21429743558818100603413092035707408014009529080", 4));
    }

    #[test]
    fn test_csqrt_branches() {
        let ctx = Context::new();
        let n = 4;
        // √(-4) = 2i, √(3 + 4i) = 2 + i, √(-3 - 4i) = 1 - 2i
        let (m4, zero) = (num(&ctx, "-4"), MpNumber::zero(1));
        let r = csqrt(&ctx, (&m4, &zero), n).unwrap();
        assert!(r.re.is_zero());
        assert!(close(&ctx, &r.im, "2", n));
        let (three, four) = (num(&ctx, "3"), num(&ctx, "4"));
        let r = csqrt(&ctx, (&three, &four), n).unwrap();
        assert!(close(&ctx, &r.re, "2", n) && close(&ctx, &r.im, "1", n));
        let (m3, m4) = (num(&ctx, "-3"), num(&ctx, "-4"));
        let r = csqrt(&ctx, (&m3, &m4), n).unwrap();
        assert!(close(&ctx, &r.re, "1", n) && close(&ctx, &r.im, "-2", n));
        let (small, big) = (num(&ctx, "1"), num(&ctx, "-8"));
        let r = csqrt(&ctx, (&small, &big), n).unwrap();
        let square = cmul(&ctx, r.parts(), r.parts(), n).unwrap();
        assert!(close(&ctx, &square.re, "1", n) && close(&ctx, &square.im, "-8", n));
    }

    #[test]
    fn test_cexp_and_cln_invert() {
        let ctx = Context::new();
        let n = 4;
        let (a, b) = (num(&ctx, "0.5"), num(&ctx, "-2.25"));
        let e = cexp(&ctx, (&a, &b), n).unwrap();
        let l = cln(&ctx, e.parts(), n).unwrap();
        assert!(close(&ctx, &l.re, "0.5", n));
        assert!(close(&ctx, &l.im, "-2.25", n));
        let zero = MpNumber::zero(1);
        assert_eq!(
            cln(&ctx, (&zero, &zero), n).unwrap_err(),
            MpError::Domain { operation: "cln" }
        );
    }

    #[test]
    fn test_trig_of_real_axis_matches_real_kernels() {
        let ctx = Context::new();
        let n = 4;
        let (a, zero) = (num(&ctx, "0.75"), MpNumber::zero(1));
        let s = csin(&ctx, (&a, &zero), n).unwrap();
        assert!(close(&ctx, &s.re, "0.68163876002333416673324195277989393533838239466", n));
        assert!(s.im.is_zero());
        let c = ccos(&ctx, (&a, &zero), n).unwrap();
        assert!(close(&ctx, &c.re, "0.73168886887382088631183875300008454384054127605", n));
        let t = ctan(&ctx, (&a, &zero), n).unwrap();
        assert!(close(&ctx, &t.re, "0.93159645994407246116520275657393642818869133997", n));
    }

    #[test]
    fn test_ctan_of_imaginary_axis_is_tanh() {
        let ctx = Context::new();
        let n = 4;
        let (zero, b) = (MpNumber::zero(1), num(&ctx, "1"));
        let t = ctan(&ctx, (&zero, &b), n).unwrap();
        assert!(t.re.is_zero());
        assert!(close(&ctx, &t.im, "0.761594155955764888119458282604793590412768597257936551596809", n));
    }

    #[test]
    fn test_inverse_functions_round_trip() {
        let ctx = Context::new();
        let n = 4;
        for (re, im) in [("0.3", "0.4"), ("-1.5", "0.25"), ("2", "-3")] {
            let (a, b) = (num(&ctx, re), num(&ctx, im));
            let s = casin(&ctx, (&a, &b), n + 1).unwrap();
            let back = csin(&ctx, s.parts(), n + 1).unwrap();
            assert!(close(&ctx, &back.re, re, n) && close(&ctx, &back.im, im, n), "asin {} {}", re, im);
            let c = cacos(&ctx, (&a, &b), n + 1).unwrap();
            let back = ccos(&ctx, c.parts(), n + 1).unwrap();
            assert!(close(&ctx, &back.re, re, n) && close(&ctx, &back.im, im, n), "acos {} {}", re, im);
            let t = catan(&ctx, (&a, &b), n + 1).unwrap();
            let back = ctan(&ctx, t.parts(), n + 1).unwrap();
            assert!(close(&ctx, &back.re, re, n) && close(&ctx, &back.im, im, n), "atan {} {}", re, im);
        }
    }

    #[test]
    fn test_casin_of_real_argument_matches_asin() {
        let ctx = Context::new();
        let n = 4;
        let (a, zero) = (num(&ctx, "0.6"), MpNumber::zero(1));
        let s = casin(&ctx, (&a, &zero), n).unwrap();
        assert!(close(&ctx, &s.re, "0.643501108793284386802809228717322638041510591", n));
        assert!(s.im.is_zero() || s.im.exponent() < -(n as i64 - 1));
    }

    #[test]
    fn test_catan_poles() {
        let ctx = Context::new();
        let (zero, one) = (MpNumber::zero(1), num(&ctx, "1"));
        assert!(catan(&ctx, (&zero, &one), 3).is_err());
        let display = format!("{}", cmul(&ctx, (&one, &one), (&one, &zero), 3).unwrap());
        assert_eq!(display, "1E+0 + 1E+0i");
    }
}
