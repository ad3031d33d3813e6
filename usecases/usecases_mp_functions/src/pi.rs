//! π
//!
//! Borwein's quadratically convergent AGM iteration:
//!
//! ```text
//! a₀ = √2    b₀ = 0    p₀ = 2 + √2
//! aₖ₊₁ = (√aₖ + 1/√aₖ) / 2
//! bₖ₊₁ = (1 + bₖ)·√aₖ / (aₖ + bₖ)
//! pₖ₊₁ = (1 + aₖ₊₁)·pₖ·bₖ₊₁ / (1 + bₖ₊₁)
//! ```
//!
//! `pₖ` converges to π, doubling the number of correct digits per step. The
//! loop stops once `p` is unchanged at the working precision, or after a bound
//! derived from that precision.

use std::str::FromStr;

use entities_multiprecision::{
    add, div, div_digit, from_i64, fun_digits, mul, mul_digit, reciprocal, MpError, MpResult,
    Temp, LOG_MP_RADIX,
};
use tracing::trace;

use crate::context::{Constant, Context};
use crate::roots::sqrt;

/// Multiples of π served from the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PiMultiple {
    Pi,
    TwoPi,
    HalfPi,
}

impl FromStr for PiMultiple {
    type Err = MpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pi" => Ok(PiMultiple::Pi),
            "2pi" | "two_pi" => Ok(PiMultiple::TwoPi),
            "pi/2" | "half_pi" => Ok(PiMultiple::HalfPi),
            _ => Err(MpError::InvalidNumeral {
                text: s.to_string(),
                reason: "unknown multiple of pi",
            }),
        }
    }
}

/// Upper bound on iterations for precision `w`
fn iteration_bound(w: usize) -> u32 {
    let decimals = (w * LOG_MP_RADIX as usize).max(2);
    decimals.ilog2() + 4
}

fn borwein<'a>(ctx: &'a Context, w: usize) -> MpResult<Temp<'a>> {
    let arena = ctx.arena();
    let one = from_i64(arena, 1, 1);
    let two = from_i64(arena, 2, 1);
    let mut a = sqrt(ctx, &two, w)?;
    let mut b = arena.alloc(w);
    let mut p = add(arena, &two, &a, w)?;
    let bound = iteration_bound(w);
    let mut steps = 0;
    while steps < bound {
        steps += 1;
        let root = sqrt(ctx, &a, w)?;
        let inverse = reciprocal(arena, &root, w)?;
        let sum = add(arena, &root, &inverse, w)?;
        let next_a = div_digit(arena, &sum, 2, w)?;

        let grown = add(arena, &one, &b, w)?;
        let numerator = mul(arena, &grown, &root, w)?;
        let denominator = add(arena, &a, &b, w)?;
        let next_b = div(arena, &numerator, &denominator, w)?;

        let lifted = add(arena, &one, &next_a, w)?;
        let scaled = mul(arena, &lifted, &p, w)?;
        let scaled = mul(arena, &scaled, &next_b, w)?;
        let shrink = add(arena, &one, &next_b, w)?;
        let next_p = div(arena, &scaled, &shrink, w)?;

        a = next_a;
        b = next_b;
        let settled = *next_p == *p;
        p = next_p;
        if settled {
            break;
        }
    }
    trace!(steps, bound, digits = w, "borwein iteration");
    Ok(p)
}

/// π at precision `n`, cached
pub fn pi<'a>(ctx: &'a Context, n: usize) -> MpResult<Temp<'a>> {
    ctx.constant(Constant::Pi, n, |g| borwein(ctx, g))
}

/// `which` multiple of π at precision `n`
pub fn pi_multiple<'a>(ctx: &'a Context, which: PiMultiple, n: usize) -> MpResult<Temp<'a>> {
    let arena = ctx.arena();
    match which {
        PiMultiple::Pi => pi(ctx, n),
        PiMultiple::TwoPi => {
            let p = pi(ctx, fun_digits(n))?;
            mul_digit(arena, &p, 2, n)
        }
        PiMultiple::HalfPi => {
            let p = pi(ctx, fun_digits(n))?;
            div_digit(arena, &p, 2, n)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use infrastructure_mp_encoding::StringCodec;

    const PI: &str = "3.14159265358979323846264338327950288419716939937510\
        58209749445923078164062862089986280348253421170679";

    #[test]
    fn test_pi_digits() {
        let ctx = Context::new();
        for n in [1, 2, 5, 12, 14] {
            let p = pi(&ctx, n).unwrap();
            let expected = StringCodec::parse(ctx.arena(), PI, n).unwrap();
            assert_eq!(*p, *expected, "n = {}", n);
        }
        assert_eq!(ctx.constants().cached_digits(Constant::Pi), Some(14));
    }

    #[test]
    fn test_pi_multiples() {
        let ctx = Context::new();
        let two_pi = pi_multiple(&ctx, PiMultiple::TwoPi, 6).unwrap();
        assert!(StringCodec::format(&two_pi).starts_with("6.283185307179586476925286766559"));
        let half = pi_multiple(&ctx, PiMultiple::HalfPi, 6).unwrap();
        assert!(StringCodec::format(&half).starts_with("1.570796326794896619231321691639"));
        assert_eq!("pi/2".parse::<PiMultiple>().unwrap(), PiMultiple::HalfPi);
        assert!("tau".parse::<PiMultiple>().is_err());
    }

    #[test]
    fn test_iteration_bound_grows_slowly() {
        assert_eq!(iteration_bound(1), 6);
        assert!(iteration_bound(1000) < 20);
    }
}
