//! Comparisons
//!
//! Ordering predicates at a working precision. Two values compare by the sign of
//! their difference rounded to `n` digits, so values equal to `n` digits are equal.

use std::cmp::Ordering;

use crate::arena::Arena;
use crate::arithmetic::sub;
use crate::error::MpResult;
use crate::mp_number::MpNumber;

/// Exact comparison of `|x|` and `|y|`
pub fn compare_magnitude(x: &MpNumber, y: &MpNumber) -> Ordering {
    match (x.is_zero(), y.is_zero()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        (false, false) => {}
    }
    x.exponent.cmp(&y.exponent).then_with(|| {
        let len = x.digits.len().max(y.digits.len());
        (0..len)
            .map(|k| x.digit(k).cmp(&y.digit(k)))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    })
}

/// Ordering of `x` and `y` at precision `n`
pub fn compare(arena: &Arena, x: &MpNumber, y: &MpNumber, n: usize) -> MpResult<Ordering> {
    let d = sub(arena, x, y, n)?;
    Ok(match d.sign() {
        0 => Ordering::Equal,
        s if s < 0 => Ordering::Less,
        _ => Ordering::Greater,
    })
}

pub fn eq(arena: &Arena, x: &MpNumber, y: &MpNumber, n: usize) -> MpResult<bool> {
    Ok(compare(arena, x, y, n)?.is_eq())
}

pub fn ne(arena: &Arena, x: &MpNumber, y: &MpNumber, n: usize) -> MpResult<bool> {
    Ok(compare(arena, x, y, n)?.is_ne())
}

pub fn lt(arena: &Arena, x: &MpNumber, y: &MpNumber, n: usize) -> MpResult<bool> {
    Ok(compare(arena, x, y, n)?.is_lt())
}

pub fn le(arena: &Arena, x: &MpNumber, y: &MpNumber, n: usize) -> MpResult<bool> {
    Ok(compare(arena, x, y, n)?.is_le())
}

pub fn gt(arena: &Arena, x: &MpNumber, y: &MpNumber, n: usize) -> MpResult<bool> {
    Ok(compare(arena, x, y, n)?.is_gt())
}

pub fn ge(arena: &Arena, x: &MpNumber, y: &MpNumber, n: usize) -> MpResult<bool> {
    Ok(compare(arena, x, y, n)?.is_ge())
}
