//! Entities Layer: Multiprecision Numbers
//!
//! Provides the arbitrary-precision decimal number type and its core kernels:
//! - Representation, normalization and rounding
//! - Scratch digit arena
//! - Core arithmetic (add, subtract, multiply, divide, digit scale, powers)
//! - Precision conversion (lengthen, shorten, truncate, round, entier)
//! - Comparisons and machine number conversions
//!
//! Every operation takes the arena it allocates from and the working precision
//! `n` (in radix digits) of its result.

pub mod arena;
pub mod arithmetic;
pub mod compare;
pub mod error;
pub mod machine;
pub mod mp_number;
pub mod normalize;
pub mod precision;

pub use arena::{Arena, Buffer, Mark, Temp, DEFAULT_ARENA_LIMIT};
pub use arithmetic::{
    abs, add, div, div_digit, divrem_digit, modulo, mul, mul_digit, neg, over, pow_int,
    reciprocal, scale_radix, sub, ten_up,
};
pub use compare::{compare, compare_magnitude, eq, ge, gt, le, lt, ne};
pub use error::{ErrorKind, MpError, MpResult};
pub use machine::{
    from_f64, from_i64, from_integer, from_primitive, from_u64, to_f64, to_i64, to_integer,
    to_primitive, to_u64,
};
pub use mp_number::{
    digits_for_decimals, fun_digits, guard_digits, overflow_threshold, MpDigit, MpNumber,
    HALF_MP_RADIX, LOG_MP_RADIX, LONG_LONG_MP_DIGITS, LONG_MP_DIGITS, MAX_DIGIT_SCALE,
    MAX_MP_EXPONENT, MP_RADIX,
};
pub use normalize::{normalize, normalize_fast, round_buffer, round_copy};
pub use precision::{convert, entier, lengthen, round, shorten, truncate};
