//! Use Cases Layer: Multiprecision Functions
//!
//! Provides the elementary functions over [`MpNumber`](entities_multiprecision::MpNumber):
//! roots, the exponential and logarithm family, π, trigonometric and hyperbolic
//! functions with their inverses, and complex variants of all of them.
//!
//! ## Overview
//!
//! Every function takes a [`Context`] and the target precision `n` in radix
//! digits, and returns a [`Temp`](entities_multiprecision::Temp) allocated from
//! the context's arena. Internally each function works at
//! [`fun_digits(n)`](entities_multiprecision::fun_digits) and rounds its result
//! to `n` digits once. The context also caches π, `ln 10` and `ln RADIX` at the
//! largest precision requested so far.
//!
//! ## Modules
//!
//! - **[`context`](context/index.html)**: Arena plus constant caches
//! - **[`newton`](newton/index.html)**: Precision ladder for Newton iterations
//! - **[`roots`](roots/index.html)**: Square root, cube root, hypotenuse
//! - **[`exp_log`](exp_log/index.html)**: `exp`, `expm1`, `ln`, `log`, real powers
//! - **[`pi`](pi/index.html)**: π by the Borwein AGM iteration
//! - **[`trig`](trig/index.html)**: Trigonometric functions and inverses
//! - **[`hyperbolic`](hyperbolic/index.html)**: Hyperbolic functions and inverses
//! - **[`complex`](complex/index.html)**: Complex arithmetic and functions
//! - **[`ops`](ops/index.html)**: Operations by name, for evaluators
//!
//! ## Architecture
//!
//! This crate depends on the Entities layer for the number type and core
//! arithmetic. Its functions are exposed through the API Facades layer.
//!
//! ## See Also
//!
//! - [`entities_multiprecision`](../../entities/entities_multiprecision/index.html): Number type and kernels
//! - [`api_facades`](../../api_facades/index.html): Evaluator boundary

pub mod complex;
pub mod context;
pub mod exp_log;
pub mod hyperbolic;
pub mod newton;
pub mod ops;
pub mod pi;
pub mod roots;
pub mod trig;

pub use complex::{
    cabs, cacos, carg, casin, catan, ccos, cdiv, cexp, cln, cmul, csin, csqrt, ctan, ComplexRef,
    MpComplex,
};
pub use context::{Constant, ConstantCache, Context};
pub use exp_log::{exp, expm1, ln, ln_radix, ln_ten, log, pow_real};
pub use hyperbolic::{acosh, asinh, atanh, cosh, sinh, tanh};
pub use ops::{Answer, BinaryOp, ComplexOp, Operation, UnaryOp, UnknownOperation, Value};
pub use pi::{pi, pi_multiple, PiMultiple};
pub use roots::{cbrt, hypot, sqrt};
pub use trig::{acos, asin, atan, atan2, cos, sin, tan};
