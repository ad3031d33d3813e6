//! Named Operations
//!
//! Maps operation names to the functions of this crate so that evaluators
//! (the facade, the command line calculator) can dispatch on text.
//!
//! ## Overview
//!
//! - [`UnaryOp`] and [`BinaryOp`] cover the real functions.
//! - [`ComplexOp`] covers the complex variants; each complex operand takes two
//!   arguments, real part first.
//! - [`Operation`] wraps all of them plus the constant `pi`, and checks the
//!   argument count before dispatching.
//!
//! Every name parses with [`FromStr`] and prints back with `name()`.

use std::fmt;
use std::str::FromStr;

use entities_multiprecision::{
    abs, add, div, entier, modulo, mul, neg, over, reciprocal, round, sub, truncate, MpError,
    MpNumber, MpResult, Temp,
};
use thiserror::Error;
use tracing::debug;

use crate::complex::{
    cabs, cacos, carg, casin, catan, ccos, cdiv, cexp, cln, cmul, csin, csqrt, ctan, MpComplex,
};
use crate::context::Context;
use crate::exp_log::{exp, expm1, ln, log, pow_real};
use crate::hyperbolic::{acosh, asinh, atanh, cosh, sinh, tanh};
use crate::pi::pi;
use crate::roots::{cbrt, hypot, sqrt};
use crate::trig::{acos, asin, atan, atan2, cos, sin, tan};

/// Name that matches no operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown operation {0:?}")]
pub struct UnknownOperation(pub String);

macro_rules! named_ops {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownOperation;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(UnknownOperation(s.to_string())),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

named_ops! {
    /// Real functions of one argument
    UnaryOp {
        Neg => "neg",
        Abs => "abs",
        Reciprocal => "reciprocal",
        Truncate => "truncate",
        Round => "round",
        Entier => "entier",
        Sqrt => "sqrt",
        Cbrt => "cbrt",
        Exp => "exp",
        Expm1 => "expm1",
        Ln => "ln",
        Log => "log",
        Sin => "sin",
        Cos => "cos",
        Tan => "tan",
        Asin => "asin",
        Acos => "acos",
        Atan => "atan",
        Sinh => "sinh",
        Cosh => "cosh",
        Tanh => "tanh",
        Asinh => "asinh",
        Acosh => "acosh",
        Atanh => "atanh",
    }
}

named_ops! {
    /// Real functions of two arguments
    BinaryOp {
        Add => "add",
        Sub => "sub",
        Mul => "mul",
        Div => "div",
        Over => "over",
        Mod => "mod",
        Pow => "pow",
        Hypot => "hypot",
        Atan2 => "atan2",
    }
}

named_ops! {
    /// Complex functions; `Cmul` and `Cdiv` take two complex operands
    ComplexOp {
        Cmul => "cmul",
        Cdiv => "cdiv",
        Cabs => "cabs",
        Carg => "carg",
        Csqrt => "csqrt",
        Cexp => "cexp",
        Cln => "cln",
        Csin => "csin",
        Ccos => "ccos",
        Ctan => "ctan",
        Casin => "casin",
        Cacos => "cacos",
        Catan => "catan",
    }
}

impl UnaryOp {
    /// `self(x)` at precision `n`
    pub fn apply<'a>(self, ctx: &'a Context, x: &MpNumber, n: usize) -> MpResult<Temp<'a>> {
        let arena = ctx.arena();
        match self {
            UnaryOp::Neg => neg(arena, x, n),
            UnaryOp::Abs => abs(arena, x, n),
            UnaryOp::Reciprocal => reciprocal(arena, x, n),
            UnaryOp::Truncate => truncate(arena, x, n),
            UnaryOp::Round => round(arena, x, n),
            UnaryOp::Entier => entier(arena, x, n),
            UnaryOp::Sqrt => sqrt(ctx, x, n),
            UnaryOp::Cbrt => cbrt(ctx, x, n),
            UnaryOp::Exp => exp(ctx, x, n),
            UnaryOp::Expm1 => expm1(ctx, x, n),
            UnaryOp::Ln => ln(ctx, x, n),
            UnaryOp::Log => log(ctx, x, n),
            UnaryOp::Sin => sin(ctx, x, n),
            UnaryOp::Cos => cos(ctx, x, n),
            UnaryOp::Tan => tan(ctx, x, n),
            UnaryOp::Asin => asin(ctx, x, n),
            UnaryOp::Acos => acos(ctx, x, n),
            UnaryOp::Atan => atan(ctx, x, n),
            UnaryOp::Sinh => sinh(ctx, x, n),
            UnaryOp::Cosh => cosh(ctx, x, n),
            UnaryOp::Tanh => tanh(ctx, x, n),
            UnaryOp::Asinh => asinh(ctx, x, n),
            UnaryOp::Acosh => acosh(ctx, x, n),
            UnaryOp::Atanh => atanh(ctx, x, n),
        }
    }
}

impl BinaryOp {
    /// `self(x, y)` at precision `n`
    pub fn apply<'a>(self, ctx: &'a Context, x: &MpNumber, y: &MpNumber, n: usize) -> MpResult<Temp<'a>> {
        let arena = ctx.arena();
        match self {
            BinaryOp::Add => add(arena, x, y, n),
            BinaryOp::Sub => sub(arena, x, y, n),
            BinaryOp::Mul => mul(arena, x, y, n),
            BinaryOp::Div => div(arena, x, y, n),
            BinaryOp::Over => over(arena, x, y, n),
            BinaryOp::Mod => modulo(arena, x, y, n),
            BinaryOp::Pow => pow_real(ctx, x, y, n),
            BinaryOp::Hypot => hypot(ctx, x, y, n),
            BinaryOp::Atan2 => atan2(ctx, x, y, n),
        }
    }
}

impl ComplexOp {
    /// Number of real arguments
    pub fn arity(self) -> usize {
        match self {
            ComplexOp::Cmul | ComplexOp::Cdiv => 4,
            _ => 2,
        }
    }

    /// `self` over the argument parts `args` at precision `n`
    ///
    /// `args` holds `arity()` values.
    fn apply<'a>(self, ctx: &'a Context, args: &[MpNumber], n: usize) -> MpResult<Value<'a>> {
        let x = (&args[0], &args[1]);
        match self {
            ComplexOp::Cmul => cmul(ctx, x, (&args[2], &args[3]), n).map(Value::Complex),
            ComplexOp::Cdiv => cdiv(ctx, x, (&args[2], &args[3]), n).map(Value::Complex),
            ComplexOp::Cabs => Ok(Value::Real(cabs(ctx, x, n)?)),
            ComplexOp::Carg => Ok(Value::Real(carg(ctx, x, n)?)),
            ComplexOp::Csqrt => csqrt(ctx, x, n).map(Value::Complex),
            ComplexOp::Cexp => cexp(ctx, x, n).map(Value::Complex),
            ComplexOp::Cln => cln(ctx, x, n).map(Value::Complex),
            ComplexOp::Csin => csin(ctx, x, n).map(Value::Complex),
            ComplexOp::Ccos => ccos(ctx, x, n).map(Value::Complex),
            ComplexOp::Ctan => ctan(ctx, x, n).map(Value::Complex),
            ComplexOp::Casin => casin(ctx, x, n).map(Value::Complex),
            ComplexOp::Cacos => cacos(ctx, x, n).map(Value::Complex),
            ComplexOp::Catan => catan(ctx, x, n).map(Value::Complex),
        }
    }
}

/// Result of an [`Operation`], still held in the arena
#[derive(Debug, Clone)]
pub enum Value<'a> {
    Real(Temp<'a>),
    Complex(MpComplex<'a>),
}

impl Value<'_> {
    /// Detach the result from the arena
    pub fn into_owned(self) -> Answer {
        match self {
            Value::Real(x) => Answer::Real(x.into_owned()),
            Value::Complex(z) => {
                let (re, im) = z.into_owned();
                Answer::Complex(re, im)
            }
        }
    }
}

/// Result of an [`Operation`] detached from any arena
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Real(MpNumber),
    Complex(MpNumber, MpNumber),
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Real(x) => write!(f, "{}", x),
            Answer::Complex(re, im) if im.is_negative() => {
                let mut magnitude = im.clone();
                magnitude.make_positive();
                write!(f, "{} - {}i", re, magnitude)
            }
            Answer::Complex(re, im) => write!(f, "{} + {}i", re, im),
        }
    }
}

/// Any operation an evaluator can name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Pi,
    Unary(UnaryOp),
    Binary(BinaryOp),
    Complex(ComplexOp),
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Operation::Pi => "pi",
            Operation::Unary(op) => op.name(),
            Operation::Binary(op) => op.name(),
            Operation::Complex(op) => op.name(),
        }
    }

    /// Number of real arguments `apply` expects
    pub fn arity(self) -> usize {
        match self {
            Operation::Pi => 0,
            Operation::Unary(_) => 1,
            Operation::Binary(_) => 2,
            Operation::Complex(op) => op.arity(),
        }
    }

    /// Evaluate on `args` at precision `n`
    ///
    /// # Errors
    ///
    /// * `Domain` - `args` does not hold `arity()` values
    /// * any error of the dispatched function
    pub fn apply<'a>(self, ctx: &'a Context, args: &[MpNumber], n: usize) -> MpResult<Value<'a>> {
        if args.len() != self.arity() {
            debug!(operation = self.name(), expected = self.arity(), got = args.len(), "wrong argument count");
            return Err(MpError::Domain { operation: self.name() });
        }
        match self {
            Operation::Pi => Ok(Value::Real(pi(ctx, n)?)),
            Operation::Unary(op) => Ok(Value::Real(op.apply(ctx, &args[0], n)?)),
            Operation::Binary(op) => Ok(Value::Real(op.apply(ctx, &args[0], &args[1], n)?)),
            Operation::Complex(op) => op.apply(ctx, args, n),
        }
    }
}

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "pi" {
            return Ok(Operation::Pi);
        }
        s.parse()
            .map(Operation::Unary)
            .or_else(|_| s.parse().map(Operation::Binary))
            .or_else(|_| s.parse().map(Operation::Complex))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
