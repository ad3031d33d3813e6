//! Evaluation
//!
//! Turns parsed arguments into one facade evaluation and renders the answer.

use std::io::{self, Write};

use api_facades::{EvaluationAborted, MpFacade, TracingSink};
use entities_multiprecision::{MpError, MpNumber};
use infrastructure_mp_encoding::StringCodec;
use thiserror::Error;
use tracing::info;
use usecases_mp_functions::{Answer, BinaryOp, ComplexOp, Context, Operation, UnaryOp, UnknownOperation};

use crate::args::{CalcArgs, OutputFormat};

/// Usage and output errors
#[derive(Debug, Error)]
pub enum CalcError {
    #[error(transparent)]
    UnknownOperation(#[from] UnknownOperation),
    #[error("{operation} takes {expected} argument(s), got {got}")]
    Arity {
        operation: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("cannot write result: {0}")]
    Io(#[from] io::Error),
}

impl CalcError {
    pub fn exit_code(&self) -> i32 {
        1
    }
}

/// How an evaluation ended
#[derive(Debug)]
pub enum Outcome {
    /// A result (or the operation list) was printed
    Printed,
    /// Domain error; `no result` was printed
    NoResult(MpError),
    /// Range error; the evaluation was abandoned
    Aborted(EvaluationAborted),
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Printed => 0,
            Outcome::NoResult(_) => 2,
            Outcome::Aborted(_) => 3,
        }
    }
}

fn render_part(x: &MpNumber, format: OutputFormat, digits: usize) -> String {
    match format {
        OutputFormat::Fixed => StringCodec::format_fixed(x, digits),
        OutputFormat::Sci => StringCodec::format_scientific(x, digits),
    }
}

/// Text of `answer` in `format` with `digits` decimal digits
pub fn render(answer: &Answer, format: OutputFormat, digits: usize) -> String {
    match answer {
        Answer::Real(x) => render_part(x, format, digits),
        Answer::Complex(re, im) => {
            let mut magnitude = im.clone();
            magnitude.make_positive();
            let sign = if im.is_negative() { '-' } else { '+' };
            format!(
                "{} {} {}i",
                render_part(re, format, digits),
                sign,
                render_part(&magnitude, format, digits)
            )
        }
    }
}

fn list<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", Operation::Pi)?;
    for op in UnaryOp::ALL {
        writeln!(out, "{}", op)?;
    }
    for op in BinaryOp::ALL {
        writeln!(out, "{}", op)?;
    }
    for op in ComplexOp::ALL {
        writeln!(out, "{}", op)?;
    }
    Ok(())
}

/// Evaluate the operation named in `args`, writing the result to `out`
///
/// # Errors
///
/// * `UnknownOperation` - the name matches no operation
/// * `Arity` - wrong number of numeral arguments
/// * `Io` - `out` could not be written
pub fn run<W: Write>(args: &CalcArgs, out: &mut W) -> Result<Outcome, CalcError> {
    let name = match args.operation.as_deref() {
        Some(name) if !args.list => name,
        _ => {
            list(out)?;
            return Ok(Outcome::Printed);
        }
    };
    let op: Operation = name.parse()?;
    if args.args.len() != op.arity() {
        return Err(CalcError::Arity {
            operation: op.name(),
            expected: op.arity(),
            got: args.args.len(),
        });
    }
    let ctx = match args.arena_limit {
        Some(limit) => Context::with_arena_limit(limit),
        None => Context::new(),
    };
    let mut facade = MpFacade::with_context(ctx, TracingSink);
    let position = std::iter::once(name)
        .chain(args.args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ");
    let texts: Vec<&str> = args.args.iter().map(String::as_str).collect();
    let n = args.precision();
    info!(operation = op.name(), digits = args.digits, precision = n, "evaluating");
    match facade.evaluate_text(&position, op, &texts, n) {
        Ok(Some(answer)) => {
            writeln!(out, "{}", render(&answer, args.format, args.digits as usize))?;
            Ok(Outcome::Printed)
        }
        Ok(None) => {
            writeln!(out, "no result")?;
            let error = facade
                .last_error()
                .cloned()
                .unwrap_or(MpError::Domain { operation: op.name() });
            Ok(Outcome::NoResult(error))
        }
        Err(aborted) => Ok(Outcome::Aborted(aborted)),
    }
}
