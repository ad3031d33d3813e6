//! Multiprecision Facade
//!
//! The evaluator-facing entry point: applies a named operation and enforces the
//! library's error policy.
//!
//! ## Error Policy
//!
//! | Outcome | Indicator | Sink | Returned |
//! |---|---|---|---|
//! | success | cleared | - | `Ok(Some(answer))` |
//! | domain error | set | - | `Ok(None)` |
//! | range error | set | reported | `Err(EvaluationAborted)` |
//!
//! The indicator plays the role of `errno`: it holds the error of the most
//! recent evaluation and is cleared by the next successful one.
//!
//! ## Examples
//!
//! ```rust
//! use api_facades::{CollectingSink, MpFacade};
//!
//! let mut facade: MpFacade<usize, _> = MpFacade::new(CollectingSink::new());
//! let root = facade.evaluate_text(&1, "sqrt".parse().unwrap(), &["2"], 3).unwrap();
//! assert!(root.unwrap().to_string().starts_with("1.414213562373"));
//!
//! // ln of a negative number has no result
//! assert_eq!(facade.evaluate_text(&2, "ln".parse().unwrap(), &["-1"], 3).unwrap(), None);
//! assert!(facade.last_error().is_some());
//! ```

use entities_multiprecision::{ErrorKind, MpError, MpNumber};
use infrastructure_mp_encoding::StringCodec;
use thiserror::Error;
use tracing::{debug, trace};
use usecases_mp_functions::{Answer, Context, Operation};

use crate::diagnostics::DiagnosticSink;

/// A range error ended the evaluation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("evaluation of {operation} aborted: {source}")]
pub struct EvaluationAborted {
    pub operation: &'static str,
    #[source]
    pub source: MpError,
}

/// Facade over one [`Context`] reporting to one sink
pub struct MpFacade<C, D: DiagnosticSink<C>> {
    ctx: Context,
    sink: D,
    last_error: Option<MpError>,
    _context: std::marker::PhantomData<fn(&C)>,
}

impl<C, D: DiagnosticSink<C>> MpFacade<C, D> {
    pub fn new(sink: D) -> Self {
        Self::with_context(Context::new(), sink)
    }

    /// Facade over an existing context, keeping its cached constants
    pub fn with_context(ctx: Context, sink: D) -> Self {
        Self {
            ctx,
            sink,
            last_error: None,
            _context: std::marker::PhantomData,
        }
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn sink(&self) -> &D {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut D {
        &mut self.sink
    }

    /// Error of the most recent evaluation, if it failed
    pub fn last_error(&self) -> Option<&MpError> {
        self.last_error.as_ref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Apply `op` to `args` at precision `n`
    ///
    /// `context` identifies the caller's position for diagnostics.
    ///
    /// # Errors
    ///
    /// * `EvaluationAborted` - the operation raised a range error
    pub fn evaluate(
        &mut self,
        context: &C,
        op: Operation,
        args: &[MpNumber],
        n: usize,
    ) -> Result<Option<Answer>, EvaluationAborted> {
        let outcome = op.apply(&self.ctx, args, n).map(|value| value.into_owned());
        trace!(
            operation = op.name(),
            digits = n,
            high_water = self.ctx.arena().high_water(),
            "evaluated"
        );
        self.settle(context, op.name(), outcome)
    }

    /// Parse `args` as decimal numerals at precision `n`, then [`evaluate`](Self::evaluate)
    ///
    /// A malformed numeral is a domain error.
    ///
    /// # Errors
    ///
    /// * `EvaluationAborted` - parsing or the operation raised a range error
    pub fn evaluate_text(
        &mut self,
        context: &C,
        op: Operation,
        args: &[&str],
        n: usize,
    ) -> Result<Option<Answer>, EvaluationAborted> {
        let parsed: Result<Vec<MpNumber>, MpError> = args
            .iter()
            .map(|text| StringCodec::parse(self.ctx.arena(), text, n).map(|x| x.into_owned()))
            .collect();
        match parsed {
            Ok(values) => self.evaluate(context, op, &values, n),
            Err(error) => self.settle(context, op.name(), Err(error)),
        }
    }

    fn settle(
        &mut self,
        context: &C,
        operation: &'static str,
        outcome: Result<Answer, MpError>,
    ) -> Result<Option<Answer>, EvaluationAborted> {
        match outcome {
            Ok(answer) => {
                self.last_error = None;
                Ok(Some(answer))
            }
            Err(error) => {
                let kind = error.kind();
                self.last_error = Some(error.clone());
                match kind {
                    ErrorKind::Domain => {
                        debug!(operation, %error, "no result");
                        Ok(None)
                    }
                    ErrorKind::Range => {
                        let message = format!("{}: {}", operation, error);
                        self.sink.report(kind, context, &message);
                        Err(EvaluationAborted {
                            operation,
                            source: error,
                        })
                    }
                }
            }
        }
    }
}
