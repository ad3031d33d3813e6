//! Diagnostics
//!
//! Destinations for errors the facade reports on behalf of an evaluator.
//!
//! The position token `C` is supplied by the evaluator (a parse node, a source
//! line, a command line argument) and is passed through untouched.

use std::fmt;

use entities_multiprecision::ErrorKind;
use tracing::warn;

/// Receiver of reported multiprecision errors
pub trait DiagnosticSink<C> {
    /// Report an error of `kind` raised while evaluating at `context`
    fn report(&mut self, kind: ErrorKind, context: &C, message: &str);
}

/// Sink that forwards every report to `tracing` at warn level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl<C: fmt::Debug> DiagnosticSink<C> for TracingSink {
    fn report(&mut self, kind: ErrorKind, context: &C, message: &str) {
        warn!(?kind, ?context, "{}", message);
    }
}

/// One recorded report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report<C> {
    pub kind: ErrorKind,
    pub context: C,
    pub message: String,
}

/// Sink that keeps every report in memory
#[derive(Debug, Clone)]
pub struct CollectingSink<C> {
    reports: Vec<Report<C>>,
}

impl<C> CollectingSink<C> {
    pub fn new() -> Self {
        Self { reports: Vec::new() }
    }

    pub fn reports(&self) -> &[Report<C>] {
        &self.reports
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Remove and return everything reported so far
    pub fn drain(&mut self) -> Vec<Report<C>> {
        std::mem::take(&mut self.reports)
    }
}

impl<C> Default for CollectingSink<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clone> DiagnosticSink<C> for CollectingSink<C> {
    fn report(&mut self, kind: ErrorKind, context: &C, message: &str) {
        self.reports.push(Report {
            kind,
            context: context.clone(),
            message: message.to_string(),
        });
    }
}

impl<C, S: DiagnosticSink<C> + ?Sized> DiagnosticSink<C> for &mut S {
    fn report(&mut self, kind: ErrorKind, context: &C, message: &str) {
        (**self).report(kind, context, message);
    }
}
