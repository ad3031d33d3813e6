//! API Facades Layer
//!
//! Provides the boundary between an evaluator (an interpreter, a calculator)
//! and the multiprecision functions of the inner layers.
//!
//! ## Overview
//!
//! An evaluator hands the facade a named [`Operation`](usecases_mp_functions::Operation),
//! its arguments and an opaque position token. The facade applies the error
//! policy of the library:
//!
//! - a **domain** error sets the error indicator and yields no result;
//! - a **range** error sets the indicator, is reported to the evaluator's
//!   [`DiagnosticSink`], and aborts the evaluation.
//!
//! ## Modules
//!
//! - **[`diagnostics`](diagnostics/index.html)**: Diagnostic sinks for reported errors
//! - **[`mp_facades`](mp_facades/index.html)**: The evaluator facade and its error policy
//!
//! ## See Also
//!
//! - [`usecases_mp_functions`](../../usecases/usecases_mp_functions/index.html): Function layer
//! - [`entities_multiprecision`](../../entities/entities_multiprecision/index.html): Error kinds

pub mod diagnostics;
pub mod mp_facades;

pub use diagnostics::{CollectingSink, DiagnosticSink, Report, TracingSink};
pub use mp_facades::{EvaluationAborted, MpFacade};
