//! Frameworks Layer: Multiprecision Calculator
//!
//! Provides the `mpcalc` command line calculator, which evaluates one named
//! multiprecision operation and prints its result.
//!
//! ## Overview
//!
//! ```text
//! mpcalc [--digits D] [--arena-limit L] [--format fixed|sci] <operation> [args...]
//! ```
//!
//! Arguments are decimal numerals; complex operands are given as two numerals,
//! real part first. Every evaluation goes through the
//! [`MpFacade`](api_facades::MpFacade), so the library's error policy decides
//! the exit status:
//!
//! | Outcome | Output | Exit code |
//! |---|---|---|
//! | result | the value | 0 |
//! | usage error | message on stderr | 1 |
//! | domain error | `no result` | 2 |
//! | range error | message on stderr | 3 |
//!
//! ## Modules
//!
//! - **[`args`](args/index.html)**: Command line and environment configuration
//! - **[`logging`](logging/index.html)**: `tracing` subscriber setup
//! - **[`run`](run/index.html)**: Evaluation and output rendering
//!
//! ## See Also
//!
//! - [`api_facades`](../../api_facades/index.html): Evaluator facade and error policy
//! - [`usecases_mp_functions`](../../usecases/usecases_mp_functions/index.html): Operations

pub mod args;
pub mod logging;
pub mod run;

pub use args::{CalcArgs, OutputFormat};
pub use run::{render, run, CalcError, Outcome};
