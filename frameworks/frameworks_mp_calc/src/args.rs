//! Command-Line Argument Parsing Module
//!
//! Uses clap for type-safe argument parsing. Numeric settings fall back to
//! environment variables when the flag is absent.

use clap::{Parser, ValueEnum};
use entities_multiprecision::digits_for_decimals;

/// How results are printed
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `--digits` digits after the decimal point
    Fixed,
    /// `--digits` significant digits with a decimal exponent
    Sci,
}

/// mpcalc command-line arguments
#[derive(Parser, Debug)]
#[command(name = "mpcalc")]
#[command(about = "Arbitrary precision decimal calculator")]
pub struct CalcArgs {
    /// Decimal digits of the result
    #[arg(long, env = "MPCALC_DIGITS", default_value_t = 50, value_parser = clap::value_parser!(u32).range(1..))]
    pub digits: u32,

    /// Most digits the scratch arena may hold at once
    #[arg(long, env = "MPCALC_ARENA_LIMIT")]
    pub arena_limit: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Sci)]
    pub format: OutputFormat,

    /// Print the names of all operations and exit
    #[arg(long)]
    pub list: bool,

    /// Operation name, e.g. "sqrt", "atan2", "csin", "pi"
    #[arg(required_unless_present = "list")]
    pub operation: Option<String>,

    /// Decimal numeral arguments
    #[arg(allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl CalcArgs {
    /// Working precision in radix digits
    pub fn precision(&self) -> usize {
        digits_for_decimals(self.digits as usize)
    }
}
