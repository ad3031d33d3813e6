//! Multiprecision Errors
//!
//! Error values returned by every fallible multiprecision operation.
//!
//! ## Overview
//!
//! Errors fall into two kinds, mirrored by [`ErrorKind`]:
//!
//! - **Domain** errors: the argument lies outside the operation's domain
//!   (division by zero, `ln` of a non-positive value, malformed numerals).
//!   Callers treat these as "no result".
//! - **Range** errors: a result does not fit its target (machine integer
//!   overflow, truncation beyond the working precision, exponent overflow).
//!   Callers treat these as fatal to the current evaluation.

use thiserror::Error;

/// Classification of a [`MpError`] for the evaluator's error policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Argument outside the operation's domain
    Domain,
    /// Result does not fit its target
    Range,
}

/// Multiprecision operation error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MpError {
    /// Divisor (or reciprocal argument) is zero
    #[error("division by zero")]
    DivisionByZero,
    /// Argument outside the domain of `operation`
    #[error("argument outside the domain of {operation}")]
    Domain { operation: &'static str },
    /// Value does not fit `target`
    #[error("value out of range for {target}")]
    OutOfRange { target: &'static str },
    /// Result exponent exceeds the representable range
    #[error("multiprecision exponent overflow")]
    ExponentOverflow,
    /// Text is not a valid decimal numeral
    #[error("invalid numeral {text:?}: {reason}")]
    InvalidNumeral { text: String, reason: &'static str },
}

impl MpError {
    /// Whether the error is a domain or a range error
    pub fn kind(&self) -> ErrorKind {
        match self {
            MpError::DivisionByZero | MpError::Domain { .. } | MpError::InvalidNumeral { .. } => {
                ErrorKind::Domain
            }
            MpError::OutOfRange { .. } | MpError::ExponentOverflow => ErrorKind::Range,
        }
    }
}

/// Result alias used throughout the multiprecision crates
pub type MpResult<T> = Result<T, MpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(MpError::DivisionByZero.kind(), ErrorKind::Domain);
        assert_eq!(MpError::Domain { operation: "ln" }.kind(), ErrorKind::Domain);
        assert_eq!(
            MpError::InvalidNumeral { text: "x".into(), reason: "no digits" }.kind(),
            ErrorKind::Domain
        );
        assert_eq!(MpError::OutOfRange { target: "i64" }.kind(), ErrorKind::Range);
        assert_eq!(MpError::ExponentOverflow.kind(), ErrorKind::Range);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            MpError::Domain { operation: "sqrt" }.to_string(),
            "argument outside the domain of sqrt"
        );
        assert_eq!(
            MpError::OutOfRange { target: "truncate" }.to_string(),
            "value out of range for truncate"
        );
    }
}
