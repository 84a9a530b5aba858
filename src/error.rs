use std::fmt;

/// Errors surfaced by fallible estimator operations.
///
/// All error surfaces are local to the call: a failed operation leaves the
/// estimator state unchanged and nothing is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Construction received a precision outside the supported `[4, 18]` range.
    InvalidPrecision { precision: u8 },
    /// `merge` received operands built with unequal precisions.
    PrecisionMismatch { lhs: u8, rhs: u8 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidPrecision { precision } => write!(
                f,
                "precision must be in [4, 18], got {precision}"
            ),
            Error::PrecisionMismatch { lhs, rhs } => write!(
                f,
                "precisions must be equal for merge, got {lhs} and {rhs}"
            ),
        }
    }
}

impl std::error::Error for Error {}
