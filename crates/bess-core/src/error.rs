//! Unified error types for the BESS scheduler
//!
//! This module provides a common error type [`BessError`] that can represent
//! errors from any part of the system: loading, validation and export
//! failures are reported through it directly, and the solver layer wraps it
//! for its input-validation failures.
//!
//! # Example
//!
//! ```ignore
//! use bess_core::{BessError, BessResult};
//!
//! fn backtest(path: &str) -> BessResult<()> {
//!     let prices = load_prices(path)?;
//!     run_horizon(&prices)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Unified error type for all scheduler operations.
///
/// This enum provides a common error representation across price loading,
/// window slicing, solving and exporting, allowing errors to be handled
/// uniformly at the CLI boundary.
#[derive(Error, Debug)]
pub enum BessError {
    /// I/O errors (file access, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing/deserialization errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// Data validation errors (misaligned horizons, missing columns)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Solver/optimization errors
    #[error("Solver error: {0}")]
    Solver(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic errors (for wrapping external errors)
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Results using BessError.
pub type BessResult<T> = Result<T, BessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BessError::Solver("day 14 infeasible".into());
        assert!(err.to_string().contains("Solver error"));
        assert!(err.to_string().contains("day 14 infeasible"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let bess_err: BessError = io_err.into();
        assert!(matches!(bess_err, BessError::Io(_)));
    }

    #[test]
    fn test_result_type_alias() {
        fn example_fn() -> BessResult<i32> {
            Ok(42)
        }
        assert_eq!(example_fn().unwrap(), 42);
    }

    #[test]
    fn test_question_mark_operator() {
        fn inner() -> BessResult<()> {
            Err(BessError::Validation("test".into()))
        }

        fn outer() -> BessResult<()> {
            inner()?;
            Ok(())
        }

        assert!(outer().is_err());
    }
}
