//! # Error Types
//!
//! This module defines the error type shared by every stage of a timetable
//! optimization run.
//!
//! A run either fails up front, because the catalog cannot describe a schedule at all
//! ([`TimetableError::Configuration`]), or it completes. Failing to find a clash-free
//! timetable is not an error: it is reported through
//! [`EvolutionResult::is_perfect`](crate::evolution::EvolutionResult).
//!
//! ## Examples
//!
//! ```rust
//! use timetabler::error::{OptionExt, Result, TimetableError};
//!
//! fn first_section(sections: &[u32]) -> Result<u32> {
//!     sections.first().copied().ok_or_else_timetable(|| {
//!         TimetableError::Configuration("No sections to schedule".to_string())
//!     })
//! }
//!
//! assert!(first_section(&[]).is_err());
//! assert_eq!(first_section(&[7]).unwrap(), 7);
//! ```

use thiserror::Error;

/// Represents errors that can occur while building a catalog or running the optimizer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimetableError {
    /// The catalog or the evolution parameters cannot describe a schedulable problem.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A gene vector does not cover the required sessions of the catalog.
    #[error("Structure error: {0}")]
    Structure(String),

    /// An operation required at least one chromosome.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// Parent selection could not pick a candidate.
    #[error("Selection error: {0}")]
    Selection(String),

    /// The evolution loop could not proceed.
    #[error("Evolution error: {0}")]
    Evolution(String),
}

/// A specialized Result type for timetable operations.
pub type Result<T> = std::result::Result<T, TimetableError>;

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, TimetableError>` using
    /// a closure to generate the error.
    fn ok_or_else_timetable<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> TimetableError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_timetable<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> TimetableError,
    {
        self.ok_or_else(err_fn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = TimetableError::Configuration("Subject 'Physics' has no qualified faculty".into());
        assert_eq!(
            err.to_string(),
            "Configuration error: Subject 'Physics' has no qualified faculty"
        );
        assert_eq!(
            TimetableError::EmptyPopulation.to_string(),
            "Empty population error: Cannot operate on an empty population"
        );
    }

    #[test]
    fn test_option_ext() {
        let none: Option<usize> = None;
        let err = none.ok_or_else_timetable(|| TimetableError::Evolution("no best".into()));
        assert_eq!(err, Err(TimetableError::Evolution("no best".into())));
        assert_eq!(Some(3).ok_or_else_timetable(|| TimetableError::EmptyPopulation), Ok(3));
    }
}
