//! Error types for worksheet generation.
//!
//! Only configuration problems are errors. A wrong or malformed learner answer
//! is a scoring outcome (see `scoring`), never an `Err`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorksheetError {
  /// Negative or over-limit problem count, or an unknown selector
  /// (exercise family, operation, exercise type, difficulty level).
  #[error("invalid configuration: {0}")]
  InvalidConfiguration(String),

  /// The declarative verb table could not be parsed or is inconsistent.
  #[error("invalid verb table: {0}")]
  VerbTable(String),
}

impl WorksheetError {
  pub(crate) fn config(msg: impl Into<String>) -> Self {
    WorksheetError::InvalidConfiguration(msg.into())
  }

  pub(crate) fn table(msg: impl Into<String>) -> Self {
    WorksheetError::VerbTable(msg.into())
  }
}
