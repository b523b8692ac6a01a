//! Error types for `lingap-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{field}: {message}")]
  Validation { field: String, message: String },

  #[error(
    "applicant age {age} is outside the {program} eligible range {min}-{max}"
  )]
  AgeIneligible {
    program: crate::applicant::Program,
    age:     u8,
    min:     u8,
    max:     u8,
  },
}

impl Error {
  /// Shorthand for a field-level validation failure.
  pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
    Self::Validation { field: field.into(), message: message.into() }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
