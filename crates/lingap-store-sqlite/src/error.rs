//! Error type for `lingap-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] lingap_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  /// A stored column value that no longer decodes to a domain type.
  #[error("decode error: {0}")]
  Decode(String),

  #[error("applicant not found: {0}")]
  ApplicantNotFound(uuid::Uuid),

  /// Code reservation kept colliding after retries — only possible with a
  /// concurrent writer on the same database file.
  #[error("could not reserve a unique applicant code")]
  CodeExhausted,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Whether a database error is a `UNIQUE` constraint violation — the signal
/// that a concurrently-created applicant took the code we scanned.
pub(crate) fn is_unique_violation(err: &tokio_rusqlite::Error) -> bool {
  matches!(
    err,
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(e, _))
      if e.code == rusqlite::ErrorCode::ConstraintViolation
  )
}
