//! The `ApplicantStore` trait.
//!
//! Implemented by storage backends (e.g. `lingap-store-sqlite`). Higher
//! layers depend on this abstraction, not on any concrete backend.
//!
//! Operations carry no retry logic and no optimistic-concurrency token:
//! failures surface to the caller, and concurrent edits are last-write-wins
//! by design (single-office deployment).

use std::future::Future;

use uuid::Uuid;

use crate::applicant::{Applicant, NewApplicant, Program, UpdateApplicant};

/// Abstraction over an applicant registry backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ApplicantStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// All records for a program — active and archived, insertion order.
  /// Callers partition on `archived` before display.
  fn list(
    &self,
    program: Program,
  ) -> impl Future<Output = Result<Vec<Applicant>, Self::Error>> + Send + '_;

  /// Retrieve a record by id. Returns `None` if not found.
  fn get(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Applicant>, Self::Error>> + Send + '_;

  /// Validate and persist a new applicant.
  ///
  /// The store assigns `id`, stamps `date_submitted`, normalises names,
  /// recomputes `age`, sets `interviewed = false`, and reserves the next
  /// sequential code atomically with the insert (retrying on a uniqueness
  /// conflict). A validation failure writes nothing.
  fn create(
    &self,
    input: NewApplicant,
  ) -> impl Future<Output = Result<Applicant, Self::Error>> + Send + '_;

  /// Validate and apply an edit to an existing applicant.
  ///
  /// Derives `interviewed` from the *persisted* status versus the new one,
  /// re-normalises names, and recomputes `age`. Identity fields (`code`,
  /// `program`, `date_submitted`) are untouched.
  fn update(
    &self,
    id: Uuid,
    input: UpdateApplicant,
  ) -> impl Future<Output = Result<Applicant, Self::Error>> + Send + '_;

  /// Soft-delete: set `archived = true` and stamp `archived_date` with the
  /// current date (no time component). Status is retained.
  fn archive(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Restore an archived record: clear `archived` and `archived_date`.
  fn unarchive(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Permanently remove a record. No undo; the code is never reissued.
  fn delete(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
