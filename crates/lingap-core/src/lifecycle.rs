//! Derived workflow state.
//!
//! The interview flag is never set directly. It is derived at update time
//! from the transition between the *persisted* status and the new one — the
//! store compares old vs new on its side, never trusting client form state.

use crate::applicant::Status;

/// The interview flag after a status transition.
///
/// - `Pending → non-Pending`: the applicant has been interviewed (`true`).
/// - `non-Pending → Pending`: the decision was rolled back (`false`).
/// - Any other transition leaves the flag unchanged.
pub fn derive_interview_flag(old: Status, new: Status, current: bool) -> bool {
  match (old == Status::Pending, new == Status::Pending) {
    (true, false) => true,
    (false, true) => false,
    _ => current,
  }
}

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator;

  use super::*;

  #[test]
  fn leaving_pending_sets_the_flag() {
    for new in Status::iter().filter(|s| *s != Status::Pending) {
      assert!(derive_interview_flag(Status::Pending, new, false));
      assert!(derive_interview_flag(Status::Pending, new, true));
    }
  }

  #[test]
  fn returning_to_pending_clears_the_flag() {
    for old in Status::iter().filter(|s| *s != Status::Pending) {
      assert!(!derive_interview_flag(old, Status::Pending, true));
      assert!(!derive_interview_flag(old, Status::Pending, false));
    }
  }

  #[test]
  fn other_transitions_leave_the_flag_alone() {
    assert!(derive_interview_flag(Status::Approved, Status::Deployed, true));
    assert!(!derive_interview_flag(Status::Approved, Status::Deployed, false));
    assert!(derive_interview_flag(Status::Deployed, Status::Resigned, true));
    // No-op edits included.
    assert!(derive_interview_flag(Status::Approved, Status::Approved, true));
    assert!(!derive_interview_flag(Status::Pending, Status::Pending, false));
  }
}
