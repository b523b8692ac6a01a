//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{Datelike, Utc};
use lingap_core::applicant::{
  ApplicantName, Barangay, Gender, GipDetails, NewApplicant, Program,
  ProgramDetails, Status, TupadDetails, UpdateApplicant,
};
use lingap_core::store::ApplicantStore;
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

/// A valid GIP applicant aged `age` as of today.
fn gip_applicant(first: &str, age: i32) -> NewApplicant {
  let today = Utc::now().date_naive();
  let birth_date =
    chrono::NaiveDate::from_ymd_opt(today.year() - age, 1, 1).unwrap();
  NewApplicant {
    name: ApplicantName {
      first:  first.into(),
      middle: None,
      last:   "Dela Cruz".into(),
      suffix: None,
    },
    birth_date,
    gender: Gender::Male,
    barangay: Barangay::Poblacion,
    contact_number: "09171234567".into(),
    email: None,
    address: None,
    details: ProgramDetails::Gip(GipDetails::default()),
    resume: None,
  }
}

fn tupad_applicant(first: &str, age: i32) -> NewApplicant {
  NewApplicant {
    details: ProgramDetails::Tupad(TupadDetails {
      id_type:        "PhilSys".into(),
      id_number:      "1234-5678-9012".into(),
      occupation:     "Labourer".into(),
      monthly_income: None,
      dependent:      None,
    }),
    ..gip_applicant(first, age)
  }
}

fn edit_of(a: &lingap_core::applicant::Applicant) -> UpdateApplicant {
  UpdateApplicant {
    name: a.name.clone(),
    birth_date: a.birth_date,
    gender: a.gender,
    barangay: a.barangay,
    contact_number: a.contact_number.clone(),
    email: a.email.clone(),
    address: a.address.clone(),
    details: a.details.clone(),
    resume: a.resume.clone(),
    status: a.status,
  }
}

// ─── Creation and codes ──────────────────────────────────────────────────────

#[tokio::test]
async fn create_assigns_sequential_codes_per_program() {
  let s = store().await;

  let a = s.create(gip_applicant("Juan", 22)).await.unwrap();
  let b = s.create(gip_applicant("Pedro", 23)).await.unwrap();
  let t = s.create(tupad_applicant("Rosa", 40)).await.unwrap();

  assert_eq!(a.code, "GIP-000001");
  assert_eq!(b.code, "GIP-000002");
  // TUPAD numbering is independent of GIP's.
  assert_eq!(t.code, "TPD-000001");
}

#[tokio::test]
async fn create_normalises_names_and_derives_fields() {
  let s = store().await;

  let mut input = gip_applicant("juan", 22);
  input.name.last = "dela cruz".into();
  let a = s.create(input).await.unwrap();

  assert_eq!(a.name.first, "JUAN");
  assert_eq!(a.name.last, "DELA CRUZ");
  assert_eq!(a.age, 22);
  assert_eq!(a.status, Status::Pending);
  assert!(!a.interviewed);
  assert!(!a.archived);
  assert!(a.archived_date.is_none());

  // Round-trips through the database unchanged.
  let fetched = s.get(a.id).await.unwrap().unwrap();
  assert_eq!(fetched.name.first, "JUAN");
  assert_eq!(fetched.code, a.code);
  assert_eq!(fetched.birth_date, a.birth_date);
}

#[tokio::test]
async fn create_rejects_ineligible_age_without_writing() {
  let s = store().await;

  let err = s.create(gip_applicant("Juan", 17)).await.unwrap_err();
  assert!(matches!(
    err,
    Error::Core(lingap_core::Error::AgeIneligible { .. })
  ));

  // Nothing was persisted and no code was consumed.
  assert!(s.list(Program::Gip).await.unwrap().is_empty());
  let ok = s.create(gip_applicant("Juan", 18)).await.unwrap();
  assert_eq!(ok.code, "GIP-000001");
}

#[tokio::test]
async fn deleted_codes_are_never_reissued() {
  let s = store().await;

  let a = s.create(gip_applicant("Juan", 22)).await.unwrap();
  let b = s.create(gip_applicant("Pedro", 23)).await.unwrap();
  assert_eq!(b.code, "GIP-000002");

  // Delete the highest-numbered record; the next code still advances.
  s.delete(b.id).await.unwrap();
  s.delete(a.id).await.unwrap();
  let c = s.create(gip_applicant("Maria", 24)).await.unwrap();
  assert_eq!(c.code, "GIP-000003");
}

// ─── Reads ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  assert!(s.get(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn list_is_scoped_by_program_in_insertion_order() {
  let s = store().await;
  s.create(gip_applicant("Juan", 22)).await.unwrap();
  s.create(tupad_applicant("Rosa", 40)).await.unwrap();
  s.create(gip_applicant("Pedro", 23)).await.unwrap();

  let gip = s.list(Program::Gip).await.unwrap();
  assert_eq!(gip.len(), 2);
  assert_eq!(gip[0].code, "GIP-000001");
  assert_eq!(gip[1].code, "GIP-000002");

  let tupad = s.list(Program::Tupad).await.unwrap();
  assert_eq!(tupad.len(), 1);
}

// ─── Updates and the interview flag ──────────────────────────────────────────

#[tokio::test]
async fn leaving_pending_marks_interviewed() {
  let s = store().await;
  let a = s.create(gip_applicant("Juan", 22)).await.unwrap();

  let mut edit = edit_of(&a);
  edit.status = Status::Approved;
  let updated = s.update(a.id, edit).await.unwrap();

  assert_eq!(updated.status, Status::Approved);
  assert!(updated.interviewed);

  let fetched = s.get(a.id).await.unwrap().unwrap();
  assert!(fetched.interviewed);
}

#[tokio::test]
async fn returning_to_pending_clears_interviewed() {
  let s = store().await;
  let a = s.create(gip_applicant("Juan", 22)).await.unwrap();

  let mut edit = edit_of(&a);
  edit.status = Status::Approved;
  s.update(a.id, edit.clone()).await.unwrap();

  edit.status = Status::Pending;
  let updated = s.update(a.id, edit).await.unwrap();
  assert!(!updated.interviewed);
}

#[tokio::test]
async fn non_pending_transitions_keep_the_flag() {
  let s = store().await;
  let a = s.create(gip_applicant("Juan", 22)).await.unwrap();

  let mut edit = edit_of(&a);
  edit.status = Status::Approved;
  s.update(a.id, edit.clone()).await.unwrap();

  edit.status = Status::Deployed;
  let updated = s.update(a.id, edit).await.unwrap();
  assert_eq!(updated.status, Status::Deployed);
  assert!(updated.interviewed);
}

#[tokio::test]
async fn update_preserves_identity_fields() {
  let s = store().await;
  let a = s.create(gip_applicant("Juan", 22)).await.unwrap();

  let mut edit = edit_of(&a);
  edit.name.first = "Juanito".into();
  let updated = s.update(a.id, edit).await.unwrap();

  assert_eq!(updated.code, a.code);
  assert_eq!(updated.date_submitted, a.date_submitted);
  assert_eq!(updated.name.first, "JUANITO");
}

#[tokio::test]
async fn update_rejects_program_change() {
  let s = store().await;
  let a = s.create(gip_applicant("Juan", 26)).await.unwrap();

  let mut edit = edit_of(&a);
  edit.details = ProgramDetails::Tupad(TupadDetails {
    id_type:        "PhilSys".into(),
    id_number:      "1".into(),
    occupation:     "x".into(),
    monthly_income: None,
    dependent:      None,
  });
  let err = s.update(a.id, edit).await.unwrap_err();
  assert!(matches!(err, Error::Core(lingap_core::Error::Validation { .. })));
}

#[tokio::test]
async fn update_missing_is_not_found() {
  let s = store().await;
  let a = s.create(gip_applicant("Juan", 22)).await.unwrap();
  let err = s.update(Uuid::new_v4(), edit_of(&a)).await.unwrap_err();
  assert!(matches!(err, Error::ApplicantNotFound(_)));
}

// ─── Archive lifecycle ───────────────────────────────────────────────────────

#[tokio::test]
async fn archive_stamps_date_and_unarchive_clears_it() {
  let s = store().await;
  let a = s.create(gip_applicant("Juan", 22)).await.unwrap();

  s.archive(a.id).await.unwrap();
  let archived = s.get(a.id).await.unwrap().unwrap();
  assert!(archived.archived);
  assert_eq!(archived.archived_date, Some(Utc::now().date_naive()));
  // Status is independent of archival.
  assert_eq!(archived.status, Status::Pending);

  // Still listed — callers partition on the flag.
  let all = s.list(Program::Gip).await.unwrap();
  assert_eq!(all.len(), 1);
  assert!(all[0].archived);

  s.unarchive(a.id).await.unwrap();
  let restored = s.get(a.id).await.unwrap().unwrap();
  assert!(!restored.archived);
  assert!(restored.archived_date.is_none());
}

#[tokio::test]
async fn archived_records_leave_the_statistics() {
  let s = store().await;
  let a = s.create(gip_applicant("Juan", 22)).await.unwrap();
  s.create(gip_applicant("Pedro", 23)).await.unwrap();

  let before = lingap_core::stats::overall(&s.list(Program::Gip).await.unwrap(), None);
  assert_eq!(before.total, 2);

  s.archive(a.id).await.unwrap();
  let after = lingap_core::stats::overall(&s.list(Program::Gip).await.unwrap(), None);
  assert_eq!(after.total, 1);

  s.unarchive(a.id).await.unwrap();
  let restored = lingap_core::stats::overall(&s.list(Program::Gip).await.unwrap(), None);
  assert_eq!(restored.total, 2);
}

#[tokio::test]
async fn archive_missing_is_not_found() {
  let s = store().await;
  let err = s.archive(Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, Error::ApplicantNotFound(_)));
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_is_permanent() {
  let s = store().await;
  let a = s.create(gip_applicant("Juan", 22)).await.unwrap();

  s.delete(a.id).await.unwrap();
  assert!(s.get(a.id).await.unwrap().is_none());

  // Double-submit of a delete reports not-found, not success.
  let err = s.delete(a.id).await.unwrap_err();
  assert!(matches!(err, Error::ApplicantNotFound(_)));
}

// ─── Seeding ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn seed_is_idempotent() {
  let s = store().await;

  let first = crate::seed::seed(&s).await.unwrap();
  assert!(first > 0);
  let gip_count = s.list(Program::Gip).await.unwrap().len();
  let tupad_count = s.list(Program::Tupad).await.unwrap().len();
  assert!(gip_count > 0 && tupad_count > 0);

  // A second run creates nothing.
  let second = crate::seed::seed(&s).await.unwrap();
  assert_eq!(second, 0);
  assert_eq!(s.list(Program::Gip).await.unwrap().len(), gip_count);
  assert_eq!(s.list(Program::Tupad).await.unwrap().len(), tupad_count);
}
