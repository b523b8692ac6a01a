//! Applicant — the single record type of the registry.
//!
//! One applicant per individual per program application. Program-specific
//! fields live behind the [`ProgramDetails`] discriminated union so GIP
//! fields are unreachable from a TUPAD record and vice versa.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::EnumIter;
use uuid::Uuid;

// ─── Program ─────────────────────────────────────────────────────────────────

/// The social-welfare program an applicant applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Program {
  /// Government Internship Program — youth employment, ages 18–29.
  Gip,
  /// Emergency employment for disadvantaged workers, ages 25–58.
  Tupad,
}

impl Program {
  /// Prefix of the human-facing applicant code (`GIP-000001`, `TPD-000001`).
  pub fn code_prefix(self) -> &'static str {
    match self {
      Self::Gip => "GIP",
      Self::Tupad => "TPD",
    }
  }

  /// Inclusive age-eligibility bounds, checked at submission time.
  pub fn age_bounds(self) -> (u8, u8) {
    match self {
      Self::Gip => (18, 29),
      Self::Tupad => (25, 58),
    }
  }
}

impl std::fmt::Display for Program {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Gip => write!(f, "GIP"),
      Self::Tupad => write!(f, "TUPAD"),
    }
  }
}

// ─── Gender ──────────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
  Male,
  Female,
}

// ─── Barangay ────────────────────────────────────────────────────────────────

/// The municipality's 18 barangays — a closed set. Statistics report a row
/// for every variant, including those with zero applicants.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize,
)]
pub enum Barangay {
  #[serde(rename = "Bagong Silang")]
  BagongSilang,
  Bagumbayan,
  Burgos,
  #[serde(rename = "Del Pilar")]
  DelPilar,
  Libis,
  Mabini,
  Malanday,
  Maly,
  Poblacion,
  Rizal,
  Salvacion,
  #[serde(rename = "San Isidro")]
  SanIsidro,
  #[serde(rename = "San Jose")]
  SanJose,
  #[serde(rename = "San Rafael")]
  SanRafael,
  #[serde(rename = "San Roque")]
  SanRoque,
  #[serde(rename = "Santa Cruz")]
  SantaCruz,
  #[serde(rename = "Santo Niño")]
  SantoNino,
  Silangan,
}

impl Barangay {
  /// Display name as printed on rosters and reports.
  pub fn name(self) -> &'static str {
    match self {
      Self::BagongSilang => "Bagong Silang",
      Self::Bagumbayan => "Bagumbayan",
      Self::Burgos => "Burgos",
      Self::DelPilar => "Del Pilar",
      Self::Libis => "Libis",
      Self::Mabini => "Mabini",
      Self::Malanday => "Malanday",
      Self::Maly => "Maly",
      Self::Poblacion => "Poblacion",
      Self::Rizal => "Rizal",
      Self::Salvacion => "Salvacion",
      Self::SanIsidro => "San Isidro",
      Self::SanJose => "San Jose",
      Self::SanRafael => "San Rafael",
      Self::SanRoque => "San Roque",
      Self::SantaCruz => "Santa Cruz",
      Self::SantoNino => "Santo Niño",
      Self::Silangan => "Silangan",
    }
  }

  /// Reverse of [`Self::name`]; the set is closed so a scan suffices.
  pub fn from_name(name: &str) -> Option<Self> {
    use strum::IntoEnumIterator as _;
    Self::iter().find(|b| b.name() == name)
  }
}

impl std::fmt::Display for Barangay {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.name())
  }
}

// ─── Status ──────────────────────────────────────────────────────────────────

/// Workflow status. The nominal flow is
/// `Pending → {Approved, Rejected} → Deployed → {Completed, Resigned}`,
/// but transitions are not enforced — an editor may set any status directly.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  EnumIter,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Status {
  #[default]
  Pending,
  Approved,
  Deployed,
  Completed,
  Rejected,
  Resigned,
}

impl Status {
  /// Display colour tag used by the report views. Display-only.
  pub fn color(self) -> &'static str {
    match self {
      Self::Pending => "#f59e0b",
      Self::Approved => "#10b981",
      Self::Deployed => "#3b82f6",
      Self::Completed => "#8b5cf6",
      Self::Rejected => "#ef4444",
      Self::Resigned => "#6b7280",
    }
  }
}

// ─── Name ────────────────────────────────────────────────────────────────────

/// Name parts, stored upper-cased (normalised at write time by the store).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantName {
  pub first:  String,
  pub middle: Option<String>,
  pub last:   String,
  pub suffix: Option<String>,
}

impl ApplicantName {
  /// Upper-case every part, trimming surrounding whitespace.
  pub fn normalized(&self) -> Self {
    let up = |s: &String| s.trim().to_uppercase();
    Self {
      first:  up(&self.first),
      middle: self.middle.as_ref().map(up).filter(|s| !s.is_empty()),
      last:   up(&self.last),
      suffix: self.suffix.as_ref().map(up).filter(|s| !s.is_empty()),
    }
  }
}

// ─── Attachments ─────────────────────────────────────────────────────────────

/// An inline-encoded file captured at submission time. The registry treats
/// `data` as an opaque base64 string keyed by `file_name` — no dedup, no
/// integrity hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
  pub file_name: String,
  pub data:      String,
}

// ─── GIP details ─────────────────────────────────────────────────────────────

/// One rung of the educational-history ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolRecord {
  pub school:    String,
  pub year_from: i32,
  /// `None` while still enrolled.
  pub year_to:   Option<i32>,
}

impl SchoolRecord {
  /// Derived completion label; a filled `year_to` reads as graduated.
  pub fn graduate_label(&self) -> &'static str {
    if self.year_to.is_some() { "Graduate" } else { "Ongoing" }
  }
}

/// The four-rung educational history collected on the GIP form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationHistory {
  pub primary:     Option<SchoolRecord>,
  pub junior_high: Option<SchoolRecord>,
  pub senior_high: Option<SchoolRecord>,
  pub tertiary:    Option<SchoolRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GipDetails {
  #[serde(default)]
  pub education: EducationHistory,
  pub photo:     Option<Attachment>,
}

// ─── TUPAD details ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependent {
  pub name:         String,
  pub relationship: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TupadDetails {
  pub id_type:        String,
  pub id_number:      String,
  pub occupation:     String,
  pub monthly_income: Option<u32>,
  pub dependent:      Option<Dependent>,
}

// ─── ProgramDetails ──────────────────────────────────────────────────────────

/// Program-specific fields, keyed by program. GIP fields are structurally
/// unreachable from a TUPAD record and vice versa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "program", rename_all = "lowercase")]
pub enum ProgramDetails {
  Gip(GipDetails),
  Tupad(TupadDetails),
}

impl ProgramDetails {
  pub fn program(&self) -> Program {
    match self {
      Self::Gip(_) => Program::Gip,
      Self::Tupad(_) => Program::Tupad,
    }
  }
}

// ─── Applicant ───────────────────────────────────────────────────────────────

/// One persisted applicant record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Applicant {
  /// Opaque, system-assigned, immutable.
  pub id: Uuid,
  /// Program-scoped sequential code (`GIP-000001`); immutable once assigned,
  /// never reused even after delete.
  pub code: String,
  pub name: ApplicantName,
  pub birth_date: NaiveDate,
  /// Recomputed from `birth_date` at every write; never trusted from input.
  pub age: u8,
  pub gender: Gender,
  pub barangay: Barangay,
  pub contact_number: String,
  pub email: Option<String>,
  pub address: Option<String>,
  pub details: ProgramDetails,
  pub resume: Option<Attachment>,
  #[serde(default)]
  pub status: Status,
  /// Derived: flipped when status leaves or re-enters `Pending`.
  pub interviewed: bool,
  pub archived: bool,
  /// Non-null iff `archived` is true. ISO date, no time component.
  pub archived_date: Option<NaiveDate>,
  /// Set once at creation; year-scoped statistics key off its calendar year.
  pub date_submitted: DateTime<Utc>,
  /// Stamped on every write. Informational only — last write wins.
  pub updated_at: DateTime<Utc>,
}

impl Applicant {
  pub fn program(&self) -> Program {
    self.details.program()
  }

  /// The GIP tertiary school name, if any — the target of the education
  /// filter.
  pub fn tertiary_education(&self) -> Option<&str> {
    match &self.details {
      ProgramDetails::Gip(g) => {
        g.education.tertiary.as_ref().map(|r| r.school.as_str())
      }
      ProgramDetails::Tupad(_) => None,
    }
  }

  /// Calendar year of submission, used by the year-scoped statistics.
  pub fn submission_year(&self) -> i32 {
    self.date_submitted.year()
  }
}

// ─── Write inputs ────────────────────────────────────────────────────────────

/// Input to [`crate::store::ApplicantStore::create`]. The store assigns
/// `id`, `code`, `date_submitted`, and the derived fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewApplicant {
  pub name: ApplicantName,
  pub birth_date: NaiveDate,
  pub gender: Gender,
  pub barangay: Barangay,
  pub contact_number: String,
  pub email: Option<String>,
  pub address: Option<String>,
  pub details: ProgramDetails,
  pub resume: Option<Attachment>,
}

/// Input to [`crate::store::ApplicantStore::update`]. Identity fields
/// (`code`, `program`, `date_submitted`) are not accepted — they are
/// immutable. `interviewed` is likewise absent: the store derives it from
/// the persisted status (see [`crate::lifecycle`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateApplicant {
  pub name: ApplicantName,
  pub birth_date: NaiveDate,
  pub gender: Gender,
  pub barangay: Barangay,
  pub contact_number: String,
  pub email: Option<String>,
  pub address: Option<String>,
  pub details: ProgramDetails,
  pub resume: Option<Attachment>,
  pub status: Status,
}

// ─── Age ─────────────────────────────────────────────────────────────────────

/// Whole years between `birth_date` and `on`, saturating at zero for future
/// birth dates.
pub fn age_on(birth_date: NaiveDate, on: NaiveDate) -> u8 {
  let mut years = on.year() - birth_date.year();
  if (on.month(), on.day()) < (birth_date.month(), birth_date.day()) {
    years -= 1;
  }
  years.clamp(0, u8::MAX as i32) as u8
}

#[cfg(test)]
mod tests {
  use super::*;

  fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
  }

  #[test]
  fn age_counts_whole_years_only() {
    let birth = d(2000, 6, 15);
    assert_eq!(age_on(birth, d(2025, 6, 14)), 24);
    assert_eq!(age_on(birth, d(2025, 6, 15)), 25);
    assert_eq!(age_on(birth, d(2025, 6, 16)), 25);
  }

  #[test]
  fn age_saturates_for_future_birth_dates() {
    assert_eq!(age_on(d(2030, 1, 1), d(2025, 1, 1)), 0);
  }

  #[test]
  fn name_normalisation_uppercases_and_drops_empty_parts() {
    let name = ApplicantName {
      first:  " Juan ".into(),
      middle: Some("  ".into()),
      last:   "dela Cruz".into(),
      suffix: Some("jr".into()),
    };
    let n = name.normalized();
    assert_eq!(n.first, "JUAN");
    assert_eq!(n.middle, None);
    assert_eq!(n.last, "DELA CRUZ");
    assert_eq!(n.suffix.as_deref(), Some("JR"));
  }

  #[test]
  fn graduate_label_follows_to_year() {
    let done = SchoolRecord {
      school:    "State University".into(),
      year_from: 2018,
      year_to:   Some(2022),
    };
    let ongoing = SchoolRecord { year_to: None, ..done.clone() };
    assert_eq!(done.graduate_label(), "Graduate");
    assert_eq!(ongoing.graduate_label(), "Ongoing");
  }

  #[test]
  fn details_are_keyed_by_program() {
    let gip = ProgramDetails::Gip(GipDetails::default());
    let tupad = ProgramDetails::Tupad(TupadDetails::default());
    assert_eq!(gip.program(), Program::Gip);
    assert_eq!(tupad.program(), Program::Tupad);
  }
}
