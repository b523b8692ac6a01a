//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings; calendar dates are ISO `YYYY-MM-DD`.
//! Program details and attachments are stored as JSON. UUIDs are stored as
//! hyphenated lowercase strings.

use chrono::{DateTime, NaiveDate, Utc};
use lingap_core::applicant::{
  Applicant, ApplicantName, Attachment, Barangay, Gender, Program,
  ProgramDetails, Status,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── Timestamps and dates ────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::Decode(e.to_string()))
}

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::Decode(e.to_string()))
}

// ─── Program ─────────────────────────────────────────────────────────────────

pub fn encode_program(p: Program) -> &'static str {
  match p {
    Program::Gip => "gip",
    Program::Tupad => "tupad",
  }
}

pub fn decode_program(s: &str) -> Result<Program> {
  match s {
    "gip" => Ok(Program::Gip),
    "tupad" => Ok(Program::Tupad),
    other => Err(Error::Decode(format!("unknown program: {other:?}"))),
  }
}

// ─── Gender ──────────────────────────────────────────────────────────────────

pub fn encode_gender(g: Gender) -> &'static str {
  match g {
    Gender::Male => "male",
    Gender::Female => "female",
  }
}

pub fn decode_gender(s: &str) -> Result<Gender> {
  match s {
    "male" => Ok(Gender::Male),
    "female" => Ok(Gender::Female),
    other => Err(Error::Decode(format!("unknown gender: {other:?}"))),
  }
}

// ─── Status ──────────────────────────────────────────────────────────────────

pub fn encode_status(s: Status) -> &'static str {
  match s {
    Status::Pending => "pending",
    Status::Approved => "approved",
    Status::Deployed => "deployed",
    Status::Completed => "completed",
    Status::Rejected => "rejected",
    Status::Resigned => "resigned",
  }
}

pub fn decode_status(s: &str) -> Result<Status> {
  match s {
    "pending" => Ok(Status::Pending),
    "approved" => Ok(Status::Approved),
    "deployed" => Ok(Status::Deployed),
    "completed" => Ok(Status::Completed),
    "rejected" => Ok(Status::Rejected),
    "resigned" => Ok(Status::Resigned),
    other => Err(Error::Decode(format!("unknown status: {other:?}"))),
  }
}

// ─── Barangay ────────────────────────────────────────────────────────────────

/// Barangays are stored by display name; the set is closed so a reverse scan
/// over the enum suffices.
pub fn encode_barangay(b: Barangay) -> &'static str { b.name() }

pub fn decode_barangay(s: &str) -> Result<Barangay> {
  Barangay::from_name(s)
    .ok_or_else(|| Error::Decode(format!("unknown barangay: {s:?}")))
}

// ─── JSON columns ────────────────────────────────────────────────────────────

pub fn encode_details(d: &ProgramDetails) -> Result<String> {
  Ok(serde_json::to_string(d)?)
}

pub fn decode_details(s: &str) -> Result<ProgramDetails> {
  Ok(serde_json::from_str(s)?)
}

pub fn encode_attachment(a: &Attachment) -> Result<String> {
  Ok(serde_json::to_string(a)?)
}

pub fn decode_attachment(s: &str) -> Result<Attachment> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// Raw strings read directly from an `applicants` row.
pub struct RawApplicant {
  pub id:             String,
  pub code:           String,
  pub first_name:     String,
  pub middle_name:    Option<String>,
  pub last_name:      String,
  pub suffix:         Option<String>,
  pub birth_date:     String,
  pub age:            i64,
  pub gender:         String,
  pub barangay:       String,
  pub contact_number: String,
  pub email:          Option<String>,
  pub address:        Option<String>,
  pub details_json:   String,
  pub resume_json:    Option<String>,
  pub status:         String,
  pub interviewed:    bool,
  pub archived:       bool,
  pub archived_date:  Option<String>,
  pub date_submitted: String,
  pub updated_at:     String,
}

impl RawApplicant {
  /// Column list matching the field order above (`id` through `updated_at`).
  pub const COLUMNS: &'static str = "id, code, first_name, middle_name, \
     last_name, suffix, birth_date, age, gender, barangay, contact_number, \
     email, address, details_json, resume_json, status, interviewed, \
     archived, archived_date, date_submitted, updated_at";

  /// Build from a row selected with [`Self::COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:             row.get(0)?,
      code:           row.get(1)?,
      first_name:     row.get(2)?,
      middle_name:    row.get(3)?,
      last_name:      row.get(4)?,
      suffix:         row.get(5)?,
      birth_date:     row.get(6)?,
      age:            row.get(7)?,
      gender:         row.get(8)?,
      barangay:       row.get(9)?,
      contact_number: row.get(10)?,
      email:          row.get(11)?,
      address:        row.get(12)?,
      details_json:   row.get(13)?,
      resume_json:    row.get(14)?,
      status:         row.get(15)?,
      interviewed:    row.get(16)?,
      archived:       row.get(17)?,
      archived_date:  row.get(18)?,
      date_submitted: row.get(19)?,
      updated_at:     row.get(20)?,
    })
  }

  pub fn into_applicant(self) -> Result<Applicant> {
    Ok(Applicant {
      id: decode_uuid(&self.id)?,
      code: self.code,
      name: ApplicantName {
        first:  self.first_name,
        middle: self.middle_name,
        last:   self.last_name,
        suffix: self.suffix,
      },
      birth_date: decode_date(&self.birth_date)?,
      age: u8::try_from(self.age)
        .map_err(|_| Error::Decode(format!("age out of range: {}", self.age)))?,
      gender: decode_gender(&self.gender)?,
      barangay: decode_barangay(&self.barangay)?,
      contact_number: self.contact_number,
      email: self.email,
      address: self.address,
      details: decode_details(&self.details_json)?,
      resume: self.resume_json.as_deref().map(decode_attachment).transpose()?,
      status: decode_status(&self.status)?,
      interviewed: self.interviewed,
      archived: self.archived,
      archived_date: self
        .archived_date
        .as_deref()
        .map(decode_date)
        .transpose()?,
      date_submitted: decode_dt(&self.date_submitted)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}
