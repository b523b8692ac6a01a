//! Pre-write validation gates.
//!
//! Every check runs before any write reaches the store; a failure rejects
//! the whole operation and nothing is persisted. Validation is a gate, not a
//! stored constraint — the store schema does not re-encode these rules.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use chrono::NaiveDate;

use crate::{
  Error, Result,
  applicant::{
    age_on, ApplicantName, Attachment, NewApplicant, Program, ProgramDetails,
    UpdateApplicant,
  },
};

/// Validate a creation payload as of `today` (the submission date).
pub fn validate_new(input: &NewApplicant, today: NaiveDate) -> Result<()> {
  validate_common(
    &input.name,
    input.birth_date,
    &input.contact_number,
    &input.details,
    input.resume.as_ref(),
    today,
  )
}

/// Validate an update payload as of `today`.
pub fn validate_update(input: &UpdateApplicant, today: NaiveDate) -> Result<()> {
  validate_common(
    &input.name,
    input.birth_date,
    &input.contact_number,
    &input.details,
    input.resume.as_ref(),
    today,
  )
}

fn validate_common(
  name: &ApplicantName,
  birth_date: NaiveDate,
  contact_number: &str,
  details: &ProgramDetails,
  resume: Option<&Attachment>,
  today: NaiveDate,
) -> Result<()> {
  required(name.first.trim(), "first_name")?;
  required(name.last.trim(), "last_name")?;
  check_contact_number(contact_number)?;
  check_age(details.program(), birth_date, today)?;

  match details {
    ProgramDetails::Gip(gip) => {
      if let Some(photo) = &gip.photo {
        check_attachment(photo, "photo")?;
      }
    }
    ProgramDetails::Tupad(tupad) => {
      required(tupad.id_type.trim(), "id_type")?;
      required(tupad.id_number.trim(), "id_number")?;
      required(tupad.occupation.trim(), "occupation")?;
    }
  }

  if let Some(resume) = resume {
    check_attachment(resume, "resume")?;
  }

  Ok(())
}

fn required(value: &str, field: &str) -> Result<()> {
  if value.is_empty() {
    return Err(Error::validation(field, "required"));
  }
  Ok(())
}

/// PH mobile format: `09` followed by nine digits.
fn check_contact_number(number: &str) -> Result<()> {
  let ok = number.len() == 11
    && number.starts_with("09")
    && number.bytes().all(|b| b.is_ascii_digit());
  if !ok {
    return Err(Error::validation(
      "contact_number",
      "must be an 11-digit mobile number starting with 09",
    ));
  }
  Ok(())
}

fn check_age(program: Program, birth_date: NaiveDate, today: NaiveDate) -> Result<()> {
  let age = age_on(birth_date, today);
  let (min, max) = program.age_bounds();
  if age < min || age > max {
    return Err(Error::AgeIneligible { program, age, min, max });
  }
  Ok(())
}

/// The attachment payload is opaque, but it must at least be valid base64.
fn check_attachment(attachment: &Attachment, field: &str) -> Result<()> {
  required(attachment.file_name.trim(), field)?;
  if B64.decode(&attachment.data).is_err() {
    return Err(Error::validation(field, "attachment data is not valid base64"));
  }
  Ok(())
}
