//! Deployment-time sample data.
//!
//! Invoked explicitly (the server binary's `seed` subcommand), never on
//! first load. Idempotent: a program that already has records is left
//! untouched.

use chrono::{Datelike, NaiveDate, Utc};
use lingap_core::{
  applicant::{
    ApplicantName, Barangay, Dependent, EducationHistory, Gender, GipDetails,
    NewApplicant, Program, ProgramDetails, SchoolRecord, TupadDetails,
  },
  store::ApplicantStore as _,
};

use crate::{Result, SqliteStore};

/// Insert the sample roster for any program that has no records yet.
/// Returns the number of applicants created.
pub async fn seed(store: &SqliteStore) -> Result<usize> {
  let mut created = 0;

  for program in [Program::Gip, Program::Tupad] {
    if !store.list(program).await?.is_empty() {
      tracing::info!(%program, "already has records, skipping seed");
      continue;
    }
    let roster = match program {
      Program::Gip => gip_samples(),
      Program::Tupad => tupad_samples(),
    };
    for input in roster {
      let applicant = store.create(input).await?;
      tracing::info!(code = %applicant.code, "seeded applicant");
      created += 1;
    }
  }

  Ok(created)
}

/// A birth date `years` back from today. Fixed to mid-June so the sample
/// ages stay inside the eligibility windows year-round.
fn born_years_ago(years: i32) -> NaiveDate {
  let today = Utc::now().date_naive();
  NaiveDate::from_ymd_opt(today.year() - years, 6, 15)
    .unwrap_or(today)
}

fn name(first: &str, last: &str) -> ApplicantName {
  ApplicantName {
    first:  first.into(),
    middle: None,
    last:   last.into(),
    suffix: None,
  }
}

fn gip_samples() -> Vec<NewApplicant> {
  let tertiary = |school: &str| EducationHistory {
    tertiary: Some(SchoolRecord {
      school:    school.into(),
      year_from: 2019,
      year_to:   Some(2023),
    }),
    ..Default::default()
  };

  vec![
    NewApplicant {
      name: name("Maria", "Santos"),
      birth_date: born_years_ago(22),
      gender: Gender::Female,
      barangay: Barangay::Poblacion,
      contact_number: "09171230001".into(),
      email: Some("maria.santos@example.com".into()),
      address: None,
      details: ProgramDetails::Gip(GipDetails {
        education: tertiary("Rizal State College"),
        photo:     None,
      }),
      resume: None,
    },
    NewApplicant {
      name: name("Jose", "Reyes"),
      birth_date: born_years_ago(24),
      gender: Gender::Male,
      barangay: Barangay::SanIsidro,
      contact_number: "09171230002".into(),
      email: None,
      address: None,
      details: ProgramDetails::Gip(GipDetails {
        education: tertiary("Polytechnic University"),
        photo:     None,
      }),
      resume: None,
    },
    NewApplicant {
      name: name("Ana", "Bautista"),
      birth_date: born_years_ago(19),
      gender: Gender::Female,
      barangay: Barangay::BagongSilang,
      contact_number: "09171230003".into(),
      email: None,
      address: None,
      details: ProgramDetails::Gip(GipDetails::default()),
      resume: None,
    },
  ]
}

fn tupad_samples() -> Vec<NewApplicant> {
  vec![
    NewApplicant {
      name: name("Pedro", "Garcia"),
      birth_date: born_years_ago(45),
      gender: Gender::Male,
      barangay: Barangay::Malanday,
      contact_number: "09181230001".into(),
      email: None,
      address: None,
      details: ProgramDetails::Tupad(TupadDetails {
        id_type:        "PhilSys".into(),
        id_number:      "6301-2345-6789".into(),
        occupation:     "Construction worker".into(),
        monthly_income: Some(8000),
        dependent:      Some(Dependent {
          name:         "Luz Garcia".into(),
          relationship: "Spouse".into(),
        }),
      }),
      resume: None,
    },
    NewApplicant {
      name: name("Rosa", "Mendoza"),
      birth_date: born_years_ago(38),
      gender: Gender::Female,
      barangay: Barangay::SantaCruz,
      contact_number: "09181230002".into(),
      email: None,
      address: None,
      details: ProgramDetails::Tupad(TupadDetails {
        id_type:        "Voter's ID".into(),
        id_number:      "VIN-2210-5521".into(),
        occupation:     "Street vendor".into(),
        monthly_income: Some(6000),
        dependent:      None,
      }),
      resume: None,
    },
  ]
}
