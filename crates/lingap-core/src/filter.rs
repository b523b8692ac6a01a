//! The filter engine — composable predicates over an applicant list.
//!
//! All criteria are optional and AND-combined. The UI's "All …" sentinel
//! values never reach this layer; an absent field means "no filter".
//! Archived partitioning is applied by callers before display and is not a
//! criterion here.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::applicant::{Applicant, Barangay, Gender, Status};

// ─── Age range ───────────────────────────────────────────────────────────────

/// An inclusive age band, parsed from `"min-max"` or the open-ended `"min+"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AgeRange {
  pub min: u8,
  pub max: Option<u8>,
}

impl AgeRange {
  pub fn contains(&self, age: u8) -> bool {
    age >= self.min && self.max.is_none_or(|max| age <= max)
  }
}

impl FromStr for AgeRange {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = s.trim();
    if let Some(min) = s.strip_suffix('+') {
      let min = min.parse().map_err(|_| format!("bad age range: {s:?}"))?;
      return Ok(Self { min, max: None });
    }
    let (min, max) = s
      .split_once('-')
      .ok_or_else(|| format!("bad age range: {s:?}"))?;
    let min = min.trim().parse().map_err(|_| format!("bad age range: {s:?}"))?;
    let max = max.trim().parse().map_err(|_| format!("bad age range: {s:?}"))?;
    Ok(Self { min, max: Some(max) })
  }
}

impl TryFrom<String> for AgeRange {
  type Error = String;

  fn try_from(s: String) -> Result<Self, Self::Error> {
    s.parse()
  }
}

impl From<AgeRange> for String {
  fn from(r: AgeRange) -> Self {
    match r.max {
      Some(max) => format!("{}-{max}", r.min),
      None => format!("{}+", r.min),
    }
  }
}

// ─── Criteria ────────────────────────────────────────────────────────────────

/// Parameters for [`filter`]. Every field is optional; present fields are
/// AND-combined.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
  /// Case-insensitive substring over first name, last name, code, or
  /// barangay name (OR across the four).
  pub search:    Option<String>,
  pub status:    Option<Status>,
  pub barangay:  Option<Barangay>,
  pub gender:    Option<Gender>,
  pub age_range: Option<AgeRange>,
  /// Exact match against the GIP tertiary school record.
  pub education: Option<String>,
}

impl FilterCriteria {
  /// Whether `applicant` passes every present criterion.
  pub fn matches(&self, applicant: &Applicant) -> bool {
    if let Some(term) = &self.search {
      let term = term.to_lowercase();
      let hit = applicant.name.first.to_lowercase().contains(&term)
        || applicant.name.last.to_lowercase().contains(&term)
        || applicant.code.to_lowercase().contains(&term)
        || applicant.barangay.name().to_lowercase().contains(&term);
      if !hit {
        return false;
      }
    }
    if self.status.is_some_and(|s| applicant.status != s) {
      return false;
    }
    if self.barangay.is_some_and(|b| applicant.barangay != b) {
      return false;
    }
    if self.gender.is_some_and(|g| applicant.gender != g) {
      return false;
    }
    if self.age_range.is_some_and(|r| !r.contains(applicant.age)) {
      return false;
    }
    if let Some(education) = &self.education {
      if applicant.tertiary_education() != Some(education.as_str()) {
        return false;
      }
    }
    true
  }
}

/// Narrow `applicants` to those matching `criteria`, preserving order.
pub fn filter<'a>(
  applicants: &'a [Applicant],
  criteria: &FilterCriteria,
) -> Vec<&'a Applicant> {
  applicants.iter().filter(|a| criteria.matches(a)).collect()
}
