//! The aggregation engine — roll-up statistics for dashboards and reports.
//!
//! Every function here is a pure re-derivation over the current applicant
//! snapshot: no persisted aggregates, no caching, no incremental update.
//! All statistics share the same scope rule — non-archived records only,
//! optionally restricted to the calendar year of `date_submitted` — so the
//! invariants (per-status counts sum to the total; male + female = total)
//! hold across every view.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::applicant::{Applicant, Barangay, Gender, Status};

// ─── Scope ───────────────────────────────────────────────────────────────────

/// Active records (not archived), optionally restricted to a submission
/// year. The single scope rule shared by every statistic below.
fn active<'a>(
  applicants: &'a [Applicant],
  year: Option<i32>,
) -> impl Iterator<Item = &'a Applicant> {
  applicants
    .iter()
    .filter(move |a| !a.archived && year.is_none_or(|y| a.submission_year() == y))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// A total with its gender split. `male + female == total` by construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderCounts {
  pub total:  usize,
  pub male:   usize,
  pub female: usize,
}

impl GenderCounts {
  fn tally<'a>(iter: impl Iterator<Item = &'a Applicant>) -> Self {
    let mut counts = Self::default();
    for a in iter {
      counts.total += 1;
      match a.gender {
        Gender::Male => counts.male += 1,
        Gender::Female => counts.female += 1,
      }
    }
    counts
  }
}

/// One status cell of a cross-tabulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCell {
  pub status: Status,
  #[serde(flatten)]
  pub counts: GenderCounts,
}

/// One status row with just a count (no gender split).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTally {
  pub status: Status,
  pub count:  usize,
}

fn status_cells<'a, F>(pick: F) -> Vec<StatusCell>
where
  F: Fn(Status) -> GenderCounts,
{
  Status::iter()
    .map(|status| StatusCell { status, counts: pick(status) })
    .collect()
}

// ─── Overall ─────────────────────────────────────────────────────────────────

/// The dashboard headline numbers for one program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverallStatistics {
  pub total: usize,
  pub male: usize,
  pub female: usize,
  /// Distinct barangays with at least one active applicant.
  pub barangays_represented: usize,
  /// One cell per status (all 6), each with its gender split.
  pub statuses: Vec<StatusCell>,
  pub interviewed: GenderCounts,
}

pub fn overall(applicants: &[Applicant], year: Option<i32>) -> OverallStatistics {
  let totals = GenderCounts::tally(active(applicants, year));
  let barangays: HashSet<Barangay> =
    active(applicants, year).map(|a| a.barangay).collect();

  OverallStatistics {
    total: totals.total,
    male: totals.male,
    female: totals.female,
    barangays_represented: barangays.len(),
    statuses: status_cells(|status| {
      GenderCounts::tally(active(applicants, year).filter(|a| a.status == status))
    }),
    interviewed: GenderCounts::tally(
      active(applicants, year).filter(|a| a.interviewed),
    ),
  }
}

// ─── Per barangay ────────────────────────────────────────────────────────────

/// One report row per barangay. Every one of the 18 barangays gets a row,
/// zero counts included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarangayStatistics {
  pub barangay: Barangay,
  #[serde(flatten)]
  pub counts:   GenderCounts,
  pub statuses: Vec<StatusTally>,
}

pub fn per_barangay(
  applicants: &[Applicant],
  year: Option<i32>,
) -> Vec<BarangayStatistics> {
  Barangay::iter()
    .map(|barangay| {
      let here =
        || active(applicants, year).filter(move |a| a.barangay == barangay);
      BarangayStatistics {
        barangay,
        counts: GenderCounts::tally(here()),
        statuses: Status::iter()
          .map(|status| StatusTally {
            status,
            count: here().filter(|a| a.status == status).count(),
          })
          .collect(),
      }
    })
    .collect()
}

// ─── Per status ──────────────────────────────────────────────────────────────

/// One report row per status, with the display colour tag for charts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusStatistics {
  pub status: Status,
  pub color:  String,
  #[serde(flatten)]
  pub counts: GenderCounts,
}

pub fn per_status(
  applicants: &[Applicant],
  year: Option<i32>,
) -> Vec<StatusStatistics> {
  Status::iter()
    .map(|status| StatusStatistics {
      status,
      color: status.color().to_owned(),
      counts: GenderCounts::tally(
        active(applicants, year).filter(|a| a.status == status),
      ),
    })
    .collect()
}

// ─── Per gender ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenderStatistics {
  pub gender:   Gender,
  pub total:    usize,
  pub statuses: Vec<StatusTally>,
}

pub fn per_gender(
  applicants: &[Applicant],
  year: Option<i32>,
) -> Vec<GenderStatistics> {
  Gender::iter()
    .map(|gender| {
      let here = || active(applicants, year).filter(move |a| a.gender == gender);
      GenderStatistics {
        gender,
        total: here().count(),
        statuses: Status::iter()
          .map(|status| StatusTally {
            status,
            count: here().filter(|a| a.status == status).count(),
          })
          .collect(),
      }
    })
    .collect()
}

// ─── Drill-down ──────────────────────────────────────────────────────────────

/// Addresses one cell of the statistics views; [`select`] returns the
/// literal records behind it (detail modals, email-composer targets).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatSelector {
  Status(Status),
  Barangay(Barangay),
  Gender(Gender),
  GenderStatus { gender: Gender, status: Status },
}

impl StatSelector {
  fn matches(&self, a: &Applicant) -> bool {
    match *self {
      Self::Status(status) => a.status == status,
      Self::Barangay(barangay) => a.barangay == barangay,
      Self::Gender(gender) => a.gender == gender,
      Self::GenderStatus { gender, status } => {
        a.gender == gender && a.status == status
      }
    }
  }
}

pub fn select<'a>(
  applicants: &'a [Applicant],
  selector: StatSelector,
  year: Option<i32>,
) -> Vec<&'a Applicant> {
  active(applicants, year)
    .filter(|a| selector.matches(a))
    .collect()
}

// ─── Test fixtures ───────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod test_fixtures {
  use chrono::{NaiveDate, TimeZone, Utc};
  use uuid::Uuid;

  use crate::applicant::{
    Applicant, ApplicantName, Gender, GipDetails, ProgramDetails, Status,
    Barangay,
  };

  /// A minimal active GIP applicant submitted in 2025, barangay Poblacion.
  pub(crate) fn applicant(code: &str, gender: Gender, status: Status) -> Applicant {
    let submitted = Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap();
    Applicant {
      id: Uuid::new_v4(),
      code: code.to_owned(),
      name: ApplicantName {
        first:  "JUAN".into(),
        middle: None,
        last:   "DELA CRUZ".into(),
        suffix: None,
      },
      birth_date: NaiveDate::from_ymd_opt(2003, 1, 15).unwrap(),
      age: 22,
      gender,
      barangay: Barangay::Poblacion,
      contact_number: "09171234567".into(),
      email: None,
      address: None,
      details: ProgramDetails::Gip(GipDetails::default()),
      resume: None,
      status,
      interviewed: status != Status::Pending,
      archived: false,
      archived_date: None,
      date_submitted: submitted,
      updated_at: submitted,
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone, Utc};

  use super::{test_fixtures::applicant, *};

  fn roster() -> Vec<Applicant> {
    let mut set = vec![
      applicant("GIP-000001", Gender::Male, Status::Pending),
      applicant("GIP-000002", Gender::Female, Status::Approved),
      applicant("GIP-000003", Gender::Female, Status::Approved),
      applicant("GIP-000004", Gender::Male, Status::Deployed),
      applicant("GIP-000005", Gender::Female, Status::Rejected),
    ];
    set[3].barangay = Barangay::SanIsidro;
    set
  }

  #[test]
  fn overall_counts_sum_to_total() {
    let stats = overall(&roster(), None);
    assert_eq!(stats.total, 5);
    assert_eq!(stats.male + stats.female, stats.total);

    let by_status: usize = stats.statuses.iter().map(|c| c.counts.total).sum();
    assert_eq!(by_status, stats.total);

    assert_eq!(stats.barangays_represented, 2);
    // Everyone past Pending has been interviewed.
    assert_eq!(stats.interviewed.total, 4);
    assert_eq!(stats.interviewed.female, 3);
  }

  #[test]
  fn archived_records_leave_the_totals() {
    let mut set = roster();
    set[1].archived = true;

    let stats = overall(&set, None);
    assert_eq!(stats.total, 4);
    let approved = stats
      .statuses
      .iter()
      .find(|c| c.status == Status::Approved)
      .unwrap();
    assert_eq!(approved.counts.total, 1);
  }

  #[test]
  fn every_barangay_gets_a_row_including_zero_counts() {
    let rows = per_barangay(&roster(), None);
    assert_eq!(rows.len(), 18);

    let poblacion = rows
      .iter()
      .find(|r| r.barangay == Barangay::Poblacion)
      .unwrap();
    assert_eq!(poblacion.counts.total, 4);
    assert_eq!(poblacion.counts.male + poblacion.counts.female, 4);

    let empty = rows.iter().find(|r| r.barangay == Barangay::Maly).unwrap();
    assert_eq!(empty.counts.total, 0);
    assert!(empty.statuses.iter().all(|t| t.count == 0));
  }

  #[test]
  fn per_status_rows_cover_all_six_and_carry_colours() {
    let rows = per_status(&roster(), None);
    assert_eq!(rows.len(), 6);
    assert!(rows.iter().all(|r| !r.color.is_empty()));

    let total: usize = rows.iter().map(|r| r.counts.total).sum();
    assert_eq!(total, overall(&roster(), None).total);
  }

  #[test]
  fn per_gender_cross_tabulates_statuses() {
    let rows = per_gender(&roster(), None);
    assert_eq!(rows.len(), 2);

    let female = rows.iter().find(|r| r.gender == Gender::Female).unwrap();
    assert_eq!(female.total, 3);
    let approved = female
      .statuses
      .iter()
      .find(|t| t.status == Status::Approved)
      .unwrap();
    assert_eq!(approved.count, 2);
  }

  #[test]
  fn year_scope_restricts_every_view() {
    let mut set = roster();
    set[0].date_submitted = Utc.with_ymd_and_hms(2024, 11, 2, 9, 0, 0).unwrap();

    assert_eq!(overall(&set, Some(2024)).total, 1);
    assert_eq!(overall(&set, Some(2025)).total, 4);
    assert_eq!(overall(&set, None).total, 5);

    let rows = per_barangay(&set, Some(2024));
    let poblacion = rows
      .iter()
      .find(|r| r.barangay == Barangay::Poblacion)
      .unwrap();
    assert_eq!(poblacion.counts.total, 1);
  }

  #[test]
  fn drill_down_returns_the_literal_records() {
    let set = roster();

    let approved = select(&set, StatSelector::Status(Status::Approved), None);
    assert_eq!(approved.len(), 2);
    assert!(approved.iter().all(|a| a.status == Status::Approved));

    let cell = select(
      &set,
      StatSelector::GenderStatus { gender: Gender::Female, status: Status::Approved },
      None,
    );
    assert_eq!(cell.len(), 2);

    let san_isidro = select(&set, StatSelector::Barangay(Barangay::SanIsidro), None);
    assert_eq!(san_isidro.len(), 1);
    assert_eq!(san_isidro[0].code, "GIP-000004");
  }

  #[test]
  fn drill_down_skips_archived_records() {
    let mut set = roster();
    set[1].archived = true;
    let approved = select(&set, StatSelector::Status(Status::Approved), None);
    assert_eq!(approved.len(), 1);
    assert_eq!(approved[0].code, "GIP-000003");
  }
}
