//! Handlers for `/statistics` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/statistics/overall` | `?program` required, `?year` optional |
//! | `GET`  | `/statistics/barangays` | One row per barangay, zeros included |
//! | `GET`  | `/statistics/statuses` | One row per status with colour tag |
//! | `GET`  | `/statistics/genders` | Per-gender totals and status counts |
//! | `GET`  | `/statistics/applicants` | Drill-down: the records behind a cell |
//!
//! Every response is re-derived from the live applicant list; nothing is
//! cached or persisted.

use axum::{
  Json,
  extract::{Query, State},
};
use lingap_core::{
  applicant::{Applicant, Barangay, Gender, Program, Status},
  stats::{
    self, BarangayStatistics, GenderStatistics, OverallStatistics,
    StatSelector, StatusStatistics,
  },
  store::ApplicantStore,
};
use serde::Deserialize;

use crate::{ApiState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct StatsParams {
  pub program: Program,
  /// Calendar year of `date_submitted`; absent means all years.
  pub year:    Option<i32>,
}

async fn snapshot<S>(
  state: &ApiState<S>,
  program: Program,
) -> Result<Vec<Applicant>, ApiError>
where
  S: ApplicantStore,
{
  state
    .store
    .list(program)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))
}

/// `GET /statistics/overall?program=...[&year=...]`
pub async fn overall<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<StatsParams>,
) -> Result<Json<OverallStatistics>, ApiError>
where
  S: ApplicantStore,
{
  let applicants = snapshot(&state, params.program).await?;
  Ok(Json(stats::overall(&applicants, params.year)))
}

/// `GET /statistics/barangays?program=...[&year=...]`
pub async fn barangays<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<StatsParams>,
) -> Result<Json<Vec<BarangayStatistics>>, ApiError>
where
  S: ApplicantStore,
{
  let applicants = snapshot(&state, params.program).await?;
  Ok(Json(stats::per_barangay(&applicants, params.year)))
}

/// `GET /statistics/statuses?program=...[&year=...]`
pub async fn statuses<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<StatsParams>,
) -> Result<Json<Vec<StatusStatistics>>, ApiError>
where
  S: ApplicantStore,
{
  let applicants = snapshot(&state, params.program).await?;
  Ok(Json(stats::per_status(&applicants, params.year)))
}

/// `GET /statistics/genders?program=...[&year=...]`
pub async fn genders<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<StatsParams>,
) -> Result<Json<Vec<GenderStatistics>>, ApiError>
where
  S: ApplicantStore,
{
  let applicants = snapshot(&state, params.program).await?;
  Ok(Json(stats::per_gender(&applicants, params.year)))
}

// ─── Drill-down ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct DrillDownParams {
  pub program:  Program,
  pub year:     Option<i32>,
  pub status:   Option<Status>,
  pub barangay: Option<Barangay>,
  pub gender:   Option<Gender>,
}

impl DrillDownParams {
  /// Exactly one cell must be addressed: a status, a barangay, a gender, or
  /// a gender × status pair.
  fn selector(&self) -> Result<StatSelector, ApiError> {
    match (self.status, self.barangay, self.gender) {
      (Some(status), None, Some(gender)) => {
        Ok(StatSelector::GenderStatus { gender, status })
      }
      (Some(status), None, None) => Ok(StatSelector::Status(status)),
      (None, Some(barangay), None) => Ok(StatSelector::Barangay(barangay)),
      (None, None, Some(gender)) => Ok(StatSelector::Gender(gender)),
      _ => Err(ApiError::BadRequest(
        "expected status, barangay, gender, or gender+status".into(),
      )),
    }
  }
}

/// `GET /statistics/applicants?program=...&status=approved[&gender=...]` —
/// the literal records behind one statistics cell (detail views, the
/// email-composer target list).
pub async fn drill_down<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<DrillDownParams>,
) -> Result<Json<Vec<Applicant>>, ApiError>
where
  S: ApplicantStore,
{
  let selector = params.selector()?;
  let applicants = snapshot(&state, params.program).await?;
  let matching: Vec<Applicant> = stats::select(&applicants, selector, params.year)
    .into_iter()
    .cloned()
    .collect();
  Ok(Json(matching))
}
