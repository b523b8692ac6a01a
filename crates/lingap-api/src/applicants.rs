//! Handlers for `/applicants` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/applicants` | `?program` required; `?archived` partitions; filter params optional |
//! | `POST`   | `/applicants` | Body: [`NewApplicant`]; 201 + stored record |
//! | `GET`    | `/applicants/:id` | 404 if not found |
//! | `PUT`    | `/applicants/:id` | Body: [`UpdateApplicant`] |
//! | `DELETE` | `/applicants/:id` | Permanent, no undo |
//! | `POST`   | `/applicants/:id/archive` | Soft delete |
//! | `POST`   | `/applicants/:id/unarchive` | Restore |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use lingap_core::{
  applicant::{
    Applicant, Barangay, Gender, NewApplicant, Program, Status,
    UpdateApplicant,
  },
  filter::{AgeRange, FilterCriteria},
  store::ApplicantStore,
  validate,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

fn store_err<E: std::error::Error + Send + Sync + 'static>(e: E) -> ApiError {
  ApiError::Store(Box::new(e))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// Query parameters for the roster listing. Absent filter fields mean "no
/// filter" — the UI's "All …" sentinels never reach this layer.
#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub program:   Program,
  /// `true` selects the archived view; default is the active roster.
  #[serde(default)]
  pub archived:  bool,
  pub search:    Option<String>,
  pub status:    Option<Status>,
  pub barangay:  Option<Barangay>,
  pub gender:    Option<Gender>,
  /// `"min-max"` or `"min+"`.
  pub age_range: Option<AgeRange>,
  pub education: Option<String>,
}

/// `GET /applicants?program=gip[&archived=true][&search=...][&status=...]…`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Applicant>>, ApiError>
where
  S: ApplicantStore,
{
  let all = state.store.list(params.program).await.map_err(store_err)?;

  let criteria = FilterCriteria {
    search:    params.search,
    status:    params.status,
    barangay:  params.barangay,
    gender:    params.gender,
    age_range: params.age_range,
    education: params.education,
  };

  // Archive partition first, then the filter criteria.
  let matching = all
    .into_iter()
    .filter(|a| a.archived == params.archived)
    .filter(|a| criteria.matches(a))
    .collect();

  Ok(Json(matching))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /applicants` — 201 + the stored record.
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<NewApplicant>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ApplicantStore,
{
  // The pre-write gate runs here so the caller gets a 400, not a 500; the
  // store validates again before writing.
  let today = chrono::Utc::now().date_naive();
  validate::validate_new(&body, today)
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

  let applicant = state.store.create(body).await.map_err(store_err)?;
  Ok((StatusCode::CREATED, Json(applicant)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /applicants/:id`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Applicant>, ApiError>
where
  S: ApplicantStore,
{
  let applicant = state
    .store
    .get(id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| ApiError::NotFound(format!("applicant {id} not found")))?;
  Ok(Json(applicant))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /applicants/:id`
pub async fn update_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<UpdateApplicant>,
) -> Result<Json<Applicant>, ApiError>
where
  S: ApplicantStore,
{
  let today = chrono::Utc::now().date_naive();
  validate::validate_update(&body, today)
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

  let old = state
    .store
    .get(id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| ApiError::NotFound(format!("applicant {id} not found")))?;

  // The store refuses this too, but here it maps to a 400.
  if body.details.program() != old.program() {
    return Err(ApiError::BadRequest(
      "program: cannot move an applicant between programs".into(),
    ));
  }

  let updated = state.store.update(id, body).await.map_err(store_err)?;
  Ok(Json(updated))
}

// ─── Archive lifecycle ───────────────────────────────────────────────────────

/// `POST /applicants/:id/archive`
pub async fn archive_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: ApplicantStore,
{
  ensure_exists(&state, id).await?;
  state.store.archive(id).await.map_err(store_err)?;
  Ok(StatusCode::NO_CONTENT)
}

/// `POST /applicants/:id/unarchive`
pub async fn unarchive_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: ApplicantStore,
{
  ensure_exists(&state, id).await?;
  state.store.unarchive(id).await.map_err(store_err)?;
  Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /applicants/:id` — permanent.
pub async fn delete_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: ApplicantStore,
{
  ensure_exists(&state, id).await?;
  state.store.delete(id).await.map_err(store_err)?;
  Ok(StatusCode::NO_CONTENT)
}

/// Turn a dangling id into a 404 before the write is attempted (e.g. the
/// double-submit of a delete).
async fn ensure_exists<S>(state: &ApiState<S>, id: Uuid) -> Result<(), ApiError>
where
  S: ApplicantStore,
{
  state
    .store
    .get(id)
    .await
    .map_err(store_err)?
    .map(|_| ())
    .ok_or_else(|| ApiError::NotFound(format!("applicant {id} not found")))
}
