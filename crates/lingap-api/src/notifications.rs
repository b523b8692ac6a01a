//! Handler for `POST /notifications`.
//!
//! Status notifications are operator-triggered only; the server never sends
//! one as a side effect of a status change.

use axum::{Json, extract::State};
use lingap_core::store::ApplicantStore;
use lingap_notify::{NotifyOutcome, StatusNotification};

use crate::{ApiState, error::ApiError};

/// `POST /notifications` — body: [`StatusNotification`].
///
/// Only approval/rejection statuses are accepted; anything else is a 400.
pub async fn send<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<StatusNotification>,
) -> Result<Json<NotifyOutcome>, ApiError>
where
  S: ApplicantStore,
{
  let outcome = state.notifier.notify(body).await?;
  Ok(Json(outcome))
}
