//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("notification error: {0}")]
  Notify(#[from] lingap_notify::Error),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
      // Operator mistakes are 400s; a failing relay is an upstream fault.
      ApiError::Notify(e) => match e {
        lingap_notify::Error::UnsupportedStatus(_)
        | lingap_notify::Error::InvalidAddress(_) => {
          (StatusCode::BAD_REQUEST, e.to_string())
        }
        _ => (StatusCode::BAD_GATEWAY, e.to_string()),
      },
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
