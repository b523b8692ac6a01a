//! JSON REST API for the Lingap applicant registry.
//!
//! Exposes an axum [`Router`] backed by any
//! [`lingap_core::store::ApplicantStore`] plus a
//! [`lingap_notify::StatusNotifier`]. Auth, TLS, and transport concerns are
//! the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", lingap_api::api_router(state))
//! ```

pub mod applicants;
pub mod error;
pub mod notifications;
pub mod statistics;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use lingap_core::store::ApplicantStore;
use lingap_notify::StatusNotifier;

pub use error::ApiError;

// ─── State ───────────────────────────────────────────────────────────────────

/// Shared state threaded through all API handlers. Both collaborators are
/// injected at construction — there is no process-wide configuration.
pub struct ApiState<S> {
  pub store:    Arc<S>,
  pub notifier: Arc<dyn StatusNotifier>,
}

// Manual impl: `Arc` clones regardless of whether `S` is `Clone`.
impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      store:    Arc::clone(&self.store),
      notifier: Arc::clone(&self.notifier),
    }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: ApiState<S>) -> Router<()>
where
  S: ApplicantStore + 'static,
{
  Router::new()
    // Applicants
    .route(
      "/applicants",
      get(applicants::list::<S>).post(applicants::create::<S>),
    )
    .route(
      "/applicants/{id}",
      get(applicants::get_one::<S>)
        .put(applicants::update_one::<S>)
        .delete(applicants::delete_one::<S>),
    )
    .route("/applicants/{id}/archive", post(applicants::archive_one::<S>))
    .route(
      "/applicants/{id}/unarchive",
      post(applicants::unarchive_one::<S>),
    )
    // Statistics
    .route("/statistics/overall", get(statistics::overall::<S>))
    .route("/statistics/barangays", get(statistics::barangays::<S>))
    .route("/statistics/statuses", get(statistics::statuses::<S>))
    .route("/statistics/genders", get(statistics::genders::<S>))
    .route("/statistics/applicants", get(statistics::drill_down::<S>))
    // Notifications
    .route("/notifications", post(notifications::send::<S>))
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
