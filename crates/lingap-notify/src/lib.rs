//! Status-notification emails.
//!
//! Notifications are always operator-triggered — never sent automatically on
//! a status change — and only for approval/rejection decisions. The trait is
//! dyn-compatible so the API layer can hold any implementation behind an
//! `Arc<dyn StatusNotifier>`.

use lingap_core::applicant::{Program, Status};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ─── Request / outcome ───────────────────────────────────────────────────────

/// Everything a notification needs; assembled by the operator's action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusNotification {
  pub recipient:      String,
  /// Applicant display name as it should appear in the salutation.
  pub name:           String,
  pub status:         Status,
  pub program:        Program,
  pub applicant_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyOutcome {
  pub success: bool,
  pub message: String,
}

#[derive(Debug, Error)]
pub enum Error {
  /// Notifications are only defined for approval/rejection decisions.
  #[error("no notification is defined for status {0:?}")]
  UnsupportedStatus(Status),

  #[error("invalid email address: {0}")]
  InvalidAddress(String),

  #[error("failed to build message: {0}")]
  Message(String),

  #[error("smtp error: {0}")]
  Smtp(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

// ─── Trait ───────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
pub trait StatusNotifier: Send + Sync {
  /// Implementation name, for logs.
  fn name(&self) -> &str;

  async fn notify(&self, req: StatusNotification) -> Result<NotifyOutcome>;
}

// ─── Message body ────────────────────────────────────────────────────────────

/// Subject and plain-text body for a notification. Split out so it can be
/// rendered without a transport.
pub fn compose(req: &StatusNotification) -> Result<(String, String)> {
  let decision = match req.status {
    Status::Approved => "approved",
    Status::Rejected => "not approved",
    other => return Err(Error::UnsupportedStatus(other)),
  };

  let subject =
    format!("{} application {}: {}", req.program, req.applicant_code, decision);

  let body = match req.status {
    Status::Approved => format!(
      "Dear {},\n\n\
       Your {} application ({}) has been APPROVED. Please visit the \
       municipal office to complete the next steps.\n\n\
       Public Employment Service Office",
      req.name, req.program, req.applicant_code,
    ),
    _ => format!(
      "Dear {},\n\n\
       We regret to inform you that your {} application ({}) was not \
       approved. You may re-apply in the next cycle.\n\n\
       Public Employment Service Office",
      req.name, req.program, req.applicant_code,
    ),
  };

  Ok((subject, body))
}

// ─── SMTP implementation ─────────────────────────────────────────────────────

/// SMTP relay settings, injected at construction (no global config).
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
  pub host:         String,
  pub username:     String,
  pub password:     String,
  /// The From address; defaults to `username` when absent.
  pub from_address: Option<String>,
}

/// Sends notifications through an SMTP relay with STARTTLS.
pub struct SmtpNotifier {
  config: SmtpConfig,
}

impl SmtpNotifier {
  pub fn new(config: SmtpConfig) -> Self {
    Self { config }
  }

  fn send_blocking(config: &SmtpConfig, req: &StatusNotification) -> Result<()> {
    use lettre::message::header::ContentType;
    use lettre::transport::smtp::authentication::Credentials;
    use lettre::{Message, SmtpTransport, Transport};

    let (subject, body) = compose(req)?;
    let from = config.from_address.as_deref().unwrap_or(&config.username);

    let email = Message::builder()
      .from(from.parse().map_err(|_| Error::InvalidAddress(from.into()))?)
      .to(
        req
          .recipient
          .parse()
          .map_err(|_| Error::InvalidAddress(req.recipient.clone()))?,
      )
      .subject(subject)
      .header(ContentType::TEXT_PLAIN)
      .body(body)
      .map_err(|e| Error::Message(e.to_string()))?;

    let creds =
      Credentials::new(config.username.clone(), config.password.clone());
    let mailer = SmtpTransport::starttls_relay(&config.host)
      .map_err(|e| Error::Smtp(e.to_string()))?
      .credentials(creds)
      .build();

    mailer.send(&email).map_err(|e| Error::Smtp(e.to_string()))?;
    Ok(())
  }
}

#[async_trait::async_trait]
impl StatusNotifier for SmtpNotifier {
  fn name(&self) -> &str {
    "smtp"
  }

  async fn notify(&self, req: StatusNotification) -> Result<NotifyOutcome> {
    tracing::info!(
      recipient = %req.recipient,
      code = %req.applicant_code,
      status = ?req.status,
      "sending status notification"
    );

    // lettre's blocking transport runs on the blocking pool.
    let config = self.config.clone();
    let recipient = req.recipient.clone();
    run_blocking(move || Self::send_blocking(&config, &req)).await?;

    Ok(NotifyOutcome {
      success: true,
      message: format!("notification sent to {recipient}"),
    })
  }
}

/// Wrapper so the blocking send surfaces join failures as SMTP errors.
async fn run_blocking<F>(f: F) -> Result<()>
where
  F: FnOnce() -> Result<()> + Send + 'static,
{
  tokio::task::spawn_blocking(f)
    .await
    .map_err(|e| Error::Smtp(e.to_string()))?
}

// ─── No-op implementation ────────────────────────────────────────────────────

/// Succeeds without sending anything. Used in tests and when SMTP is not
/// configured; the outcome message says so.
#[derive(Debug, Default, Clone)]
pub struct NoopNotifier;

#[async_trait::async_trait]
impl StatusNotifier for NoopNotifier {
  fn name(&self) -> &str {
    "noop"
  }

  async fn notify(&self, req: StatusNotification) -> Result<NotifyOutcome> {
    // Still validates the status so misuse fails the same way everywhere.
    let _ = compose(&req)?;
    tracing::debug!(code = %req.applicant_code, "notification suppressed (noop)");
    Ok(NotifyOutcome {
      success: true,
      message: "notifications are not configured; nothing was sent".into(),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn request(status: Status) -> StatusNotification {
    StatusNotification {
      recipient:      "maria.santos@example.com".into(),
      name:           "Maria Santos".into(),
      status,
      program:        Program::Gip,
      applicant_code: "GIP-000001".into(),
    }
  }

  #[test]
  fn compose_covers_both_decisions() {
    let (subject, body) = compose(&request(Status::Approved)).unwrap();
    assert!(subject.contains("GIP-000001"));
    assert!(body.contains("APPROVED"));

    let (_, body) = compose(&request(Status::Rejected)).unwrap();
    assert!(body.contains("not approved"));
  }

  #[test]
  fn compose_rejects_other_statuses() {
    for status in [Status::Pending, Status::Deployed, Status::Completed] {
      assert!(matches!(
        compose(&request(status)),
        Err(Error::UnsupportedStatus(_))
      ));
    }
  }

  #[tokio::test]
  async fn noop_notifier_succeeds_without_sending() {
    let outcome = NoopNotifier.notify(request(Status::Approved)).await.unwrap();
    assert!(outcome.success);
  }

  #[tokio::test]
  async fn noop_notifier_still_enforces_the_status_rule() {
    let err = NoopNotifier.notify(request(Status::Pending)).await.unwrap_err();
    assert!(matches!(err, Error::UnsupportedStatus(Status::Pending)));
  }
}
