//! [`SqliteStore`] — the SQLite implementation of [`ApplicantStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use lingap_core::{
  applicant::{Applicant, NewApplicant, Program, UpdateApplicant},
  code::{format_code, next_code, parse_suffix},
  lifecycle::derive_interview_flag,
  store::ApplicantStore,
  validate::{validate_new, validate_update},
};

use crate::{
  Error, Result,
  encode::{
    RawApplicant, encode_attachment, encode_barangay, encode_date,
    encode_details, encode_dt, encode_gender, encode_program, encode_status,
    encode_uuid,
  },
  error::is_unique_violation,
  schema::SCHEMA,
};

/// Attempts at reserving a code before giving up. More than one retry is
/// only ever needed with a concurrent writer on the same file.
const CODE_RETRIES: u32 = 3;

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Lingap applicant registry backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert `applicant` with a freshly scanned code, both inside one
  /// transaction. Returns the code actually reserved.
  async fn insert_with_code(&self, applicant: &Applicant) -> Result<String> {
    let program = applicant.program();
    let program_str = encode_program(program).to_owned();

    let id_str        = encode_uuid(applicant.id);
    let first         = applicant.name.first.clone();
    let middle        = applicant.name.middle.clone();
    let last          = applicant.name.last.clone();
    let suffix        = applicant.name.suffix.clone();
    let birth_str     = encode_date(applicant.birth_date);
    let age           = applicant.age as i64;
    let gender_str    = encode_gender(applicant.gender).to_owned();
    let barangay_str  = encode_barangay(applicant.barangay).to_owned();
    let contact       = applicant.contact_number.clone();
    let email         = applicant.email.clone();
    let address       = applicant.address.clone();
    let details_str   = encode_details(&applicant.details)?;
    let resume_str    = applicant
      .resume
      .as_ref()
      .map(encode_attachment)
      .transpose()?;
    let status_str    = encode_status(applicant.status).to_owned();
    let submitted_str = encode_dt(applicant.date_submitted);
    let updated_str   = encode_dt(applicant.updated_at);

    let code = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let codes: Vec<String> = {
          let mut stmt =
            tx.prepare("SELECT code FROM applicants WHERE program = ?1")?;
          stmt
            .query_map(rusqlite::params![program_str], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };

        // The counter outlives deleted rows; feeding it into the scan as a
        // synthetic code keeps deleted suffixes from being reissued.
        let counter: Option<i64> = tx
          .query_row(
            "SELECT last_suffix FROM code_counters WHERE program = ?1",
            rusqlite::params![program_str],
            |row| row.get(0),
          )
          .optional()?;
        let counter_code =
          format_code(program, counter.unwrap_or(0).max(0) as u32);

        let code = next_code(
          program,
          codes
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(counter_code.as_str())),
        );
        let last_suffix = parse_suffix(program, &code).unwrap_or(1) as i64;

        tx.execute(
          "INSERT INTO code_counters (program, last_suffix) VALUES (?1, ?2)
           ON CONFLICT (program) DO UPDATE SET last_suffix = ?2",
          rusqlite::params![program_str, last_suffix],
        )?;

        tx.execute(
          "INSERT INTO applicants (
             id, program, code, first_name, middle_name, last_name, suffix,
             birth_date, age, gender, barangay, contact_number, email,
             address, details_json, resume_json, status, interviewed,
             archived, archived_date, date_submitted, updated_at
           ) VALUES (
             ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14,
             ?15, ?16, ?17, 0, 0, NULL, ?18, ?19
           )",
          rusqlite::params![
            id_str,
            program_str,
            code,
            first,
            middle,
            last,
            suffix,
            birth_str,
            age,
            gender_str,
            barangay_str,
            contact,
            email,
            address,
            details_str,
            resume_str,
            status_str,
            submitted_str,
            updated_str,
          ],
        )?;

        tx.commit()?;
        Ok(code)
      })
      .await?;

    Ok(code)
  }

  /// Run an UPDATE/DELETE that targets one id; zero affected rows means the
  /// record is gone.
  async fn execute_on_id<F>(&self, id: Uuid, run: F) -> Result<()>
  where
    F: FnOnce(&mut rusqlite::Connection, String) -> rusqlite::Result<usize>
      + Send
      + 'static,
  {
    let id_str = encode_uuid(id);
    let affected = self.conn.call(move |conn| Ok(run(conn, id_str)?)).await?;
    if affected == 0 {
      return Err(Error::ApplicantNotFound(id));
    }
    Ok(())
  }
}

// ─── ApplicantStore impl ─────────────────────────────────────────────────────

impl ApplicantStore for SqliteStore {
  type Error = Error;

  async fn list(&self, program: Program) -> Result<Vec<Applicant>> {
    let program_str = encode_program(program).to_owned();

    let raws: Vec<RawApplicant> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {} FROM applicants WHERE program = ?1 ORDER BY rowid",
          RawApplicant::COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![program_str], RawApplicant::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawApplicant::into_applicant).collect()
  }

  async fn get(&self, id: Uuid) -> Result<Option<Applicant>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawApplicant> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {} FROM applicants WHERE id = ?1",
          RawApplicant::COLUMNS
        );
        Ok(
          conn
            .query_row(&sql, rusqlite::params![id_str], RawApplicant::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawApplicant::into_applicant).transpose()
  }

  async fn create(&self, input: NewApplicant) -> Result<Applicant> {
    let now = Utc::now();
    validate_new(&input, now.date_naive())?;

    let mut applicant = Applicant {
      id: Uuid::new_v4(),
      code: String::new(), // reserved inside the insert transaction
      name: input.name.normalized(),
      birth_date: input.birth_date,
      age: lingap_core::applicant::age_on(input.birth_date, now.date_naive()),
      gender: input.gender,
      barangay: input.barangay,
      contact_number: input.contact_number,
      email: input.email,
      address: input.address,
      details: input.details,
      resume: input.resume,
      status: Default::default(),
      interviewed: false,
      archived: false,
      archived_date: None,
      date_submitted: now,
      updated_at: now,
    };

    // The scan and the insert share a transaction, so in-process creations
    // cannot collide. A second writer on the same file can still take the
    // scanned code first; UNIQUE (program, code) turns that into a retry.
    for attempt in 1..=CODE_RETRIES {
      match self.insert_with_code(&applicant).await {
        Ok(code) => {
          applicant.code = code;
          return Ok(applicant);
        }
        Err(Error::Database(e))
          if is_unique_violation(&e) && attempt < CODE_RETRIES =>
        {
          tracing::warn!(attempt, "applicant code collision, retrying");
        }
        Err(e) => return Err(e),
      }
    }
    Err(Error::CodeExhausted)
  }

  async fn update(&self, id: Uuid, input: UpdateApplicant) -> Result<Applicant> {
    let now = Utc::now();
    validate_update(&input, now.date_naive())?;

    let old = self.get(id).await?.ok_or(Error::ApplicantNotFound(id))?;

    // Program is immutable; the details variant must stay on it.
    if input.details.program() != old.program() {
      return Err(Error::Core(lingap_core::Error::validation(
        "program",
        "cannot move an applicant between programs",
      )));
    }

    // Derived from the persisted status, never from client form state.
    let interviewed =
      derive_interview_flag(old.status, input.status, old.interviewed);

    let updated = Applicant {
      id,
      code: old.code,
      name: input.name.normalized(),
      birth_date: input.birth_date,
      age: lingap_core::applicant::age_on(input.birth_date, now.date_naive()),
      gender: input.gender,
      barangay: input.barangay,
      contact_number: input.contact_number,
      email: input.email,
      address: input.address,
      details: input.details,
      resume: input.resume,
      status: input.status,
      interviewed,
      archived: old.archived,
      archived_date: old.archived_date,
      date_submitted: old.date_submitted,
      updated_at: now,
    };

    let first        = updated.name.first.clone();
    let middle       = updated.name.middle.clone();
    let last         = updated.name.last.clone();
    let suffix       = updated.name.suffix.clone();
    let birth_str    = encode_date(updated.birth_date);
    let age          = updated.age as i64;
    let gender_str   = encode_gender(updated.gender).to_owned();
    let barangay_str = encode_barangay(updated.barangay).to_owned();
    let contact      = updated.contact_number.clone();
    let email        = updated.email.clone();
    let address      = updated.address.clone();
    let details_str  = encode_details(&updated.details)?;
    let resume_str   = updated
      .resume
      .as_ref()
      .map(encode_attachment)
      .transpose()?;
    let status_str   = encode_status(updated.status).to_owned();
    let updated_str  = encode_dt(updated.updated_at);

    self
      .execute_on_id(id, move |conn, id_str| {
        conn.execute(
          "UPDATE applicants SET
             first_name = ?2, middle_name = ?3, last_name = ?4, suffix = ?5,
             birth_date = ?6, age = ?7, gender = ?8, barangay = ?9,
             contact_number = ?10, email = ?11, address = ?12,
             details_json = ?13, resume_json = ?14, status = ?15,
             interviewed = ?16, updated_at = ?17
           WHERE id = ?1",
          rusqlite::params![
            id_str,
            first,
            middle,
            last,
            suffix,
            birth_str,
            age,
            gender_str,
            barangay_str,
            contact,
            email,
            address,
            details_str,
            resume_str,
            status_str,
            interviewed,
            updated_str,
          ],
        )
      })
      .await?;

    Ok(updated)
  }

  async fn archive(&self, id: Uuid) -> Result<()> {
    let now = Utc::now();
    let date_str = encode_date(now.date_naive());
    let updated_str = encode_dt(now);

    self
      .execute_on_id(id, move |conn, id_str| {
        conn.execute(
          "UPDATE applicants
           SET archived = 1, archived_date = ?2, updated_at = ?3
           WHERE id = ?1",
          rusqlite::params![id_str, date_str, updated_str],
        )
      })
      .await
  }

  async fn unarchive(&self, id: Uuid) -> Result<()> {
    let updated_str = encode_dt(Utc::now());

    self
      .execute_on_id(id, move |conn, id_str| {
        conn.execute(
          "UPDATE applicants
           SET archived = 0, archived_date = NULL, updated_at = ?2
           WHERE id = ?1",
          rusqlite::params![id_str, updated_str],
        )
      })
      .await
  }

  async fn delete(&self, id: Uuid) -> Result<()> {
    self
      .execute_on_id(id, move |conn, id_str| {
        conn.execute(
          "DELETE FROM applicants WHERE id = ?1",
          rusqlite::params![id_str],
        )
      })
      .await
  }
}
