//! SQL schema for the Lingap SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// One applicants table per deployment — `program` is a column, not a table.
/// `UNIQUE (program, code)` backs the code-reservation retry in `create`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS applicants (
    id             TEXT PRIMARY KEY,
    program        TEXT NOT NULL,      -- 'gip' | 'tupad'
    code           TEXT NOT NULL,      -- 'GIP-000001' / 'TPD-000001'
    first_name     TEXT NOT NULL,      -- stored upper-cased
    middle_name    TEXT,
    last_name      TEXT NOT NULL,
    suffix         TEXT,
    birth_date     TEXT NOT NULL,      -- ISO date
    age            INTEGER NOT NULL,   -- recomputed from birth_date at write
    gender         TEXT NOT NULL,      -- 'male' | 'female'
    barangay       TEXT NOT NULL,      -- display name, closed set of 18
    contact_number TEXT NOT NULL,
    email          TEXT,
    address        TEXT,
    details_json   TEXT NOT NULL,      -- program-tagged ProgramDetails JSON
    resume_json    TEXT,               -- Attachment JSON or NULL
    status         TEXT NOT NULL DEFAULT 'pending',
    interviewed    INTEGER NOT NULL DEFAULT 0,
    archived       INTEGER NOT NULL DEFAULT 0,
    archived_date  TEXT,               -- ISO date; non-null iff archived
    date_submitted TEXT NOT NULL,      -- RFC 3339 UTC; set once at creation
    updated_at     TEXT NOT NULL,      -- RFC 3339 UTC; informational only
    UNIQUE (program, code)
);

-- Monotonic per-program code counter. It outlives deleted rows, so a code
-- is never reissued even after the highest-numbered record is deleted.
CREATE TABLE IF NOT EXISTS code_counters (
    program     TEXT PRIMARY KEY,
    last_suffix INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS applicants_program_idx  ON applicants(program);
CREATE INDEX IF NOT EXISTS applicants_status_idx   ON applicants(status);
CREATE INDEX IF NOT EXISTS applicants_barangay_idx ON applicants(barangay);

PRAGMA user_version = 1;
";
