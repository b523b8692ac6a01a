//! Sequential applicant-code generation.
//!
//! Codes are human-facing (`GIP-000001`, `TPD-000001`), scoped to a program,
//! and never reused. The next code is derived by scanning the existing set —
//! acceptable at municipal scale. Uniqueness under concurrent creation is
//! the store's responsibility (a `UNIQUE(program, code)` constraint plus
//! retry); this module is pure.

use crate::applicant::Program;

/// Width of the zero-padded numeric suffix.
const SUFFIX_WIDTH: usize = 6;

/// Parse the numeric suffix of `code` if it matches `{PREFIX}-{6 digits}`
/// for `program`. Malformed codes yield `None` and are ignored by the scan.
pub fn parse_suffix(program: Program, code: &str) -> Option<u32> {
  let rest = code.strip_prefix(program.code_prefix())?;
  let digits = rest.strip_prefix('-')?;
  if digits.len() != SUFFIX_WIDTH || !digits.bytes().all(|b| b.is_ascii_digit())
  {
    return None;
  }
  digits.parse().ok()
}

/// Format a code from its numeric suffix.
pub fn format_code(program: Program, suffix: u32) -> String {
  format!("{}-{suffix:0width$}", program.code_prefix(), width = SUFFIX_WIDTH)
}

/// The next code for `program` given every existing code (any program,
/// well-formed or not): max matching suffix plus one, starting at `000001`.
pub fn next_code<'a, I>(program: Program, existing: I) -> String
where
  I: IntoIterator<Item = &'a str>,
{
  let max = existing
    .into_iter()
    .filter_map(|c| parse_suffix(program, c))
    .max()
    .unwrap_or(0);
  format_code(program, max + 1)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn first_code_starts_at_one() {
    assert_eq!(next_code(Program::Gip, []), "GIP-000001");
    assert_eq!(next_code(Program::Tupad, []), "TPD-000001");
  }

  #[test]
  fn next_code_is_max_plus_one() {
    let existing = ["GIP-000001", "GIP-000007", "GIP-000003"];
    assert_eq!(next_code(Program::Gip, existing), "GIP-000008");
  }

  #[test]
  fn gaps_are_not_reused() {
    // 2 was deleted; the scan still continues from the max.
    let existing = ["GIP-000001", "GIP-000003"];
    assert_eq!(next_code(Program::Gip, existing), "GIP-000004");
  }

  #[test]
  fn other_program_codes_are_ignored() {
    let existing = ["TPD-000009", "GIP-000002"];
    assert_eq!(next_code(Program::Gip, existing), "GIP-000003");
    assert_eq!(next_code(Program::Tupad, existing), "TPD-000010");
  }

  #[test]
  fn malformed_codes_are_ignored() {
    let existing = [
      "GIP-12345",     // too short
      "GIP-1234567",   // too long
      "GIP-00000X",    // non-digit
      "GIP000004",     // missing hyphen
      "gip-000009",    // wrong case
      "GIP-000002",
    ];
    assert_eq!(next_code(Program::Gip, existing), "GIP-000003");
  }

  #[test]
  fn suffix_roundtrip() {
    assert_eq!(parse_suffix(Program::Gip, "GIP-000042"), Some(42));
    assert_eq!(format_code(Program::Gip, 42), "GIP-000042");
    assert_eq!(parse_suffix(Program::Tupad, "GIP-000042"), None);
  }
}
