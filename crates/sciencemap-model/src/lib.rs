//! Science map record model
//!
//! Typed views over the dataset's JSON documents:
//! - `EventRecord`: a dated occurrence, with optional `personId` and `influence_chain`
//! - `PersonRecord`: a historical figure, with the list of Event ids they took part in
//! - `StubRecord`: a placeholder Event fabricated from an identifier alone
//!
//! The typed views only name the fields the tooling reasons about; every other
//! field is kept in `extra` so nothing is lost when a record is inspected.

pub mod record;
pub mod stub;

pub use record::*;
pub use stub::*;

/// Separator between the lexical segments of an identifier (`newton_laws_1687`).
pub const ID_SEPARATOR: char = '_';

/// Whether `id` can name a record file: non-empty, not `.` or `..`, and free
/// of path separators and NUL.
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id != "."
        && id != ".."
        && !id.contains(|c: char| matches!(c, '/' | '\\' | '\0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_must_stay_inside_their_directory() {
        assert!(is_valid_id("newton_laws_1687"));
        assert!(is_valid_id("pythagoras_theorem_BC570"));
        assert!(!is_valid_id(""));
        assert!(!is_valid_id(".."));
        assert!(!is_valid_id("../../escaped/pwn_1"));
        assert!(!is_valid_id("nested/event_1"));
        assert!(!is_valid_id("c:\\windows_1"));
    }
}
