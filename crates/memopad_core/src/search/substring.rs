//! Case-insensitive substring matching over note fields.
//!
//! # Responsibility
//! - Decide whether a note matches a user query.
//! - Filter a note sequence without reordering it.
//!
//! # Invariants
//! - Matching is pure: no storage access, no side effects.
//! - A blank query matches every note, so the empty-query result set is
//!   always identical to the full list.

use crate::model::note::Note;

/// Normalizes a raw user query for matching.
///
/// Surrounding whitespace carries no search intent, so it is stripped before
/// the substring test. Lowercasing is Unicode-aware.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Returns whether `note` matches the already-normalized `query`.
///
/// A note matches when the query is a substring of its lowercased title or
/// content. The empty query matches everything.
pub fn matches_normalized(note: &Note, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    note.title.to_lowercase().contains(query) || note.content.to_lowercase().contains(query)
}

/// Returns whether `note` matches the raw user `query`.
pub fn matches(note: &Note, query: &str) -> bool {
    matches_normalized(note, &normalize_query(query))
}

/// Filters `notes` by `query`, preserving the input order.
pub fn filter_notes(notes: &[Note], query: &str) -> Vec<Note> {
    let normalized = normalize_query(query);
    notes
        .iter()
        .filter(|note| matches_normalized(note, &normalized))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{filter_notes, matches, normalize_query};
    use crate::model::note::Note;

    fn note(title: &str, content: &str) -> Note {
        Note::new(title, content)
    }

    #[test]
    fn match_is_case_insensitive_on_both_fields() {
        let groceries = note("Groceries", "milk, eggs");
        assert!(matches(&groceries, "EGG"));
        assert!(matches(&groceries, "grocer"));
        assert!(!matches(&groceries, "bread"));
    }

    #[test]
    fn blank_query_matches_everything() {
        let empty_note = note("", "");
        assert!(matches(&empty_note, ""));
        assert!(matches(&empty_note, "   "));
    }

    #[test]
    fn query_whitespace_is_trimmed_before_matching() {
        let groceries = note("Groceries", "milk");
        assert!(matches(&groceries, "  milk "));
        assert_eq!(normalize_query("  Milk "), "milk");
    }

    #[test]
    fn unicode_queries_lowercase_correctly() {
        let trip = note("Reisepläne", "ÜBER die Alpen");
        assert!(matches(&trip, "über"));
        assert!(matches(&trip, "reisepläne"));
    }

    #[test]
    fn filter_preserves_input_order() {
        let notes = vec![note("b note", "x"), note("a note", "x"), note("c", "y")];
        let hits = filter_notes(&notes, "note");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "b note");
        assert_eq!(hits[1].title, "a note");
    }
}
