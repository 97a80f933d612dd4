//! Search filtering over fetched collections.
//!
//! Case-insensitive substring match against a fixed per-entity field list.
//! The field lists mirror what the management pages expose in their tables:
//! SVCs match on credential number, rank, and station; users additionally on
//! name, email, and phone.

use shared::domain::{Rank, Station, SvcRecord, UserRecord};

/// A record that can be probed with a lowercased search needle.
pub trait Matchable {
    fn matches(&self, needle: &str) -> bool;
}

/// Returns the records whose configured fields contain `query`,
/// case-insensitively. A blank query returns the collection unchanged. The
/// source slice is never mutated.
pub fn filter<T: Matchable + Clone>(records: &[T], query: &str) -> Vec<T> {
    let query = query.trim();
    if query.is_empty() {
        return records.to_vec();
    }
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| record.matches(&needle))
        .cloned()
        .collect()
}

fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|text| text.to_lowercase().contains(needle))
}

impl Matchable for SvcRecord {
    fn matches(&self, needle: &str) -> bool {
        contains_ci(Some(self.officer_svc.as_str()), needle)
            || contains_ci(self.officer_rank.map(Rank::label), needle)
            || contains_ci(self.police_station.map(Station::label), needle)
    }
}

impl Matchable for UserRecord {
    fn matches(&self, needle: &str) -> bool {
        contains_ci(self.full_name.as_deref(), needle)
            || contains_ci(self.officer_svc.as_deref(), needle)
            || contains_ci(self.officer_rank.map(Rank::label), needle)
            || contains_ci(self.police_station.map(Station::label), needle)
            || contains_ci(self.email.as_deref(), needle)
            || contains_ci(self.phone.as_deref(), needle)
    }
}

#[cfg(test)]
#[path = "tests/filter_tests.rs"]
mod tests;
