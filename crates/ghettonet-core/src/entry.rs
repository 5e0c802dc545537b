//! The central host-address record.
//!
//! An [`Entry`] combines one dotted-numeric address, a list of lower-cased
//! hostnames, an optional timestamp, and the comment lines that surrounded
//! it in the source document.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A timestamp attached to an entry, with any free text that followed the
/// date on the source line preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryDate {
    /// Parsed date and time. Missing hour/minute/second default to zero.
    pub timestamp: NaiveDateTime,
    /// Trailing free text from the date line, if any.
    pub extra: Option<String>,
}

impl EntryDate {
    /// Creates a date with no extra text.
    #[must_use]
    pub fn new(timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp,
            extra: None,
        }
    }
}

/// One parsed host record: an address, its names, an optional date, and
/// the comment/blank lines that preceded it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Dotted-numeric address token. Digit runs are not range-checked.
    pub address: String,
    /// Lower-cased hostname tokens, in source order. Duplicates are
    /// possible before merging.
    pub names: Vec<String>,
    /// At most one date per entry.
    pub date: Option<EntryDate>,
    /// Raw comment and blank lines, presentation-preserving.
    pub comments: Vec<String>,
}

impl Entry {
    /// Creates an entry with a single address and names, no date and no
    /// comments.
    #[must_use]
    pub fn new(address: impl Into<String>, names: Vec<String>) -> Self {
        Self {
            address: address.into(),
            names,
            date: None,
            comments: Vec::new(),
        }
    }

    /// Returns a copy of this entry reduced to one name, with all other
    /// fields carried over.
    ///
    /// Bucketing uses this for entries holding several names; an entry
    /// that already holds exactly one name should be moved into its
    /// bucket instead, so no two buckets alias the same record.
    #[must_use]
    pub fn with_single_name(&self, name: &str) -> Self {
        debug_assert!(self.names.iter().any(|n| n == name));
        Self {
            address: self.address.clone(),
            names: vec![name.to_string()],
            date: self.date.clone(),
            comments: self.comments.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> EntryDate {
        EntryDate::new(
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        )
    }

    #[test]
    fn single_name_copies_all_other_fields() {
        let mut entry = Entry::new("1.2.3.4", vec!["a".to_string(), "b".to_string()]);
        entry.date = Some(date(2010, 12, 4));
        entry.comments = vec!["# c".to_string()];

        let singleton = entry.with_single_name("b");
        assert_eq!(singleton.names, vec!["b".to_string()]);
        assert_eq!(singleton.address, entry.address);
        assert_eq!(singleton.date, entry.date);
        assert_eq!(singleton.comments, entry.comments);
        // the source entry is untouched
        assert_eq!(entry.names.len(), 2);
    }

    #[test]
    fn entry_dates_order_chronologically() {
        assert!(date(2009, 1, 1) < date(2010, 1, 1));
    }
}
