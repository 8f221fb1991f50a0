use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The set of calendar days a habit was marked done, at most one entry per
/// day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionLedger {
    days: BTreeSet<NaiveDate>,
}

impl CompletionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_days(days: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            days: days.into_iter().collect(),
        }
    }

    pub fn is_completed(&self, date: NaiveDate) -> bool {
        self.days.contains(&date)
    }

    /// Flips the completion state for `date` and returns whether the date
    /// is now completed. Toggling the same date twice restores the
    /// original ledger.
    pub fn toggle(&mut self, date: NaiveDate) -> bool {
        if self.days.remove(&date) {
            false
        } else {
            self.days.insert(date);
            true
        }
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.iter().copied()
    }

    /// The most recent completion, if any.
    pub fn latest(&self) -> Option<NaiveDate> {
        self.days.iter().next_back().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn toggle_is_its_own_inverse() {
        let original = CompletionLedger::from_days([ymd(2025, 6, 10), ymd(2025, 6, 11)]);
        let mut ledger = original.clone();
        ledger.toggle(ymd(2025, 6, 12));
        ledger.toggle(ymd(2025, 6, 12));
        assert_eq!(ledger, original);

        ledger.toggle(ymd(2025, 6, 10));
        ledger.toggle(ymd(2025, 6, 10));
        assert_eq!(ledger, original);
    }

    #[test]
    fn toggle_flips_membership() {
        let mut ledger = CompletionLedger::new();
        let date = ymd(2025, 6, 12);
        assert!(!ledger.is_completed(date));
        assert!(ledger.toggle(date));
        assert!(ledger.is_completed(date));
        assert!(!ledger.toggle(date));
        assert!(!ledger.is_completed(date));
    }

    #[test]
    fn duplicate_days_collapse() {
        let ledger =
            CompletionLedger::from_days([ymd(2025, 6, 10), ymd(2025, 6, 10), ymd(2025, 6, 11)]);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn latest_returns_the_most_recent_day() {
        let ledger = CompletionLedger::from_days([ymd(2025, 6, 10), ymd(2025, 5, 1)]);
        assert_eq!(ledger.latest(), Some(ymd(2025, 6, 10)));
        assert_eq!(CompletionLedger::new().latest(), None);
    }

    #[test]
    fn serializes_as_a_sorted_date_list() {
        let ledger = CompletionLedger::from_days([ymd(2025, 6, 11), ymd(2025, 6, 10)]);
        let json = serde_json::to_string(&ledger).unwrap();
        assert_eq!(json, r#"["2025-06-10","2025-06-11"]"#);
        let back: CompletionLedger = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ledger);
    }
}
