use std::collections::HashMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::streak::Streak;

/// Memoized streak results keyed by habit, reference date, and the habit's
/// mutation version. Entries for stale versions of a habit are dropped on
/// insert; correctness never depends on a hit.
#[derive(Debug, Default)]
pub struct StreakCache {
    entries: HashMap<(Uuid, NaiveDate, u64), Streak>,
}

impl StreakCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, habit_id: Uuid, date: NaiveDate, version: u64) -> Option<Streak> {
        self.entries.get(&(habit_id, date, version)).copied()
    }

    pub fn insert(&mut self, habit_id: Uuid, date: NaiveDate, version: u64, streak: Streak) {
        self.entries
            .retain(|(id, _, ver), _| *id != habit_id || *ver == version);
        self.entries.insert((habit_id, date, version), streak);
    }

    /// Forgets everything cached for one habit, e.g. when it is deleted.
    pub fn invalidate(&mut self, habit_id: Uuid) {
        self.entries.retain(|(id, _, _), _| *id != habit_id);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::streak::StreakUnit;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn streak(count: u32) -> Streak {
        Streak {
            count,
            unit: StreakUnit::Day,
        }
    }

    #[test]
    fn hits_require_the_matching_version() {
        let mut cache = StreakCache::new();
        let id = Uuid::new_v4();
        cache.insert(id, ymd(2025, 6, 12), 3, streak(5));
        assert_eq!(cache.get(id, ymd(2025, 6, 12), 3), Some(streak(5)));
        assert_eq!(cache.get(id, ymd(2025, 6, 12), 4), None);
        assert_eq!(cache.get(id, ymd(2025, 6, 13), 3), None);
    }

    #[test]
    fn inserting_a_newer_version_drops_the_stale_entries() {
        let mut cache = StreakCache::new();
        let id = Uuid::new_v4();
        cache.insert(id, ymd(2025, 6, 11), 1, streak(2));
        cache.insert(id, ymd(2025, 6, 12), 2, streak(3));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(id, ymd(2025, 6, 11), 1), None);
    }

    #[test]
    fn invalidation_is_per_habit() {
        let mut cache = StreakCache::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        cache.insert(a, ymd(2025, 6, 12), 1, streak(1));
        cache.insert(b, ymd(2025, 6, 12), 1, streak(9));
        cache.invalidate(a);
        assert_eq!(cache.get(a, ymd(2025, 6, 12), 1), None);
        assert_eq!(cache.get(b, ymd(2025, 6, 12), 1), Some(streak(9)));
    }
}
