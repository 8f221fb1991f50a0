use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RuleError {
    #[error("weekday number {0} is outside 1..=7")]
    InvalidWeekday(u8),
    #[error("day of month {0} is outside 1..=31")]
    InvalidDayOfMonth(u8),
}

/// Calendar weekday with the Sunday-first numbering used in stored rules
/// (Sunday = 1 through Saturday = 7).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub fn from_number(number: u8) -> Result<Self, RuleError> {
        match number {
            1 => Ok(Self::Sunday),
            2 => Ok(Self::Monday),
            3 => Ok(Self::Tuesday),
            4 => Ok(Self::Wednesday),
            5 => Ok(Self::Thursday),
            6 => Ok(Self::Friday),
            7 => Ok(Self::Saturday),
            other => Err(RuleError::InvalidWeekday(other)),
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Self::Sunday => 1,
            Self::Monday => 2,
            Self::Tuesday => 3,
            Self::Wednesday => 4,
            Self::Thursday => 5,
            Self::Friday => 6,
            Self::Saturday => 7,
        }
    }

    pub fn of(date: NaiveDate) -> Self {
        match date.weekday() {
            chrono::Weekday::Sun => Self::Sunday,
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
        }
    }
}

/// The policy deciding which calendar dates a habit is due. An empty
/// weekday or day-of-month set is a valid never-scheduled state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecurrenceRule {
    Daily,
    Weekly { weekdays: BTreeSet<Weekday> },
    Monthly { days: BTreeSet<u8> },
}

impl RecurrenceRule {
    pub fn weekly(weekdays: impl IntoIterator<Item = Weekday>) -> Self {
        Self::Weekly {
            weekdays: weekdays.into_iter().collect(),
        }
    }

    /// Weekly rule from Sunday-first day numbers, rejecting anything
    /// outside 1..=7.
    pub fn weekly_from_numbers(
        numbers: impl IntoIterator<Item = u8>,
    ) -> Result<Self, RuleError> {
        let mut weekdays = BTreeSet::new();
        for number in numbers {
            weekdays.insert(Weekday::from_number(number)?);
        }
        Ok(Self::Weekly { weekdays })
    }

    /// Monthly rule over day-of-month numbers, rejecting anything outside
    /// 1..=31. Values are never clamped.
    pub fn monthly(days: impl IntoIterator<Item = u8>) -> Result<Self, RuleError> {
        let mut set = BTreeSet::new();
        for day in days {
            if !(1..=31).contains(&day) {
                return Err(RuleError::InvalidDayOfMonth(day));
            }
            set.insert(day);
        }
        Ok(Self::Monthly { days: set })
    }

    pub fn is_scheduled(&self, date: NaiveDate) -> bool {
        match self {
            Self::Daily => true,
            Self::Weekly { weekdays } => weekdays.contains(&Weekday::of(date)),
            Self::Monthly { days } => days.contains(&(date.day() as u8)),
        }
    }

    /// A date can be toggled only when it is scheduled and not in the
    /// future; completions are never recorded ahead of time.
    pub fn can_toggle(&self, date: NaiveDate, today: NaiveDate) -> bool {
        self.is_scheduled(date) && calendar::is_past_or_today(date, today)
    }
}
