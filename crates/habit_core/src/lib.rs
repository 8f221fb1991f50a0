pub mod cache;
pub mod calendar;
pub mod clock;
pub mod habit;
pub mod ledger;
pub mod reconcile;
pub mod rule;
pub mod streak;

pub use crate::clock::{Clock, FixedClock, SystemClock};
pub use crate::habit::Habit;
pub use crate::ledger::CompletionLedger;
pub use crate::reconcile::{has_schedule_changed, reconcile};
pub use crate::rule::{RecurrenceRule, RuleError, Weekday};
pub use crate::streak::{Streak, StreakUnit};
