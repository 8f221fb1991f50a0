use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{calendar, ledger::CompletionLedger, rule::RecurrenceRule};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreakUnit {
    Day,
    Week,
}

/// An unbroken completion run ending at (or just before) the reference
/// date. Derived on demand; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub count: u32,
    pub unit: StreakUnit,
}

impl Streak {
    pub fn none(unit: StreakUnit) -> Self {
        Self { count: 0, unit }
    }
}

/// Consecutive completed days ending at the reference date. An uncompleted
/// `today` does not break the run while the day is still in progress; the
/// scan then starts from yesterday instead.
pub fn current_streak(ledger: &CompletionLedger, today: NaiveDate) -> u32 {
    if ledger.is_empty() {
        return 0;
    }

    let mut current = today;
    if !ledger.is_completed(current) {
        current = calendar::previous_day(current);
    }

    let mut streak = 0;
    while ledger.is_completed(current) {
        streak += 1;
        let previous = calendar::previous_day(current);
        if previous == current {
            break;
        }
        current = previous;
    }
    streak
}

/// Consecutive satisfied weeks ending at the reference date's week. The
/// current week is excused while it is still unsatisfied; the scan then
/// starts from the previous week.
pub fn weekly_streak(rule: &RecurrenceRule, ledger: &CompletionLedger, today: NaiveDate) -> u32 {
    if ledger.is_empty() {
        return 0;
    }

    let mut week = calendar::week_range(today);
    if !week_satisfied(rule, ledger, &week) {
        let previous = previous_week(&week);
        if previous == week {
            return 0;
        }
        week = previous;
    }

    let mut streak = 0;
    while week_satisfied(rule, ledger, &week) {
        streak += 1;
        let previous = previous_week(&week);
        if previous == week {
            break;
        }
        week = previous;
    }
    streak
}

/// The streak for a habit under its active rule: day-counted for daily
/// habits, week-counted for weekly ones. Monthly habits carry no streak.
pub fn streak_for(rule: &RecurrenceRule, ledger: &CompletionLedger, today: NaiveDate) -> Streak {
    match rule {
        RecurrenceRule::Daily => Streak {
            count: current_streak(ledger, today),
            unit: StreakUnit::Day,
        },
        RecurrenceRule::Weekly { .. } => Streak {
            count: weekly_streak(rule, ledger, today),
            unit: StreakUnit::Week,
        },
        RecurrenceRule::Monthly { .. } => Streak::none(StreakUnit::Day),
    }
}

/// Display string for a streak, empty when there is nothing to show.
pub fn streak_text(rule: &RecurrenceRule, ledger: &CompletionLedger, today: NaiveDate) -> String {
    let streak = streak_for(rule, ledger, today);
    if streak.count == 0 {
        return String::new();
    }
    match streak.unit {
        StreakUnit::Day => format!("{} day streak 🔥", streak.count),
        StreakUnit::Week => format!("{} week streak 🔥", streak.count),
    }
}

/// Whether the Monday-start week containing `date` is fully completed. A
/// daily habit needs all seven days; otherwise the week's scheduled subset
/// must be non-empty and entirely completed.
pub fn is_week_fully_completed(
    rule: &RecurrenceRule,
    ledger: &CompletionLedger,
    date: NaiveDate,
) -> bool {
    let week = calendar::week_range(date);
    match rule {
        RecurrenceRule::Daily => week.iter().all(|day| ledger.is_completed(*day)),
        _ => week_satisfied(rule, ledger, &week),
    }
}

/// Same predicate over every day of the month containing `date`. A daily
/// habit schedules the whole month.
pub fn is_month_fully_completed(
    rule: &RecurrenceRule,
    ledger: &CompletionLedger,
    date: NaiveDate,
) -> bool {
    let scheduled: Vec<NaiveDate> = calendar::month_days(date)
        .into_iter()
        .filter(|day| rule.is_scheduled(*day))
        .collect();
    !scheduled.is_empty() && scheduled.iter().all(|day| ledger.is_completed(*day))
}

fn week_satisfied(
    rule: &RecurrenceRule,
    ledger: &CompletionLedger,
    week: &[NaiveDate; 7],
) -> bool {
    let mut scheduled_any = false;
    for day in week {
        if rule.is_scheduled(*day) {
            scheduled_any = true;
            if !ledger.is_completed(*day) {
                return false;
            }
        }
    }
    scheduled_any
}

fn previous_week(week: &[NaiveDate; 7]) -> [NaiveDate; 7] {
    calendar::week_range(calendar::days_back(week[0], 7))
}
