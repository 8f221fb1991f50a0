use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    ledger::CompletionLedger,
    reconcile,
    rule::RecurrenceRule,
    streak::{self, Streak},
};

/// A tracked habit: identity and display fields plus the active recurrence
/// rule and the completion history it governs. The rule and ledger are
/// owned exclusively; dropping the habit drops both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: Uuid,
    pub name: String,
    pub color_hex: String,
    pub icon: String,
    pub created_at: DateTime<Utc>,
    rule: RecurrenceRule,
    ledger: CompletionLedger,
    #[serde(default)]
    version: u64,
}

impl Habit {
    pub fn new(
        name: impl Into<String>,
        color_hex: impl Into<String>,
        icon: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            color_hex: color_hex.into(),
            icon: icon.into(),
            created_at: now,
            rule: RecurrenceRule::Daily,
            ledger: CompletionLedger::new(),
            version: 0,
        }
    }

    pub fn rule(&self) -> &RecurrenceRule {
        &self.rule
    }

    pub fn ledger(&self) -> &CompletionLedger {
        &self.ledger
    }

    /// Monotonic mutation counter; changes whenever the rule or ledger
    /// does. Memoization layers key on it.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_scheduled_on(&self, date: NaiveDate) -> bool {
        self.rule.is_scheduled(date)
    }

    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        self.ledger.is_completed(date)
    }

    pub fn can_toggle(&self, date: NaiveDate, today: NaiveDate) -> bool {
        self.rule.can_toggle(date, today)
    }

    /// Flips completion for `date` when the rule allows it. Returns whether
    /// the ledger changed; unscheduled and future dates are rejected.
    pub fn toggle_completion(&mut self, date: NaiveDate, today: NaiveDate) -> bool {
        if !self.rule.can_toggle(date, today) {
            return false;
        }
        self.ledger.toggle(date);
        self.version += 1;
        true
    }

    /// Installs a new recurrence rule, pruning completions the new rule no
    /// longer schedules before the rule takes effect. The ledger is never
    /// observed holding completions invalid under the active rule. Returns
    /// the number of discarded completions.
    pub fn set_rule(&mut self, new_rule: RecurrenceRule) -> usize {
        let reconciled = reconcile::reconcile(&self.ledger, &new_rule);
        let pruned = self.ledger.len() - reconciled.len();
        self.ledger = reconciled;
        self.rule = new_rule;
        self.version += 1;
        pruned
    }

    pub fn streak(&self, today: NaiveDate) -> Streak {
        streak::streak_for(&self.rule, &self.ledger, today)
    }

    pub fn streak_text(&self, today: NaiveDate) -> String {
        streak::streak_text(&self.rule, &self.ledger, today)
    }

    pub fn is_week_fully_completed(&self, date: NaiveDate) -> bool {
        streak::is_week_fully_completed(&self.rule, &self.ledger, date)
    }

    pub fn is_month_fully_completed(&self, date: NaiveDate) -> bool {
        streak::is_month_fully_completed(&self.rule, &self.ledger, date)
    }
}
