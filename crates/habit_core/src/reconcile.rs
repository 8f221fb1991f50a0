use crate::{ledger::CompletionLedger, rule::RecurrenceRule};

/// Drops every completion the new rule no longer schedules. Pruning only;
/// reconciliation never adds completions, and dates still valid under the
/// new rule pass through untouched.
pub fn reconcile(ledger: &CompletionLedger, new_rule: &RecurrenceRule) -> CompletionLedger {
    CompletionLedger::from_days(ledger.iter().filter(|day| new_rule.is_scheduled(*day)))
}

/// Whether replacing `old` with `new` changes the habit's schedule: a
/// different rule kind, or the same kind over a different day set. Set
/// equality ignores ordering, and cosmetic habit fields never participate.
pub fn has_schedule_changed(old: &RecurrenceRule, new: &RecurrenceRule) -> bool {
    old != new
}
