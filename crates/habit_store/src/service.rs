use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Result};
use chrono::NaiveDate;
use habit_core::{
    cache::StreakCache, has_schedule_changed, Clock, Habit, RecurrenceRule, Streak, SystemClock,
};
use parking_lot::{Mutex, RwLock};
use uuid::Uuid;

/// Cosmetic and scheduling fields accepted by [`HabitService::update_habit`].
#[derive(Debug, Clone)]
pub struct HabitUpdate {
    pub name: String,
    pub color_hex: String,
    pub icon: String,
    pub rule: RecurrenceRule,
}

/// What an update did: whether the schedule changed and how many
/// completions the rule change invalidated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub schedule_changed: bool,
    pub pruned_completions: usize,
}

/// In-memory habit store with optional JSON file persistence. Each
/// mutation is serialized through the service lock and written back to the
/// store path before it returns.
pub struct HabitService {
    path: Option<PathBuf>,
    habits: RwLock<HashMap<Uuid, Habit>>,
    cache: Mutex<StreakCache>,
    clock: Box<dyn Clock>,
}

pub struct HabitServiceBuilder {
    path: Option<PathBuf>,
    clock: Box<dyn Clock>,
}

impl HabitServiceBuilder {
    pub fn new() -> Self {
        Self {
            path: None,
            clock: Box::new(SystemClock),
        }
    }

    /// JSON file the habit map is loaded from and saved to. Without a path
    /// the service is memory-only.
    pub fn with_store_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn build(self) -> Result<HabitService> {
        let habits = match &self.path {
            Some(path) if path.exists() => {
                let raw = fs::read_to_string(path)?;
                let records: Vec<Habit> = serde_json::from_str(&raw)?;
                records.into_iter().map(|habit| (habit.id, habit)).collect()
            }
            _ => HashMap::new(),
        };
        Ok(HabitService {
            path: self.path,
            habits: RwLock::new(habits),
            cache: Mutex::new(StreakCache::new()),
            clock: self.clock,
        })
    }
}

impl Default for HabitServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HabitService {
    pub fn builder() -> HabitServiceBuilder {
        HabitServiceBuilder::new()
    }

    pub fn create_habit(
        &self,
        name: &str,
        color_hex: &str,
        icon: &str,
        rule: RecurrenceRule,
    ) -> Result<Habit> {
        let mut habit = Habit::new(name, color_hex, icon, self.clock.now());
        habit.set_rule(rule);
        let mut habits = self.habits.write();
        habits.insert(habit.id, habit.clone());
        self.persist(&habits)?;
        tracing::debug!(habit = %habit.id, name, "created habit");
        Ok(habit)
    }

    /// Applies cosmetic and rule changes. A rule change prunes completions
    /// the new schedule invalidates before the rule takes effect; a purely
    /// cosmetic update touches neither ledger nor schedule.
    pub fn update_habit(&self, id: Uuid, update: HabitUpdate) -> Result<UpdateOutcome> {
        let mut habits = self.habits.write();
        let habit = habits
            .get_mut(&id)
            .ok_or_else(|| anyhow!("unknown habit {id}"))?;

        habit.name = update.name;
        habit.color_hex = update.color_hex;
        habit.icon = update.icon;

        let schedule_changed = has_schedule_changed(habit.rule(), &update.rule);
        let pruned_completions = if schedule_changed {
            habit.set_rule(update.rule)
        } else {
            0
        };
        if pruned_completions > 0 {
            tracing::warn!(
                habit = %id,
                pruned = pruned_completions,
                "rule change invalidated recorded completions"
            );
        }

        self.cache.lock().invalidate(id);
        self.persist(&habits)?;
        tracing::debug!(habit = %id, schedule_changed, "updated habit");
        Ok(UpdateOutcome {
            schedule_changed,
            pruned_completions,
        })
    }

    /// Whether committing `new_rule` would change the habit's schedule.
    /// Surfaced separately so callers can ask for confirmation before an
    /// update that prunes history.
    pub fn schedule_changed(&self, id: Uuid, new_rule: &RecurrenceRule) -> Result<bool> {
        let habits = self.habits.read();
        let habit = habits.get(&id).ok_or_else(|| anyhow!("unknown habit {id}"))?;
        Ok(has_schedule_changed(habit.rule(), new_rule))
    }

    /// Removes the habit along with its rule and completion history.
    pub fn delete_habit(&self, id: Uuid) -> Result<()> {
        let mut habits = self.habits.write();
        if habits.remove(&id).is_none() {
            bail!("unknown habit {id}");
        }
        self.cache.lock().invalidate(id);
        self.persist(&habits)?;
        tracing::debug!(habit = %id, "deleted habit");
        Ok(())
    }

    /// Flips completion for `date` against the injected clock. Unscheduled
    /// and future dates are rejected. Returns whether the date is now
    /// completed.
    pub fn toggle_completion(&self, id: Uuid, date: NaiveDate) -> Result<bool> {
        let today = self.clock.today();
        let mut habits = self.habits.write();
        let habit = habits
            .get_mut(&id)
            .ok_or_else(|| anyhow!("unknown habit {id}"))?;
        if !habit.can_toggle(date, today) {
            bail!("{date} is not toggleable for habit {id}");
        }
        habit.toggle_completion(date, today);
        let now_completed = habit.is_completed_on(date);
        self.cache.lock().invalidate(id);
        self.persist(&habits)?;
        tracing::debug!(habit = %id, %date, now_completed, "toggled completion");
        Ok(now_completed)
    }

    pub fn habit(&self, id: Uuid) -> Result<Habit> {
        self.habits
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| anyhow!("unknown habit {id}"))
    }

    /// All habits, oldest first.
    pub fn habits(&self) -> Vec<Habit> {
        let habits = self.habits.read();
        let mut all: Vec<Habit> = habits.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        all
    }

    /// The habits scheduled on `date`, oldest first.
    pub fn habits_on(&self, date: NaiveDate) -> Vec<Habit> {
        self.habits()
            .into_iter()
            .filter(|habit| habit.is_scheduled_on(date))
            .collect()
    }

    /// The habit's streak as of the injected clock's today, memoized by
    /// (habit, date, version).
    pub fn streak(&self, id: Uuid) -> Result<Streak> {
        let today = self.clock.today();
        let habits = self.habits.read();
        let habit = habits.get(&id).ok_or_else(|| anyhow!("unknown habit {id}"))?;

        let mut cache = self.cache.lock();
        if let Some(hit) = cache.get(habit.id, today, habit.version()) {
            return Ok(hit);
        }
        let streak = habit.streak(today);
        cache.insert(habit.id, today, habit.version(), streak);
        Ok(streak)
    }

    pub fn streak_text(&self, id: Uuid) -> Result<String> {
        let today = self.clock.today();
        let habits = self.habits.read();
        let habit = habits.get(&id).ok_or_else(|| anyhow!("unknown habit {id}"))?;
        Ok(habit.streak_text(today))
    }

    pub fn is_week_fully_completed(&self, id: Uuid, date: NaiveDate) -> Result<bool> {
        Ok(self.habit(id)?.is_week_fully_completed(date))
    }

    pub fn is_month_fully_completed(&self, id: Uuid, date: NaiveDate) -> Result<bool> {
        Ok(self.habit(id)?.is_month_fully_completed(date))
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    fn persist(&self, habits: &HashMap<Uuid, Habit>) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut records: Vec<&Habit> = habits.values().collect();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        let raw = serde_json::to_string_pretty(&records)?;
        fs::write(path, raw)?;
        Ok(())
    }
}
