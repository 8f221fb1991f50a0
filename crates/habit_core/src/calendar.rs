use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime};

/// Normalizes a timestamp to its timezone-naive day boundary.
pub fn start_of_day(moment: NaiveDateTime) -> NaiveDate {
    moment.date()
}

pub fn is_same_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date()
}

/// The previous calendar day, or the input unchanged when the calendar
/// cannot go further back.
pub fn previous_day(date: NaiveDate) -> NaiveDate {
    date.pred_opt().unwrap_or(date)
}

/// `date` shifted back by `days` whole days, or the input unchanged at the
/// calendar floor.
pub fn days_back(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days)).unwrap_or(date)
}

/// The seven days of the Monday-start week containing `date`, ordered
/// Monday through Sunday.
pub fn week_range(date: NaiveDate) -> [NaiveDate; 7] {
    let monday = days_back(date, u64::from(date.weekday().num_days_from_monday()));
    let mut week = [monday; 7];
    for offset in 1..7 {
        week[offset] = week[offset - 1].succ_opt().unwrap_or(week[offset - 1]);
    }
    week
}

/// Every day of the month containing `date`, ascending.
pub fn month_days(date: NaiveDate) -> Vec<NaiveDate> {
    (1..=31)
        .filter_map(|day| NaiveDate::from_ymd_opt(date.year(), date.month(), day))
        .collect()
}

/// Month layout for a Sunday-first grid: leading blanks so the first of
/// the month lands on its weekday column.
pub fn month_grid(date: NaiveDate) -> Vec<Option<NaiveDate>> {
    let days = month_days(date);
    let Some(first) = days.first().copied() else {
        return Vec::new();
    };
    let blanks = first.weekday().num_days_from_sunday() as usize;
    let mut grid: Vec<Option<NaiveDate>> = vec![None; blanks];
    grid.extend(days.into_iter().map(Some));
    grid
}

pub fn is_past_or_today(date: NaiveDate, today: NaiveDate) -> bool {
    date <= today
}

/// `date` shifted by whole months, the day clamped to the target month's
/// length. Falls back to the input when the result is unrepresentable.
pub fn offset_month(date: NaiveDate, months: i32) -> NaiveDate {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months as u32))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}
