//! Period resolution: how many days are left until a budget period closes.

use chrono::{Datelike, Months, NaiveDate};

use crate::domain::Period;

/// First calendar day of the month containing `date`.
pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last calendar day of the month targeted by `period`, relative to `today`.
pub fn period_end(today: NaiveDate, period: Period) -> NaiveDate {
    first_day_of_month(today)
        .checked_add_months(Months::new(period.month_offset() + 1))
        .and_then(|first_after| first_after.pred_opt())
        .unwrap_or(today)
}

/// Inclusive day count from `today` to the end of `period`, never below 1.
pub fn days_remaining(today: NaiveDate, period: Period) -> u32 {
    let days = (period_end(today, period) - today).num_days() + 1;
    u32::try_from(days.max(1)).unwrap_or(u32::MAX)
}
