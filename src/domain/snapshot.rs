//! Daily balance history records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::Period;

/// One calendar day's recorded balance and budget state.
///
/// The `date` is both the identity and the ordering key; stores keep at most one
/// snapshot per date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub date: NaiveDate,
    #[serde(default)]
    pub balance: f64,
    #[serde(default)]
    pub daily_budget_current_month: f64,
    #[serde(default)]
    pub daily_budget_next_month: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_remaining_current_month: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_remaining_next_month: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_money: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    /// Creates a bare snapshot with zeroed budget fields.
    pub fn new(date: NaiveDate, balance: f64) -> Self {
        Self {
            date,
            balance,
            daily_budget_current_month: 0.0,
            daily_budget_next_month: 0.0,
            days_remaining_current_month: None,
            days_remaining_next_month: None,
            remaining_money: None,
            updated_at: None,
        }
    }

    /// Sets the daily budget for the given period, builder style.
    pub fn with_daily_budget(mut self, period: Period, value: f64) -> Self {
        match period {
            Period::Current => self.daily_budget_current_month = value,
            Period::Next => self.daily_budget_next_month = value,
        }
        self
    }

    /// Daily budget figure relevant to `period`.
    pub fn daily_budget(&self, period: Period) -> f64 {
        match period {
            Period::Current => self.daily_budget_current_month,
            Period::Next => self.daily_budget_next_month,
        }
    }

    /// Day count stored at write time for `period`; `0` when it was never recorded.
    pub fn days_remaining(&self, period: Period) -> u32 {
        match period {
            Period::Current => self.days_remaining_current_month,
            Period::Next => self.days_remaining_next_month,
        }
        .unwrap_or(0)
    }
}

/// Sorts snapshots ascending by date and keeps the last occurrence of each date.
pub fn normalize_series(mut snapshots: Vec<Snapshot>) -> Vec<Snapshot> {
    // stable sort keeps insertion order within a date, so the later write wins below
    snapshots.sort_by_key(|snapshot| snapshot.date);
    let mut series: Vec<Snapshot> = Vec::with_capacity(snapshots.len());
    for snapshot in snapshots {
        match series.last_mut() {
            Some(last) if last.date == snapshot.date => *last = snapshot,
            _ => series.push(snapshot),
        }
    }
    series
}
