//! Derived trend and forecast figures. Recreated wholesale on every recompute.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    #[default]
    Stable,
}

impl TrendDirection {
    pub fn label(self) -> &'static str {
        match self {
            TrendDirection::Up => "up",
            TrendDirection::Down => "down",
            TrendDirection::Stable => "stable",
        }
    }
}

/// Direction and signed percentage change of a period's daily budget across the series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    pub direction: TrendDirection,
    /// Rounded to one decimal place.
    pub percentage: f64,
}

impl TrendResult {
    pub fn stable() -> Self {
        Self::default()
    }
}

/// Consecutive-direction signal over the latest snapshots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakSignal {
    pub direction: TrendDirection,
    pub consecutive_days: u32,
}

impl StreakSignal {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.consecutive_days > 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    /// Balance after planned items settle, before any daily spending.
    pub projected_end_with_plans: f64,
    pub projected_end_of_period: f64,
    pub avg_daily_spending: f64,
    pub target_daily_to_zero: f64,
    pub consecutive_days: u32,
    pub trend_direction: TrendDirection,
    pub vs_start_percent: f64,
    pub days_remaining: u32,
    pub days_money_will_last: i64,
    pub money_runs_out_date: Option<NaiveDate>,
    pub target_daily_with_buffer: f64,
}

impl ForecastResult {
    /// True when spending at the current rate exhausts the balance before the period ends.
    pub fn runs_out_before_period_end(&self) -> bool {
        self.days_money_will_last > 0 && self.days_money_will_last < i64::from(self.days_remaining)
    }

    pub fn streak(&self) -> StreakSignal {
        StreakSignal {
            direction: self.trend_direction,
            consecutive_days: self.consecutive_days,
        }
    }
}

/// Output of a single recompute pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastReport {
    pub trend: TrendResult,
    pub forecast: ForecastResult,
    pub history_len: usize,
}

impl ForecastReport {
    pub fn has_history(&self) -> bool {
        self.history_len > 0
    }
}
