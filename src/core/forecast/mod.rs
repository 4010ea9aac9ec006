//! Forecasting engine: trend, streak, spending rate and forward projections over
//! the daily balance history. Everything here is pure; `today` is always injected.

pub mod calendar;
pub mod engine;
pub mod projection;
pub mod spending;
pub mod streak;
pub mod trend;

pub use calendar::{days_remaining, first_day_of_month, period_end};
pub use engine::ForecastEngine;
pub use projection::{ForecastInputs, ProjectionCalculator};
pub use spending::{SpendingRateEstimator, SPENDING_WINDOW};
pub use streak::{monotonic_run, StreakDetector, StreakPolicy, STREAK_WINDOW};
pub use trend::{TrendClassifier, TREND_DEAD_ZONE_PERCENT};
