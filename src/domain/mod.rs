//! Pure data types: snapshots, periods, settings and derived forecast figures.
//! No I/O lives here.

pub mod forecast;
pub mod period;
pub mod settings;
pub mod snapshot;

pub use forecast::{ForecastReport, ForecastResult, StreakSignal, TrendDirection, TrendResult};
pub use period::{ParsePeriodError, Period};
pub use settings::{total_amount, BudgetSettings, PlannedItem, PlannedKind, DEFAULT_TARGET_BUFFER};
pub use snapshot::{normalize_series, Snapshot};
