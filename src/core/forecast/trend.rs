use crate::domain::{Period, Snapshot, TrendDirection, TrendResult};

/// Percent changes within this band either side of zero read as `Stable`.
pub const TREND_DEAD_ZONE_PERCENT: f64 = 2.0;

/// Classifies the movement of a period's daily budget across the whole series.
pub struct TrendClassifier;

impl TrendClassifier {
    /// Compares the earliest and latest snapshot of an ascending series.
    pub fn classify(snapshots: &[Snapshot], period: Period) -> TrendResult {
        let (first, last) = match (snapshots.first(), snapshots.last()) {
            (Some(first), Some(last)) if snapshots.len() >= 2 => (first, last),
            _ => return TrendResult::stable(),
        };
        let percentage = percent_change(first.daily_budget(period), last.daily_budget(period));
        TrendResult {
            direction: direction_for(percentage),
            percentage: round_one_decimal(percentage),
        }
    }
}

/// Signed change from `first` to `last` in percent of `first`; `0` when `first` is zero.
pub fn percent_change(first: f64, last: f64) -> f64 {
    if first == 0.0 {
        0.0
    } else {
        (last - first) / first * 100.0
    }
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn direction_for(percentage: f64) -> TrendDirection {
    if percentage > TREND_DEAD_ZONE_PERCENT {
        TrendDirection::Up
    } else if percentage < -TREND_DEAD_ZONE_PERCENT {
        TrendDirection::Down
    } else {
        TrendDirection::Stable
    }
}
