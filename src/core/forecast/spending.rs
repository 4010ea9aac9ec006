use crate::domain::Snapshot;

/// Number of most recent snapshots the spending rate looks at.
pub const SPENDING_WINDOW: usize = 7;

/// Estimates how fast the balance drains on the days it drains.
pub struct SpendingRateEstimator;

impl SpendingRateEstimator {
    /// Mean of the positive day-over-day balance decreases inside the trailing window.
    ///
    /// Days where the balance rose are left out entirely rather than counted as zero.
    pub fn estimate_daily_spend(snapshots: &[Snapshot]) -> f64 {
        let start = snapshots.len().saturating_sub(SPENDING_WINDOW);
        let (total, count) = snapshots[start..]
            .windows(2)
            .map(|pair| pair[0].balance - pair[1].balance)
            .filter(|spend| *spend > 0.0)
            .fold((0.0, 0usize), |(total, count), spend| (total + spend, count + 1));
        if count == 0 {
            0.0
        } else {
            total / count as f64
        }
    }
}
