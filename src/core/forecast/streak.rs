use crate::domain::{Period, Snapshot, StreakSignal, TrendDirection};

/// Minimum number of points a run needs before it is reported.
pub const STREAK_WINDOW: usize = 3;

/// How much of the series the streak detector is allowed to look at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StreakPolicy {
    /// Only the latest [`STREAK_WINDOW`] points; reports exactly that many or nothing.
    #[default]
    Strict,
    /// The whole series; reports the full length of the run ending at the latest point.
    Unbounded,
}

/// Detects consecutive daily-budget moves in the same direction.
pub struct StreakDetector;

impl StreakDetector {
    /// Applies the default [`StreakPolicy::Strict`] contract.
    pub fn detect(snapshots: &[Snapshot], period: Period) -> StreakSignal {
        Self::detect_with(snapshots, period, StreakPolicy::Strict)
    }

    pub fn detect_with(snapshots: &[Snapshot], period: Period, policy: StreakPolicy) -> StreakSignal {
        if snapshots.len() < STREAK_WINDOW {
            return StreakSignal::none();
        }
        let window = match policy {
            StreakPolicy::Strict => &snapshots[snapshots.len() - STREAK_WINDOW..],
            StreakPolicy::Unbounded => snapshots,
        };
        let values: Vec<f64> = window.iter().map(|s| s.daily_budget(period)).collect();
        let run = monotonic_run(&values);
        let qualifies = match policy {
            StreakPolicy::Strict => run.consecutive_days as usize == STREAK_WINDOW,
            StreakPolicy::Unbounded => run.consecutive_days as usize >= STREAK_WINDOW,
        };
        if qualifies {
            run
        } else {
            StreakSignal::none()
        }
    }
}

/// Longest strictly monotonic run ending at the last value, counted in points.
///
/// A flat final step breaks any run, so `[5, 5]` reports nothing.
pub fn monotonic_run(values: &[f64]) -> StreakSignal {
    let deltas: Vec<f64> = values.windows(2).map(|pair| pair[1] - pair[0]).collect();
    let direction = match deltas.last() {
        Some(delta) if *delta > 0.0 => TrendDirection::Up,
        Some(delta) if *delta < 0.0 => TrendDirection::Down,
        _ => return StreakSignal::none(),
    };
    let steps = deltas
        .iter()
        .rev()
        .take_while(|delta| match direction {
            TrendDirection::Up => **delta > 0.0,
            _ => **delta < 0.0,
        })
        .count();
    StreakSignal {
        direction,
        consecutive_days: u32::try_from(steps + 1).unwrap_or(u32::MAX),
    }
}
