use tracing::debug;

use crate::domain::ForecastReport;

use super::{projection::ForecastInputs, trend::TrendClassifier, ProjectionCalculator};

/// Single entry point for a full recompute. Holds no state between calls.
pub struct ForecastEngine;

impl ForecastEngine {
    pub fn recompute(inputs: &ForecastInputs<'_>) -> ForecastReport {
        let trend = TrendClassifier::classify(inputs.snapshots, inputs.period);
        let forecast = ProjectionCalculator::project(inputs);
        debug!(
            snapshots = inputs.snapshots.len(),
            period = %inputs.period,
            trend = trend.direction.label(),
            avg_daily_spending = forecast.avg_daily_spending,
            days_remaining = forecast.days_remaining,
            "recomputed forecast"
        );
        ForecastReport {
            trend,
            forecast,
            history_len: inputs.snapshots.len(),
        }
    }
}
