//! Orchestrates recomputes against an injected store. The engine itself never sees the store.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::{
    core::{
        forecast::{first_day_of_month, ForecastEngine, ForecastInputs},
        time::Clock,
    },
    domain::{ForecastReport, Period},
    errors::Result,
    storage::HistoryStore,
};

use super::history_service::PlannedTotals;

/// Whether a refresh produced a new report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Recomputed,
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct InputsKey {
    revision: u64,
    today: NaiveDate,
    period: Option<Period>,
    target_buffer: Option<f64>,
}

/// Keeps the latest [`ForecastReport`] in sync with a [`HistoryStore`].
///
/// Callers drive it from their own poll loop; a refresh recomputes only when the
/// store revision, the calendar day or an override changed since the last pass.
pub struct ForecastSession {
    store: Box<dyn HistoryStore>,
    clock: Box<dyn Clock>,
    period_override: Option<Period>,
    buffer_override: Option<f64>,
    last_key: Option<InputsKey>,
    latest: Option<ForecastReport>,
}

impl ForecastSession {
    pub fn new(store: Box<dyn HistoryStore>, clock: Box<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            period_override: None,
            buffer_override: None,
            last_key: None,
            latest: None,
        }
    }

    /// Forces a period instead of the one saved in the store settings.
    pub fn set_period(&mut self, period: Option<Period>) {
        self.period_override = period;
    }

    /// Forces a reserve buffer instead of the one saved in the store settings.
    pub fn set_target_buffer(&mut self, buffer: Option<f64>) {
        self.buffer_override = buffer;
    }

    pub fn latest(&self) -> Option<&ForecastReport> {
        self.latest.as_ref()
    }

    /// Reads the store and runs a full recompute without touching the cached report.
    pub fn compute(&self) -> Result<ForecastReport> {
        let today = self.clock.today();
        let settings = self.store.load_settings()?;
        let totals = PlannedTotals::load(self.store.as_ref())?;
        let snapshots = self.store.list_snapshots_from(first_day_of_month(today))?;
        let inputs = ForecastInputs {
            snapshots: &snapshots,
            period: self.period_override.unwrap_or(settings.month_period),
            today,
            current_balance: settings.current_balance,
            total_planned_income: totals.income,
            total_planned_expenses: totals.expenses,
            target_buffer: self.buffer_override.unwrap_or(settings.target_buffer),
        };
        Ok(ForecastEngine::recompute(&inputs))
    }

    /// Recomputes when anything feeding the forecast changed and keeps only the newest report.
    pub fn refresh(&mut self) -> Result<RefreshOutcome> {
        let key = InputsKey {
            revision: self.store.revision()?,
            today: self.clock.today(),
            period: self.period_override,
            target_buffer: self.buffer_override,
        };
        if self.latest.is_some() && self.last_key == Some(key) {
            return Ok(RefreshOutcome::Unchanged);
        }
        let report = match self.compute() {
            Ok(report) => report,
            Err(err) => {
                warn!("forecast refresh failed: {err}");
                return Err(err);
            }
        };
        // revision is read before the documents, so a concurrent write forces another pass
        self.last_key = Some(key);
        debug!(revision = key.revision, "forecast session refreshed");
        self.latest = Some(report);
        Ok(RefreshOutcome::Recomputed)
    }
}
