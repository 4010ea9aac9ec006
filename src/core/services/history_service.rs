//! Write path for the balance history: one snapshot per day, budgets computed at write time.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info};

use crate::{
    core::{forecast::days_remaining, time::Clock},
    domain::{total_amount, Period, PlannedKind, Snapshot},
    errors::Result,
    storage::HistoryStore,
};

/// Sums of the planned income and expense line items.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlannedTotals {
    pub income: f64,
    pub expenses: f64,
}

impl PlannedTotals {
    pub fn load(store: &dyn HistoryStore) -> Result<Self> {
        Ok(Self {
            income: total_amount(&store.planned_items(PlannedKind::Income)?),
            expenses: total_amount(&store.planned_items(PlannedKind::Expense)?),
        })
    }
}

pub struct HistoryService;

impl HistoryService {
    /// Money left once planned items settle.
    pub fn remaining_money(balance: f64, totals: PlannedTotals) -> f64 {
        balance + totals.income - totals.expenses
    }

    /// Builds the snapshot for `date` with daily budgets for both periods.
    pub fn build_snapshot(
        date: NaiveDate,
        recorded_at: DateTime<Utc>,
        balance: f64,
        totals: PlannedTotals,
    ) -> Snapshot {
        let remaining = Self::remaining_money(balance, totals);
        let days_current = days_remaining(date, Period::Current);
        let days_next = days_remaining(date, Period::Next);
        Snapshot {
            date,
            balance,
            daily_budget_current_month: remaining / f64::from(days_current),
            daily_budget_next_month: remaining / f64::from(days_next),
            days_remaining_current_month: Some(days_current),
            days_remaining_next_month: Some(days_next),
            remaining_money: Some(remaining),
            updated_at: Some(recorded_at),
        }
    }

    /// Archival entry for a past day, with budgets floored to whole units.
    pub fn backfill_snapshot(date: NaiveDate, balance: f64) -> Snapshot {
        let days_current = days_remaining(date, Period::Current);
        let days_next = days_remaining(date, Period::Next);
        Snapshot {
            daily_budget_current_month: (balance / f64::from(days_current)).floor(),
            daily_budget_next_month: (balance / f64::from(days_next)).floor(),
            days_remaining_current_month: Some(days_current),
            days_remaining_next_month: Some(days_next),
            ..Snapshot::new(date, balance)
        }
    }

    /// Upserts today's snapshot from the live store state.
    ///
    /// Nothing is written while balance, income and expenses are all zero, so a
    /// fresh store does not accumulate empty history.
    pub fn record(store: &dyn HistoryStore, clock: &dyn Clock) -> Result<Option<Snapshot>> {
        let settings = store.load_settings()?;
        let totals = PlannedTotals::load(store)?;
        if settings.current_balance == 0.0 && totals.income == 0.0 && totals.expenses == 0.0 {
            debug!("skipping history write for an empty budget");
            return Ok(None);
        }
        let snapshot =
            Self::build_snapshot(clock.today(), clock.now(), settings.current_balance, totals);
        store.upsert_snapshot(snapshot.clone())?;
        info!(
            date = %snapshot.date,
            balance = snapshot.balance,
            daily_budget = snapshot.daily_budget_current_month,
            "recorded balance snapshot"
        );
        Ok(Some(snapshot))
    }

    /// Stores an archival snapshot for a past date.
    pub fn backfill(store: &dyn HistoryStore, date: NaiveDate, balance: f64) -> Result<Snapshot> {
        let snapshot = Self::backfill_snapshot(date, balance);
        store.upsert_snapshot(snapshot.clone())?;
        info!(date = %date, balance, "backfilled balance snapshot");
        Ok(snapshot)
    }
}
