pub mod json_backend;
pub mod memory;

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{normalize_series, BudgetSettings, PlannedItem, PlannedKind, Snapshot},
    errors::Result,
};

pub use json_backend::JsonStorage;
pub use memory::MemoryStorage;

pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Abstraction over the document store holding balance history and live budget inputs.
///
/// Every successful write bumps [`HistoryStore::revision`], which is how callers
/// notice that a recompute is due.
pub trait HistoryStore: Send + Sync {
    /// Snapshots dated on or after `from`, ascending and deduplicated by date.
    fn list_snapshots_from(&self, from: NaiveDate) -> Result<Vec<Snapshot>>;
    /// Inserts the snapshot or replaces the one already stored for its date.
    fn upsert_snapshot(&self, snapshot: Snapshot) -> Result<()>;
    /// Removes the snapshot for `date`, returning whether one existed.
    fn remove_snapshot(&self, date: NaiveDate) -> Result<bool>;
    /// Drops the whole balance history, returning how many snapshots were removed.
    fn clear_history(&self) -> Result<usize>;
    fn load_settings(&self) -> Result<BudgetSettings>;
    fn save_settings(&self, settings: &BudgetSettings) -> Result<()>;
    fn planned_items(&self, kind: PlannedKind) -> Result<Vec<PlannedItem>>;
    fn revision(&self) -> Result<u64>;
}

impl<T: HistoryStore + ?Sized> HistoryStore for Arc<T> {
    fn list_snapshots_from(&self, from: NaiveDate) -> Result<Vec<Snapshot>> {
        (**self).list_snapshots_from(from)
    }

    fn upsert_snapshot(&self, snapshot: Snapshot) -> Result<()> {
        (**self).upsert_snapshot(snapshot)
    }

    fn remove_snapshot(&self, date: NaiveDate) -> Result<bool> {
        (**self).remove_snapshot(date)
    }

    fn clear_history(&self) -> Result<usize> {
        (**self).clear_history()
    }

    fn load_settings(&self) -> Result<BudgetSettings> {
        (**self).load_settings()
    }

    fn save_settings(&self, settings: &BudgetSettings) -> Result<()> {
        (**self).save_settings(settings)
    }

    fn planned_items(&self, kind: PlannedKind) -> Result<Vec<PlannedItem>> {
        (**self).planned_items(kind)
    }

    fn revision(&self) -> Result<u64> {
        (**self).revision()
    }
}

/// On-disk and in-memory layout shared by the bundled backends.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDocument {
    #[serde(default = "StoreDocument::schema_version_default")]
    pub schema_version: u32,
    #[serde(default)]
    pub revision: u64,
    #[serde(default)]
    pub settings: BudgetSettings,
    #[serde(default)]
    pub income: Vec<PlannedItem>,
    #[serde(default)]
    pub expenses: Vec<PlannedItem>,
    #[serde(default)]
    pub balance_history: Vec<Snapshot>,
}

impl Default for StoreDocument {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            revision: 0,
            settings: BudgetSettings::default(),
            income: Vec::new(),
            expenses: Vec::new(),
            balance_history: Vec::new(),
        }
    }
}

impl StoreDocument {
    fn schema_version_default() -> u32 {
        CURRENT_SCHEMA_VERSION
    }

    pub fn snapshots_from(&self, from: NaiveDate) -> Vec<Snapshot> {
        let filtered = self
            .balance_history
            .iter()
            .filter(|snapshot| snapshot.date >= from)
            .cloned()
            .collect();
        normalize_series(filtered)
    }

    pub fn upsert(&mut self, snapshot: Snapshot) {
        match self
            .balance_history
            .binary_search_by_key(&snapshot.date, |existing| existing.date)
        {
            Ok(index) => self.balance_history[index] = snapshot,
            Err(index) => self.balance_history.insert(index, snapshot),
        }
        self.revision += 1;
    }

    pub fn remove(&mut self, date: NaiveDate) -> bool {
        let before = self.balance_history.len();
        self.balance_history.retain(|snapshot| snapshot.date != date);
        let removed = self.balance_history.len() != before;
        if removed {
            self.revision += 1;
        }
        removed
    }

    pub fn clear(&mut self) -> usize {
        let removed = self.balance_history.len();
        self.balance_history.clear();
        if removed > 0 {
            self.revision += 1;
        }
        removed
    }

    pub fn replace_settings(&mut self, settings: BudgetSettings) {
        self.settings = settings;
        self.revision += 1;
    }

    pub fn items(&self, kind: PlannedKind) -> &[PlannedItem] {
        match kind {
            PlannedKind::Income => &self.income,
            PlannedKind::Expense => &self.expenses,
        }
    }

    /// Restores the sorted, one-per-date history invariant after loading hand-edited data.
    pub fn normalize(&mut self) {
        let history = std::mem::take(&mut self.balance_history);
        self.balance_history = normalize_series(history);
    }
}
