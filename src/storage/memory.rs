use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;

use crate::{
    domain::{BudgetSettings, PlannedItem, PlannedKind, Snapshot},
    errors::{BudgetError, Result},
};

use super::{HistoryStore, StoreDocument};

/// Process-local store, used by tests and by embedders that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    document: RwLock<StoreDocument>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_document(mut document: StoreDocument) -> Self {
        document.normalize();
        Self {
            document: RwLock::new(document),
        }
    }

    /// Replaces a planned item list; counts as a store change.
    pub fn set_planned_items(&self, kind: PlannedKind, items: Vec<PlannedItem>) -> Result<()> {
        let mut document = self.write()?;
        match kind {
            PlannedKind::Income => document.income = items,
            PlannedKind::Expense => document.expenses = items,
        }
        document.revision += 1;
        Ok(())
    }

    pub fn document(&self) -> Result<StoreDocument> {
        Ok(self.read()?.clone())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreDocument>> {
        self.document
            .read()
            .map_err(|_| BudgetError::StorageError("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreDocument>> {
        self.document
            .write()
            .map_err(|_| BudgetError::StorageError("memory store lock poisoned".into()))
    }
}

impl HistoryStore for MemoryStorage {
    fn list_snapshots_from(&self, from: NaiveDate) -> Result<Vec<Snapshot>> {
        Ok(self.read()?.snapshots_from(from))
    }

    fn upsert_snapshot(&self, snapshot: Snapshot) -> Result<()> {
        self.write()?.upsert(snapshot);
        Ok(())
    }

    fn remove_snapshot(&self, date: NaiveDate) -> Result<bool> {
        Ok(self.write()?.remove(date))
    }

    fn clear_history(&self) -> Result<usize> {
        Ok(self.write()?.clear())
    }

    fn load_settings(&self) -> Result<BudgetSettings> {
        Ok(self.read()?.settings.clone())
    }

    fn save_settings(&self, settings: &BudgetSettings) -> Result<()> {
        self.write()?.replace_settings(settings.clone());
        Ok(())
    }

    fn planned_items(&self, kind: PlannedKind) -> Result<Vec<PlannedItem>> {
        Ok(self.read()?.items(kind).to_vec())
    }

    fn revision(&self) -> Result<u64> {
        Ok(self.read()?.revision)
    }
}
