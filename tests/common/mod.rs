#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use budget_forecast::{
    domain::{Period, Snapshot},
    storage::JsonStorage,
};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Fresh directory that survives until the test binary exits.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// JSON store backed by a unique directory for each test.
pub fn setup_json_store() -> JsonStorage {
    JsonStorage::open(temp_home().join("budget.json")).expect("create json store")
}

pub fn nov(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 11, day).expect("valid november date")
}

/// November snapshots from `(day, balance, current-month daily budget)` triples.
pub fn november_series(points: &[(u32, f64, f64)]) -> Vec<Snapshot> {
    points
        .iter()
        .map(|&(day, balance, budget)| {
            Snapshot::new(nov(day), balance)
                .with_daily_budget(Period::Current, budget)
                .with_daily_budget(Period::Next, budget / 2.0)
        })
        .collect()
}
