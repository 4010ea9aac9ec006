mod common;

use budget_forecast::{
    core::{
        services::{ForecastSession, HistoryService, RefreshOutcome},
        FixedClock,
    },
    domain::{BudgetSettings, Period, Snapshot},
    storage::{HistoryStore, JsonStorage},
};
use common::{nov, setup_json_store, temp_home};
use std::{fs, sync::Arc};

#[test]
fn snapshots_survive_reopening_the_store() {
    let home = temp_home();
    let path = home.join("budget.json");
    {
        let store = JsonStorage::open(path.clone()).unwrap();
        store.upsert_snapshot(Snapshot::new(nov(20), 950.0)).unwrap();
        store.upsert_snapshot(Snapshot::new(nov(18), 1000.0)).unwrap();
    }
    let reopened = JsonStorage::open(path).unwrap();
    let history = reopened.list_snapshots_from(nov(1)).unwrap();
    let dates: Vec<_> = history.iter().map(|s| s.date).collect();
    assert_eq!(dates, vec![nov(18), nov(20)]);
    assert_eq!(reopened.revision().unwrap(), 2);
}

#[test]
fn same_day_write_replaces_the_snapshot() {
    let store = setup_json_store();
    store.upsert_snapshot(Snapshot::new(nov(21), 900.0)).unwrap();
    store.upsert_snapshot(Snapshot::new(nov(21), 875.0)).unwrap();
    let history = store.list_snapshots_from(nov(21)).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].balance, 875.0);
}

#[test]
fn history_is_filtered_from_the_requested_date() {
    let store = setup_json_store();
    for day in [1, 10, 20] {
        HistoryService::backfill(&store, nov(day), 1000.0 - f64::from(day)).unwrap();
    }
    assert_eq!(store.list_snapshots_from(nov(10)).unwrap().len(), 2);
    assert!(store.remove_snapshot(nov(10)).unwrap());
    assert!(!store.remove_snapshot(nov(10)).unwrap());
    assert_eq!(store.list_snapshots_from(nov(1)).unwrap().len(), 2);
}

#[test]
fn write_leaves_no_temporary_file_behind() {
    let store = setup_json_store();
    store.save_settings(&BudgetSettings::default()).unwrap();
    let parent = store.path().parent().unwrap();
    let leftovers: Vec<_> = fs::read_dir(parent)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn corrupt_document_is_reported_as_storage_error() {
    let store = setup_json_store();
    fs::write(store.path(), "{ broken").unwrap();
    let err = store.list_snapshots_from(nov(1)).unwrap_err();
    assert!(err.to_string().starts_with("Persistence error"), "{err}");
}

#[test]
fn backups_are_pruned_to_the_retention_limit() {
    let home = temp_home();
    let store = JsonStorage::with_retention(home.join("budget.json"), 2).unwrap();
    store.upsert_snapshot(Snapshot::new(nov(1), 10.0)).unwrap();
    for note in ["first", "second", "third"] {
        let path = store.backup(Some(note)).unwrap();
        assert!(path.starts_with(home.join("backups")));
    }
    assert!(store.list_backups().unwrap().len() <= 2);
}

#[test]
fn session_follows_json_store_changes() {
    let store = Arc::new(setup_json_store());
    store
        .save_settings(&BudgetSettings {
            current_balance: 3000.0,
            month_period: Period::Current,
            target_buffer: 500.0,
            updated_at: None,
        })
        .unwrap();
    for (day, balance) in [(19, 3100.0), (20, 3050.0)] {
        HistoryService::backfill(store.as_ref(), nov(day), balance).unwrap();
    }

    let mut session = ForecastSession::new(Box::new(store.clone()), Box::new(FixedClock::new(nov(21))));
    assert_eq!(session.refresh().unwrap(), RefreshOutcome::Recomputed);
    assert_eq!(session.refresh().unwrap(), RefreshOutcome::Unchanged);
    assert_eq!(session.latest().unwrap().history_len, 2);

    HistoryService::backfill(store.as_ref(), nov(21), 3000.0).unwrap();
    assert_eq!(session.refresh().unwrap(), RefreshOutcome::Recomputed);
    let report = session.latest().unwrap();
    assert_eq!(report.history_len, 3);
    assert_eq!(report.forecast.avg_daily_spending, 50.0);
    assert_eq!(report.forecast.projected_end_of_period, 2500.0);
}
