use std::{
    cmp::Reverse,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::{info, warn};

use crate::{
    domain::{BudgetSettings, PlannedItem, PlannedKind, Snapshot},
    errors::{BudgetError, Result},
};

use super::{HistoryStore, StoreDocument, CURRENT_SCHEMA_VERSION};

const BACKUP_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

/// Single-document JSON store on the local filesystem.
///
/// Every call re-reads the file so edits made by other processes are picked up,
/// and every write goes through a temporary file followed by a rename.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonStorage {
    pub fn open(path: PathBuf) -> Result<Self> {
        Self::with_retention(path, DEFAULT_RETENTION)
    }

    pub fn with_retention(path: PathBuf, retention: usize) -> Result<Self> {
        let parent = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        ensure_dir(&parent)?;
        let backups_dir = parent.join("backups");
        Ok(Self {
            path,
            backups_dir,
            retention: retention.max(1),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole document; a missing file reads as an empty store.
    pub fn read_document(&self) -> Result<StoreDocument> {
        if !self.path.exists() {
            return Ok(StoreDocument::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let mut document: StoreDocument = serde_json::from_str(&data)?;
        if document.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(BudgetError::StorageError(format!(
                "store `{}` was written by a newer schema version ({})",
                self.path.display(),
                document.schema_version
            )));
        }
        document.normalize();
        Ok(document)
    }

    pub fn write_document(&self, document: &StoreDocument) -> Result<()> {
        let json = serde_json::to_string_pretty(document)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn update<T>(&self, apply: impl FnOnce(&mut StoreDocument) -> T) -> Result<T> {
        let mut document = self.read_document()?;
        let outcome = apply(&mut document);
        self.write_document(&document)?;
        Ok(outcome)
    }

    /// Copies the current document into the backups directory and prunes old copies.
    pub fn backup(&self, note: Option<&str>) -> Result<PathBuf> {
        ensure_dir(&self.backups_dir)?;
        let document = self.read_document()?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let mut name = format!("store_{}", timestamp);
        if let Some(label) = sanitize_note(note) {
            name.push('_');
            name.push_str(&label);
        }
        let path = self
            .backups_dir
            .join(format!("{}.{}", name, BACKUP_EXTENSION));
        let json = serde_json::to_string_pretty(&document)?;
        write_atomic(&path, &json)?;
        info!(path = %path.display(), "store backup written");
        self.prune_backups()?;
        Ok(path)
    }

    /// Backup file names, newest first.
    pub fn list_backups(&self) -> Result<Vec<String>> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(name.to_string());
            }
        }
        entries.sort_by_key(|name| Reverse(parse_timestamp(name)));
        Ok(entries)
    }

    fn prune_backups(&self) -> Result<()> {
        for stale in self.list_backups()?.into_iter().skip(self.retention) {
            let path = self.backups_dir.join(&stale);
            if let Err(err) = fs::remove_file(&path) {
                warn!(path = %path.display(), "failed to prune backup: {err}");
            }
        }
        Ok(())
    }
}

impl HistoryStore for JsonStorage {
    fn list_snapshots_from(&self, from: NaiveDate) -> Result<Vec<Snapshot>> {
        Ok(self.read_document()?.snapshots_from(from))
    }

    fn upsert_snapshot(&self, snapshot: Snapshot) -> Result<()> {
        self.update(|document| document.upsert(snapshot))
    }

    fn remove_snapshot(&self, date: NaiveDate) -> Result<bool> {
        self.update(|document| document.remove(date))
    }

    fn clear_history(&self) -> Result<usize> {
        self.update(StoreDocument::clear)
    }

    fn load_settings(&self) -> Result<BudgetSettings> {
        Ok(self.read_document()?.settings)
    }

    fn save_settings(&self, settings: &BudgetSettings) -> Result<()> {
        let settings = settings.clone();
        self.update(|document| document.replace_settings(settings))
    }

    fn planned_items(&self, kind: PlannedKind) -> Result<Vec<PlannedItem>> {
        Ok(self.read_document()?.items(kind).to_vec())
    }

    fn revision(&self) -> Result<u64> {
        Ok(self.read_document()?.revision)
    }
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.as_os_str().is_empty() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

fn sanitize_note(note: Option<&str>) -> Option<String> {
    let raw = note?.trim();
    let mut sanitized = String::new();
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            sanitized.push(ch.to_ascii_lowercase());
        } else if !sanitized.is_empty() && !sanitized.ends_with('-') {
            sanitized.push('-');
        }
    }
    let trimmed = sanitized.trim_matches('-').to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn parse_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let stem = name.strip_prefix("store_")?;
    let raw = stem.get(..15)?;
    NaiveDateTime::parse_from_str(raw, BACKUP_TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizes_backup_notes() {
        assert_eq!(sanitize_note(Some("  Before Clear! ")), Some("before-clear".into()));
        assert_eq!(sanitize_note(Some("***")), None);
        assert_eq!(sanitize_note(None), None);
    }

    #[test]
    fn parses_backup_timestamps() {
        let parsed = parse_timestamp("store_20251128_093015_before-clear.json").unwrap();
        assert_eq!(parsed.format("%Y-%m-%d %H:%M:%S").to_string(), "2025-11-28 09:30:15");
        assert!(parse_timestamp("notes.json").is_none());
    }

    #[test]
    fn tmp_path_appends_suffix() {
        let tmp = tmp_path(Path::new("/data/store.json"));
        assert_eq!(tmp, PathBuf::from("/data/store.json.tmp"));
    }
}
