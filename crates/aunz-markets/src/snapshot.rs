//! Previously collected listing summaries, served when a source cannot be
//! queried live.

use std::collections::HashMap;
use std::path::Path;

use aunz_core::{ConfigError, PriceStats, SourceId, SourceListing};
use serde::{Deserialize, Serialize};

/// Read-only lookup of stored listing summaries.
pub trait SnapshotStore: Send + Sync {
    fn get(&self, source_id: &SourceId, keyword: &str) -> Option<SourceListing>;
}

/// One stored summary: result count plus average price in market currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub source: SourceId,
    pub keyword: String,
    pub listings: u64,
    pub avg_price: f64,
}

impl SnapshotEntry {
    fn new(source: SourceId, keyword: &str, listings: u64, avg_price: f64) -> Self {
        Self {
            source,
            keyword: keyword.to_string(),
            listings,
            avg_price,
        }
    }

    fn to_listing(&self) -> SourceListing {
        let price_stats = (self.avg_price.is_finite() && self.avg_price > 0.0)
            .then(|| PriceStats::around_average(self.avg_price));
        SourceListing {
            source_id: self.source.clone(),
            total_result_count: self.listings,
            price_stats,
            sample_items: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SnapshotsFile {
    snapshots: Vec<SnapshotEntry>,
}

/// In-memory snapshot table keyed by source and case-folded keyword.
#[derive(Debug, Clone, Default)]
pub struct StaticSnapshotStore {
    entries: HashMap<(SourceId, String), SnapshotEntry>,
}

impl StaticSnapshotStore {
    #[must_use]
    pub fn new(entries: impl IntoIterator<Item = SnapshotEntry>) -> Self {
        let mut store = Self::default();
        store.extend(entries);
        store
    }

    /// TradeMe NZ statistics for the built-in categories.
    #[must_use]
    pub fn builtin() -> Self {
        let tm = SourceId::TRADEME;
        Self::new([
            SnapshotEntry::new(tm.clone(), "sunglasses sport", 20_648, 35.0),
            SnapshotEntry::new(tm.clone(), "smart watch", 17_319, 89.0),
            SnapshotEntry::new(tm.clone(), "solar garden light", 9_391, 45.0),
            SnapshotEntry::new(tm.clone(), "bluetooth earbuds", 4_060, 55.0),
            SnapshotEntry::new(tm.clone(), "yoga mat", 1_165, 35.0),
            SnapshotEntry::new(tm.clone(), "power bank", 923, 45.0),
            SnapshotEntry::new(tm.clone(), "phone case", 3_500, 20.0),
            SnapshotEntry::new(tm.clone(), "LED strip light", 5_200, 30.0),
            SnapshotEntry::new(tm.clone(), "backpack", 8_500, 65.0),
            SnapshotEntry::new(tm, "storage organizer", 4_200, 25.0),
        ])
    }

    /// Adds entries, replacing any existing entry for the same source and keyword.
    pub fn extend(&mut self, entries: impl IntoIterator<Item = SnapshotEntry>) {
        for entry in entries {
            let key = (entry.source.clone(), fold(&entry.keyword));
            self.entries.insert(key, entry);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SnapshotStore for StaticSnapshotStore {
    fn get(&self, source_id: &SourceId, keyword: &str) -> Option<SourceListing> {
        self.entries
            .get(&(source_id.clone(), fold(keyword)))
            .map(SnapshotEntry::to_listing)
    }
}

fn fold(keyword: &str) -> String {
    keyword.trim().to_lowercase()
}

/// Load snapshot entries from a YAML file and layer them over the built-ins.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or parsed, or an entry
/// has an empty keyword or a negative price.
pub fn load_snapshots(path: &Path) -> Result<StaticSnapshotStore, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: SnapshotsFile =
        serde_yaml::from_str(&content).map_err(|e| ConfigError::FileParse {
            path: path.display().to_string(),
            source: e,
        })?;

    for entry in &file.snapshots {
        if entry.keyword.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "snapshot for source '{}' has an empty keyword",
                entry.source
            )));
        }
        if !entry.avg_price.is_finite() || entry.avg_price < 0.0 {
            return Err(ConfigError::Validation(format!(
                "snapshot '{}' for source '{}' has an invalid average price",
                entry.keyword, entry.source
            )));
        }
    }

    let mut store = StaticSnapshotStore::builtin();
    store.extend(file.snapshots);
    tracing::debug!(path = %path.display(), entries = store.len(), "snapshot store loaded");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_trademe_snapshot_expands_price_band() {
        let store = StaticSnapshotStore::builtin();
        let listing = store.get(&SourceId::TRADEME, "sunglasses sport").unwrap();
        assert_eq!(listing.total_result_count, 20_648);
        let stats = listing.price_stats.unwrap();
        assert!((stats.min - 17.5).abs() < 1e-9);
        assert!((stats.max - 70.0).abs() < 1e-9);
        assert!((stats.avg - 35.0).abs() < 1e-9);
    }

    #[test]
    fn lookup_ignores_keyword_case() {
        let store = StaticSnapshotStore::builtin();
        assert!(store.get(&SourceId::TRADEME, "led strip light").is_some());
        assert!(store.get(&SourceId::TRADEME, " Yoga Mat ").is_some());
    }

    #[test]
    fn other_sources_and_unknown_keywords_miss() {
        let store = StaticSnapshotStore::builtin();
        assert!(store.get(&SourceId::EBAY, "yoga mat").is_none());
        assert!(store.get(&SourceId::TRADEME, "kayak").is_none());
    }

    #[test]
    fn zero_price_snapshot_has_no_stats() {
        let store = StaticSnapshotStore::new([SnapshotEntry::new(
            SourceId::AMAZON,
            "yoga mat",
            40,
            0.0,
        )]);
        let listing = store.get(&SourceId::AMAZON, "yoga mat").unwrap();
        assert_eq!(listing.total_result_count, 40);
        assert!(listing.price_stats.is_none());
    }

    #[test]
    fn yaml_entries_override_builtins() {
        let yaml = "snapshots:\n  - source: trademe\n    keyword: Yoga Mat\n    listings: 2000\n    avg_price: 38.5\n  - source: amazon\n    keyword: yoga mat\n    listings: 640\n    avg_price: 42.0\n";
        let path = std::env::temp_dir().join(format!("aunz-snapshots-{}.yaml", std::process::id()));
        std::fs::write(&path, yaml).unwrap();
        let store = load_snapshots(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let trademe = store.get(&SourceId::TRADEME, "yoga mat").unwrap();
        assert_eq!(trademe.total_result_count, 2_000);
        assert!(store.get(&SourceId::AMAZON, "yoga mat").is_some());
        assert!(store.get(&SourceId::TRADEME, "backpack").is_some());
    }

    #[test]
    fn missing_snapshot_file_is_io_error() {
        let err = load_snapshots(Path::new("/nonexistent/snapshots.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileIo { .. }));
    }
}
