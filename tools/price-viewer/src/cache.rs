use std::{fs, path::Path};

use schema::PriceRecord;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Entries older than 24 hours are treated as absent.
pub const CACHE_MAX_AGE_MS: u64 = 86_400_000;

const CACHE_FILE: &str = "prices-cache.json";

/// The single last-write-wins cache slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub timestamp: u64,
    pub state: String,
    pub district: String,
    pub prices: Vec<PriceRecord>,
}

/// Persist the rendered selection. An empty result never touches the slot,
/// so a no-data render cannot evict records that are still fresh. Best
/// effort otherwise: failures are logged and swallowed so caching never
/// breaks a render.
pub fn store_prices(root: &Path, state: &str, district: &str, prices: &[PriceRecord]) {
    if prices.is_empty() {
        return;
    }
    let entry = CacheEntry {
        timestamp: schema::unix_timestamp_millis(),
        state: state.to_string(),
        district: district.to_string(),
        prices: prices.to_vec(),
    };
    if let Err(err) = write_entry(root, &entry) {
        warn!(error = %err, "failed to cache prices");
    }
}

/// Records from the cache slot when it is fresh, an empty list otherwise.
/// Read failures are treated the same as a missing cache.
pub fn load_cached_prices(root: &Path) -> Vec<PriceRecord> {
    match read_entry(root) {
        Ok(Some(entry)) => fresh_prices(entry, schema::unix_timestamp_millis()),
        Ok(None) => Vec::new(),
        Err(err) => {
            warn!(error = %err, "failed to read cached prices");
            Vec::new()
        }
    }
}

/// Freshness gate, separated out so it is testable without touching the
/// clock or the filesystem.
pub(crate) fn fresh_prices(entry: CacheEntry, now_ms: u64) -> Vec<PriceRecord> {
    if now_ms.saturating_sub(entry.timestamp) < CACHE_MAX_AGE_MS {
        entry.prices
    } else {
        Vec::new()
    }
}

fn write_entry(root: &Path, entry: &CacheEntry) -> Result<(), String> {
    fs::create_dir_all(root).map_err(|e| e.to_string())?;
    let payload = serde_json::to_string(entry).map_err(|e| e.to_string())?;
    fs::write(root.join(CACHE_FILE), payload).map_err(|e| e.to_string())
}

fn read_entry(root: &Path) -> Result<Option<CacheEntry>, String> {
    let path = root.join(CACHE_FILE);
    if !path.exists() {
        return Ok(None);
    }
    let payload = fs::read_to_string(&path).map_err(|e| e.to_string())?;
    serde_json::from_str(&payload)
        .map(Some)
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_root(tag: &str) -> PathBuf {
        let mut out = std::env::temp_dir();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be monotonic")
            .as_nanos();
        out.push(format!(
            "agrimate-viewer-{}-{}-{}",
            tag,
            std::process::id(),
            nanos
        ));
        out
    }

    fn sample_prices() -> Vec<PriceRecord> {
        vec![PriceRecord {
            crop: Some("Rice".to_string()),
            price: Some(2500.0),
            ..PriceRecord::default()
        }]
    }

    #[test]
    fn round_trips_the_cache_slot() {
        let root = temp_root("roundtrip");
        store_prices(&root, "tamil-nadu", "Chennai", &sample_prices());
        let cached = load_cached_prices(&root);
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].crop.as_deref(), Some("Rice"));
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn second_write_overwrites_the_slot() {
        let root = temp_root("overwrite");
        store_prices(&root, "tamil-nadu", "Chennai", &sample_prices());
        let wheat = vec![PriceRecord {
            crop: Some("Wheat".to_string()),
            price: Some(2100.0),
            ..PriceRecord::default()
        }];
        store_prices(&root, "punjab", "Amritsar", &wheat);

        let cached = load_cached_prices(&root);
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].crop.as_deref(), Some("Wheat"));
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn empty_results_leave_fresh_cached_prices_alone() {
        let root = temp_root("empty-keep");
        store_prices(&root, "tamil-nadu", "Chennai", &sample_prices());
        store_prices(&root, "kerala", "", &[]);

        let cached = load_cached_prices(&root);
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].crop.as_deref(), Some("Rice"));
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn entries_go_stale_after_24_hours() {
        let entry = CacheEntry {
            timestamp: 1_000,
            state: "tamil-nadu".to_string(),
            district: "Chennai".to_string(),
            prices: sample_prices(),
        };
        assert_eq!(
            fresh_prices(entry.clone(), 1_000 + CACHE_MAX_AGE_MS - 1).len(),
            1
        );
        assert!(fresh_prices(entry, 1_000 + CACHE_MAX_AGE_MS).is_empty());
    }

    #[test]
    fn missing_or_corrupt_cache_reads_as_empty() {
        let root = temp_root("missing");
        assert!(load_cached_prices(&root).is_empty());

        fs::create_dir_all(&root).unwrap();
        fs::write(root.join(CACHE_FILE), "{broken").unwrap();
        assert!(load_cached_prices(&root).is_empty());
        let _ = fs::remove_dir_all(&root);
    }
}
