use chrono::{DateTime, Utc};
use rand::Rng;

use super::kv::KeyValueStore;
use super::types::{ShuffleSeed, StoreError};

/// Store key holding the cached shuffle seed record.
pub const SEED_KEY: &str = "feed.shuffle_seed";

/// Seed time-to-live: one hour.
pub const SEED_TTL_MS: i64 = 3_600_000;

/// Time-boxed shuffle seed cache.
///
/// Within the TTL window every call returns the same seed, so the gallery
/// order is stable across restarts. Store failures never escape: the caller
/// always gets a usable seed, at worst one that is not persisted.
pub struct SeedStore {
    store: Box<dyn KeyValueStore>,
    ttl_ms: i64,
}

impl SeedStore {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self {
            store,
            ttl_ms: SEED_TTL_MS,
        }
    }

    /// Return the cached seed, or create and persist a new one.
    pub fn get_or_create_seed(&mut self) -> String {
        self.get_or_create_seed_at(Utc::now())
    }

    /// Same as [`get_or_create_seed`](Self::get_or_create_seed) with an explicit clock.
    pub fn get_or_create_seed_at(&mut self, now: DateTime<Utc>) -> String {
        let now_ms = now.timestamp_millis();

        match self.read_cached() {
            Ok(Some(cached)) if cached.is_fresh(now_ms, self.ttl_ms) => {
                tracing::debug!(
                    age_secs = cached.age_ms(now_ms) / 1000,
                    "Using cached shuffle seed"
                );
                return cached.seed;
            }
            Ok(Some(_)) => tracing::info!("Shuffle seed expired, generating new one"),
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "Failed to read cached shuffle seed"),
        }

        let record = ShuffleSeed {
            seed: generate_seed(now_ms),
            timestamp: now_ms,
        };

        match self.write_cached(&record) {
            Ok(()) => tracing::info!(seed = %record.seed, "Generated new shuffle seed"),
            Err(e) => tracing::warn!(error = %e, "Failed to cache shuffle seed"),
        }

        record.seed
    }

    /// Drop the cached seed so the next lookup regenerates it.
    pub fn reset(&mut self) {
        if let Err(e) = self.store.remove(SEED_KEY) {
            tracing::warn!(error = %e, "Failed to clear cached shuffle seed");
        }
    }

    fn read_cached(&self) -> Result<Option<ShuffleSeed>, StoreError> {
        match self.store.get(SEED_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn write_cached(&mut self, record: &ShuffleSeed) -> Result<(), StoreError> {
        let json = serde_json::to_string(record)?;
        self.store.set(SEED_KEY, &json)
    }
}

/// Current time in milliseconds with three random low digits appended, so two
/// regenerations within the same millisecond still differ.
fn generate_seed(now_ms: i64) -> String {
    let jitter: u16 = rand::thread_rng().gen_range(0..1000);
    format!("{}{:03}", now_ms, jitter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStore, MemoryStore};
    use chrono::{Duration, TimeZone};
    use std::sync::{Arc, Mutex};

    /// Store whose every operation fails.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable("quota exceeded".into()))
        }
        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("quota exceeded".into()))
        }
        fn remove(&mut self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("quota exceeded".into()))
        }
    }

    /// Memory store shared with the test so its contents can be inspected.
    #[derive(Clone, Default)]
    struct SharedStore(Arc<Mutex<MemoryStore>>);

    impl KeyValueStore for SharedStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.0.lock().unwrap().get(key)
        }
        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            self.0.lock().unwrap().set(key, value)
        }
        fn remove(&mut self, key: &str) -> Result<(), StoreError> {
            self.0.lock().unwrap().remove(key)
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_same_seed_within_ttl() {
        let mut seeds = SeedStore::new(Box::new(MemoryStore::new()));
        let first = seeds.get_or_create_seed_at(t0());
        let second = seeds.get_or_create_seed_at(t0() + Duration::minutes(59));
        assert_eq!(first, second);
    }

    #[test]
    fn test_new_seed_after_ttl() {
        let mut seeds = SeedStore::new(Box::new(MemoryStore::new()));
        let first = seeds.get_or_create_seed_at(t0());
        let second = seeds.get_or_create_seed_at(t0() + Duration::milliseconds(SEED_TTL_MS));
        assert_ne!(first, second);

        // The regenerated seed is now the cached one
        let third = seeds.get_or_create_seed_at(t0() + Duration::minutes(61));
        assert_eq!(second, third);
    }

    #[test]
    fn test_seed_parses_as_integer() {
        let mut seeds = SeedStore::new(Box::new(MemoryStore::new()));
        let seed = seeds.get_or_create_seed_at(t0());
        assert!(seed.parse::<i64>().is_ok(), "seed {seed} should be numeric");
    }

    #[test]
    fn test_record_overwritten_not_appended() {
        let shared = SharedStore::default();
        let mut seeds = SeedStore::new(Box::new(shared.clone()));

        seeds.get_or_create_seed_at(t0());
        let second = seeds.get_or_create_seed_at(t0() + Duration::hours(2));

        let raw = shared.get(SEED_KEY).unwrap().unwrap();
        let record: ShuffleSeed = serde_json::from_str(&raw).unwrap();
        assert_eq!(record.seed, second);
        assert_eq!(record.timestamp, (t0() + Duration::hours(2)).timestamp_millis());
    }

    #[test]
    fn test_corrupt_record_regenerates() {
        let mut store = MemoryStore::new();
        store.set(SEED_KEY, "not json").unwrap();
        let mut seeds = SeedStore::new(Box::new(store));

        let seed = seeds.get_or_create_seed_at(t0());
        assert_eq!(seed, seeds.get_or_create_seed_at(t0()));
    }

    #[test]
    fn test_broken_store_falls_back() {
        let mut seeds = SeedStore::new(Box::new(BrokenStore));
        let a = seeds.get_or_create_seed_at(t0());
        let b = seeds.get_or_create_seed_at(t0() + Duration::seconds(1));
        assert!(a.parse::<i64>().is_ok());
        // Nothing persisted, so every call produces a fresh seed
        assert_ne!(a, b);
        seeds.reset();
    }

    #[test]
    fn test_reset_forces_regeneration() {
        let mut seeds = SeedStore::new(Box::new(MemoryStore::new()));
        let first = seeds.get_or_create_seed_at(t0());
        seeds.reset();
        let second = seeds.get_or_create_seed_at(t0() + Duration::seconds(1));
        assert_ne!(first, second);
    }

    #[test]
    fn test_corrupt_state_file_is_repaired() {
        let dir = std::env::temp_dir().join("holofeed_seed_test_corrupt_file");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("state.json");
        std::fs::write(&path, "{ truncated").unwrap();

        let mut seeds = SeedStore::new(Box::new(FileStore::new(&path)));
        let a = seeds.get_or_create_seed_at(t0());
        let b = seeds.get_or_create_seed_at(t0() + Duration::seconds(1));
        let c = seeds.get_or_create_seed_at(t0() + Duration::seconds(2));
        assert_eq!(a, b);
        assert_eq!(b, c);

        // A fresh store over the same file sees the repaired record
        let mut reopened = SeedStore::new(Box::new(FileStore::new(&path)));
        assert_eq!(reopened.get_or_create_seed_at(t0() + Duration::minutes(5)), a);

        std::fs::remove_dir_all(&dir).ok();
    }
}
