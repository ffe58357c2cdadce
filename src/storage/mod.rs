//! Persistent key-value storage and the cached shuffle seed.

mod kv;
mod seed;
mod types;

pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use seed::{SeedStore, SEED_KEY, SEED_TTL_MS};
pub use types::{ShuffleSeed, StoreError};
