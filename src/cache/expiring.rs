//! In-memory TTL cache with a background sweep task
//!
//! Provides a `Cache` that maps string keys (in practice: request URLs) to
//! raw response bytes, each stamped with its insertion time. A tokio task
//! spawned at construction wakes once per TTL period and removes every entry
//! whose age is strictly greater than the TTL.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tokio::sync::mpsc;

/// A single cached payload with its insertion timestamp
#[derive(Debug, Clone)]
struct CacheEntry {
    /// When the entry was added (or last overwritten)
    created_at: Instant,
    /// The cached response bytes
    value: Vec<u8>,
}

/// Shared map type guarded by a reader/writer lock
type EntryMap = Arc<RwLock<HashMap<String, CacheEntry>>>;

/// Thread-safe, time-expiring cache for raw API response bytes
///
/// The cache is created once with a fixed TTL and shared by cloning the
/// handle; all clones operate on the same entry map. Construction spawns a
/// single background sweep task that ticks once per TTL period, so an entry
/// can survive up to roughly twice the TTL before it is evicted. `get` never
/// checks entry age itself.
///
/// The sweep task stops when [`Cache::shutdown`] is called or when the last
/// handle is dropped. If neither happens it runs until process exit, which
/// is fine for the single long-lived cache this application creates.
#[derive(Debug, Clone)]
pub struct Cache {
    /// Entry map shared with the sweep task
    entries: EntryMap,
    /// Maximum entry age before eviction, fixed at construction
    ttl: Duration,
    /// Signals the sweep task to stop
    shutdown_tx: mpsc::Sender<()>,
}

impl Cache {
    /// Creates a cache with the given TTL and starts its sweep task.
    ///
    /// Must be called from within a tokio runtime. `ttl` must be non-zero:
    /// the underlying interval timer panics on a zero period, and a
    /// zero-length TTL would expire every entry on the next tick anyway.
    pub fn new(ttl: Duration) -> Self {
        let entries: EntryMap = Arc::new(RwLock::new(HashMap::new()));
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>(1);

        spawn_sweeper(Arc::clone(&entries), ttl, shutdown_rx);

        Self {
            entries,
            ttl,
            shutdown_tx,
        }
    }

    /// Inserts or overwrites the entry for `key`, stamping it with the
    /// current time.
    ///
    /// Re-adding an existing key replaces the stored bytes and resets the
    /// entry's expiration clock. Never fails.
    pub fn add(&self, key: impl Into<String>, value: Vec<u8>) {
        let entry = CacheEntry {
            created_at: Instant::now(),
            value,
        };
        self.entries.write().insert(key.into(), entry);
    }

    /// Returns a copy of the bytes stored for `key`, if present.
    ///
    /// Age is not checked here; an entry past its TTL is still returned
    /// until the sweep task removes it. `None` means the key was never
    /// added or has already been swept. The returned buffer is independent
    /// of cache-internal storage, so callers may mutate it freely.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.read().get(key).map(|entry| entry.value.clone())
    }

    /// Returns the TTL this cache was constructed with.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the number of entries currently in the map, including any
    /// that are past their TTL but not yet swept.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Stops the background sweep task.
    ///
    /// Existing entries remain readable and `add` keeps working, but
    /// nothing is evicted afterwards. Calling this more than once is
    /// harmless.
    pub async fn shutdown(&self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

/// Spawns the background sweep task for a cache instance.
///
/// The task ticks once per TTL period and evicts every entry whose age is
/// strictly greater than the TTL; entries exactly at the boundary are
/// retained. It exits when a shutdown signal arrives or when every `Cache`
/// handle has been dropped (the channel closes).
fn spawn_sweeper(entries: EntryMap, ttl: Duration, mut shutdown_rx: mpsc::Receiver<()>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(ttl);
        // Consume the immediate first tick so the first sweep happens one
        // full period after construction
        interval.tick().await;

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    entries.write().retain(|_, entry| entry.created_at.elapsed() <= ttl);
                }
                _ = shutdown_rx.recv() => {
                    break;
                }
            }
        }
    });
}
