//! Storage backend trait.
//!
//! The store talks to durable storage only through [`AnimalStorage`]. The
//! JSON file implementation lives in `persistence`; [`MemoryStorage`] keeps
//! the last persisted snapshot in memory, which is enough for tests and for
//! running without a data file.

use crate::error::{Result, ZookeeprError};
use crate::types::Animal;
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Durable storage for the full animal sequence.
///
/// `persist` always receives the entire sequence and must replace whatever
/// was stored before; there is no incremental append.
pub trait AnimalStorage: Send + Sync {
    /// Load every stored animal, in order.
    fn load(&self) -> Result<Vec<Animal>>;

    /// Replace the stored sequence with `animals`.
    fn persist(&self, animals: &[Animal]) -> Result<()>;

    /// Human-readable location, for logs
    fn describe(&self) -> String;
}

impl<S: AnimalStorage + ?Sized> AnimalStorage for Arc<S> {
    fn load(&self) -> Result<Vec<Animal>> {
        (**self).load()
    }

    fn persist(&self, animals: &[Animal]) -> Result<()> {
        (**self).persist(animals)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// In-memory storage.
///
/// Can be told to fail writes, to exercise the store's error path.
#[derive(Default)]
pub struct MemoryStorage {
    snapshot: Mutex<Vec<Animal>>,
    fail_writes: AtomicBool,
    writes: Mutex<u64>,
}

impl MemoryStorage {
    /// Create empty in-memory storage.
    pub fn new() -> Self {
        MemoryStorage::default()
    }

    /// Create storage that already holds these animals.
    pub fn with_animals(animals: Vec<Animal>) -> Self {
        MemoryStorage {
            snapshot: Mutex::new(animals),
            ..Default::default()
        }
    }

    /// Make subsequent `persist` calls fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Release);
    }

    /// The last successfully persisted sequence
    pub fn snapshot(&self) -> Vec<Animal> {
        self.snapshot.lock().clone()
    }

    /// Number of successful `persist` calls
    pub fn write_count(&self) -> u64 {
        *self.writes.lock()
    }
}

impl AnimalStorage for MemoryStorage {
    fn load(&self) -> Result<Vec<Animal>> {
        Ok(self.snapshot())
    }

    fn persist(&self, animals: &[Animal]) -> Result<()> {
        if self.fail_writes.load(Ordering::Acquire) {
            return Err(ZookeeprError::storage("persist", "memory storage is read-only"));
        }
        *self.snapshot.lock() = animals.to_vec();
        *self.writes.lock() += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

impl fmt::Debug for MemoryStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStorage")
            .field("animals", &self.snapshot.lock().len())
            .field("fail_writes", &self.fail_writes.load(Ordering::Relaxed))
            .finish()
    }
}
