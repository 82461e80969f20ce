//! In-memory animal store.
//!
//! The `AnimalStore` owns the authoritative sequence of animals for the
//! lifetime of the process. It supports:
//!
//! - Filtered reads via [`AnimalQuery`]
//! - Lookup by id
//! - Validated appends that are persisted before they become visible
//!
//! ## Architecture
//!
//! - A `RwLock<Vec<Animal>>` holds the records; readers copy results out
//! - A writer `Mutex` serializes creates, because every create rewrites the
//!   whole backing file
//! - Storage is reached only through the [`AnimalStorage`] trait

use crate::config::SearchConfig;
use crate::error::{Result, ZookeeprError};
use crate::filter::{filter_animals, filter_animals_parallel, find_by_id, AnimalQuery};
use crate::storage::AnimalStorage;
use crate::types::{Animal, AnimalCandidate};
use parking_lot::{Mutex, RwLock};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, instrument, warn};

/// The animal store.
///
/// This structure is designed for concurrent access:
/// - Multiple readers can filter simultaneously
/// - Creates are serialized via the writer lock
///
/// ## Example
///
/// ```rust
/// use zookeepr_core::{AnimalCandidate, AnimalQuery, AnimalStore, MemoryStorage};
///
/// let store = AnimalStore::open(MemoryStorage::new()).unwrap();
///
/// let candidate = AnimalCandidate::from_slice(
///     br#"{"name":"Wolf","species":"canine","diet":"carnivore","personalityTraits":["loyal"]}"#,
/// );
/// let wolf = store.create(candidate).unwrap();
/// assert_eq!(wolf.id, "0");
///
/// let canines = store.search(&AnimalQuery::new().with_species("canine"));
/// assert_eq!(canines.len(), 1);
/// ```
pub struct AnimalStore {
    /// All animals, in insertion order
    animals: RwLock<Vec<Animal>>,

    /// Held for the whole append-and-persist sequence
    writer: Mutex<()>,

    /// Durable backing store
    storage: Box<dyn AnimalStorage>,

    /// Parallel filtering settings
    search: SearchConfig,

    /// Bumped on every successful create
    generation: AtomicU64,
}

impl AnimalStore {
    /// Open a store, loading every animal from `storage`.
    pub fn open(storage: impl AnimalStorage + 'static) -> Result<Self> {
        let animals = storage.load()?;
        warn_on_duplicate_ids(&animals);

        info!(
            storage = %storage.describe(),
            animals = animals.len(),
            "Animal store opened"
        );

        Ok(AnimalStore {
            animals: RwLock::new(animals),
            writer: Mutex::new(()),
            storage: Box::new(storage),
            search: SearchConfig::default(),
            generation: AtomicU64::new(0),
        })
    }

    /// Set the parallel filtering behaviour.
    pub fn with_search_config(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    /// Get the number of animals in the store.
    pub fn len(&self) -> usize {
        self.animals.read().len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.animals.read().is_empty()
    }

    /// Get the current generation (number of successful creates).
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Where the store persists to, for logs and status output
    pub fn storage_description(&self) -> String {
        self.storage.describe()
    }

    /// Copy of every animal, in order.
    pub fn all(&self) -> Vec<Animal> {
        self.animals.read().clone()
    }

    /// Filter the store with the given query.
    ///
    /// Results keep store order. Large stores are filtered in parallel when
    /// the search config allows it.
    pub fn search(&self, query: &AnimalQuery) -> Vec<Animal> {
        let animals = self.animals.read();

        if self.search.use_parallel(animals.len()) {
            filter_animals_parallel(query, &animals)
        } else {
            filter_animals(query, &animals)
        }
    }

    /// Get an animal by its id.
    pub fn find_by_id(&self, id: &str) -> Result<Animal> {
        let animals = self.animals.read();
        find_by_id(id, &animals)
            .cloned()
            .ok_or_else(|| ZookeeprError::not_found(id))
    }

    /// Validate, append and persist a new animal.
    ///
    /// The new id is the store length before the append. The animal becomes
    /// visible to readers only after the full sequence has been written to
    /// storage; if that write fails the store is left unchanged.
    #[instrument(skip(self, candidate))]
    pub fn create(&self, candidate: AnimalCandidate) -> Result<Animal> {
        if !candidate.is_valid() {
            debug!("Rejected malformed animal");
            return Err(ZookeeprError::InvalidAnimal);
        }

        let _writer = self.writer.lock();

        let mut next = self.animals.read().clone();
        let animal = candidate.into_animal(next.len().to_string())?;
        next.push(animal.clone());

        if let Err(e) = self.storage.persist(&next) {
            warn!(
                error = %e,
                storage = %self.storage.describe(),
                "Failed to persist new animal, store unchanged"
            );
            return Err(e);
        }

        *self.animals.write() = next;
        self.generation.fetch_add(1, Ordering::AcqRel);

        info!(id = %animal.id, name = %animal.name, "Animal created");
        Ok(animal)
    }
}

impl std::fmt::Debug for AnimalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimalStore")
            .field("animals", &self.len())
            .field("storage", &self.storage.describe())
            .field("generation", &self.generation())
            .finish()
    }
}

fn warn_on_duplicate_ids(animals: &[Animal]) {
    let mut seen = HashSet::with_capacity(animals.len());
    for animal in animals {
        if !seen.insert(animal.id.as_str()) {
            warn!(id = %animal.id, "Duplicate animal id in store, lookups return the first");
        }
    }
}
