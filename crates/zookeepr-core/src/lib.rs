//! # Zookeepr Core Library
//!
//! This crate provides the record store, query filtering, validation and
//! persistence behind the Zookeepr animal service. It has no HTTP knowledge;
//! the server crate maps its operations and errors onto routes.
//!
//! ## Architecture
//!
//! - **Types** (`types`): The `Animal` record and the loose `AnimalCandidate`
//! - **Filter** (`filter`): Conjunctive query criteria and lookup by id
//! - **Validate** (`validate`): Shape checks for new animals
//! - **Store** (`store`): The owned in-memory sequence and the create path
//! - **Storage** (`storage`): Backend trait plus an in-memory implementation
//! - **Persistence** (`persistence`): JSON data file backend
//! - **Config** (`config`): Configuration management
//!
//! ## Example
//!
//! ```rust,ignore
//! use zookeepr_core::{AnimalQuery, AnimalStore, JsonFileStorage};
//!
//! let store = AnimalStore::open(JsonFileStorage::new("data/animals.json"))?;
//!
//! let query = AnimalQuery::new().with_diet("carnivore").with_traits(["brave"]);
//! for animal in store.search(&query) {
//!     println!("{}", animal);
//! }
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod persistence;
pub mod storage;
pub mod store;
pub mod types;
pub mod validate;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, ZookeeprError, INVALID_ANIMAL_MESSAGE};
pub use filter::{filter_animals, find_by_id, AnimalFilter, AnimalQuery};
pub use persistence::JsonFileStorage;
pub use storage::{AnimalStorage, MemoryStorage};
pub use store::AnimalStore;
pub use types::{Animal, AnimalCandidate};
pub use validate::validate_animal;
