//! Application state management.

use std::sync::Arc;
use tracing::info;
use zookeepr_core::{AnimalStore, Config, JsonFileStorage};

/// Shared application state.
pub struct App {
    /// Configuration
    pub config: Config,

    /// The animal store
    pub store: Arc<AnimalStore>,
}

impl App {
    /// Create a new application instance, loading the data file.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let data_file = config.data_file()?;
        let storage = JsonFileStorage::new(&data_file).with_backup(config.storage.backup);
        let store = AnimalStore::open(storage)?.with_search_config(config.search.clone());

        info!(
            data_file = %data_file.display(),
            animals = store.len(),
            "Application initialized"
        );

        Ok(App {
            config,
            store: Arc::new(store),
        })
    }
}
