//! JSON file persistence for the animal store.
//!
//! The data file holds a single object with one key:
//!
//! ```text
//! {
//!   "animals": [
//!     { "id": "0", "name": "...", "species": "...", "diet": "...",
//!       "personalityTraits": [ ... ] },
//!     ...
//!   ]
//! }
//! ```
//!
//! Every save rewrites the whole document. Writes go to a temp file that is
//! renamed over the data file, so a crash mid-write leaves the old contents
//! in place.

use crate::error::{Result, ZookeeprError};
use crate::storage::AnimalStorage;
use crate::types::Animal;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// On-disk document layout
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AnimalsDocument {
    pub animals: Vec<Animal>,
}

/// Stores the animal sequence in a single JSON file.
///
/// ## Example
///
/// ```rust,ignore
/// use zookeepr_core::{AnimalStorage, JsonFileStorage};
///
/// let storage = JsonFileStorage::new("./data/animals.json");
/// let animals = storage.load()?;
/// storage.persist(&animals)?;
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    /// Location of the data file
    path: PathBuf,

    /// Keep the previous contents as `<file>.bak` on each save
    keep_backup: bool,
}

impl JsonFileStorage {
    /// Create storage for the given data file.
    ///
    /// The file does not need to exist yet.
    pub fn new(path: impl AsRef<Path>) -> Self {
        JsonFileStorage {
            path: path.as_ref().to_path_buf(),
            keep_backup: false,
        }
    }

    /// Set whether to keep a backup of the previous file when saving.
    pub fn with_backup(mut self, keep_backup: bool) -> Self {
        self.keep_backup = keep_backup;
        self
    }

    /// Path to the data file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path to the backup file.
    pub fn backup_path(&self) -> PathBuf {
        sibling_with_suffix(&self.path, "bak")
    }

    /// Path to the temporary file used during save.
    fn temp_path(&self) -> PathBuf {
        sibling_with_suffix(&self.path, "tmp")
    }

    /// Check if the data file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl JsonFileStorage {
    /// Write `document` to `temp_path`, back up the current file if asked,
    /// then rename the temp file over the data file.
    fn replace_via(&self, temp_path: &Path, document: &AnimalsDocumentRef<'_>) -> Result<()> {
        let file = File::create(temp_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, document)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        writer
            .into_inner()
            .map_err(|e| ZookeeprError::storage("flush", e.to_string()))?
            .sync_all()?;

        if self.keep_backup && self.path.exists() {
            let backup_path = self.backup_path();
            let _ = fs::remove_file(&backup_path);
            fs::copy(&self.path, &backup_path)?;
        }

        fs::rename(temp_path, &self.path)
            .map_err(|e| ZookeeprError::storage("rename", e.to_string()))
    }
}

impl AnimalStorage for JsonFileStorage {
    /// Load the animals from disk.
    ///
    /// A missing file is an empty store; a file that does not parse is
    /// [`ZookeeprError::StoreCorrupted`].
    fn load(&self) -> Result<Vec<Animal>> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "Data file not found, starting with an empty store");
            return Ok(Vec::new());
        }

        info!(path = %self.path.display(), "Loading animals from disk");

        let file = File::open(&self.path)?;
        let document: AnimalsDocument = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| ZookeeprError::StoreCorrupted {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        info!(animals = document.animals.len(), "Animals loaded successfully");
        Ok(document.animals)
    }

    /// Save the full sequence to disk.
    ///
    /// Uses atomic write (write to temp, then rename) to prevent corruption.
    fn persist(&self, animals: &[Animal]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        debug!(
            path = %self.path.display(),
            animals = animals.len(),
            "Saving animals to disk"
        );

        let temp_path = self.temp_path();
        if let Err(e) = self.replace_via(&temp_path, &AnimalsDocumentRef { animals }) {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }

        debug!("Animals saved successfully");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Borrowing twin of [`AnimalsDocument`] so saving doesn't clone the store
#[derive(Serialize)]
struct AnimalsDocumentRef<'a> {
    animals: &'a [Animal],
}

/// `animals.json` -> `animals.json.<suffix>`
fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "animals.json".into());
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn make_test_animals() -> Vec<Animal> {
        vec![
            Animal::new(
                "0",
                "Tiger",
                "feline",
                "carnivore",
                vec!["fierce".to_string(), "cute".to_string()],
            ),
            Animal::new("1", "Wolf", "canine", "carnivore", vec!["loyal".to_string()])
                .with_extra("habitat", json!("forest")),
        ]
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(temp_dir.path().join("animals.json"));

        let animals = make_test_animals();
        storage.persist(&animals).unwrap();
        assert!(storage.exists());

        let loaded = storage.load().unwrap();
        assert_eq!(loaded, animals);
    }

    #[test]
    fn test_document_layout() {
        let temp_dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(temp_dir.path().join("animals.json"));
        storage.persist(&make_test_animals()).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(storage.path()).unwrap()).unwrap();
        let animals = raw.get("animals").and_then(|a| a.as_array()).unwrap();
        assert_eq!(animals.len(), 2);
        assert_eq!(animals[1]["id"], json!("1"));
        assert_eq!(animals[1]["personalityTraits"], json!(["loyal"]));
        assert_eq!(animals[1]["habitat"], json!("forest"));
    }

    #[test]
    fn test_load_bundled_sample() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/animals.json");
        let animals = JsonFileStorage::new(path).load().unwrap();

        assert_eq!(animals.len(), 4);
        assert_eq!(animals[0].name, "Tiger");
        for (i, animal) in animals.iter().enumerate() {
            assert_eq!(animal.id, i.to_string());
        }
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(temp_dir.path().join("nope.json"));

        assert!(!storage.exists());
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn test_load_corrupted() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("animals.json");
        fs::write(&path, "{ \"animals\": [ { \"id\": ").unwrap();

        let err = JsonFileStorage::new(&path).load().unwrap_err();
        assert!(matches!(err, ZookeeprError::StoreCorrupted { .. }));
        assert!(err.is_storage_error());
    }

    #[test]
    fn test_overwrite_replaces_everything() {
        let temp_dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(temp_dir.path().join("animals.json"));

        storage.persist(&make_test_animals()).unwrap();
        storage.persist(&make_test_animals()[..1]).unwrap();

        let loaded = storage.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(!temp_dir.path().join("animals.json.tmp").exists());
    }

    #[test]
    fn test_backup_keeps_previous_contents() {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            JsonFileStorage::new(temp_dir.path().join("animals.json")).with_backup(true);

        let animals = make_test_animals();
        storage.persist(&animals[..1]).unwrap();
        storage.persist(&animals).unwrap();

        let backup = JsonFileStorage::new(storage.backup_path()).load().unwrap();
        assert_eq!(backup.len(), 1);
        assert_eq!(storage.load().unwrap().len(), 2);
    }

    #[test]
    fn test_failed_backup_removes_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("animals.json");
        let animals = make_test_animals();
        JsonFileStorage::new(&path).persist(&animals[..1]).unwrap();

        // A directory where the backup file should go makes the copy fail
        let storage = JsonFileStorage::new(&path).with_backup(true);
        fs::create_dir(storage.backup_path()).unwrap();
        fs::write(storage.backup_path().join("keep"), "x").unwrap();

        let err = storage.persist(&animals).unwrap_err();
        assert!(err.is_storage_error());
        assert!(!temp_dir.path().join("animals.json.tmp").exists());
        assert_eq!(storage.load().unwrap().len(), 1);
    }

    #[test]
    fn test_creates_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(temp_dir.path().join("data").join("animals.json"));

        storage.persist(&make_test_animals()).unwrap();
        assert!(storage.exists());
    }

    #[test]
    fn test_persist_into_unwritable_location() {
        let temp_dir = TempDir::new().unwrap();
        // A regular file where the parent directory should be
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();

        let storage = JsonFileStorage::new(blocker.join("animals.json"));
        let err = storage.persist(&make_test_animals()).unwrap_err();
        assert!(err.is_storage_error());
    }
}
