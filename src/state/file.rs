use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{Result, UserdexError};
use crate::paths::state_path;

use super::KeyValueStore;

/// Backend persisting every key into a single JSON object file.
///
/// The whole file is rewritten on each change through a temp file in the same
/// directory followed by a rename, so a crash never leaves a half-written file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location under the userdex root.
    pub fn open_default() -> Self {
        Self::new(state_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_entries(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn save_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, entries)?;
        tmp.write_all(b"\n")?;
        tmp.persist(&self.path).map_err(|e| {
            UserdexError::Storage(format!(
                "failed to replace {}: {}",
                self.path.display(),
                e.error
            ))
        })?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        // Only a file that fails to parse is replaced; IO errors keep it intact.
        let mut entries = match self.load_entries() {
            Ok(entries) => entries,
            Err(UserdexError::Json(e)) => {
                tracing::warn!(
                    "Discarding corrupt state file {}: {e}",
                    self.path.display()
                );
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        entries.insert(key.to_string(), value.to_string());
        self.save_entries(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut entries = self.load_entries()?;
        if entries.remove(key).is_some() {
            self.save_entries(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{GENDER_KEY, PAGE_KEY, Persisted, read, write};
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_as_empty() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path().join("state.json"));
        assert_eq!(store.get("anything").unwrap(), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("state.json");

        let mut store = FileStore::new(&path);
        assert!(write(&mut store, PAGE_KEY, &7u32));
        assert!(write(&mut store, GENDER_KEY, "female"));

        let reopened = FileStore::new(&path);
        assert_eq!(read(&reopened, PAGE_KEY, 1u32), 7);
        assert_eq!(read(&reopened, GENDER_KEY, String::new()), "female");
    }

    #[test]
    fn test_file_is_a_json_object_of_namespaced_keys() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("state.json");
        let mut store = FileStore::new(&path);
        write(&mut store, PAGE_KEY, &2u32);

        let content = fs::read_to_string(&path).unwrap();
        let parsed: BTreeMap<String, String> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.get("user_listing_filter_page").map(String::as_str), Some("2"));
    }

    #[test]
    fn test_corrupt_file_falls_back_to_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("state.json");
        fs::write(&path, "{ not json").unwrap();

        let store = FileStore::new(&path);
        let page = Persisted::load(&store, PAGE_KEY, 1u32);
        assert_eq!(*page.get(), 1);
    }

    #[test]
    fn test_corrupt_file_is_replaced_on_write() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("state.json");
        fs::write(&path, "{ not json").unwrap();

        let mut store = FileStore::new(&path);
        assert!(write(&mut store, PAGE_KEY, &5u32));
        assert_eq!(read(&store, PAGE_KEY, 1u32), 5);
    }

    #[test]
    fn test_unreadable_file_is_not_overwritten() {
        // A directory at the state path makes reading fail with an IO error.
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("state.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "").unwrap();

        let mut store = FileStore::new(&path);
        let err = store.set(PAGE_KEY, "3").unwrap_err();
        assert!(matches!(err, UserdexError::Io(_)), "got {err:?}");
        assert!(path.join("keep").exists());
    }

    #[test]
    fn test_remove_key() {
        let tmp = TempDir::new().unwrap();
        let mut store = FileStore::new(tmp.path().join("state.json"));
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.remove("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
        assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
        store.remove("missing").unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_unwritable_directory_write_is_swallowed() {
        // Parent "directory" is a regular file, so creating the state file fails.
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let mut store = FileStore::new(blocker.join("state.json"));
        let mut gender = Persisted::load(&store, GENDER_KEY, String::new());
        gender.set(&mut store, "female".to_string());
        assert_eq!(gender.get(), "female");
    }
}
