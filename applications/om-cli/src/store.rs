//! Index persistence in a JSON file

use om_playback::{parse_stored_index, IndexStore, StoreError, StoreResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Stores the current index as a JSON number in a file
#[derive(Debug, Clone)]
pub struct FileIndexStore {
    path: PathBuf,
}

impl FileIndexStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IndexStore for FileIndexStore {
    fn load_index(&self) -> StoreResult<Option<i64>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Unavailable(e.to_string())),
        };

        parse_stored_index(&raw).map(Some).ok_or_else(|| {
            StoreError::Corrupt(format!("{}: not an integer", self.path.display()))
        })
    }

    fn save_index(&mut self, index: usize) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| StoreError::Unavailable(e.to_string()))?;
            }
        }

        let body = serde_json::to_string(&index)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        std::fs::write(&self.path, body).map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FileIndexStore::new(dir.path().join("index.json"));
        assert_eq!(store.load_index().unwrap(), None);
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("index.json");
        let mut store = FileIndexStore::new(&path);

        store.save_index(4).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "4");
        assert_eq!(FileIndexStore::new(&path).load_index().unwrap(), Some(4));
    }

    #[test]
    fn garbage_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.json");
        std::fs::write(&path, "\"three\"").unwrap();

        let store = FileIndexStore::new(&path);
        assert!(matches!(store.load_index(), Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn negative_values_are_returned_as_is() {
        // Range checking belongs to the playlist
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.json");
        std::fs::write(&path, "-2\n").unwrap();

        assert_eq!(FileIndexStore::new(&path).load_index().unwrap(), Some(-2));
    }
}
