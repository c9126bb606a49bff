use crate::PanelError;
use regex::Regex;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

/// Storage entry holding the serialized mission counters.
pub const MISSIONS_KEY: &str = "missions";

static KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-][A-Za-z0-9_.-]*$").unwrap());

/// A named key-value string store, the way the page uses browser storage.
pub trait CounterStore {
    fn read(&self, key: &str) -> Result<Option<String>, PanelError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), PanelError>;
}

pub fn validate_key(key: &str) -> Result<(), PanelError> {
    if KEY_RE.is_match(key) {
        Ok(())
    } else {
        Err(PanelError::Config(format!("invalid storage key {key:?}")))
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CounterStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, PanelError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PanelError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per entry under a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn entry_path(&self, key: &str) -> Result<PathBuf, PanelError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl CounterStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, PanelError> {
        let path = self.entry_path(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PanelError> {
        let path = self.entry_path(key)?;
        std::fs::create_dir_all(&self.dir)?;
        // Readers see either the old map or the new one, never a partial write
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        log::debug!("wrote {} ({} bytes)", path.display(), value.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.read("missions").unwrap(), None);
        store.write("missions", "{}").unwrap();
        store.write("missions", r#"{"a":1}"#).unwrap();
        assert_eq!(store.read("missions").unwrap().as_deref(), Some(r#"{"a":1}"#));
    }

    #[test]
    fn file_store_missing_entry_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("nested"));
        assert_eq!(store.read(MISSIONS_KEY).unwrap(), None);
    }

    #[test]
    fn file_store_creates_dir_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path().join("nested"));
        store.write(MISSIONS_KEY, r#"{"x":1}"#).unwrap();
        store.write(MISSIONS_KEY, r#"{"x":2}"#).unwrap();
        assert_eq!(store.read(MISSIONS_KEY).unwrap().as_deref(), Some(r#"{"x":2}"#));
        assert!(dir.path().join("nested").join("missions.json").exists());
        assert!(!dir.path().join("nested").join("missions.json.tmp").exists());
    }

    #[test]
    fn rejects_path_like_keys() {
        for key in ["", "../etc", "a/b", ".hidden", "with space"] {
            assert!(validate_key(key).is_err(), "{key:?} should be rejected");
        }
        for key in ["missions", "missions.v2", "page-load_1"] {
            assert!(validate_key(key).is_ok(), "{key:?} should be accepted");
        }
        let mut store = FileStore::new("/nonexistent");
        assert!(matches!(store.write("../x", "{}"), Err(PanelError::Config(_))));
    }
}
