//! Key-value backends for the persistence gateway

use crate::error::{BoardError, Result};
use fs2::FileExt;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// A string-keyed store of string documents
pub trait KeyValueStore {
    /// Read the value under `key`; `None` when nothing is stored
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value under `key`. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<()>;
}

// =============================================================================
// FileStore
// =============================================================================

/// One JSON file per key under a directory.
///
/// Writes go through a temp file and a rename, under an exclusive lock on
/// `<root>/.lock`, so a reader never sees a half-written document.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(BoardError::storage(format!("invalid storage key: {key:?}")));
        }
        Ok(self.root.join(format!("{key}.json")))
    }

    fn lock_path(&self) -> PathBuf {
        self.root.join(".lock")
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root)?;

        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.lock_path())?;
        FileExt::lock_exclusive(&lock)?;

        let result = atomic_write(&path, value.as_bytes());
        let _ = FileExt::unlock(&lock);
        result
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

/// Write `content` to a sibling temp file, then rename it over `path`
fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let temp_path = path.with_extension("json.tmp");
    {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(content)?;
        file.sync_all()?;
    }
    fs::rename(&temp_path, path)?;
    Ok(())
}

// =============================================================================
// MemoryStore
// =============================================================================

#[derive(Debug, Default)]
struct MemoryInner {
    entries: HashMap<String, String>,
    fail_writes: bool,
    write_attempts: usize,
}

/// In-process store. Clones share the same entries, so a test can keep a
/// handle after giving one to the gateway.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<MemoryInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate `key` with raw content
    pub fn with_entry(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.inner
            .borrow_mut()
            .entries
            .insert(key.into(), value.into());
        self
    }

    /// Make every subsequent `set` fail, as a full or unavailable store would
    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.borrow_mut().fail_writes = fail;
    }

    /// Number of `set` calls so far, successful or not
    pub fn write_attempts(&self) -> usize {
        self.inner.borrow().write_attempts
    }

    /// Raw content under `key`
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.borrow().entries.get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.inner.borrow().entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        inner.write_attempts += 1;
        if inner.fail_writes {
            return Err(BoardError::storage("quota exceeded"));
        }
        inner.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.inner.borrow_mut().entries.remove(key);
        Ok(())
    }
}
