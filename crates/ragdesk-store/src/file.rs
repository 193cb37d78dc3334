//! File-backed store: one JSON object on disk.
//!
//! Every operation goes back to the file rather than caching, so a handle
//! observes what other writers (another process, the on-disk analogue of
//! a second browser tab) have persisted. Writes go through a temporary
//! sibling file private to the writing handle, followed by a rename, so a
//! reader never sees a half-written document and two writers never
//! rename each other's temp file.
//!
//! Read-modify-write is serialized within one handle only. Across
//! handles and processes the last rename wins: two writes racing on
//! different keys can drop one of them, exactly like two tabs writing
//! browser storage from stale snapshots.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::{KeyValueStore, StoreError};

type Entries = BTreeMap<String, String>;

/// Distinguishes handles opened by the same process.
static NEXT_HANDLE: AtomicU64 = AtomicU64::new(0);

/// A [`KeyValueStore`] persisted as a JSON object of string values.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    /// `{file}.{pid}-{handle}.tmp`, never shared with another writer.
    tmp_path: PathBuf,
    /// Serializes read-modify-write cycles through this handle.
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Opens (or prepares to create) the store at `path`.
    ///
    /// The parent directory is created if missing. The file itself is
    /// created lazily on the first write.
    ///
    /// # Errors
    /// Returns [`StoreError::Io`] if the parent directory can't be created.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let handle = NEXT_HANDLE.fetch_add(1, Ordering::Relaxed);
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let tmp_path =
            path.with_file_name(format!("{file_name}.{}-{handle}.tmp", std::process::id()));
        tracing::debug!(path = %path.display(), "file store opened");
        Ok(Self {
            path,
            tmp_path,
            write_lock: Mutex::new(()),
        })
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the document. A missing, unreadable or corrupt file reads as
    /// empty; only the caller decides whether that matters.
    fn load(&self) -> Result<Entries, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        match serde_json::from_str(&text) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "store file is not a JSON object of strings, treating as empty"
                );
                Ok(Entries::new())
            }
        }
    }

    fn persist(&self, entries: &Entries) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(entries).map_err(StoreError::Encode)?;
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        fs::write(&self.tmp_path, text).map_err(io_err)?;
        fs::rename(&self.tmp_path, &self.path).map_err(io_err)
    }

    fn update(&self, apply: impl FnOnce(&mut Entries)) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut entries = self.load()?;
        apply(&mut entries);
        self.persist(&entries)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.load() {
            Ok(mut entries) => entries.remove(key),
            Err(e) => {
                tracing::warn!(error = %e, key, "store read failed, reporting absent");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    static NEXT: AtomicU32 = AtomicU32::new(0);

    /// A fresh path under the system temp dir, unique per test.
    fn scratch_path(name: &str) -> PathBuf {
        let n = NEXT.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir()
            .join(format!("ragdesk-store-{}-{n}", std::process::id()))
            .join(format!("{name}.json"))
    }

    #[test]
    fn test_file_get_before_any_write_is_absent() {
        let store = FileStore::open(scratch_path("empty")).unwrap();
        assert_eq!(store.get("token"), None);
    }

    #[test]
    fn test_file_set_is_visible_to_second_handle() {
        let path = scratch_path("shared");
        let a = FileStore::open(&path).unwrap();
        let b = FileStore::open(&path).unwrap();
        a.set("token", "abc").unwrap();
        assert_eq!(b.get("token").as_deref(), Some("abc"));
        b.remove("token").unwrap();
        assert_eq!(a.get("token"), None);
    }

    #[test]
    fn test_file_corrupt_document_reads_absent() {
        let path = scratch_path("corrupt");
        let store = FileStore::open(&path).unwrap();
        fs::write(&path, "{not json").unwrap();
        assert_eq!(store.get("token"), None);
        // A write recovers the document.
        store.set("token", "fresh").unwrap();
        assert_eq!(store.get("token").as_deref(), Some("fresh"));
    }

    #[test]
    fn test_file_handles_use_distinct_temp_files() {
        let path = scratch_path("tmp");
        let a = FileStore::open(&path).unwrap();
        let b = FileStore::open(&path).unwrap();
        assert_ne!(a.tmp_path, b.tmp_path);
        assert_eq!(a.tmp_path.parent(), path.parent());
        assert!(a.tmp_path.to_string_lossy().contains(&std::process::id().to_string()));
    }

    #[test]
    fn test_file_concurrent_writers_never_fail_or_corrupt() {
        let path = scratch_path("race");
        let writers: Vec<_> = (0..4)
            .map(|i| {
                let store = FileStore::open(&path).unwrap();
                std::thread::spawn(move || {
                    for n in 0..25 {
                        store.set(&format!("k{i}"), &n.to_string()).unwrap();
                    }
                })
            })
            .collect();
        for writer in writers {
            writer.join().unwrap();
        }

        let text = fs::read_to_string(&path).unwrap();
        let entries: Entries = serde_json::from_str(&text).unwrap();
        assert!(!entries.is_empty());
        // No temp file is left behind.
        let leftovers = fs::read_dir(path.parent().unwrap())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn test_file_preserves_other_keys_on_write() {
        let store = FileStore::open(scratch_path("keys")).unwrap();
        store.set("lng", "en").unwrap();
        store.set("token", "t").unwrap();
        store.remove("token").unwrap();
        assert_eq!(store.get("lng").as_deref(), Some("en"));
    }
}
