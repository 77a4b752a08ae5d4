//! Directory-backed tier: one JSON file per cache key

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Per-process sequence for temporary file names
static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Persistent tier for one namespace.
///
/// Writes go to a temporary file that is renamed over the target, so a
/// reader never observes a half-written entry.
pub(crate) struct DiskTier {
    dir: PathBuf,
}

impl DiskTier {
    pub(crate) fn new(dir: &Path) -> Self {
        // Create directory if needed
        if let Err(e) = std::fs::create_dir_all(dir) {
            log::warn!("Failed to create cache directory {:?}: {}", dir, e);
        } else {
            log::debug!("Cache directory: {:?}", dir);
        }

        Self {
            dir: dir.to_path_buf(),
        }
    }

    pub(crate) fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name for a key; keys may contain ':' and '/', so they are encoded
    fn filename(key: &str) -> String {
        format!("{}.json", urlencoding::encode(key))
    }

    /// Unique across processes and across stores sharing a directory
    fn tmp_filename(key: &str) -> String {
        format!(
            "{}.{}.{}.tmp",
            Self::filename(key),
            std::process::id(),
            TMP_SEQ.fetch_add(1, Ordering::Relaxed)
        )
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(Self::filename(key))
    }

    pub(crate) fn read(&self, key: &str) -> Option<Vec<u8>> {
        match std::fs::read(self.path(key)) {
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                log::warn!("Failed to read cache entry '{}': {}", key, e);
                None
            }
        }
    }

    pub(crate) fn write(&self, key: &str, bytes: &[u8]) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path(key);
        let tmp = self.dir.join(Self::tmp_filename(key));
        std::fs::write(&tmp, bytes)?;
        if let Err(e) = std::fs::rename(&tmp, &path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(e);
        }
        Ok(())
    }

    pub(crate) fn remove(&self, key: &str) {
        match std::fs::remove_file(self.path(key)) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => log::warn!("Failed to delete cache entry '{}': {}", key, e),
        }
    }

    /// Delete every entry file in the namespace directory
    pub(crate) fn clear(&self) {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Failed to list cache directory {:?}: {}", self.dir, e);
                return;
            }
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json" || ext == "tmp") {
                if let Err(e) = std::fs::remove_file(&path) {
                    log::warn!("Failed to delete {:?}: {}", path, e);
                }
            }
        }
    }
}
