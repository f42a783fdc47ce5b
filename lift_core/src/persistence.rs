//! Snapshot persistence with file locking.
//!
//! The whole store is written as one JSON document. Saves go through a
//! temp file in the same directory and an atomic rename, so a crash never
//! leaves a half-written snapshot behind.
//!
//! The temp file is private to the writer, so the save itself takes no lock.
//! Separate processes sharing a data directory serialize their
//! load-modify-save cycles with a [`StoreLock`].

use crate::{DataStore, Error, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Exclusive advisory lock held for the lifetime of a process's session
///
/// Released when dropped.
pub struct StoreLock {
    file: File,
}

impl StoreLock {
    /// Block until the lock file at `path` can be locked exclusively
    pub fn acquire(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(path)?;
        file.lock_exclusive()?;

        tracing::debug!("Acquired store lock {:?}", path);
        Ok(Self { file })
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            tracing::warn!("Failed to release store lock: {}", e);
        }
    }
}

impl DataStore {
    /// Load a store snapshot with shared locking
    ///
    /// Returns an empty store if the file doesn't exist. A corrupted file is
    /// an error: it holds user data and is never replaced silently.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No store file at {:?}, starting empty", path);
            return Ok(Self::default());
        }

        let file = File::open(path)?;
        file.lock_shared()?;

        let mut contents = String::new();
        let read = std::io::BufReader::new(&file).read_to_string(&mut contents);
        file.unlock()?;
        read?;

        let store: DataStore = serde_json::from_str(&contents).map_err(|e| {
            tracing::warn!("Failed to parse store file {:?}: {}", path, e);
            Error::Json(e)
        })?;
        tracing::debug!("Loaded store from {:?}", path);
        Ok(store)
    }

    /// Save the store snapshot
    ///
    /// Atomically writes the snapshot by:
    /// 1. Writing to a temp file
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    pub fn save(&self, path: &Path) -> Result<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;
        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            serde_json::to_writer(&mut writer, self)?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;

        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved store to {:?}", path);
        Ok(())
    }
}
