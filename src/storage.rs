//! Local key-value preferences.
//!
//! A small JSON object of integer values on disk. The only key in use holds
//! the step baseline.

use crate::consts::cli_consts::KEY_INITIAL_STEPS;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the preferences file failed.
    #[error("Preferences I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The preferences file exists but is not a JSON object of integers.
    #[error("Corrupt preferences file: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Persistence for the step baseline.
#[cfg_attr(test, automock)]
pub trait BaselineStore: Send {
    /// Returns the stored baseline, if one has been established.
    fn load_baseline(&self) -> Result<Option<u64>, StoreError>;

    /// Stores the baseline, replacing any previous value.
    fn save_baseline(&mut self, baseline: u64) -> Result<(), StoreError>;

    /// Removes the baseline.
    fn clear_baseline(&mut self) -> Result<(), StoreError>;
}

/// Preferences persisted as a JSON object in a single file.
#[derive(Debug, Clone)]
pub struct PrefsFile {
    path: PathBuf,
}

impl PrefsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, u64>, StoreError> {
        match fs::read(&self.path) {
            Ok(buf) => Ok(serde_json::from_slice(&buf)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Reads the current values before a write. A corrupt file is discarded
    /// so the write replaces it; the flag reports that it was.
    fn read_for_update(&self) -> Result<(BTreeMap<String, u64>, bool), StoreError> {
        match self.read_all() {
            Ok(values) => Ok((values, false)),
            Err(StoreError::Corrupt(e)) => {
                log::warn!(
                    "Discarding unreadable preferences file {}: {}",
                    self.path.display(),
                    e
                );
                Ok((BTreeMap::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    fn write_all(&self, values: &BTreeMap<String, u64>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(values)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    pub fn get_int(&self, key: &str) -> Result<Option<u64>, StoreError> {
        Ok(self.read_all()?.get(key).copied())
    }

    pub fn put_int(&mut self, key: &str, value: u64) -> Result<(), StoreError> {
        let (mut values, _) = self.read_for_update()?;
        values.insert(key.to_string(), value);
        self.write_all(&values)
    }

    /// Removes the key. Returns whether it was present.
    pub fn remove(&mut self, key: &str) -> Result<bool, StoreError> {
        let (mut values, discarded) = self.read_for_update()?;
        let removed = values.remove(key).is_some();
        if removed || discarded {
            self.write_all(&values)?;
        }
        Ok(removed)
    }
}

impl BaselineStore for PrefsFile {
    fn load_baseline(&self) -> Result<Option<u64>, StoreError> {
        self.get_int(KEY_INITIAL_STEPS)
    }

    fn save_baseline(&mut self, baseline: u64) -> Result<(), StoreError> {
        self.put_int(KEY_INITIAL_STEPS, baseline)
    }

    fn clear_baseline(&mut self) -> Result<(), StoreError> {
        self.remove(KEY_INITIAL_STEPS).map(|_| ())
    }
}
