use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use vitals_core::models::collection::PatientCollection;

use crate::error::StorageError;
use crate::store::{self, PatientStore};

/// The collection persisted as a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write an empty collection if no file exists yet. Returns whether a
    /// file was created.
    pub fn create_if_missing(&self) -> Result<bool, StorageError> {
        if self.path.exists() {
            return Ok(false);
        }
        self.save_all(&PatientCollection::new())?;
        tracing::info!(path = %self.path.display(), "created empty patient store");
        Ok(true)
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl PatientStore for JsonFileStore {
    fn load_all(&self) -> Result<PatientCollection, StorageError> {
        let bytes = fs::read(&self.path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StorageError::NotFound {
                    path: self.path.display().to_string(),
                }
            } else {
                self.io_error(e)
            }
        })?;

        let patients = store::decode(&bytes)?;
        tracing::debug!(
            path = %self.path.display(),
            records = patients.len(),
            "patient store loaded"
        );
        Ok(patients)
    }

    /// Atomic replace: write a sibling temp file, fsync, rename over the
    /// target. Readers see either the old or the new file, never a partial one.
    fn save_all(&self, patients: &PatientCollection) -> Result<(), StorageError> {
        let json = store::encode(patients)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let tmp_path = self.tmp_path();
        let written = File::create(&tmp_path).and_then(|mut file| {
            file.write_all(&json)?;
            file.sync_all()
        });
        if let Err(e) = written.and_then(|()| fs::rename(&tmp_path, &self.path)) {
            let _ = fs::remove_file(&tmp_path);
            return Err(self.io_error(e));
        }

        tracing::debug!(
            path = %self.path.display(),
            records = patients.len(),
            "patient store saved"
        );
        Ok(())
    }
}
