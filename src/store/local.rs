//! Filesystem backend.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::backend::StoreBackend;
use super::errors::{StoreError, StoreResult};

/// One file per unit under a root directory.
///
/// Units are opened with create-new semantics, so a name collision
/// fails instead of overwriting, and every write is fsynced before it
/// is acknowledged.
#[derive(Debug)]
pub struct LocalBackend {
    root: PathBuf,
}

impl LocalBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn unit_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl StoreBackend for LocalBackend {
    fn put_new(&self, name: &str, bytes: &[u8]) -> StoreResult<()> {
        fs::create_dir_all(&self.root).map_err(|source| StoreError::WriteFailed {
            unit: name.to_string(),
            source,
        })?;

        let path = self.unit_path(name);
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|source| {
                if source.kind() == io::ErrorKind::AlreadyExists {
                    StoreError::UnitExists(name.to_string())
                } else {
                    StoreError::WriteFailed {
                        unit: name.to_string(),
                        source,
                    }
                }
            })?;

        file.write_all(bytes)
            .map_err(|source| StoreError::WriteFailed {
                unit: name.to_string(),
                source,
            })?;

        // fsync before acknowledging the unit as committed
        file.sync_all().map_err(|source| StoreError::WriteFailed {
            unit: name.to_string(),
            source,
        })?;

        Ok(())
    }

    fn get(&self, name: &str) -> StoreResult<Vec<u8>> {
        fs::read(self.unit_path(name)).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                StoreError::UnitNotFound(name.to_string())
            } else {
                StoreError::ReadFailed {
                    unit: name.to_string(),
                    source,
                }
            }
        })
    }

    fn list(&self) -> StoreResult<Vec<String>> {
        // A namespace that was never written to is an empty store.
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::ListFailed(e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(StoreError::ListFailed)?;
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }
}
