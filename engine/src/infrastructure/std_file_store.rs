//! Standard-library File Store
//! FileStore adapter over std::fs

use crate::domain::ports::{FileStore, StoreError};
use std::fs;
use std::path::Path;
use tracing::debug;

/// FileStore backed by the host file system
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileStore;

impl FileStore for StdFileStore {
    fn copy(&self, source: &Path, destination: &Path, overwrite: bool) -> Result<(), StoreError> {
        if !overwrite && destination.exists() {
            return Err(StoreError::Other(format!(
                "destination '{}' already exists and overwrite is disabled",
                destination.display()
            )));
        }
        let bytes = fs::copy(source, destination)?;
        debug!(
            source = %source.display(),
            destination = %destination.display(),
            bytes,
            "copied file"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_missing_source_maps_to_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = StdFileStore;
        let err = store
            .copy(
                &dir.path().join("absent.txt"),
                &dir.path().join("copy.txt"),
                false,
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }
}
