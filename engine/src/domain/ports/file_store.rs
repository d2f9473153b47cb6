//! FileStore port
//! Interface for the file operations the bridge exposes

use crate::domain::ports::StoreError;
use std::path::Path;

/// Port for file-system access
pub trait FileStore: Send + Sync {
    /// Copies `source` to `destination`; refuses to clobber an existing
    /// destination unless `overwrite` is set
    fn copy(&self, source: &Path, destination: &Path, overwrite: bool) -> Result<(), StoreError>;
}
