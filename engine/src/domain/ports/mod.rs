//! Ports: capability interfaces the domain executors depend on
//! Real OS adapters and deterministic in-memory fakes both live in the
//! infrastructure layer

pub mod file_store;
pub mod registry_store;
pub mod system_parameter_store;

pub use file_store::FileStore;
pub use registry_store::{RegistryStore, RegistryValue};
pub use system_parameter_store::SystemParameterStore;

use crate::domain::value_objects::RegistryHive;
use thiserror::Error;

/// A fault reported by a store adapter
///
/// `KeyNotFound` is the only variant with protocol-level meaning (it maps
/// to the RegistryValueNameNotFound error code); everything else surfaces
/// as an internal error with its message preserved.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("subkey '{key}' not found under {hive}")]
    KeyNotFound { hive: RegistryHive, key: String },

    #[error("value '{value_name}' has an unexpected type")]
    WrongType { value_name: String },

    #[error("access denied: {0}")]
    AccessDenied(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
