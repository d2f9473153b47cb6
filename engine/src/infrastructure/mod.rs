//! Infrastructure: concrete store adapters and configuration loading

pub mod config;
pub mod in_memory_registry;
pub mod in_memory_system_parameters;
pub mod std_file_store;

#[cfg(target_os = "windows")]
pub mod windows;

pub use config::{BackendKind, BridgeConfig, ConfigError};
pub use in_memory_registry::InMemoryRegistryStore;
pub use in_memory_system_parameters::InMemorySystemParameterStore;
pub use std_file_store::StdFileStore;

#[cfg(target_os = "windows")]
pub use windows::{WindowsRegistryStore, WindowsSystemParameterStore};

use crate::domain::dispatcher::ExecutorDeps;
use std::sync::Arc;

/// Builds the store set for the selected backend
///
/// On non-Windows hosts the OS backend falls back to the in-memory stores
/// (there is no registry to adapt); file copies always use the real file
/// system.
pub fn build_deps(backend: BackendKind) -> ExecutorDeps {
    match backend {
        BackendKind::Memory => memory_deps(),
        BackendKind::Os => os_deps(),
    }
}

fn memory_deps() -> ExecutorDeps {
    ExecutorDeps {
        registry: Arc::new(InMemoryRegistryStore::new()),
        system_parameters: Arc::new(InMemorySystemParameterStore::new()),
        files: Arc::new(StdFileStore),
    }
}

#[cfg(target_os = "windows")]
fn os_deps() -> ExecutorDeps {
    ExecutorDeps {
        registry: Arc::new(WindowsRegistryStore),
        system_parameters: Arc::new(WindowsSystemParameterStore),
        files: Arc::new(StdFileStore),
    }
}

#[cfg(not(target_os = "windows"))]
fn os_deps() -> ExecutorDeps {
    tracing::warn!("os backend is unavailable on this platform, using in-memory stores");
    memory_deps()
}
