//! Domain executors
//!
//! One executor per privileged capability. Each knows how to perform
//! exactly its class of command against its injected store port and how to
//! map every underlying fault to a structured error Response; callers never
//! need to catch anything.

pub mod file_copy;
pub mod registry_read;
pub mod registry_write;
pub mod system_parameters;

pub use file_copy::FileCopyExecutor;
pub use registry_read::RegistryReadExecutor;
pub use registry_write::RegistryWriteExecutor;
pub use system_parameters::SystemParametersExecutor;

use crate::domain::commands::{Command, Response};
use crate::domain::error::ExecutionError;
use crate::domain::ports::StoreError;

/// A handler for one class of privileged command
///
/// `execute` must not panic in non-test code: any store fault becomes a
/// failure Response. Dispatch calls `can_execute` first, but `execute`
/// still answers UnsupportedCommand for a variant outside its class.
pub trait DomainExecutor: Send + Sync {
    fn can_execute(&self, command: &Command) -> bool;
    fn execute(&self, command: &Command) -> Response;
}

/// Fallback reply for a variant this executor does not handle
pub(crate) fn unsupported(command: &Command) -> Response {
    Response::failure(
        command.name(),
        &ExecutionError::UnsupportedCommand(command.name()),
    )
}

/// Wraps a store fault that has no more specific protocol meaning
pub(crate) fn internal(err: &StoreError) -> ExecutionError {
    ExecutionError::Internal(err.to_string())
}
