pub mod codec;
pub mod commands;
pub mod dispatcher;
pub mod error;
pub mod executors;
pub mod ports;
pub mod value_objects;

pub use commands::{Command, CommandName, CommandResult, Response};
pub use dispatcher::{CommandDispatcher, ExecutorDeps, PrivilegeTier};
pub use error::{ErrorCode, ExecutionError};
pub use value_objects::RegistryHive;
