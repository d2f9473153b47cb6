//! Command dispatcher
//!
//! Holds the ordered, immutable executor list plus the two built-in
//! commands (Echo, ShutdownServer). Dispatch contract: the first executor
//! in registration order whose `can_execute` returns true wins; ties are
//! broken by registration order alone. The dispatcher is stateless between
//! calls, so concurrent dispatch against one long-lived instance is safe.

use crate::domain::commands::{Command, CommandName, Response};
use crate::domain::error::ExecutionError;
use crate::domain::executors::{
    DomainExecutor, FileCopyExecutor, RegistryReadExecutor, RegistryWriteExecutor,
    SystemParametersExecutor,
};
use crate::domain::ports::{FileStore, RegistryStore, SystemParameterStore};
use std::sync::Arc;
use tracing::{info, warn};

/// The trust level of the process hosting a dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivilegeTier {
    /// Sandboxed issuer process: read-only capabilities
    Standard,
    /// Broker process with full OS rights
    Elevated,
}

/// The store adapters injected into the executors
#[derive(Clone)]
pub struct ExecutorDeps {
    pub registry: Arc<dyn RegistryStore>,
    pub system_parameters: Arc<dyn SystemParameterStore>,
    pub files: Arc<dyn FileStore>,
}

pub struct CommandDispatcher {
    executors: Vec<Box<dyn DomainExecutor>>,
}

impl CommandDispatcher {
    /// Builds a dispatcher over an explicit executor list; the list is
    /// fixed for the dispatcher's lifetime
    pub fn new(executors: Vec<Box<dyn DomainExecutor>>) -> Self {
        Self { executors }
    }

    /// Composition root: wires the executor set appropriate to a tier.
    ///
    /// The standard tier registers no write-capable registry executor and
    /// no file-copy executor; those commands must travel through the
    /// elevation bridge.
    pub fn for_tier(tier: PrivilegeTier, deps: ExecutorDeps) -> Self {
        let mut executors: Vec<Box<dyn DomainExecutor>> = Vec::new();
        executors.push(Box::new(RegistryReadExecutor::new(deps.registry.clone())));
        if tier == PrivilegeTier::Elevated {
            executors.push(Box::new(RegistryWriteExecutor::new(deps.registry)));
        }
        executors.push(Box::new(SystemParametersExecutor::new(
            deps.system_parameters,
        )));
        if tier == PrivilegeTier::Elevated {
            executors.push(Box::new(FileCopyExecutor::new(deps.files)));
        }
        Self::new(executors)
    }

    /// Executes one command and always produces a Response
    pub fn execute(&self, command: &Command) -> Response {
        match command {
            Command::ShutdownServer => {
                // The caller of the dispatcher acts on the shutdown
                // signal; this just acknowledges it.
                info!("acknowledging shutdown request");
                Response::success(CommandName::ShutdownServer, true)
            }
            Command::Echo { message } => {
                Response::success(CommandName::Echo, message.clone())
            }
            other => {
                for executor in &self.executors {
                    if executor.can_execute(other) {
                        return executor.execute(other);
                    }
                }
                warn!(command = %other.name(), "no executor claims command");
                Response::failure(
                    other.name(),
                    &ExecutionError::UnsupportedCommand(other.name()),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::CommandResult;
    use crate::domain::error::ErrorCode;
    use crate::domain::ports::RegistryValue;
    use crate::domain::value_objects::RegistryHive;
    use crate::infrastructure::{
        InMemoryRegistryStore, InMemorySystemParameterStore, StdFileStore,
    };

    fn deps_with_registry(registry: InMemoryRegistryStore) -> ExecutorDeps {
        ExecutorDeps {
            registry: Arc::new(registry),
            system_parameters: Arc::new(InMemorySystemParameterStore::new()),
            files: Arc::new(StdFileStore),
        }
    }

    fn deps() -> ExecutorDeps {
        deps_with_registry(InMemoryRegistryStore::new())
    }

    #[test]
    fn test_echo_round_trips_the_payload() {
        let dispatcher = CommandDispatcher::for_tier(PrivilegeTier::Elevated, deps());
        let response = dispatcher.execute(&Command::Echo {
            message: "Hello!".to_string(),
        });
        assert_eq!(response.command_name(), Some(CommandName::Echo));
        assert_eq!(response.result().and_then(CommandResult::as_str), Some("Hello!"));
        assert_eq!(response.error_code(), ErrorCode::Success);
    }

    #[test]
    fn test_shutdown_is_acknowledged_with_true() {
        let dispatcher = CommandDispatcher::for_tier(PrivilegeTier::Elevated, deps());
        let response = dispatcher.execute(&Command::ShutdownServer);
        assert_eq!(response.result(), Some(&CommandResult::Boolean(true)));
        assert!(response.is_success());
    }

    #[test]
    fn test_registry_read_dispatches_to_the_read_executor() {
        let registry = InMemoryRegistryStore::new();
        registry.set_value(
            RegistryHive::CurrentUser,
            "SubKey",
            "IntValue",
            RegistryValue::Integer(123),
        );
        let dispatcher =
            CommandDispatcher::for_tier(PrivilegeTier::Standard, deps_with_registry(registry));

        let response = dispatcher.execute(&Command::RegistryReadIntValue {
            hive: RegistryHive::CurrentUser,
            key: "SubKey".to_string(),
            value_name: "IntValue".to_string(),
            default_value: -1,
        });
        assert_eq!(
            response.command_name(),
            Some(CommandName::RegistryReadIntValue)
        );
        assert_eq!(response.result(), Some(&CommandResult::Integer(123)));
        assert_eq!(response.error_code(), ErrorCode::Success);
    }

    #[test]
    fn test_standard_tier_has_no_write_capability() {
        let dispatcher = CommandDispatcher::for_tier(PrivilegeTier::Standard, deps());
        let response = dispatcher.execute(&Command::RegistryWriteIntValue {
            hive: RegistryHive::CurrentUser,
            key: "SubKey".to_string(),
            value_name: "IntValue".to_string(),
            value: 42,
        });
        assert_eq!(response.error_code(), ErrorCode::UnsupportedCommand);
    }

    #[test]
    fn test_standard_tier_routes_no_file_copies() {
        let dispatcher = CommandDispatcher::for_tier(PrivilegeTier::Standard, deps());
        let response = dispatcher.execute(&Command::FileCopy {
            source_path: "a".to_string(),
            destination_path: "b".to_string(),
            overwrite: false,
        });
        assert_eq!(response.error_code(), ErrorCode::UnsupportedCommand);
    }

    #[test]
    fn test_elevated_tier_executes_writes() {
        let registry = InMemoryRegistryStore::new();
        let dispatcher = CommandDispatcher::for_tier(
            PrivilegeTier::Elevated,
            deps_with_registry(registry.clone()),
        );

        let response = dispatcher.execute(&Command::RegistryWriteIntValue {
            hive: RegistryHive::CurrentUser,
            key: "SubKey".to_string(),
            value_name: "IntValue".to_string(),
            value: 42,
        });
        assert!(response.is_success());
        assert_eq!(
            registry
                .read_int(RegistryHive::CurrentUser, "SubKey", "IntValue")
                .unwrap(),
            Some(42)
        );
    }

    #[test]
    fn test_first_registered_executor_wins() {
        struct ClaimAll(&'static str);
        impl DomainExecutor for ClaimAll {
            fn can_execute(&self, _command: &Command) -> bool {
                true
            }
            fn execute(&self, command: &Command) -> Response {
                Response::success(command.name(), self.0)
            }
        }

        let dispatcher =
            CommandDispatcher::new(vec![Box::new(ClaimAll("first")), Box::new(ClaimAll("second"))]);
        let response = dispatcher.execute(&Command::SystemParametersInfoGetValue { action: 1 });
        assert_eq!(response.result().and_then(CommandResult::as_str), Some("first"));
    }

    #[test]
    fn test_unclaimed_command_is_unsupported() {
        let dispatcher = CommandDispatcher::new(Vec::new());
        let response = dispatcher.execute(&Command::SystemParametersInfoGetValue { action: 1 });
        assert_eq!(response.error_code(), ErrorCode::UnsupportedCommand);
        assert_eq!(
            response.command_name(),
            Some(CommandName::SystemParametersInfoGetValue)
        );
    }
}
