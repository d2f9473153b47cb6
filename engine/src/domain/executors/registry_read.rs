//! Registry read executor
//!
//! Opens the requested hive/key read-only and reads the named value. A
//! value absent under an openable key is not an error: the caller-supplied
//! default is returned as a success. Only an unopenable subkey maps to
//! RegistryValueNameNotFound.

use crate::domain::commands::{Command, Response};
use crate::domain::error::ExecutionError;
use crate::domain::executors::{internal, unsupported, DomainExecutor};
use crate::domain::ports::{RegistryStore, StoreError};
use crate::domain::value_objects::RegistryHive;
use std::sync::Arc;
use tracing::debug;

pub struct RegistryReadExecutor {
    store: Arc<dyn RegistryStore>,
}

impl RegistryReadExecutor {
    pub fn new(store: Arc<dyn RegistryStore>) -> Self {
        Self { store }
    }

    fn not_found(hive: RegistryHive, key: &str, value_name: &str) -> ExecutionError {
        ExecutionError::RegistryValueNameNotFound {
            hive,
            key: key.to_string(),
            value_name: value_name.to_string(),
        }
    }
}

impl DomainExecutor for RegistryReadExecutor {
    fn can_execute(&self, command: &Command) -> bool {
        matches!(
            command,
            Command::RegistryReadIntValue { .. } | Command::RegistryReadStringValue { .. }
        )
    }

    fn execute(&self, command: &Command) -> Response {
        match command {
            Command::RegistryReadIntValue {
                hive,
                key,
                value_name,
                default_value,
            } => match self.store.read_int(*hive, key, value_name) {
                Ok(Some(value)) => Response::success(command.name(), value),
                Ok(None) => {
                    debug!(%hive, %key, %value_name, "value absent, returning default");
                    Response::success(command.name(), *default_value)
                }
                Err(StoreError::KeyNotFound { .. }) => Response::failure(
                    command.name(),
                    &Self::not_found(*hive, key, value_name),
                ),
                Err(err) => Response::failure(command.name(), &internal(&err)),
            },
            Command::RegistryReadStringValue {
                hive,
                key,
                value_name,
                default_value,
            } => match self.store.read_string(*hive, key, value_name) {
                Ok(Some(value)) => Response::success(command.name(), value),
                Ok(None) => {
                    debug!(%hive, %key, %value_name, "value absent, returning default");
                    Response::success(command.name(), default_value.clone())
                }
                Err(StoreError::KeyNotFound { .. }) => Response::failure(
                    command.name(),
                    &Self::not_found(*hive, key, value_name),
                ),
                Err(err) => Response::failure(command.name(), &internal(&err)),
            },
            other => unsupported(other),
        }
    }
}
