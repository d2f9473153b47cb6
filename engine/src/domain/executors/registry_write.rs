//! Registry write executor
//!
//! Registered only by the elevated-tier composition root; the standard
//! tier constructs no write-capable executor, so a write dispatched there
//! is answered with UnsupportedCommand instead of a denied OS call.

use crate::domain::commands::{Command, Response};
use crate::domain::executors::{internal, unsupported, DomainExecutor};
use crate::domain::ports::RegistryStore;
use std::sync::Arc;
use tracing::debug;

pub struct RegistryWriteExecutor {
    store: Arc<dyn RegistryStore>,
}

impl RegistryWriteExecutor {
    pub fn new(store: Arc<dyn RegistryStore>) -> Self {
        Self { store }
    }
}

impl DomainExecutor for RegistryWriteExecutor {
    fn can_execute(&self, command: &Command) -> bool {
        matches!(
            command,
            Command::RegistryWriteIntValue { .. } | Command::RegistryWriteStringValue { .. }
        )
    }

    fn execute(&self, command: &Command) -> Response {
        match command {
            Command::RegistryWriteIntValue {
                hive,
                key,
                value_name,
                value,
            } => match self.store.write_int(*hive, key, value_name, *value) {
                Ok(()) => {
                    debug!(%hive, %key, %value_name, value, "wrote integer value");
                    Response::success(command.name(), true)
                }
                Err(err) => Response::failure(command.name(), &internal(&err)),
            },
            Command::RegistryWriteStringValue {
                hive,
                key,
                value_name,
                value,
            } => match self.store.write_string(*hive, key, value_name, value) {
                Ok(()) => {
                    debug!(%hive, %key, %value_name, "wrote string value");
                    Response::success(command.name(), true)
                }
                Err(err) => Response::failure(command.name(), &internal(&err)),
            },
            other => unsupported(other),
        }
    }
}
