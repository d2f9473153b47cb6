//! System-parameter executor
//! Handles both the query and the set form of the system-parameter API

use crate::domain::commands::{Command, Response};
use crate::domain::executors::{internal, unsupported, DomainExecutor};
use crate::domain::ports::SystemParameterStore;
use std::sync::Arc;
use tracing::debug;

pub struct SystemParametersExecutor {
    store: Arc<dyn SystemParameterStore>,
}

impl SystemParametersExecutor {
    pub fn new(store: Arc<dyn SystemParameterStore>) -> Self {
        Self { store }
    }
}

impl DomainExecutor for SystemParametersExecutor {
    fn can_execute(&self, command: &Command) -> bool {
        matches!(
            command,
            Command::SystemParametersInfoGetValue { .. }
                | Command::SystemParametersInfoSetValue { .. }
        )
    }

    fn execute(&self, command: &Command) -> Response {
        match command {
            Command::SystemParametersInfoGetValue { action } => {
                match self.store.get_value(*action) {
                    Ok(value) => {
                        debug!(action, "queried system parameter");
                        Response::success(command.name(), value)
                    }
                    Err(err) => Response::failure(command.name(), &internal(&err)),
                }
            }
            Command::SystemParametersInfoSetValue {
                action,
                value,
                update_profile,
            } => match self.store.set_value(*action, value, *update_profile) {
                Ok(()) => {
                    debug!(action, update_profile, "set system parameter");
                    Response::success(command.name(), true)
                }
                Err(err) => Response::failure(command.name(), &internal(&err)),
            },
            other => unsupported(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::CommandResult;
    use crate::domain::error::ErrorCode;
    use crate::infrastructure::InMemorySystemParameterStore;

    const SPI_GETDESKWALLPAPER: u32 = 0x0073;
    const SPI_SETDESKWALLPAPER: u32 = 0x0014;

    #[test]
    fn test_get_returns_stored_value() {
        let store = InMemorySystemParameterStore::new();
        store.preload(SPI_GETDESKWALLPAPER, "C:\\wallpaper.bmp");
        let executor = SystemParametersExecutor::new(Arc::new(store));

        let response = executor.execute(&Command::SystemParametersInfoGetValue {
            action: SPI_GETDESKWALLPAPER,
        });
        assert_eq!(
            response.result().and_then(CommandResult::as_str),
            Some("C:\\wallpaper.bmp")
        );
    }

    #[test]
    fn test_get_of_unknown_action_is_internal_error() {
        let executor =
            SystemParametersExecutor::new(Arc::new(InMemorySystemParameterStore::new()));

        let response =
            executor.execute(&Command::SystemParametersInfoGetValue { action: 0xFFFF });
        assert_eq!(response.error_code(), ErrorCode::InternalError);
        assert!(response.error_message().is_some());
    }

    #[test]
    fn test_set_then_get_round_trips() {
        let store = InMemorySystemParameterStore::new();
        let executor = SystemParametersExecutor::new(Arc::new(store.clone()));

        let response = executor.execute(&Command::SystemParametersInfoSetValue {
            action: SPI_SETDESKWALLPAPER,
            value: "C:\\new.bmp".to_string(),
            update_profile: true,
        });
        assert_eq!(response.result(), Some(&CommandResult::Boolean(true)));
        assert_eq!(store.get_value(SPI_SETDESKWALLPAPER).unwrap(), "C:\\new.bmp");
    }
}
