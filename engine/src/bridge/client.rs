//! Bridge client facade
//!
//! The three contracts the hosting shell consumes. Privileged reads run
//! against the local standard-tier dispatcher; writes, system-parameter
//! sets, and file copies travel through the command channel to the
//! elevated tier. Either way the caller gets a plain Result; deciding to
//! retry or surface the failure is the caller's business.

use crate::bridge::channel::CommandChannel;
use crate::domain::commands::{Command, CommandName, CommandResult, Response};
use crate::domain::dispatcher::CommandDispatcher;
use crate::domain::error::{ErrorCode, ExecutionError};
use crate::domain::value_objects::RegistryHive;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

/// Read access to named settings
#[async_trait]
pub trait SettingsReader: Send + Sync {
    async fn read_int(
        &self,
        hive: RegistryHive,
        key: &str,
        value_name: &str,
        default_value: i32,
    ) -> Result<i32, ExecutionError>;

    async fn read_string(
        &self,
        hive: RegistryHive,
        key: &str,
        value_name: &str,
        default_value: &str,
    ) -> Result<String, ExecutionError>;
}

/// Write access to named settings; always elevated
#[async_trait]
pub trait SettingsWriter: Send + Sync {
    async fn write_int(
        &self,
        hive: RegistryHive,
        key: &str,
        value_name: &str,
        value: i32,
    ) -> Result<(), ExecutionError>;

    async fn write_string(
        &self,
        hive: RegistryHive,
        key: &str,
        value_name: &str,
        value: &str,
    ) -> Result<(), ExecutionError>;
}

/// Low-level system API invocations
#[async_trait]
pub trait SystemApi: Send + Sync {
    async fn system_parameter_get(&self, action: u32) -> Result<String, ExecutionError>;

    async fn system_parameter_set(
        &self,
        action: u32,
        value: &str,
        update_profile: bool,
    ) -> Result<(), ExecutionError>;

    async fn copy_file(
        &self,
        source: &Path,
        destination: &Path,
        overwrite: bool,
    ) -> Result<(), ExecutionError>;
}

/// Issuer-side entry point to the bridge
pub struct BridgeClient {
    local: Arc<CommandDispatcher>,
    elevated: Arc<dyn CommandChannel>,
}

impl BridgeClient {
    /// `local` must be a standard-tier dispatcher; `elevated` carries the
    /// commands the local tier cannot execute
    pub fn new(local: Arc<CommandDispatcher>, elevated: Arc<dyn CommandChannel>) -> Self {
        Self { local, elevated }
    }

    fn registry_error(response: &Response, command: &Command) -> ExecutionError {
        match (response.error_code(), command) {
            (
                ErrorCode::RegistryValueNameNotFound,
                Command::RegistryReadIntValue {
                    hive,
                    key,
                    value_name,
                    ..
                }
                | Command::RegistryReadStringValue {
                    hive,
                    key,
                    value_name,
                    ..
                },
            ) => ExecutionError::RegistryValueNameNotFound {
                hive: *hive,
                key: key.clone(),
                value_name: value_name.clone(),
            },
            _ => Self::generic_error(response, command.name()),
        }
    }

    fn generic_error(response: &Response, command_name: CommandName) -> ExecutionError {
        let message = response
            .error_message()
            .unwrap_or("unspecified failure")
            .to_string();
        match response.error_code() {
            ErrorCode::Timeout => ExecutionError::Timeout(message),
            ErrorCode::UnsupportedCommand => ExecutionError::UnsupportedCommand(command_name),
            _ => ExecutionError::Internal(message),
        }
    }

    fn expect_unit(response: Response, command_name: CommandName) -> Result<(), ExecutionError> {
        if response.is_success() {
            Ok(())
        } else {
            Err(Self::generic_error(&response, command_name))
        }
    }
}

#[async_trait]
impl SettingsReader for BridgeClient {
    async fn read_int(
        &self,
        hive: RegistryHive,
        key: &str,
        value_name: &str,
        default_value: i32,
    ) -> Result<i32, ExecutionError> {
        let command = Command::RegistryReadIntValue {
            hive,
            key: key.to_string(),
            value_name: value_name.to_string(),
            default_value,
        };
        let response = self.local.execute(&command);
        if !response.is_success() {
            return Err(Self::registry_error(&response, &command));
        }
        response
            .result()
            .and_then(CommandResult::as_i32)
            .ok_or_else(|| {
                ExecutionError::Internal("integer result missing from read response".to_string())
            })
    }

    async fn read_string(
        &self,
        hive: RegistryHive,
        key: &str,
        value_name: &str,
        default_value: &str,
    ) -> Result<String, ExecutionError> {
        let command = Command::RegistryReadStringValue {
            hive,
            key: key.to_string(),
            value_name: value_name.to_string(),
            default_value: default_value.to_string(),
        };
        let response = self.local.execute(&command);
        if !response.is_success() {
            return Err(Self::registry_error(&response, &command));
        }
        response
            .result()
            .and_then(CommandResult::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                ExecutionError::Internal("string result missing from read response".to_string())
            })
    }
}

#[async_trait]
impl SettingsWriter for BridgeClient {
    async fn write_int(
        &self,
        hive: RegistryHive,
        key: &str,
        value_name: &str,
        value: i32,
    ) -> Result<(), ExecutionError> {
        let command = Command::RegistryWriteIntValue {
            hive,
            key: key.to_string(),
            value_name: value_name.to_string(),
            value,
        };
        let response = self.elevated.send_command(&command).await;
        Self::expect_unit(response, command.name())
    }

    async fn write_string(
        &self,
        hive: RegistryHive,
        key: &str,
        value_name: &str,
        value: &str,
    ) -> Result<(), ExecutionError> {
        let command = Command::RegistryWriteStringValue {
            hive,
            key: key.to_string(),
            value_name: value_name.to_string(),
            value: value.to_string(),
        };
        let response = self.elevated.send_command(&command).await;
        Self::expect_unit(response, command.name())
    }
}

#[async_trait]
impl SystemApi for BridgeClient {
    async fn system_parameter_get(&self, action: u32) -> Result<String, ExecutionError> {
        let command = Command::SystemParametersInfoGetValue { action };
        let response = self.local.execute(&command);
        if !response.is_success() {
            return Err(Self::generic_error(&response, command.name()));
        }
        response
            .result()
            .and_then(CommandResult::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                ExecutionError::Internal(
                    "string result missing from system parameter response".to_string(),
                )
            })
    }

    async fn system_parameter_set(
        &self,
        action: u32,
        value: &str,
        update_profile: bool,
    ) -> Result<(), ExecutionError> {
        let command = Command::SystemParametersInfoSetValue {
            action,
            value: value.to_string(),
            update_profile,
        };
        let response = self.elevated.send_command(&command).await;
        Self::expect_unit(response, command.name())
    }

    async fn copy_file(
        &self,
        source: &Path,
        destination: &Path,
        overwrite: bool,
    ) -> Result<(), ExecutionError> {
        let command = Command::FileCopy {
            source_path: source.display().to_string(),
            destination_path: destination.display().to_string(),
            overwrite,
        };
        let response = self.elevated.send_command(&command).await;
        Self::expect_unit(response, command.name())
    }
}
