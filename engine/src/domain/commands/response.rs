//! Response model
//!
//! Every executed (or failed) command produces exactly one Response; "no
//! answer" is not a valid protocol state. Constructors enforce the wire
//! invariant: a result is present iff the error code is Success.

use crate::domain::commands::CommandName;
use crate::domain::error::{ErrorCode, ExecutionError};
use serde::{Deserialize, Serialize};

/// The success payload of a Response; its shape depends on the command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandResult {
    Boolean(bool),
    Integer(i32),
    Text(String),
}

impl CommandResult {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CommandResult::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            CommandResult::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CommandResult::Text(value) => Some(value),
            _ => None,
        }
    }
}

impl From<bool> for CommandResult {
    fn from(value: bool) -> Self {
        CommandResult::Boolean(value)
    }
}

impl From<i32> for CommandResult {
    fn from(value: i32) -> Self {
        CommandResult::Integer(value)
    }
}

impl From<String> for CommandResult {
    fn from(value: String) -> Self {
        CommandResult::Text(value)
    }
}

impl From<&str> for CommandResult {
    fn from(value: &str) -> Self {
        CommandResult::Text(value.to_string())
    }
}

/// One reply in the bridge protocol
///
/// `CommandName` echoes the request. It is absent only when the request
/// line was so malformed that not even its tag could be recovered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(
        rename = "CommandName",
        skip_serializing_if = "Option::is_none",
        default
    )]
    command_name: Option<CommandName>,

    #[serde(
        rename = "CommandResult",
        skip_serializing_if = "Option::is_none",
        default
    )]
    result: Option<CommandResult>,

    #[serde(rename = "ErrorCode")]
    error_code: ErrorCode,

    #[serde(
        rename = "ErrorMessage",
        skip_serializing_if = "Option::is_none",
        default
    )]
    error_message: Option<String>,
}

impl Response {
    /// A successful reply carrying the command's result
    pub fn success(command_name: CommandName, result: impl Into<CommandResult>) -> Self {
        Self {
            command_name: Some(command_name),
            result: Some(result.into()),
            error_code: ErrorCode::Success,
            error_message: None,
        }
    }

    /// A failed reply for an identified command
    pub fn failure(command_name: CommandName, error: &ExecutionError) -> Self {
        Self {
            command_name: Some(command_name),
            result: None,
            error_code: error.error_code(),
            error_message: Some(error.to_string()),
        }
    }

    /// A failed reply for a request whose command name could not be recovered
    pub fn unattributed_failure(error: &ExecutionError) -> Self {
        Self {
            command_name: None,
            result: None,
            error_code: error.error_code(),
            error_message: Some(error.to_string()),
        }
    }

    pub fn command_name(&self) -> Option<CommandName> {
        self.command_name
    }

    pub fn result(&self) -> Option<&CommandResult> {
        self.result.as_ref()
    }

    pub fn error_code(&self) -> ErrorCode {
        self.error_code
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn is_success(&self) -> bool {
        self.error_code == ErrorCode::Success
    }
}
