//! Bridge error taxonomy
//! Execution failures are values attached to Responses, never faults thrown
//! across a process boundary

use crate::domain::commands::CommandName;
use crate::domain::value_objects::RegistryHive;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Wire-level error discriminant carried by every Response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ErrorCode {
    #[default]
    Success,
    RegistryValueNameNotFound,
    UnsupportedCommand,
    Timeout,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCode::Success => "Success",
            ErrorCode::RegistryValueNameNotFound => "RegistryValueNameNotFound",
            ErrorCode::UnsupportedCommand => "UnsupportedCommand",
            ErrorCode::Timeout => "Timeout",
            ErrorCode::InternalError => "InternalError",
        };
        write!(f, "{name}")
    }
}

/// A failed command execution
///
/// `Internal` is the catch-all: any unexpected fault lands there with its
/// message preserved for diagnosability.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("registry value '{value_name}' not found under {hive}\\{key}")]
    RegistryValueNameNotFound {
        hive: RegistryHive,
        key: String,
        value_name: String,
    },

    #[error("unsupported command '{0}'")]
    UnsupportedCommand(CommandName),

    #[error("elevated round trip timed out: {0}")]
    Timeout(String),

    #[error("{0}")]
    Internal(String),
}

impl ExecutionError {
    /// The wire discriminant this error maps to
    pub fn error_code(&self) -> ErrorCode {
        match self {
            ExecutionError::RegistryValueNameNotFound { .. } => {
                ErrorCode::RegistryValueNameNotFound
            }
            ExecutionError::UnsupportedCommand(_) => ErrorCode::UnsupportedCommand,
            ExecutionError::Timeout(_) => ErrorCode::Timeout,
            ExecutionError::Internal(_) => ErrorCode::InternalError,
        }
    }
}
