//! Command model
//!
//! The closed vocabulary of the bridge protocol. Every request is one of
//! these variants, tagged on the wire by its `CommandName`. Commands are
//! immutable after construction; the issuer builds one per round trip.

use crate::domain::value_objects::RegistryHive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed enumerant identifying which operation a Command/Response represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandName {
    Echo,
    ShutdownServer,
    RegistryReadIntValue,
    RegistryReadStringValue,
    RegistryWriteIntValue,
    RegistryWriteStringValue,
    FileCopy,
    SystemParametersInfoGetValue,
    SystemParametersInfoSetValue,
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommandName::Echo => "Echo",
            CommandName::ShutdownServer => "ShutdownServer",
            CommandName::RegistryReadIntValue => "RegistryReadIntValue",
            CommandName::RegistryReadStringValue => "RegistryReadStringValue",
            CommandName::RegistryWriteIntValue => "RegistryWriteIntValue",
            CommandName::RegistryWriteStringValue => "RegistryWriteStringValue",
            CommandName::FileCopy => "FileCopy",
            CommandName::SystemParametersInfoGetValue => "SystemParametersInfoGetValue",
            CommandName::SystemParametersInfoSetValue => "SystemParametersInfoSetValue",
        };
        write!(f, "{name}")
    }
}

/// One request in the bridge protocol
///
/// Serializes to a flat JSON object with `CommandName` as the leading tag
/// field, e.g.
/// `{"CommandName":"RegistryReadIntValue","RegistryHive":"CurrentUser",...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "CommandName")]
pub enum Command {
    /// Round-trip check: the response result is the message, verbatim
    Echo {
        #[serde(rename = "Message")]
        message: String,
    },

    /// Asks the hosting stream server to stop its loop after responding
    ShutdownServer,

    RegistryReadIntValue {
        #[serde(rename = "RegistryHive")]
        hive: RegistryHive,
        #[serde(rename = "RegistryKey")]
        key: String,
        #[serde(rename = "RegistryValueName")]
        value_name: String,
        #[serde(rename = "RegistryDefaultValue")]
        default_value: i32,
    },

    RegistryReadStringValue {
        #[serde(rename = "RegistryHive")]
        hive: RegistryHive,
        #[serde(rename = "RegistryKey")]
        key: String,
        #[serde(rename = "RegistryValueName")]
        value_name: String,
        #[serde(rename = "RegistryDefaultValue")]
        default_value: String,
    },

    RegistryWriteIntValue {
        #[serde(rename = "RegistryHive")]
        hive: RegistryHive,
        #[serde(rename = "RegistryKey")]
        key: String,
        #[serde(rename = "RegistryValueName")]
        value_name: String,
        #[serde(rename = "RegistryValue")]
        value: i32,
    },

    RegistryWriteStringValue {
        #[serde(rename = "RegistryHive")]
        hive: RegistryHive,
        #[serde(rename = "RegistryKey")]
        key: String,
        #[serde(rename = "RegistryValueName")]
        value_name: String,
        #[serde(rename = "RegistryValue")]
        value: String,
    },

    FileCopy {
        #[serde(rename = "SourcePath")]
        source_path: String,
        #[serde(rename = "DestinationPath")]
        destination_path: String,
        #[serde(rename = "Overwrite")]
        overwrite: bool,
    },

    SystemParametersInfoGetValue {
        #[serde(rename = "Action")]
        action: u32,
    },

    SystemParametersInfoSetValue {
        #[serde(rename = "Action")]
        action: u32,
        #[serde(rename = "Value")]
        value: String,
        #[serde(rename = "UpdateProfile")]
        update_profile: bool,
    },
}

impl Command {
    /// The enumerant naming this command's operation
    pub fn name(&self) -> CommandName {
        match self {
            Command::Echo { .. } => CommandName::Echo,
            Command::ShutdownServer => CommandName::ShutdownServer,
            Command::RegistryReadIntValue { .. } => CommandName::RegistryReadIntValue,
            Command::RegistryReadStringValue { .. } => CommandName::RegistryReadStringValue,
            Command::RegistryWriteIntValue { .. } => CommandName::RegistryWriteIntValue,
            Command::RegistryWriteStringValue { .. } => CommandName::RegistryWriteStringValue,
            Command::FileCopy { .. } => CommandName::FileCopy,
            Command::SystemParametersInfoGetValue { .. } => {
                CommandName::SystemParametersInfoGetValue
            }
            Command::SystemParametersInfoSetValue { .. } => {
                CommandName::SystemParametersInfoSetValue
            }
        }
    }
}
