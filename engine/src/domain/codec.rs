//! Line codec
//!
//! Converts commands and responses to and from the one-JSON-object-per-line
//! wire encoding. Decoding is tolerant: unknown extra fields are ignored,
//! and a malformed line becomes a `DecodeError` value instead of a fault
//! escaping this boundary. Encoding is deterministic (declaration-order
//! fields, tag first) so round-trip tests can assert exact text.

use crate::domain::commands::{Command, CommandName, Response};
use serde::Deserialize;
use thiserror::Error;

/// A request or response line that could not be decoded
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("empty line")]
    Empty,

    #[error("malformed line: {detail}")]
    Malformed {
        /// The tag, when it alone could be recovered from the line
        command_name: Option<CommandName>,
        detail: String,
    },
}

impl DecodeError {
    /// The command name recovered from the offending line, if any
    pub fn command_name(&self) -> Option<CommandName> {
        match self {
            DecodeError::Empty => None,
            DecodeError::Malformed { command_name, .. } => *command_name,
        }
    }
}

/// A value that could not be encoded; practically unreachable for the
/// closed command/response vocabulary
#[derive(Debug, Error)]
#[error(transparent)]
pub struct EncodeError(#[from] serde_json::Error);

pub fn encode_command(command: &Command) -> Result<String, EncodeError> {
    Ok(serde_json::to_string(command)?)
}

pub fn decode_command(line: &str) -> Result<Command, DecodeError> {
    decode(line)
}

pub fn encode_response(response: &Response) -> Result<String, EncodeError> {
    Ok(serde_json::to_string(response)?)
}

pub fn decode_response(line: &str) -> Result<Response, DecodeError> {
    decode(line)
}

fn decode<'a, T: Deserialize<'a>>(line: &'a str) -> Result<T, DecodeError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(DecodeError::Empty);
    }
    serde_json::from_str(trimmed).map_err(|err| DecodeError::Malformed {
        command_name: peek_command_name(trimmed),
        detail: err.to_string(),
    })
}

/// Best-effort extraction of the tag from a line that failed full decoding,
/// so the error response can still echo the request's command name
fn peek_command_name(line: &str) -> Option<CommandName> {
    #[derive(Deserialize)]
    struct Tagged {
        #[serde(rename = "CommandName")]
        command_name: CommandName,
    }

    serde_json::from_str::<Tagged>(line)
        .ok()
        .map(|tagged| tagged.command_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::CommandResult;
    use crate::domain::error::ExecutionError;
    use crate::domain::value_objects::RegistryHive;

    fn all_commands() -> Vec<Command> {
        vec![
            Command::Echo {
                message: "Hello!".to_string(),
            },
            Command::ShutdownServer,
            Command::RegistryReadIntValue {
                hive: RegistryHive::CurrentUser,
                key: "SubKey".to_string(),
                value_name: "IntValue".to_string(),
                default_value: -1,
            },
            Command::RegistryReadStringValue {
                hive: RegistryHive::LocalMachine,
                key: "Software\\App".to_string(),
                value_name: "Name".to_string(),
                default_value: "fallback".to_string(),
            },
            Command::RegistryWriteIntValue {
                hive: RegistryHive::CurrentUser,
                key: "SubKey".to_string(),
                value_name: "IntValue".to_string(),
                value: 42,
            },
            Command::RegistryWriteStringValue {
                hive: RegistryHive::Users,
                key: "S-1-5-18\\Environment".to_string(),
                value_name: "Path".to_string(),
                value: "C:\\Tools".to_string(),
            },
            Command::FileCopy {
                source_path: "C:\\a.txt".to_string(),
                destination_path: "C:\\b.txt".to_string(),
                overwrite: true,
            },
            Command::SystemParametersInfoGetValue { action: 0x0073 },
            Command::SystemParametersInfoSetValue {
                action: 0x0014,
                value: "C:\\wallpaper.bmp".to_string(),
                update_profile: true,
            },
        ]
    }

    #[test]
    fn test_command_round_trip_every_variant() {
        for command in all_commands() {
            let line = encode_command(&command).unwrap();
            assert!(!line.contains('\n'));
            let decoded = decode_command(&line).unwrap();
            assert_eq!(decoded, command, "round trip lost fields for {line}");
        }
    }

    #[test]
    fn test_encode_is_order_stable() {
        let command = Command::RegistryReadIntValue {
            hive: RegistryHive::CurrentUser,
            key: "SubKey".to_string(),
            value_name: "IntValue".to_string(),
            default_value: -1,
        };
        assert_eq!(
            encode_command(&command).unwrap(),
            "{\"CommandName\":\"RegistryReadIntValue\",\"RegistryHive\":\"CurrentUser\",\
             \"RegistryKey\":\"SubKey\",\"RegistryValueName\":\"IntValue\",\
             \"RegistryDefaultValue\":-1}"
        );
    }

    #[test]
    fn test_unknown_extra_fields_are_ignored() {
        let line = "{\"CommandName\":\"Echo\",\"Message\":\"hi\",\"Color\":\"green\"}";
        let decoded = decode_command(line).unwrap();
        assert_eq!(
            decoded,
            Command::Echo {
                message: "hi".to_string()
            }
        );
    }

    #[test]
    fn test_missing_required_field_fails_and_keeps_the_tag() {
        let line = "{\"CommandName\":\"RegistryReadIntValue\",\"RegistryKey\":\"SubKey\"}";
        let err = decode_command(line).unwrap_err();
        assert_eq!(err.command_name(), Some(CommandName::RegistryReadIntValue));
    }

    #[test]
    fn test_unknown_command_name_fails_without_a_tag() {
        let err = decode_command("{\"CommandName\":\"Reboot\"}").unwrap_err();
        assert_eq!(err.command_name(), None);
    }

    #[test]
    fn test_garbage_and_empty_lines_fail() {
        assert!(matches!(
            decode_command("not json at all"),
            Err(DecodeError::Malformed { .. })
        ));
        assert!(matches!(decode_command("   "), Err(DecodeError::Empty)));
    }

    #[test]
    fn test_response_round_trip() {
        let responses = vec![
            Response::success(CommandName::Echo, "Hello!"),
            Response::success(CommandName::RegistryReadIntValue, 123),
            Response::success(CommandName::ShutdownServer, true),
            Response::failure(
                CommandName::FileCopy,
                &ExecutionError::Internal("disk full".to_string()),
            ),
            Response::unattributed_failure(&ExecutionError::Internal("garbled".to_string())),
        ];
        for response in responses {
            let line = encode_response(&response).unwrap();
            let decoded = decode_response(&line).unwrap();
            assert_eq!(decoded, response, "round trip lost fields for {line}");
        }
    }

    #[test]
    fn test_decoded_result_keeps_its_shape() {
        let line = encode_response(&Response::success(CommandName::RegistryReadIntValue, 7))
            .unwrap();
        let decoded = decode_response(&line).unwrap();
        assert_eq!(decoded.result(), Some(&CommandResult::Integer(7)));
    }
}
