//! Configuration loading
//!
//! Optional YAML file plus environment-variable overrides. The file path
//! comes from SB_CONFIG; every field has a default so a bare environment
//! works out of the box.

use crate::constants::{self, env as env_vars};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid value for {var}: {detail}")]
    InvalidEnv { var: &'static str, detail: String },
}

/// Which store adapters back the executors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Thread-safe in-memory stores (tests, non-Windows hosts)
    Memory,
    /// Live OS adapters (Windows only)
    Os,
}

impl Default for BackendKind {
    fn default() -> Self {
        if cfg!(target_os = "windows") {
            BackendKind::Os
        } else {
            BackendKind::Memory
        }
    }
}

/// Bridge configuration shared by the broker and the issuing side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Broker executable launched by the elevation bridge
    #[serde(default = "default_broker_program")]
    pub broker_program: String,

    /// Extra arguments passed to the broker
    #[serde(default)]
    pub broker_args: Vec<String>,

    /// Deadline for one elevated round trip, in seconds
    #[serde(default = "default_timeout_secs")]
    pub round_trip_timeout_secs: u64,

    /// Store backend for the hosting process
    #[serde(default)]
    pub backend: BackendKind,
}

fn default_broker_program() -> String {
    constants::DEFAULT_BROKER_PROGRAM.to_string()
}

fn default_timeout_secs() -> u64 {
    constants::DEFAULT_ROUND_TRIP_TIMEOUT_SECS
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            broker_program: default_broker_program(),
            broker_args: Vec::new(),
            round_trip_timeout_secs: default_timeout_secs(),
            backend: BackendKind::default(),
        }
    }
}

impl BridgeConfig {
    /// Loads configuration: SB_CONFIG file when present, then environment
    /// overrides on top
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match env::var(env_vars::CONFIG_PATH) {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(program) = env::var(env_vars::BROKER_BINARY) {
            self.broker_program = program;
        }
        if let Ok(secs) = env::var(env_vars::TIMEOUT_SECS) {
            self.round_trip_timeout_secs =
                secs.parse().map_err(|_| ConfigError::InvalidEnv {
                    var: env_vars::TIMEOUT_SECS,
                    detail: format!("'{secs}' is not a number of seconds"),
                })?;
        }
        if let Ok(backend) = env::var(env_vars::BACKEND) {
            self.backend = match backend.as_str() {
                "memory" => BackendKind::Memory,
                "os" => BackendKind::Os,
                other => {
                    return Err(ConfigError::InvalidEnv {
                        var: env_vars::BACKEND,
                        detail: format!("'{other}' is neither 'memory' nor 'os'"),
                    })
                }
            };
        }
        Ok(())
    }

    pub fn round_trip_timeout(&self) -> Duration {
        Duration::from_secs(self.round_trip_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn clear_env() {
        env::remove_var(env_vars::CONFIG_PATH);
        env::remove_var(env_vars::BROKER_BINARY);
        env::remove_var(env_vars::TIMEOUT_SECS);
        env::remove_var(env_vars::BACKEND);
    }

    #[test]
    #[serial]
    fn test_defaults_without_file_or_env() {
        clear_env();
        let config = BridgeConfig::load().unwrap();
        assert_eq!(config.broker_program, constants::DEFAULT_BROKER_PROGRAM);
        assert_eq!(
            config.round_trip_timeout(),
            Duration::from_secs(constants::DEFAULT_ROUND_TRIP_TIMEOUT_SECS)
        );
    }

    #[test]
    #[serial]
    fn test_file_values_then_env_overrides() {
        clear_env();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "broker_program: /opt/broker\nround_trip_timeout_secs: 3").unwrap();
        env::set_var(env_vars::CONFIG_PATH, file.path());
        env::set_var(env_vars::TIMEOUT_SECS, "7");

        let config = BridgeConfig::load().unwrap();
        assert_eq!(config.broker_program, "/opt/broker");
        assert_eq!(config.round_trip_timeout_secs, 7);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_backend_env_override() {
        clear_env();
        env::set_var(env_vars::BACKEND, "memory");
        let config = BridgeConfig::load().unwrap();
        assert_eq!(config.backend, BackendKind::Memory);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_bad_timeout_env_is_rejected() {
        clear_env();
        env::set_var(env_vars::TIMEOUT_SECS, "soon");
        let err = BridgeConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { .. }));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_unparseable_file_is_rejected() {
        clear_env();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "round_trip_timeout_secs: [not, a, number]").unwrap();
        env::set_var(env_vars::CONFIG_PATH, file.path());

        let err = BridgeConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        clear_env();
    }
}
