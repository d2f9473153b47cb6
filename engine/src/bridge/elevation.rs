//! Elevation bridge
//!
//! Launches (or reuses) the broker process at the elevated tier and
//! performs one line-in/line-out round trip per command over the broker's
//! stdin/stdout. Launch failure, crash, stream closure, and timeout all
//! come back as structured error Responses; nothing propagates as a fault.
//! The bridge never retries on its own.

use crate::bridge::channel::CommandChannel;
use crate::domain::codec::{decode_response, encode_command};
use crate::domain::commands::{Command, Response};
use crate::domain::error::ExecutionError;
use crate::infrastructure::BridgeConfig;
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command as ProcessCommand};
use tokio::sync::Mutex;
use tracing::{info, warn};

/// How the broker process is launched and how long a round trip may take
#[derive(Debug, Clone)]
pub struct BrokerLaunch {
    pub program: PathBuf,
    pub args: Vec<String>,
    /// Environment entries set on the child, on top of the inherited ones
    pub envs: Vec<(String, String)>,
    pub timeout: Duration,
}

impl BrokerLaunch {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
            timeout: Duration::from_secs(crate::constants::DEFAULT_ROUND_TRIP_TIMEOUT_SECS),
        }
    }

    pub fn from_config(config: &BridgeConfig) -> Self {
        Self {
            program: PathBuf::from(&config.broker_program),
            args: config.broker_args.clone(),
            envs: Vec::new(),
            timeout: config.round_trip_timeout(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// One running broker child with its protocol streams
struct BrokerProcess {
    child: Child,
    stdin: ChildStdin,
    stdout: Lines<BufReader<ChildStdout>>,
}

/// Client-side end of the process-spanning pipeline
///
/// Round trips are serialized by an async mutex, so one bridge instance
/// keeps strict request ordering on its broker stream no matter how many
/// tasks call it.
pub struct ElevationBridge {
    launch: BrokerLaunch,
    broker: Mutex<Option<BrokerProcess>>,
}

impl ElevationBridge {
    pub fn new(launch: BrokerLaunch) -> Self {
        Self {
            launch,
            broker: Mutex::new(None),
        }
    }

    /// Sends ShutdownServer and waits for the broker to exit
    pub async fn shutdown(&self) -> Response {
        let response = self.send_command(&Command::ShutdownServer).await;
        let mut slot = self.broker.lock().await;
        if let Some(mut broker) = slot.take() {
            match tokio::time::timeout(self.launch.timeout, broker.child.wait()).await {
                Ok(Ok(status)) => info!(code = ?status.code(), "broker exited"),
                Ok(Err(err)) => warn!(error = %err, "failed waiting for broker exit"),
                Err(_) => {
                    warn!("broker did not exit after shutdown, killing it");
                    let _ = broker.child.start_kill();
                }
            }
        }
        response
    }

    fn spawn_broker(&self) -> Result<BrokerProcess, ExecutionError> {
        info!(program = %self.launch.program.display(), "launching broker");
        let mut child = ProcessCommand::new(&self.launch.program)
            .args(&self.launch.args)
            .envs(self.launch.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|err| {
                ExecutionError::Internal(format!(
                    "failed to launch broker '{}': {err}",
                    self.launch.program.display()
                ))
            })?;
        let stdin = child.stdin.take().ok_or_else(|| {
            ExecutionError::Internal("broker stdin pipe unavailable".to_string())
        })?;
        let stdout = child.stdout.take().ok_or_else(|| {
            ExecutionError::Internal("broker stdout pipe unavailable".to_string())
        })?;
        Ok(BrokerProcess {
            child,
            stdin,
            stdout: BufReader::new(stdout).lines(),
        })
    }

    async fn round_trip(
        &self,
        broker: &mut BrokerProcess,
        command: &Command,
    ) -> Result<Response, ExecutionError> {
        let line = encode_command(command)
            .map_err(|err| ExecutionError::Internal(format!("failed to encode command: {err}")))?;

        broker
            .stdin
            .write_all(line.as_bytes())
            .await
            .map_err(|err| ExecutionError::Internal(format!("broker stdin failed: {err}")))?;
        broker
            .stdin
            .write_all(b"\n")
            .await
            .map_err(|err| ExecutionError::Internal(format!("broker stdin failed: {err}")))?;
        broker
            .stdin
            .flush()
            .await
            .map_err(|err| ExecutionError::Internal(format!("broker stdin failed: {err}")))?;

        let reply = tokio::time::timeout(self.launch.timeout, broker.stdout.next_line())
            .await
            .map_err(|_| {
                ExecutionError::Timeout(format!(
                    "no response within {:?}",
                    self.launch.timeout
                ))
            })?
            .map_err(|err| ExecutionError::Internal(format!("broker stream failed: {err}")))?
            .ok_or_else(|| {
                ExecutionError::Internal("broker closed its output stream".to_string())
            })?;

        decode_response(&reply)
            .map_err(|err| ExecutionError::Internal(format!("undecodable broker response: {err}")))
    }
}

#[async_trait]
impl CommandChannel for ElevationBridge {
    async fn send_command(&self, command: &Command) -> Response {
        let mut slot = self.broker.lock().await;

        let broker = match slot.as_mut() {
            Some(broker) => broker,
            None => match self.spawn_broker() {
                Ok(broker) => slot.insert(broker),
                Err(err) => {
                    warn!(error = %err, "broker launch failed");
                    return Response::failure(command.name(), &err);
                }
            },
        };

        match self.round_trip(broker, command).await {
            Ok(response) => response,
            Err(err) => {
                // The stream state is unknown now (a late line would pair
                // with the wrong request), so discard this child and let
                // the next call respawn.
                if let Some(mut broker) = slot.take() {
                    let _ = broker.child.start_kill();
                }
                warn!(error = %err, command = %command.name(), "elevated round trip failed");
                Response::failure(command.name(), &err)
            }
        }
    }
}
