//! Stream server
//!
//! Turns a raw line-oriented duplex byte stream into command/response
//! round trips. The loop is strictly single-request-at-a-time: it blocks
//! on read, executes synchronously through the dispatcher, writes and
//! flushes the response, and only then reads again. A malformed line is
//! answered with an error Response and the loop continues; only answering
//! ShutdownServer (or the peer closing the stream) ends it.

use crate::domain::codec::{decode_command, encode_response};
use crate::domain::commands::{Command, Response};
use crate::domain::dispatcher::CommandDispatcher;
use crate::domain::error::ExecutionError;
use std::io;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

/// Emergency reply used if response encoding itself fails; kept as a
/// pre-encoded line so this path cannot fail again
const FALLBACK_RESPONSE: &str =
    "{\"ErrorCode\":\"InternalError\",\"ErrorMessage\":\"response encoding failed\"}";

pub struct StreamServer {
    dispatcher: Arc<CommandDispatcher>,
}

impl StreamServer {
    pub fn new(dispatcher: Arc<CommandDispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Runs the read/execute/write loop until shutdown or end of stream.
    ///
    /// Returns Ok after a clean exit (ShutdownServer answered, or EOF);
    /// only stream-level I/O failures propagate as errors.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> io::Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = BufReader::new(reader).lines();
        let mut writer = writer;

        loop {
            let line = match lines.next_line().await? {
                Some(line) => line,
                None => {
                    info!("request stream closed, stopping server loop");
                    return Ok(());
                }
            };

            let (response, shutdown) = match decode_command(&line) {
                Ok(command) => {
                    debug!(command = %command.name(), "executing request");
                    let shutdown = matches!(command, Command::ShutdownServer);
                    (self.dispatcher.execute(&command), shutdown)
                }
                Err(err) => {
                    warn!(error = %err, "failed to decode request line");
                    let internal = ExecutionError::Internal(err.to_string());
                    let response = match err.command_name() {
                        Some(name) => Response::failure(name, &internal),
                        None => Response::unattributed_failure(&internal),
                    };
                    (response, false)
                }
            };

            let encoded = match encode_response(&response) {
                Ok(encoded) => encoded,
                Err(err) => {
                    error!(error = %err, "failed to encode response");
                    FALLBACK_RESPONSE.to_string()
                }
            };
            writer.write_all(encoded.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;

            if shutdown {
                info!("shutdown request answered, stopping server loop");
                return Ok(());
            }
        }
    }
}
