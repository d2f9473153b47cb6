//! CommandChannel port
//! The seam between the issuing side and whatever carries its commands to
//! the elevated tier

use crate::domain::commands::{Command, Response};
use async_trait::async_trait;

/// Carries one command to the elevated tier and returns its response
///
/// Implementations never fail at the signature level: every transport
/// fault is reported inside the Response.
#[async_trait]
pub trait CommandChannel: Send + Sync {
    async fn send_command(&self, command: &Command) -> Response;
}
