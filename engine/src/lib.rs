//! Settings Bridge Engine
//!
//! A privilege-tiered command bridge: a low-trust caller issues typed,
//! serializable commands (registry reads/writes, system-parameter
//! queries, file copies) and a broker process at the elevated tier
//! executes them, with support for:
//! - A closed command/response vocabulary with a one-line JSON wire form
//! - Ordered first-match dispatch over per-capability executors
//! - A single-request-at-a-time stream server over stdin/stdout
//! - An elevation bridge that launches and reuses the broker process
//!
//! Every fault at every tier becomes a structured error Response; the
//! issuing side always receives a completed Response, success or failure.

// Module declarations
pub mod constants;

// Core architecture modules
pub mod bridge;
pub mod domain;
pub mod infrastructure;
pub mod server;

// Re-export public types
pub use bridge::{
    BridgeClient, BrokerLaunch, CommandChannel, ElevationBridge, SettingsReader, SettingsWriter,
    SystemApi,
};
pub use domain::{
    Command, CommandDispatcher, CommandName, CommandResult, ErrorCode, ExecutionError,
    ExecutorDeps, PrivilegeTier, RegistryHive, Response,
};
pub use infrastructure::{BackendKind, BridgeConfig};
pub use server::StreamServer;
