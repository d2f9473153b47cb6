//! Engine Constants
//!
//! Defaults and environment variable names shared across the crate

/// Broker executable name resolved through PATH when no explicit path is configured
pub const DEFAULT_BROKER_PROGRAM: &str = "sb-brokerd";

/// Default deadline for one elevated round trip, in seconds
pub const DEFAULT_ROUND_TRIP_TIMEOUT_SECS: u64 = 10;

/// Size of the fixed buffer handed to system-parameter queries (MAX_PATH-sized)
pub const PARAM_BUFFER_LEN: usize = 260;

/// Environment variable names recognized by configuration loading
pub mod env {
    /// Path to an optional YAML configuration file
    pub const CONFIG_PATH: &str = "SB_CONFIG";

    /// Overrides the broker executable path
    pub const BROKER_BINARY: &str = "SB_BROKER_BINARY";

    /// Overrides the round-trip timeout in seconds
    pub const TIMEOUT_SECS: &str = "SB_TIMEOUT_SECS";

    /// Selects the store backend ("memory" or "os")
    pub const BACKEND: &str = "SB_BACKEND";
}
