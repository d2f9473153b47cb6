//! Issuer-side bridge: the channel port, the elevation transport, and the
//! facade the hosting shell consumes

pub mod channel;
pub mod client;
pub mod elevation;

pub use channel::CommandChannel;
pub use client::{BridgeClient, SettingsReader, SettingsWriter, SystemApi};
pub use elevation::{BrokerLaunch, ElevationBridge};
