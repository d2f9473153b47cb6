pub mod stream_server;

pub use stream_server::StreamServer;
