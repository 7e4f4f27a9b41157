//! Monitor engine: transport IO, timers and effect execution for the progress channel.
mod engine;
mod runner;
mod transport;
mod types;

pub use engine::ChannelHandle;
pub use transport::{Connection, FrameSink, FrameSource, Transport, WebSocketTransport};
pub use types::TransportError;
