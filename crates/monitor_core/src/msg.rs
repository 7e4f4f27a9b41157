use serde_json::Value;

use crate::ConnectionId;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Caller asked for a connection.
    ConnectRequested,
    /// Caller asked to drop the connection and stop reconnecting.
    DisconnectRequested,
    /// Transport finished its handshake.
    Opened { connection: ConnectionId },
    /// Transport closed cleanly or the peer went away.
    Closed { connection: ConnectionId },
    /// Transport failed, during the handshake or afterwards.
    Errored { connection: ConnectionId },
    /// A text frame arrived on the transport.
    FrameReceived { connection: ConnectionId, text: String },
    /// Heartbeat timer fired.
    HeartbeatDue,
    /// Reconnect timer scheduled for `attempt` fired.
    ReconnectDue { attempt: u32 },
    /// Caller wants a payload sent, best effort.
    SendRequested(Value),
}
