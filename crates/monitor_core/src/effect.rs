use std::time::Duration;

use url::Url;

use crate::{ConnectionId, DecodeError, ProgressUpdate};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    OpenTransport { connection: ConnectionId, url: Url },
    CloseTransport { connection: ConnectionId },
    SendFrame { text: String },
    StartHeartbeat { interval: Duration },
    StopHeartbeat,
    ScheduleReconnect { attempt: u32, delay: Duration },
    CancelReconnect,
    /// The retry budget is spent; nothing further is scheduled.
    ReconnectExhausted { attempts: u32 },
    SetConnectivity(bool),
    ApplyUpdate(ProgressUpdate),
    /// A malformed frame was dropped without touching any state.
    DropFrame { error: DecodeError },
}
