//! Monitor core: pure connection state machine, progress store and view-model helpers.
mod decode;
mod effect;
mod endpoint;
mod format;
mod msg;
mod progress;
mod settings;
mod state;
mod update;
mod view_model;

pub use decode::{decode_frame, DecodeError, Frame};
pub use effect::Effect;
pub use endpoint::{endpoint_for_path, progress_endpoint, EndpointError};
pub use format::{
    format_clock, format_decimal, format_duration, format_file_size, format_frame_count,
    format_number, format_vram,
};
pub use msg::Msg;
pub use progress::{ProgressSnapshot, ProgressStore, ProgressUpdate, Stage, Substage};
pub use settings::{
    ChannelSettings, DEFAULT_HEARTBEAT_INTERVAL, DEFAULT_MAX_RECONNECT_ATTEMPTS,
    DEFAULT_RECONNECT_BASE_DELAY, HEARTBEAT_ACK, HEARTBEAT_PAYLOAD, PROGRESS_PATH,
};
pub use state::{ChannelState, ChannelStatus, ConnectionId, ConnectionState};
pub use update::update;
pub use view_model::ProgressView;
