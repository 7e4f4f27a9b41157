use std::time::Duration;

use url::Url;

/// Fixed path of the progress stream on the page origin.
pub const PROGRESS_PATH: &str = "/ws/progress";
/// Outbound keep-alive frame.
pub const HEARTBEAT_PAYLOAD: &str = "ping";
/// Inbound keep-alive acknowledgment; never reaches the store.
pub const HEARTBEAT_ACK: &str = "pong";

pub const DEFAULT_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(25);
pub const DEFAULT_RECONNECT_BASE_DELAY: Duration = Duration::from_millis(2000);
pub const DEFAULT_MAX_RECONNECT_ATTEMPTS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSettings {
    pub endpoint: Url,
    pub heartbeat_interval: Duration,
    pub reconnect_base_delay: Duration,
    pub max_reconnect_attempts: u32,
}

impl ChannelSettings {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            heartbeat_interval: DEFAULT_HEARTBEAT_INTERVAL,
            reconnect_base_delay: DEFAULT_RECONNECT_BASE_DELAY,
            max_reconnect_attempts: DEFAULT_MAX_RECONNECT_ATTEMPTS,
        }
    }

    /// Linear backoff: attempt `n` waits `base * n`.
    pub fn reconnect_delay(&self, attempt: u32) -> Duration {
        self.reconnect_base_delay.saturating_mul(attempt)
    }
}
