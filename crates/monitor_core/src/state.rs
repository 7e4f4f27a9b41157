use crate::{ChannelSettings, Effect};

/// Identifies one transport attempt so late events from a superseded one can be told apart.
pub type ConnectionId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Idle,
    Connecting,
    Open,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelStatus {
    pub state: ConnectionState,
    pub reconnect_attempts: u32,
    /// Attempt number of the armed reconnect timer, if any.
    pub pending_reconnect: Option<u32>,
    /// The in-flight attempt was started by the reconnect timer, not by a caller.
    pub retrying: bool,
}

impl ChannelStatus {
    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Open
    }

    /// Closed with no retry armed: only an explicit connect brings the channel back.
    pub fn has_given_up(&self) -> bool {
        self.state == ConnectionState::Closed && self.pending_reconnect.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelState {
    settings: ChannelSettings,
    connection: ConnectionState,
    reconnect_attempts: u32,
    last_connection_id: ConnectionId,
    active_connection: Option<ConnectionId>,
    pending_reconnect: Option<u32>,
    retrying: bool,
}

impl ChannelState {
    pub fn new(settings: ChannelSettings) -> Self {
        Self {
            settings,
            connection: ConnectionState::Idle,
            reconnect_attempts: 0,
            last_connection_id: 0,
            active_connection: None,
            pending_reconnect: None,
            retrying: false,
        }
    }

    pub fn settings(&self) -> &ChannelSettings {
        &self.settings
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.connection
    }

    pub fn reconnect_attempts(&self) -> u32 {
        self.reconnect_attempts
    }

    pub fn is_connected(&self) -> bool {
        self.connection == ConnectionState::Open
    }

    pub fn status(&self) -> ChannelStatus {
        ChannelStatus {
            state: self.connection,
            reconnect_attempts: self.reconnect_attempts,
            pending_reconnect: self.pending_reconnect,
            retrying: self.retrying && self.connection == ConnectionState::Connecting,
        }
    }

    /// Transport attempt the machine currently listens to, if any.
    pub fn active_connection(&self) -> Option<ConnectionId> {
        self.active_connection
    }

    /// Attempt number of the armed reconnect timer, if any.
    pub fn pending_reconnect(&self) -> Option<u32> {
        self.pending_reconnect
    }

    pub(crate) fn set_connection(&mut self, connection: ConnectionState) {
        self.connection = connection;
    }

    /// True when `connection` is the live attempt and the machine is in `expected`.
    pub(crate) fn expects(&self, connection: ConnectionId, expected: &[ConnectionState]) -> bool {
        self.active_connection == Some(connection) && expected.contains(&self.connection)
    }

    /// `retrying` marks attempts started by the reconnect timer.
    pub(crate) fn begin_connect(&mut self, retrying: bool) -> Effect {
        self.last_connection_id += 1;
        self.retrying = retrying;
        let connection = self.last_connection_id;
        self.active_connection = Some(connection);
        self.connection = ConnectionState::Connecting;
        Effect::OpenTransport {
            connection,
            url: self.settings.endpoint.clone(),
        }
    }

    pub(crate) fn mark_open(&mut self) {
        self.connection = ConnectionState::Open;
        self.reconnect_attempts = 0;
    }

    pub(crate) fn take_active_connection(&mut self) -> Option<ConnectionId> {
        self.active_connection.take()
    }

    pub(crate) fn take_pending_reconnect(&mut self) -> Option<u32> {
        self.pending_reconnect.take()
    }

    /// Arms the next retry, or returns `None` once the ceiling is reached.
    pub(crate) fn arm_reconnect(&mut self) -> Option<u32> {
        if self.reconnect_attempts >= self.settings.max_reconnect_attempts {
            return None;
        }
        self.reconnect_attempts += 1;
        self.pending_reconnect = Some(self.reconnect_attempts);
        Some(self.reconnect_attempts)
    }
}
