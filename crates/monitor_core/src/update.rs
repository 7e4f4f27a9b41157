use crate::{
    decode_frame, ChannelState, ConnectionState, Effect, Frame, Msg, HEARTBEAT_PAYLOAD,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: ChannelState, msg: Msg) -> (ChannelState, Vec<Effect>) {
    let effects = match msg {
        Msg::ConnectRequested => match state.connection_state() {
            ConnectionState::Open | ConnectionState::Connecting => Vec::new(),
            ConnectionState::Idle | ConnectionState::Closed => {
                let mut effects = Vec::with_capacity(2);
                if state.take_pending_reconnect().is_some() {
                    effects.push(Effect::CancelReconnect);
                }
                effects.push(state.begin_connect(false));
                effects
            }
        },
        Msg::DisconnectRequested => {
            let mut effects = Vec::with_capacity(4);
            if state.take_pending_reconnect().is_some() {
                effects.push(Effect::CancelReconnect);
            }
            if state.is_connected() {
                effects.push(Effect::StopHeartbeat);
            }
            if let Some(connection) = state.take_active_connection() {
                effects.push(Effect::CloseTransport { connection });
            }
            state.set_connection(ConnectionState::Idle);
            effects.push(Effect::SetConnectivity(false));
            effects
        }
        Msg::Opened { connection } => {
            if !state.expects(connection, &[ConnectionState::Connecting]) {
                return (state, Vec::new());
            }
            state.mark_open();
            vec![
                Effect::SetConnectivity(true),
                Effect::StartHeartbeat {
                    interval: state.settings().heartbeat_interval,
                },
            ]
        }
        Msg::Closed { connection } | Msg::Errored { connection } => {
            if !state.expects(
                connection,
                &[ConnectionState::Connecting, ConnectionState::Open],
            ) {
                return (state, Vec::new());
            }
            let was_open = state.is_connected();
            state.take_active_connection();
            state.set_connection(ConnectionState::Closed);

            let mut effects = Vec::with_capacity(3);
            if was_open {
                effects.push(Effect::StopHeartbeat);
            }
            effects.push(Effect::SetConnectivity(false));
            match state.arm_reconnect() {
                Some(attempt) => effects.push(Effect::ScheduleReconnect {
                    attempt,
                    delay: state.settings().reconnect_delay(attempt),
                }),
                None => effects.push(Effect::ReconnectExhausted {
                    attempts: state.reconnect_attempts(),
                }),
            }
            effects
        }
        Msg::FrameReceived { connection, text } => {
            if !state.expects(connection, &[ConnectionState::Open]) {
                return (state, Vec::new());
            }
            match decode_frame(&text) {
                Ok(Frame::Pong) => Vec::new(),
                Ok(Frame::Progress(update)) => vec![Effect::ApplyUpdate(update)],
                Err(error) => vec![Effect::DropFrame { error }],
            }
        }
        Msg::HeartbeatDue => {
            if state.is_connected() {
                vec![Effect::SendFrame {
                    text: HEARTBEAT_PAYLOAD.to_string(),
                }]
            } else {
                Vec::new()
            }
        }
        Msg::ReconnectDue { attempt } => {
            let armed = state.pending_reconnect() == Some(attempt)
                && state.connection_state() == ConnectionState::Closed;
            if !armed {
                return (state, Vec::new());
            }
            state.take_pending_reconnect();
            vec![state.begin_connect(true)]
        }
        Msg::SendRequested(payload) => {
            if !state.is_connected() {
                return (state, Vec::new());
            }
            match serde_json::to_string(&payload) {
                Ok(text) => vec![Effect::SendFrame { text }],
                Err(_) => Vec::new(),
            }
        }
    };

    (state, effects)
}
