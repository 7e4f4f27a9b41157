use std::sync::Arc;
use std::time::Duration;

use monitor_core::{ChannelStatus, ConnectionId, Effect, Msg, ProgressStore};
use monitor_logging::{monitor_debug, monitor_info, monitor_trace, monitor_warn};
use tokio::sync::{mpsc, watch};
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::task::AbortOnDropHandle;
use url::Url;

use crate::engine::Input;
use crate::{Connection, Transport};

const MIN_HEARTBEAT_INTERVAL: Duration = Duration::from_millis(1);

struct ActiveConnection {
    id: ConnectionId,
    outbound: mpsc::UnboundedSender<String>,
    _task: AbortOnDropHandle<()>,
}

/// Executes effects produced by the state machine and owns every background task.
///
/// Dropping a task handle aborts the task, so replacing or clearing a slot is
/// the cancellation.
pub(crate) struct EffectRunner {
    transport: Arc<dyn Transport>,
    input_tx: mpsc::UnboundedSender<Input>,
    store: ProgressStore,
    store_tx: watch::Sender<ProgressStore>,
    status_tx: watch::Sender<ChannelStatus>,
    connection: Option<ActiveConnection>,
    heartbeat: Option<AbortOnDropHandle<()>>,
    reconnect: Option<AbortOnDropHandle<()>>,
}

impl EffectRunner {
    pub(crate) fn new(
        transport: Arc<dyn Transport>,
        input_tx: mpsc::UnboundedSender<Input>,
        store_tx: watch::Sender<ProgressStore>,
        status_tx: watch::Sender<ChannelStatus>,
    ) -> Self {
        Self {
            transport,
            input_tx,
            store: ProgressStore::new(),
            store_tx,
            status_tx,
            connection: None,
            heartbeat: None,
            reconnect: None,
        }
    }

    pub(crate) fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::OpenTransport { connection, url } => self.open(connection, url),
                Effect::CloseTransport { connection } => {
                    if self.connection.as_ref().is_some_and(|c| c.id == connection) {
                        monitor_info!("Closing connection {}", connection);
                        self.connection = None;
                    }
                }
                Effect::SendFrame { text } => {
                    if let Some(active) = &self.connection {
                        monitor_trace!("-> {}", text);
                        let _ = active.outbound.send(text);
                    }
                }
                Effect::StartHeartbeat { interval } => {
                    self.heartbeat = Some(self.spawn_heartbeat(interval));
                }
                Effect::StopHeartbeat => self.heartbeat = None,
                Effect::ScheduleReconnect { attempt, delay } => {
                    monitor_info!(
                        "Reconnecting (attempt {}) in {} ms",
                        attempt,
                        delay.as_millis()
                    );
                    self.reconnect = Some(self.spawn_reconnect(attempt, delay));
                }
                Effect::CancelReconnect => self.reconnect = None,
                Effect::ReconnectExhausted { attempts } => {
                    monitor_warn!(
                        "Giving up after {} reconnect attempts; waiting for a manual connect",
                        attempts
                    );
                }
                Effect::SetConnectivity(connected) => {
                    self.store.set_connectivity(connected);
                    self.publish_store();
                }
                Effect::ApplyUpdate(update) => {
                    self.store.apply_update(update);
                    self.publish_store();
                }
                Effect::DropFrame { error } => {
                    monitor_warn!("Dropping inbound frame: {}", error);
                }
            }
        }
    }

    pub(crate) fn reset_progress(&mut self) {
        self.store.reset();
        self.publish_store();
    }

    pub(crate) fn publish_status(&self, status: ChannelStatus) {
        self.status_tx.send_if_modified(|current| {
            if *current == status {
                false
            } else {
                *current = status;
                true
            }
        });
    }

    /// Abort every owned task.
    pub(crate) fn shutdown(&mut self) {
        self.connection = None;
        self.heartbeat = None;
        self.reconnect = None;
    }

    fn publish_store(&self) {
        self.store_tx.send_replace(self.store.clone());
    }

    fn open(&mut self, id: ConnectionId, url: Url) {
        monitor_info!("Connecting to {} (connection {})", url, id);
        let (outbound, outbound_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(drive_connection(
            self.transport.clone(),
            id,
            url,
            outbound_rx,
            self.input_tx.clone(),
        ));
        self.connection = Some(ActiveConnection {
            id,
            outbound,
            _task: AbortOnDropHandle::new(task),
        });
    }

    fn spawn_heartbeat(&self, interval: Duration) -> AbortOnDropHandle<()> {
        // `interval_at` rejects a zero period.
        let interval = interval.max(MIN_HEARTBEAT_INTERVAL);
        let input_tx = self.input_tx.clone();
        AbortOnDropHandle::new(tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if input_tx.send(Input::Dispatch(Msg::HeartbeatDue)).is_err() {
                    break;
                }
            }
        }))
    }

    fn spawn_reconnect(&self, attempt: u32, delay: Duration) -> AbortOnDropHandle<()> {
        let input_tx = self.input_tx.clone();
        AbortOnDropHandle::new(tokio::spawn(async move {
            time::sleep(delay).await;
            let _ = input_tx.send(Input::Dispatch(Msg::ReconnectDue { attempt }));
        }))
    }
}

async fn drive_connection(
    transport: Arc<dyn Transport>,
    id: ConnectionId,
    url: Url,
    mut outbound_rx: mpsc::UnboundedReceiver<String>,
    input_tx: mpsc::UnboundedSender<Input>,
) {
    let post = |msg: Msg| {
        let _ = input_tx.send(Input::Dispatch(msg));
    };

    let Connection {
        mut sink,
        mut source,
    } = match transport.connect(&url).await {
        Ok(connection) => connection,
        Err(err) => {
            monitor_warn!("Connection {} to {} failed: {}", id, url, err);
            post(Msg::Errored { connection: id });
            return;
        }
    };
    monitor_info!("Connection {} open", id);
    post(Msg::Opened { connection: id });

    loop {
        tokio::select! {
            outbound = outbound_rx.recv() => match outbound {
                Some(text) => {
                    if let Err(err) = sink.send_text(text).await {
                        monitor_debug!("Connection {}: {}", id, err);
                    }
                }
                None => {
                    sink.close().await;
                    return;
                }
            },
            inbound = source.next_text() => match inbound {
                Some(Ok(text)) => {
                    monitor_trace!("<- {}", text);
                    post(Msg::FrameReceived { connection: id, text });
                }
                Some(Err(err)) => {
                    monitor_warn!("Connection {} failed: {}", id, err);
                    post(Msg::Errored { connection: id });
                    return;
                }
                None => {
                    monitor_info!("Connection {} closed by peer", id);
                    post(Msg::Closed { connection: id });
                    return;
                }
            },
        }
    }
}
