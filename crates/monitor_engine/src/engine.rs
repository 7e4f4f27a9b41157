use std::sync::Arc;

use monitor_core::{
    update, ChannelSettings, ChannelState, ChannelStatus, Msg, ProgressStore, ProgressView,
};
use monitor_logging::{monitor_debug, monitor_info};
use serde_json::Value;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::runner::EffectRunner;
use crate::Transport;

pub(crate) enum Input {
    Dispatch(Msg),
    ResetProgress,
    Shutdown,
}

/// Owner of one progress channel.
///
/// All transitions run on a single event-loop task; this handle only posts
/// requests to it and reads the published store and status. Dropping the
/// handle performs the same cleanup as [`ChannelHandle::disconnect`] and stops
/// the loop. Must be created inside a tokio runtime.
pub struct ChannelHandle {
    input_tx: mpsc::UnboundedSender<Input>,
    store_rx: watch::Receiver<ProgressStore>,
    status_rx: watch::Receiver<ChannelStatus>,
    task: Option<JoinHandle<()>>,
}

impl ChannelHandle {
    pub fn spawn(settings: ChannelSettings, transport: Arc<dyn Transport>) -> Self {
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let (store_tx, store_rx) = watch::channel(ProgressStore::new());
        let (status_tx, status_rx) = watch::channel(ChannelStatus::default());

        monitor_info!("Progress channel targeting {}", settings.endpoint);
        let runner = EffectRunner::new(transport, input_tx.clone(), store_tx, status_tx);
        let task = tokio::spawn(run_event_loop(ChannelState::new(settings), runner, input_rx));

        Self {
            input_tx,
            store_rx,
            status_rx,
            task: Some(task),
        }
    }

    pub fn connect(&self) {
        self.dispatch(Msg::ConnectRequested);
    }

    pub fn disconnect(&self) {
        self.dispatch(Msg::DisconnectRequested);
    }

    /// Best effort: dropped silently unless the connection is open.
    pub fn send(&self, payload: Value) {
        self.dispatch(Msg::SendRequested(payload));
    }

    pub fn reset_progress(&self) {
        let _ = self.input_tx.send(Input::ResetProgress);
    }

    pub fn store(&self) -> ProgressStore {
        self.store_rx.borrow().clone()
    }

    pub fn view(&self) -> ProgressView {
        self.store_rx.borrow().view()
    }

    pub fn status(&self) -> ChannelStatus {
        *self.status_rx.borrow()
    }

    pub fn is_connected(&self) -> bool {
        self.status().is_connected()
    }

    pub fn subscribe(&self) -> watch::Receiver<ProgressStore> {
        self.store_rx.clone()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<ChannelStatus> {
        self.status_rx.clone()
    }

    /// Tear down and wait until the event loop and every task it owns are gone.
    pub async fn shutdown(mut self) {
        let _ = self.input_tx.send(Input::Shutdown);
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    fn dispatch(&self, msg: Msg) {
        let _ = self.input_tx.send(Input::Dispatch(msg));
    }
}

impl Drop for ChannelHandle {
    fn drop(&mut self) {
        if self.task.is_some() {
            let _ = self.input_tx.send(Input::Shutdown);
        }
    }
}

async fn run_event_loop(
    mut state: ChannelState,
    mut runner: EffectRunner,
    mut input_rx: mpsc::UnboundedReceiver<Input>,
) {
    while let Some(input) = input_rx.recv().await {
        match input {
            Input::Dispatch(msg) => {
                state = step(state, msg, &mut runner);
            }
            Input::ResetProgress => runner.reset_progress(),
            Input::Shutdown => {
                state = step(state, Msg::DisconnectRequested, &mut runner);
                break;
            }
        }
    }
    runner.shutdown();
    monitor_debug!("Progress channel loop stopped in {:?}", state.connection_state());
}

fn step(state: ChannelState, msg: Msg, runner: &mut EffectRunner) -> ChannelState {
    let before = state.status();
    let (state, effects) = update(state, msg);
    let after = state.status();
    if before != after {
        monitor_debug!(
            "Channel {:?} -> {:?} (reconnect attempts {})",
            before.state,
            after.state,
            after.reconnect_attempts
        );
    }
    runner.run(effects);
    runner.publish_status(after);
    state
}
