//! Session setup and initialization

use crate::api::ProfileApi;
use crate::api::types::DatasetEntry;
use crate::consts::cli_consts::{COMMAND_QUEUE_SIZE, EVENT_QUEUE_SIZE, UPDATE_QUEUE_SIZE};
use crate::events::{DashboardUpdate, Event};
use crate::workers::core::EventSender;
use crate::workers::refresher::{Refresher, RefresherCommand};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// Session data for both TUI and headless modes
pub struct SessionData {
    /// The dataset being profiled
    pub dataset: DatasetEntry,
    /// Receiver for view-model updates from the refresher
    pub update_receiver: mpsc::Receiver<DashboardUpdate>,
    /// Receiver for worker events
    pub event_receiver: mpsc::Receiver<Event>,
    /// Sender for refresh and histogram commands
    pub command_sender: mpsc::Sender<RefresherCommand>,
    /// Shutdown sender to stop the worker
    pub shutdown_sender: broadcast::Sender<()>,
    /// Join handle for the refresher task
    pub join_handle: JoinHandle<()>,
}

/// Wires the channels and spawns the refresher for the given dataset.
///
/// The refresher performs a full refresh on startup, so the caller sees
/// profile data without issuing a command first.
pub fn setup_session(api: Box<dyn ProfileApi>, dataset: DatasetEntry) -> SessionData {
    let (update_sender, update_receiver) = mpsc::channel(UPDATE_QUEUE_SIZE);
    let (event_sender, event_receiver) = mpsc::channel(EVENT_QUEUE_SIZE);
    let (command_sender, command_receiver) = mpsc::channel(COMMAND_QUEUE_SIZE);
    let (shutdown_sender, _) = broadcast::channel(1);

    let refresher = Refresher::new(
        dataset.id,
        api,
        update_sender,
        EventSender::new(event_sender),
    );
    let shutdown_receiver = shutdown_sender.subscribe();
    let join_handle = tokio::spawn(refresher.run(command_receiver, shutdown_receiver));

    SessionData {
        dataset,
        update_receiver,
        event_receiver,
        command_sender,
        shutdown_sender,
        join_handle,
    }
}
