//! Side effects requested by the event handler.
//!
//! [`handle_event`](crate::app::handle_event) never talks to Zellij itself.
//! It returns a list of actions that the plugin shim executes in order.

use crate::worker::WorkerMessage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Post a request to the explorer worker.
    PostToWorker(WorkerMessage),

    /// Open a file in a Zellij editor pane. The path is as seen by the plugin
    /// (rooted at `/host`).
    OpenInEditor(String),
}
