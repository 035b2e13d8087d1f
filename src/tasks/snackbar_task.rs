//! Snackbar background task

use tokio::sync::{broadcast, mpsc, watch};
use tracing::{debug, info, warn};

use crate::state::{
    CloseRequest, CommandEnvelope, Snackbar, SnackbarCommand, SnackbarEvent, SnackbarHandle,
    SnackbarSnapshot,
};

/// Start the snackbar task and return the handles used to talk to it
pub fn spawn_snackbar_task(snackbar: Snackbar) -> SnackbarHandle {
    let (command_tx, command_rx) = mpsc::channel(64);
    let (snapshot_tx, snapshot_rx) = watch::channel(snackbar.snapshot());
    let (close_tx, _) = broadcast::channel(100);

    tokio::spawn(snackbar_task(snackbar, command_rx, snapshot_tx, close_tx.clone()));

    SnackbarHandle {
        command_tx,
        snapshot_rx,
        close_tx,
    }
}

/// Owns the snackbar exclusively and interleaves incoming commands with
/// timer elapses and transition completions, one at a time.
pub async fn snackbar_task(
    mut snackbar: Snackbar,
    mut command_rx: mpsc::Receiver<CommandEnvelope>,
    snapshot_tx: watch::Sender<SnackbarSnapshot>,
    close_tx: broadcast::Sender<CloseRequest>,
) {
    info!("Starting snackbar task");

    loop {
        tokio::select! {
            envelope = command_rx.recv() => {
                let Some(CommandEnvelope { command, reply }) = envelope else {
                    info!("Command channel closed, stopping snackbar task");
                    snackbar.unmount();
                    break;
                };

                debug!("Snackbar task received {}", command.action());
                if let Some(request) = apply(&mut snackbar, command) {
                    // Nobody listening is fine
                    let _ = close_tx.send(request);
                }

                let snapshot = snackbar.snapshot();
                snapshot_tx.send_replace(snapshot.clone());
                if reply.send(snapshot).is_err() {
                    warn!("Command sender went away before the reply");
                }
            }

            event = snackbar.next_event() => {
                match event {
                    SnackbarEvent::CloseRequested(request) => {
                        info!("Close requested: {}", request.reason.as_str());
                        let _ = close_tx.send(request);
                    }
                    SnackbarEvent::Transition { phase } => {
                        debug!("Transition reached {:?}", phase);
                    }
                }
                snapshot_tx.send_replace(snackbar.snapshot());
            }
        }
    }
}

/// Apply one command; returns the close request it produced, if any
pub fn apply(snackbar: &mut Snackbar, command: SnackbarCommand) -> Option<CloseRequest> {
    match command {
        SnackbarCommand::Enqueue { text, key } => {
            snackbar.enqueue(text, key);
        }
        SnackbarCommand::SetOpen(open) => snackbar.set_open(open),
        SnackbarCommand::SetConfig(config) => snackbar.set_config(config),
        SnackbarCommand::PointerEnter => snackbar.pointer_enter(),
        SnackbarCommand::PointerLeave => snackbar.pointer_leave(),
        SnackbarCommand::WindowBlur => snackbar.window_blur(),
        SnackbarCommand::WindowFocus => snackbar.window_focus(),
        SnackbarCommand::Click(event) => return snackbar.document_click(event),
        SnackbarCommand::Unmount => snackbar.unmount(),
    }
    None
}
