//! Backend main event loop.

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{error, info};

use super::connection::GatewaySession;
use super::handlers;
use crate::protocol::{BackendAction, GuiEvent};

/// How long a gateway read may block before UI actions are checked again.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Run the backend loop until the UI drops its action sender.
pub async fn run(action_rx: Receiver<BackendAction>, event_tx: Sender<GuiEvent>) {
    let mut session: Option<GatewaySession> = None;

    loop {
        // Check for actions from the UI (non-blocking)
        loop {
            match action_rx.try_recv() {
                Ok(action) => {
                    handlers::handle_backend_action(action, &mut session, &event_tx).await
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    info!("UI closed, backend stopping");
                    return;
                }
            }
        }

        // Read from the gateway (with short timeout so we can check for actions)
        if let Some(s) = session.as_mut() {
            match timeout(POLL_INTERVAL, s.next_event()).await {
                Ok(Ok(Some(event))) => {
                    if !handlers::handle_gateway_event(event, &event_tx) {
                        session = None;
                    }
                }
                Ok(Ok(None)) => {
                    session = None;
                    info!("gateway closed the connection");
                    let _ = event_tx.send(GuiEvent::Disconnected(
                        "Connection closed by gateway".into(),
                    ));
                }
                Ok(Err(e)) => {
                    session = None;
                    error!("gateway read failed: {}", e);
                    let _ = event_tx.send(GuiEvent::Error(format!("Read error: {}", e)));
                    let _ = event_tx.send(GuiEvent::Disconnected("Read error".into()));
                }
                Err(_) => {
                    // Timeout - this is normal, just loop
                }
            }
        } else {
            // No connection, sleep a bit to avoid busy-looping
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}
