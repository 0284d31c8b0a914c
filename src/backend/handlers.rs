//! Handlers for UI actions and gateway events.

use crossbeam_channel::Sender;
use tracing::{debug, info, warn};

use super::connection::{self, GatewaySession};
use crate::error::{ClientError, Result};
use crate::gateway::{GatewayCommand, GatewayEvent};
use crate::protocol::{BackendAction, GuiEvent};

/// Handle a backend action from the GUI
pub async fn handle_backend_action(
    action: BackendAction,
    session: &mut Option<GatewaySession>,
    event_tx: &Sender<GuiEvent>,
) {
    match action {
        BackendAction::Connect {
            host,
            port,
            use_tls,
            token,
        } => {
            // A new connection replaces any existing one.
            *session = None;

            let addr = format!("{}:{}", host, port);
            info!(gateway = %addr, tls = use_tls, "connecting");

            match connect(&host, port, use_tls, token).await {
                Ok(new_session) => {
                    *session = Some(new_session);
                    let _ = event_tx.send(GuiEvent::Connecting(addr));
                }
                Err(e) => {
                    warn!(gateway = %addr, "connection failed: {}", e);
                    let _ = event_tx.send(GuiEvent::Error(format!(
                        "Could not connect to {}: {}",
                        addr, e
                    )));
                }
            }
        }

        BackendAction::Disconnect => {
            *session = None;
            let _ = event_tx.send(GuiEvent::Disconnected("User disconnected".into()));
        }

        BackendAction::SendMessage {
            channel_id,
            content,
        } => {
            let command = GatewayCommand::SendMessage {
                channel_id,
                content,
            };
            if let Err(e) = send(session, &command).await {
                warn!(%channel_id, "message not sent: {}", e);
                let _ = event_tx.send(GuiEvent::Error(format!("Message not sent: {}", e)));
            }
        }

        BackendAction::SendTyping(channel_id) => {
            // Best effort: a lost typing notification is not worth a toast.
            let command = GatewayCommand::Typing { channel_id };
            if let Err(e) = send(session, &command).await {
                warn!(%channel_id, "typing notification not sent: {}", e);
            }
        }
    }
}

async fn connect(host: &str, port: u16, use_tls: bool, token: String) -> Result<GatewaySession> {
    let mut session = connection::establish_connection(host, port, use_tls).await?;
    session.send(&GatewayCommand::Identify { token }).await?;
    Ok(session)
}

async fn send(session: &mut Option<GatewaySession>, command: &GatewayCommand) -> Result<()> {
    match session.as_mut() {
        Some(s) => s.send(command).await,
        None => Err(ClientError::NotConnected),
    }
}

/// Translate a gateway event into GUI events.
///
/// Returns false when the session must be dropped.
pub fn handle_gateway_event(event: GatewayEvent, event_tx: &Sender<GuiEvent>) -> bool {
    let gui_event = match event {
        GatewayEvent::Ready(ready) => GuiEvent::Ready(ready),
        GatewayEvent::MessageCreate(message) => GuiEvent::MessageReceived(Box::new(message)),
        GatewayEvent::TypingStart(typing) => {
            debug!(channel_id = %typing.channel_id, user_id = %typing.user_id, "typing start");
            GuiEvent::TypingStarted(typing)
        }
        GatewayEvent::TypingStop {
            channel_id,
            user_id,
        } => GuiEvent::TypingStopped {
            channel_id,
            user_id,
        },
        GatewayEvent::PresenceUpdate(presence) => GuiEvent::PresenceChanged(presence),
        GatewayEvent::ChannelCreate(channel) => GuiEvent::ChannelCreated(Box::new(channel)),
        GatewayEvent::ChannelDelete { id } => GuiEvent::ChannelDeleted(id),
        GatewayEvent::InvalidSession { reason } => {
            let err = ClientError::InvalidSession(reason);
            warn!("{}", err);
            let _ = event_tx.send(GuiEvent::Error(err.to_string()));
            let _ = event_tx.send(GuiEvent::Disconnected("Session rejected".into()));
            return false;
        }
    };
    let _ = event_tx.send(gui_event);
    true
}
