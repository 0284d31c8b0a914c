//! Backend event processing (session setup, messages, typing, presence).

use chrono::{Local, Utc};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::buffer::{ChannelBuffer, RenderedMessage};
use crate::gateway::Message;
use crate::markup;
use crate::protocol::GuiEvent;
use crate::state::ClientState;
use crate::typing::{self, ChannelTypingState, TypingSnapshot};

/// Apply one event to the client state.
///
/// Returns the typing snapshot to hand to the aggregator when a channel's
/// typing state changed. Only the latest one matters, so callers draining
/// several events keep the last `Some`.
pub fn process_single_event(state: &mut ClientState, event: GuiEvent) -> Option<TypingSnapshot> {
    match event {
        GuiEvent::Connecting(addr) => {
            info!(gateway = %addr, "identifying");
            state.push_status(format!("Connecting to {}", addr));
            None
        }

        GuiEvent::Ready(ready) => {
            state.cache.load_ready(*ready);
            state.is_connected = true;
            state.refresh_switcher();

            let still_there = state
                .active_channel
                .is_some_and(|id| state.cache.channel(id).is_some());
            if !still_there {
                state.active_channel = None;
                state.next_channel();
            }

            let name = state
                .cache
                .me()
                .map(|u| u.display_name().to_string())
                .unwrap_or_default();
            info!(user = %name, guilds = state.cache.guilds().len(), "session ready");
            state.push_status(format!("Connected as {}", name));
            None
        }

        GuiEvent::Disconnected(reason) => {
            state.is_connected = false;
            for (id, buffer) in state.buffers.iter_mut() {
                buffer.typing = ChannelTypingState::new(*id, state.typing_timeout);
            }
            info!(%reason, "disconnected");
            state.push_status(format!("Disconnected: {}", reason));
            None
        }

        GuiEvent::Error(msg) => {
            warn!("{}", msg);
            state.push_status(format!("Error: {}", msg));
            None
        }

        GuiEvent::MessageReceived(message) => handle_message(state, *message),

        GuiEvent::TypingStarted(event) => {
            let local_user = state.cache.local_user_id();
            let timeout = state.typing_timeout;
            let buffer = state
                .buffers
                .entry(event.channel_id)
                .or_insert_with(|| ChannelBuffer::new(event.channel_id, timeout));
            let changed = typing::apply_typing_start(
                &mut buffer.typing,
                &event,
                local_user,
                &state.cache,
                Instant::now(),
                Utc::now(),
            );
            changed.then(|| buffer.typing.snapshot())
        }

        GuiEvent::TypingStopped {
            channel_id,
            user_id,
        } => {
            let buffer = state.buffers.get_mut(&channel_id)?;
            buffer
                .typing
                .remove(user_id)
                .then(|| buffer.typing.snapshot())
        }

        GuiEvent::PresenceChanged(presence) => {
            state.cache.set_presence(presence);
            None
        }

        GuiEvent::ChannelCreated(channel) => {
            debug!(channel_id = %channel.id, "channel created");
            state.cache.upsert_channel(*channel);
            state.refresh_switcher();
            None
        }

        GuiEvent::ChannelDeleted(id) => {
            debug!(channel_id = %id, "channel deleted");
            state.cache.remove_channel(id);
            state.buffers.remove(&id);
            if state.active_channel == Some(id) {
                state.active_channel = None;
            }
            state.refresh_switcher();
            None
        }

        GuiEvent::TypingRender(channel_id) => {
            if let Some(buffer) = state.buffers.get_mut(&channel_id) {
                buffer.typing.purge(Instant::now());
            }
            None
        }
    }
}

fn handle_message(state: &mut ClientState, message: Message) -> Option<TypingSnapshot> {
    let local_user = state.cache.local_user_id();
    let guild = message
        .guild_id
        .or_else(|| state.cache.channel(message.channel_id).and_then(|c| c.guild_id));

    if let (Some(guild), Some(member)) = (guild, message.member.clone()) {
        state.cache.upsert_member(guild, member);
    }

    let author = state
        .cache
        .user_name(message.channel_id, message.author.id)
        .unwrap_or_else(|| message.author.display_name().to_string());

    let rendered = RenderedMessage {
        id: message.id,
        author_id: message.author.id,
        author,
        timestamp: message
            .timestamp
            .with_timezone(&Local)
            .format("%H:%M")
            .to_string(),
        text: markup::render_content(&message.content, message.channel_id, guild, &state.cache),
        mentions_me: local_user.is_some_and(|me| markup::mentions_user(&message, me)),
    };

    let is_active = state.active_channel == Some(message.channel_id);
    let buffer = state.ensure_buffer(message.channel_id);
    buffer.add_message(rendered, is_active);

    // Sending a message ends that user's typing indicator.
    buffer
        .typing
        .remove(message.author.id)
        .then(|| buffer.typing.snapshot())
}
