//! Workflows across the event pipeline: gateway events in, client state and
//! typing labels out.

use chrono::Utc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::time::Instant;

use crate::cache::fixtures;
use crate::events::process_single_event;
use crate::gateway::{ChannelId, GuildId, Message, MessageId, TypingStart, UserId};
use crate::protocol::GuiEvent;
use crate::state::ClientState;
use crate::typing::TypingAggregator;

fn ready_state() -> ClientState {
    let mut state = ClientState::new(Duration::from_secs(10));
    let snapshot = process_single_event(&mut state, GuiEvent::Ready(Box::new(fixtures::ready())));
    assert!(snapshot.is_none());
    state
}

/// One second in the future: skew clamps to age zero, so arrival order
/// decides label order.
const FRESH: i64 = -1;

fn typing(channel: u64, guild: Option<u64>, user: u64, age_secs: i64) -> GuiEvent {
    GuiEvent::TypingStarted(TypingStart {
        channel_id: ChannelId(channel),
        guild_id: guild.map(GuildId),
        user_id: UserId(user),
        timestamp: Utc::now().timestamp() - age_secs,
        member: None,
    })
}

fn message(id: u64, channel: u64, author: u64, name: &str, content: &str) -> GuiEvent {
    GuiEvent::MessageReceived(Box::new(Message {
        id: MessageId(id),
        channel_id: ChannelId(channel),
        guild_id: Some(GuildId(10)),
        author: fixtures::user(author, name),
        member: None,
        content: content.to_string(),
        timestamp: Utc::now(),
        mentions: Vec::new(),
    }))
}

fn label(state: &mut ClientState, channel: u64) -> String {
    state
        .buffers
        .get_mut(&ChannelId(channel))
        .map(|b| b.typing.render(Instant::now()))
        .unwrap_or_default()
}

#[test]
fn test_ready_selects_first_channel() {
    let state = ready_state();
    assert!(state.is_connected);
    assert_eq!(state.active_channel, Some(ChannelId(100)));
    assert_eq!(state.switcher_entries.len(), 4);
}

#[test]
fn test_ready_keeps_remembered_channel() {
    let mut state = ClientState::new(Duration::from_secs(10));
    state.active_channel = Some(ChannelId(300));
    process_single_event(&mut state, GuiEvent::Ready(Box::new(fixtures::ready())));
    assert_eq!(state.active_channel, Some(ChannelId(300)));
}

#[test]
fn test_typing_start_shows_member_nick() {
    let mut state = ready_state();

    let snapshot = process_single_event(&mut state, typing(100, Some(10), 2, FRESH))
        .expect("typing change yields a snapshot");
    assert_eq!(snapshot.channel_id, ChannelId(100));
    assert_eq!(snapshot.seen.len(), 1);
    assert_eq!(snapshot.seen[0].0, UserId(2));

    assert_eq!(label(&mut state, 100), "Crab is typing...");
}

#[test]
fn test_typing_in_dm_uses_recipient_name() {
    let mut state = ready_state();
    process_single_event(&mut state, typing(300, None, 4, FRESH));
    assert_eq!(label(&mut state, 300), "dana is typing...");
}

#[test]
fn test_unknown_typist_falls_back_to_id() {
    let mut state = ready_state();
    process_single_event(&mut state, typing(101, Some(10), 77, FRESH));
    assert_eq!(label(&mut state, 101), "77 is typing...");
}

#[test]
fn test_local_user_and_stale_events_ignored() {
    let mut state = ready_state();

    assert!(process_single_event(&mut state, typing(100, Some(10), 1, FRESH)).is_none());
    assert!(process_single_event(&mut state, typing(100, Some(10), 2, 60)).is_none());
    assert_eq!(label(&mut state, 100), "");
}

#[test]
fn test_backdated_event_expires_sooner() {
    let mut state = ready_state();
    let snapshot = process_single_event(&mut state, typing(100, Some(10), 2, 4)).unwrap();

    let expiry = snapshot.next_expiry().unwrap();
    let remaining = expiry.saturating_duration_since(Instant::now());
    assert!(remaining <= Duration::from_secs(6), "remaining {:?}", remaining);
    assert!(remaining >= Duration::from_secs(4), "remaining {:?}", remaining);
}

#[test]
fn test_label_for_many_typists() {
    let mut state = ready_state();

    process_single_event(&mut state, typing(100, Some(10), 2, FRESH));
    process_single_event(&mut state, typing(100, Some(10), 3, FRESH));
    assert_eq!(label(&mut state, 100), "Crab and corro are typing...");

    process_single_event(&mut state, typing(100, Some(10), 5, FRESH));
    let three = label(&mut state, 100);
    assert!(three.ends_with(" are typing..."), "{}", three);
    assert!(three.contains(", "), "{}", three);

    process_single_event(&mut state, typing(100, Some(10), 6, FRESH));
    assert_eq!(label(&mut state, 100), "Several people are typing...");
}

#[test]
fn test_message_clears_author_typing() {
    let mut state = ready_state();
    process_single_event(&mut state, typing(100, Some(10), 2, FRESH));
    process_single_event(&mut state, typing(100, Some(10), 3, FRESH));

    let snapshot = process_single_event(&mut state, message(1, 100, 2, "ferris", "hi"))
        .expect("author stops typing");
    assert_eq!(snapshot.seen.len(), 1);
    assert_eq!(label(&mut state, 100), "corro is typing...");

    let buffer = &state.buffers[&ChannelId(100)];
    assert_eq!(buffer.messages.len(), 1);
    assert_eq!(buffer.messages[0].author, "Crab");
    assert_eq!(buffer.unread_count, 0);
}

#[test]
fn test_message_in_background_channel_counts_unread() {
    let mut state = ready_state();
    let snapshot = process_single_event(&mut state, message(1, 101, 3, "corro", "ping <@1>"));
    assert!(snapshot.is_none());

    let buffer = &state.buffers[&ChannelId(101)];
    assert_eq!(buffer.unread_count, 1);
    assert!(buffer.has_mention);
    assert_eq!(buffer.messages[0].text, "ping @me");

    state.switch_to_channel(ChannelId(101));
    assert_eq!(state.buffers[&ChannelId(101)].unread_count, 0);
}

#[test]
fn test_typing_stop_removes_user() {
    let mut state = ready_state();
    process_single_event(&mut state, typing(100, Some(10), 2, FRESH));

    let stop = GuiEvent::TypingStopped {
        channel_id: ChannelId(100),
        user_id: UserId(2),
    };
    let snapshot = process_single_event(&mut state, stop.clone()).unwrap();
    assert!(snapshot.seen.is_empty());

    // Nothing left to remove.
    assert!(process_single_event(&mut state, stop).is_none());
    assert!(process_single_event(
        &mut state,
        GuiEvent::TypingStopped {
            channel_id: ChannelId(999),
            user_id: UserId(2),
        }
    )
    .is_none());
}

#[test]
fn test_disconnect_clears_typing() {
    let mut state = ready_state();
    process_single_event(&mut state, typing(100, Some(10), 2, FRESH));
    process_single_event(&mut state, GuiEvent::Disconnected("bye".into()));

    assert!(!state.is_connected);
    assert_eq!(label(&mut state, 100), "");
    assert!(state.status_messages.iter().any(|(m, _)| m.contains("bye")));
}

#[test]
fn test_channel_delete_clears_active() {
    let mut state = ready_state();
    process_single_event(&mut state, GuiEvent::ChannelDeleted(ChannelId(100)));
    assert_eq!(state.active_channel, None);
    assert!(!state.buffers.contains_key(&ChannelId(100)));
    assert_eq!(state.switcher_entries.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_render_request_purges_expired_typists() {
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let aggregator = TypingAggregator::spawn(&Handle::current(), move |channel: ChannelId| {
        let _ = tx.send(GuiEvent::TypingRender(channel));
    });

    let mut state = ready_state();
    let snapshot = process_single_event(&mut state, typing(100, Some(10), 2, FRESH))
        .expect("typing start yields a snapshot");
    aggregator.submit(snapshot);

    let render = rx.recv().await.expect("aggregator requests a render");
    assert!(matches!(render, GuiEvent::TypingRender(ChannelId(100))));
    assert_eq!(state.buffers[&ChannelId(100)].typing.len(), 1);

    assert!(process_single_event(&mut state, render).is_none());
    assert!(state.buffers[&ChannelId(100)].typing.is_empty());
}

#[test]
fn test_render_request_for_unknown_channel_is_ignored() {
    let mut state = ready_state();
    process_single_event(&mut state, typing(100, Some(10), 2, FRESH));
    assert!(process_single_event(&mut state, GuiEvent::TypingRender(ChannelId(999))).is_none());
    assert_eq!(state.buffers[&ChannelId(100)].typing.len(), 1);
    assert!(!state.buffers.contains_key(&ChannelId(999)));
}
